//! Searcher sessions and the request-scoped session cache.
//!
//! A [`SearcherSession`] is an open read handle (reader + searcher) against
//! one document type's index. The [`SearcherCache`] guarantees at most one
//! open session per document type within a request scope: repeated
//! retrievals return the identical session until the cache is closed.

use std::{cell::RefCell, path::Path, sync::Arc};

use tantivy::{Index, IndexReader, Searcher, directory::MmapDirectory};
use tracing::debug;

use crate::error::SearchError;

/// An open read session against one index: a reader and its searcher,
/// created together and invalidated together.
pub struct SearcherSession {
    /// The reader the searcher was acquired from.
    reader: IndexReader,
    /// The searcher over the reader's current index generation.
    searcher: Searcher,
}

impl SearcherSession {
    /// Opens a session against an index.
    pub fn open(index: &Index) -> Result<Self, SearchError> {
        let reader = index.reader().map_err(|e| SearchError::session(&e))?;
        let searcher = reader.searcher();
        Ok(Self { reader, searcher })
    }

    /// Opens a session against an index directory on disk.
    pub fn open_at(path: &Path) -> Result<Self, SearchError> {
        if !path.exists() {
            return Err(SearchError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }
        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            SearchError::open_index(path.to_path_buf(), &err)
        })?;
        let index =
            Index::open(dir).map_err(|e| SearchError::open_index(path.to_path_buf(), &e))?;
        Self::open(&index)
    }

    /// The searcher for this session.
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// The reader this session was opened from.
    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }
}

/// The document type a cached session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSlot {
    /// Sessions over asset documents.
    Assets,
    /// Sessions over change-history documents.
    Changes,
}

impl SessionSlot {
    /// The slot's index in the cache array.
    fn index(self) -> usize {
        match self {
            Self::Assets => 0,
            Self::Changes => 1,
        }
    }
}

/// Request-scoped cache of searcher sessions.
///
/// Each slot moves Uninitialized → Open (first retrieve) → Closed
/// (`close_sessions`) → Uninitialized (next retrieve). The two slots are
/// populated independently but closed together. Within one open period,
/// every retrieve returns the identical `Arc`.
#[derive(Default)]
pub struct SearcherCache {
    /// One optional open session per document type.
    slots: [RefCell<Option<Arc<SearcherSession>>>; 2],
}

impl SearcherCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the open session for `slot`, constructing it with `factory`
    /// on first use.
    pub fn retrieve<F>(&self, slot: SessionSlot, factory: F) -> Result<Arc<SearcherSession>, SearchError>
    where
        F: FnOnce() -> Result<SearcherSession, SearchError>,
    {
        let mut cell = self.slots[slot.index()].borrow_mut();
        if let Some(session) = cell.as_ref() {
            return Ok(Arc::clone(session));
        }

        debug!(?slot, "opening searcher session");
        let session = Arc::new(factory()?);
        *cell = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Returns true when `slot` currently holds an open session.
    pub fn is_open(&self, slot: SessionSlot) -> bool {
        self.slots[slot.index()].borrow().is_some()
    }

    /// Closes both slots, dropping any held sessions. Closing a cache that
    /// was never opened is a no-op.
    pub fn close_sessions(&self) {
        for (index, cell) in self.slots.iter().enumerate() {
            let mut slot = cell.borrow_mut();
            if slot.take().is_some() {
                debug!(slot = index, "closed searcher session");
            }
        }
    }
}
