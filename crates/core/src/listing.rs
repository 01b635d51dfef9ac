//! In-memory state of a resource listing screen.
//!
//! The backend is authoritative; a [`Listing`] only caches the page most
//! recently loaded.  Deletes are applied optimistically by dropping the
//! row locally once the backend has confirmed them.

use crate::envelope::Page;
use crate::query::ListQuery;
use crate::resource::Record;
use crate::types::RecordId;

#[derive(Debug, Clone)]
pub struct Listing<R: Record> {
    items: Vec<R>,
    current_page: u32,
    total_pages: u32,
    limit: u32,
    loaded: bool,
    pending_delete: Option<RecordId>,
}

impl<R: Record> Listing<R> {
    /// An empty listing on page 1 with `limit` rows per page.
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            limit: limit.max(1),
            loaded: false,
            pending_delete: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether any page has been loaded successfully yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the cached rows with a freshly loaded `page`.
    ///
    /// Rows beyond `limit` are dropped, so a backend that ignores the
    /// `limit` parameter never overflows the table.
    pub fn apply(&mut self, requested_page: u32, page: Page<R>) {
        let mut items = page.items;
        items.truncate(self.limit as usize);
        self.items = items;
        self.total_pages = page.total_pages.max(1);
        self.current_page = page
            .current_page
            .unwrap_or(requested_page)
            .clamp(1, self.total_pages);
        self.loaded = true;
    }

    /// Clamp a requested page number to `[1, total_pages]`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    pub fn next_page(&self) -> u32 {
        self.clamp_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&self) -> u32 {
        self.clamp_page(self.current_page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Open the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: impl Into<RecordId>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Drop the row with `id` after the backend confirmed the delete and
    /// close the confirmation.  Returns the removed record.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        self.pending_delete = None;
        let index = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Rows as displayed under `query` (local filter and sort only).
    pub fn view(&self, query: &ListQuery) -> Vec<&R> {
        query.apply(&self.items)
    }
}
