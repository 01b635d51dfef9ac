//! Paginated listing with delete confirmation.

use std::marker::PhantomData;

use cms_core::listing::Listing;
use cms_core::notice::Notice;
use cms_core::query::ListQuery;
use cms_core::resource::Resource;
use cms_core::session::Credentials;

use super::{require_session, Redirect};
use crate::api::{new_idempotency_key, CmsApi};
use crate::error::ClientError;
use crate::session::SessionStore;

pub struct ListingScreen<R: Resource> {
    api: CmsApi,
    credentials: Credentials,
    listing: Listing<R::Record>,
    extra_query: Vec<(String, String)>,
    /// Idempotency key of the open delete confirmation.
    delete_key: Option<String>,
    _resource: PhantomData<R>,
}

impl<R: Resource> ListingScreen<R> {
    /// Open the listing.  Nothing is loaded until [`load`](Self::load).
    pub fn mount(api: CmsApi, store: &SessionStore, limit: u32) -> Result<Self, Redirect> {
        let credentials = require_session(store, R::ROUTE)?;
        Ok(Self::with_credentials(api, credentials, limit))
    }

    /// A listing opened on behalf of a screen that already holds
    /// credentials.
    pub(crate) fn with_credentials(api: CmsApi, credentials: Credentials, limit: u32) -> Self {
        Self {
            api,
            credentials,
            listing: Listing::new(limit),
            extra_query: Vec::new(),
            delete_key: None,
            _resource: PhantomData,
        }
    }

    /// Add a backend query parameter sent with every page request.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_query.push((key.into(), value.into()));
        self
    }

    pub fn listing(&self) -> &Listing<R::Record> {
        &self.listing
    }

    /// Load `page`.  On failure the error is logged and returned, and the
    /// previously loaded rows stay in place.
    pub async fn load(&mut self, page: u32) -> Result<(), ClientError> {
        let page = page.max(1);
        let credentials = R::AUTHENTICATED_READS.then_some(&self.credentials);
        let result = self
            .api
            .list::<R>(credentials, page, self.listing.limit(), &self.extra_query)
            .await;

        match result {
            Ok(loaded) => {
                self.listing.apply(page, loaded);
                tracing::debug!(
                    resource = R::PATH,
                    page = self.listing.current_page(),
                    total_pages = self.listing.total_pages(),
                    rows = self.listing.items().len(),
                    "Listing loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(resource = R::PATH, page, error = %e, "Failed to load listing");
                Err(e)
            }
        }
    }

    pub async fn next(&mut self) -> Result<(), ClientError> {
        self.load(self.listing.next_page()).await
    }

    pub async fn previous(&mut self) -> Result<(), ClientError> {
        self.load(self.listing.previous_page()).await
    }

    /// Rows of the loaded page as displayed under `query`.
    pub fn view(&self, query: &ListQuery) -> Vec<&R::Record> {
        self.listing.view(query)
    }

    /// Open the delete confirmation for `id`.  Confirming it again after a
    /// failure reuses the same idempotency key.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.listing.request_delete(id);
        self.delete_key = Some(new_idempotency_key());
    }

    pub fn cancel_delete(&mut self) {
        self.listing.cancel_delete();
        self.delete_key = None;
    }

    /// Delete the record awaiting confirmation.
    ///
    /// On success the row is dropped locally and the confirmation closes;
    /// on failure the row stays and an error notice is returned.
    pub async fn confirm_delete(&mut self) -> Notice {
        let Some(id) = self.listing.pending_delete().map(str::to_string) else {
            return Notice::error("No record selected for deletion.");
        };

        let key = self
            .delete_key
            .get_or_insert_with(new_idempotency_key)
            .clone();

        match self.api.delete::<R>(&self.credentials, &id, &key).await {
            Ok(()) => {
                self.listing.remove(&id);
                self.delete_key = None;
                tracing::info!(resource = R::PATH, id = %id, "Record deleted");
                Notice::deleted(R::LABEL)
            }
            Err(e) => {
                tracing::error!(resource = R::PATH, id = %id, error = %e, "Delete failed");
                let message = e
                    .backend_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Failed to delete {}.", R::LABEL.to_lowercase()));
                Notice::error(message)
            }
        }
    }
}
