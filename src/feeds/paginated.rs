//! Cursor-paginated feed of all transactions

use std::sync::{Arc, Mutex};

use log::debug;

use super::Tracked;
use crate::cache::{Endpoint, RequestCache, RequestSignature, lock};
use crate::client::{Cursor, FeedApi, Page, Transaction};
use crate::error::Result;

#[derive(Debug, Default)]
struct PageState {
    data: Option<Vec<Transaction>>,
    /// `None` until a page has been fetched, then the latest page's cursor.
    next_page: Option<Option<Cursor>>,
}

/// Accumulates transaction pages into one list in arrival order.
pub struct PaginatedTransactionFeed<C: FeedApi> {
    cache: Arc<RequestCache<C>>,
    state: Mutex<Tracked<PageState>>,
}

impl<C: FeedApi> PaginatedTransactionFeed<C> {
    pub fn new(cache: Arc<RequestCache<C>>) -> Self {
        Self {
            cache,
            state: Mutex::new(Tracked::default()),
        }
    }

    /// Fetch the next page.
    ///
    /// Starts from the first page after an invalidation, otherwise continues
    /// from the recorded cursor. Does nothing once the last page is in.
    pub async fn fetch_all(&self) -> Result<()> {
        let (generation, requested) = {
            let state = lock(&self.state);
            let requested = state.get().next_page.clone();
            if let Some(None) = requested {
                debug!("No further transaction pages");
                return Ok(());
            }
            (state.generation(), requested)
        };

        let cursor = requested.clone().flatten();
        let signature = RequestSignature::paginated_transactions(cursor.as_ref());
        let page: Page<Transaction> = self.cache.fetch(&signature).await?;

        let mut state = lock(&self.state);
        // Invalidated, or a concurrent fetch already consumed this cursor
        if state.generation() != generation || state.get().next_page != requested {
            debug!("Discarding stale {}", signature);
            return Ok(());
        }
        state.apply(generation, |s| {
            let Page { data, next_page } = page;
            match s.data.as_mut() {
                Some(existing) if requested.is_some() => existing.extend(data),
                _ => s.data = Some(data),
            }
            s.next_page = Some(next_page);
        });
        debug!("Applied {}", signature);
        Ok(())
    }

    /// Drop the accumulated list and forget the cursor.
    pub fn invalidate_data(&self) {
        lock(&self.state).reset();
    }

    /// Drop cached page responses.
    pub fn clear_cached_results(&self) {
        self.cache.clear_endpoint(Endpoint::PaginatedTransactions);
    }

    /// Whether a page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.cache.is_loading_endpoint(Endpoint::PaginatedTransactions)
    }

    /// Accumulated transactions, or `None` when invalidated.
    pub fn data(&self) -> Option<Vec<Transaction>> {
        lock(&self.state).get().data.clone()
    }

    /// `None` if nothing was fetched since the last invalidation, otherwise
    /// the latest page's cursor (itself `None` on the last page).
    #[allow(dead_code)]
    pub fn next_page(&self) -> Option<Option<Cursor>> {
        lock(&self.state).get().next_page.clone()
    }

    /// Data is present and the latest page points at another one.
    pub fn has_next_page(&self) -> bool {
        let state = lock(&self.state);
        let s = state.get();
        s.data.is_some() && matches!(s.next_page, Some(Some(_)))
    }
}
