//! Paginated chat history retrieval.
//!
//! VK caps a single `messages.getHistory` call at 200 items, so the full
//! history is assembled page by page. A fixed inter-request delay keeps the
//! client under the API rate limit; it is discipline, not backoff — any page
//! failure aborts the run with no retry.

use std::thread;
use std::time::Duration;

use crate::api::{HistoryItem, VkApi};
use crate::error::Result;

/// Maximum page size `messages.getHistory` accepts.
pub const PAGE_SIZE: u32 = 200;

/// Delay between consecutive page requests.
pub const REQUEST_DELAY: Duration = Duration::from_millis(400);

/// Fetches the complete history of a conversation page by page.
///
/// # Example
///
/// ```rust,no_run
/// use vkpack::api::{VkApi, VkClient};
/// use vkpack::export::HistoryPaginator;
///
/// let client = VkClient::new("token");
/// let history = HistoryPaginator::new().fetch_all(&client, 2000000001)?;
/// # Ok::<(), vkpack::ExportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HistoryPaginator {
    page_size: u32,
    delay: Duration,
}

impl HistoryPaginator {
    /// Creates a paginator with the standard page size and request delay.
    pub fn new() -> Self {
        Self {
            page_size: PAGE_SIZE,
            delay: REQUEST_DELAY,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the inter-request delay. Tests use `Duration::ZERO`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fetches every history item of the conversation, oldest first.
    ///
    /// Requests pages at increasing offsets until a page comes back empty.
    /// A zero-message history yields an empty vec, which callers must treat
    /// as "nothing to write", not an error. Any page failure is fatal.
    pub fn fetch_all(&self, api: &dyn VkApi, peer_id: i64) -> Result<Vec<HistoryItem>> {
        let mut items: Vec<HistoryItem> = Vec::new();
        let mut offset = 0;

        tracing::info!(peer_id, "loading chat history");
        loop {
            let page = api.history_page(peer_id, offset, self.page_size)?;
            if page.is_empty() {
                tracing::info!(total = items.len(), "all available messages loaded");
                break;
            }

            items.extend(page);
            tracing::info!(total = items.len(), "messages loaded so far");

            thread::sleep(self.delay);
            offset += self.page_size;
        }

        Ok(items)
    }
}

impl Default for HistoryPaginator {
    fn default() -> Self {
        Self::new()
    }
}
