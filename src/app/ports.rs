use async_trait::async_trait;

use crate::error::Result;

/// Source of shift detail pages
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// HTML of the detail page for `shift_id`.
    async fn fetch_detail(&self, shift_id: &str) -> Result<String>;
}
