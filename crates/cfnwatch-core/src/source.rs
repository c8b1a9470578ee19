use async_trait::async_trait;

use crate::types::StackEvent;
use crate::Result;

/// Read side of the orchestration service.
///
/// One call is one logical request: pagination, authentication and
/// transport retries are the implementation's business. Events come back
/// newest first, the way `DescribeStackEvents` returns them.
#[async_trait]
pub trait EventSource: Send + Sync + 'static {
    async fn list_events(&self, stack: &str) -> Result<Vec<StackEvent>>;
}
