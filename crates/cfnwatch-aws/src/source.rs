use async_trait::async_trait;
use aws_sdk_cloudformation::Client;
use cfnwatch_core::{EventSource, Result, StackEvent};
use tracing::trace;

use crate::convert::convert;
use crate::error::classify;

/// [`EventSource`] backed by `DescribeStackEvents`. Each call fetches the
/// first page only, newest events first.
#[derive(Clone, Debug)]
pub struct CloudFormationSource {
    client: Client,
}

impl CloudFormationSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client configured from the standard AWS environment: region,
    /// profile, credentials chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl EventSource for CloudFormationSource {
    async fn list_events(&self, stack: &str) -> Result<Vec<StackEvent>> {
        let output = self
            .client
            .describe_stack_events()
            .stack_name(stack)
            .send()
            .await
            .map_err(classify)?;

        let events = output.stack_events();
        trace!(stack, count = events.len(), "describe stack events");
        events.iter().map(convert).collect()
    }
}
