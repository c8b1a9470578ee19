use std::sync::Arc;

use anyhow::{Context, Result};
use cfnwatch_aws::CloudFormationSource;
use cfnwatch_core::{Monitor, WatchConfig};
use tracing::info;

use crate::output::TerminalSink;
use crate::shutdown;

/// Tails `stack` and its nested stacks until a signal or a fatal error.
pub fn run(stack: &str) -> Result<()> {
    let config = WatchConfig::from_env().context("invalid configuration")?;
    info!(
        poll_interval_ms = config.poll_interval_ms,
        look_back_secs = config.look_back_secs,
        "starting"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let source = CloudFormationSource::from_env().await;
        let monitor = Monitor::new(config, Arc::new(source), Arc::new(TerminalSink));
        monitor.watch(stack);
        monitor
            .run_until(shutdown::wait_for_signal())
            .await
            .with_context(|| format!("watching stack '{stack}'"))
    })
}
