//! `cfnwatch-core`: live tail of a CloudFormation stack and every stack
//! nested inside it.
//!
//! # Architecture
//!
//! ```text
//! Monitor ──► StackWatcher(root) ─┬─► RateLimiter::tick()      (one shared interval)
//!                                 ├─► EventSource::list_events (newest first)
//!                                 ├─► EventSink::emit          (oldest first, once)
//!                                 └─► nested stack event
//!                                        └─► AdmissionRegistry::try_admit
//!                                               └─► StackWatcher(child) ─► ...
//! ```
//!
//! The orchestration service and the terminal are behind the
//! [`EventSource`] and [`EventSink`] traits; the AWS implementation lives in
//! `cfnwatch-aws`.

pub mod config;
pub mod error;
pub mod format;
pub mod monitor;
pub mod rate;
pub mod registry;
pub mod sink;
pub mod source;
pub mod types;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testing;

pub use config::WatchConfig;
pub use error::{ConfigError, Result, WatchError};
pub use monitor::Monitor;
pub use rate::RateLimiter;
pub use registry::AdmissionRegistry;
pub use sink::EventSink;
pub use source::EventSource;
pub use types::{StackEvent, NESTED_STACK_TYPE};
pub use watcher::StackWatcher;
