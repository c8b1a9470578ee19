//! `cfnwatch-aws`: the CloudFormation side of `cfnwatch`.
//!
//! Implements [`cfnwatch_core::EventSource`] with the official SDK. Paging,
//! signing and transport retries stay with the SDK; this crate only maps
//! events onto the core model and sorts failures into recoverable service
//! errors and fatal ones.

mod convert;
mod error;
pub mod source;

pub use source::CloudFormationSource;
