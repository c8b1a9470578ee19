use std::error::Error;
use std::fmt::Debug;

use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use cfnwatch_core::WatchError;

/// Splits SDK failures along the watcher's propagation policy.
///
/// Only an error response from the service itself (throttling, unknown
/// stack, access denied) is recoverable. Everything else means the request
/// never produced a usable answer: dispatch or timeout failures, a response
/// that could not be parsed, a request that could not be built.
pub(crate) fn classify<E, R>(err: SdkError<E, R>) -> WatchError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(ctx) => service_error(ctx.err()),
        other => WatchError::fatal(other),
    }
}

pub(crate) fn service_error<E: ProvideErrorMetadata>(err: &E) -> WatchError {
    WatchError::service(
        err.code().unwrap_or("Unknown"),
        err.message().unwrap_or_default(),
    )
}
