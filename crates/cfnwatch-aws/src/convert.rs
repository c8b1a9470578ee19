use aws_sdk_cloudformation::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudformation::types::StackEvent as AwsStackEvent;
use chrono::{DateTime, Utc};
use cfnwatch_core::{StackEvent, WatchError};

pub(crate) fn to_utc(ts: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

/// Maps an SDK event onto the core model. An event without a timestamp
/// cannot be ordered, so the whole response is treated as malformed.
pub(crate) fn convert(event: &AwsStackEvent) -> Result<StackEvent, WatchError> {
    let event_id = event.event_id().unwrap_or_default();
    let timestamp = event.timestamp().and_then(to_utc).ok_or_else(|| {
        WatchError::fatal(format!(
            "DescribeStackEvents returned event '{event_id}' without a valid timestamp"
        ))
    })?;

    Ok(StackEvent {
        event_id: event_id.to_string(),
        stack_id: event.stack_id().unwrap_or_default().to_string(),
        stack_name: event.stack_name().unwrap_or_default().to_string(),
        timestamp,
        logical_resource_id: event.logical_resource_id().unwrap_or_default().to_string(),
        physical_resource_id: event.physical_resource_id().unwrap_or_default().to_string(),
        resource_type: event.resource_type().unwrap_or_default().to_string(),
        resource_status: event
            .resource_status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        status_reason: event.resource_status_reason().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudformation::types::ResourceStatus;

    #[test]
    fn whole_seconds_convert() {
        let ts = AwsDateTime::from_secs(1_792_152_005);
        let utc = to_utc(&ts).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-10-16T12:00:05+00:00");
    }

    #[test]
    fn subsecond_precision_is_kept() {
        let ts = AwsDateTime::from_fractional_secs(1_792_152_005, 0.25);
        let utc = to_utc(&ts).unwrap();
        assert_eq!(utc.timestamp_subsec_millis(), 250);
        assert!(utc > to_utc(&AwsDateTime::from_secs(1_792_152_005)).unwrap());
    }

    #[test]
    fn event_without_timestamp_is_fatal() {
        let event = AwsStackEvent::builder()
            .event_id("e-1")
            .stack_name("app")
            .logical_resource_id("Assets")
            .resource_type("AWS::S3::Bucket")
            .build();
        let err = convert(&event).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("'e-1'"));
    }

    #[test]
    fn missing_fields_become_empty() {
        let event = AwsStackEvent::builder()
            .timestamp(AwsDateTime::from_secs(1_792_152_005))
            .resource_type("AWS::CloudFormation::Stack")
            .build();
        let converted = convert(&event).unwrap();
        assert_eq!(converted.resource_type, "AWS::CloudFormation::Stack");
        assert_eq!(converted.physical_resource_id, "");
        assert_eq!(converted.resource_status, "");
        assert_eq!(converted.event_id, "");
        assert_eq!(converted.status_reason, None);
        assert_eq!(converted.timestamp.to_rfc3339(), "2026-10-16T12:00:05+00:00");
    }

    #[test]
    fn status_and_reason_are_carried_over() {
        let event = AwsStackEvent::builder()
            .timestamp(AwsDateTime::from_secs(1_792_152_005))
            .logical_resource_id("Assets")
            .physical_resource_id("app-assets-1x2y")
            .resource_status(ResourceStatus::CreateFailed)
            .resource_status_reason("Bucket name already exists")
            .build();
        let converted = convert(&event).unwrap();
        assert_eq!(converted.resource_status, "CREATE_FAILED");
        assert_eq!(
            converted.status_reason.as_deref(),
            Some("Bucket name already exists")
        );
        assert_eq!(converted.physical_resource_id, "app-assets-1x2y");
    }
}
