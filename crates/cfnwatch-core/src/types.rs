use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource type reported for a stack nested inside another stack.
pub const NESTED_STACK_TYPE: &str = "AWS::CloudFormation::Stack";

// ---------------------------------------------------------------------------
// StackEvent
// ---------------------------------------------------------------------------

/// One lifecycle event of one resource within a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvent {
    pub event_id: String,
    /// Unique id (ARN) of the stack the event belongs to.
    pub stack_id: String,
    pub stack_name: String,
    pub timestamp: DateTime<Utc>,
    pub logical_resource_id: String,
    /// For a nested stack this is the identifier of the child stack.
    pub physical_resource_id: String,
    pub resource_type: String,
    pub resource_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
}

impl StackEvent {
    pub fn is_nested_stack(&self) -> bool {
        self.resource_type == NESTED_STACK_TYPE
    }

    /// A stack reports its own status changes as a resource of the stack
    /// type whose physical id is the stack itself.
    pub fn is_own_stack(&self) -> bool {
        self.physical_resource_id == self.stack_id
    }
}
