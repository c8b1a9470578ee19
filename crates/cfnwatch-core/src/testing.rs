//! In-memory fakes for the service and the terminal.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::sink::EventSink;
use crate::source::EventSource;
use crate::types::{StackEvent, NESTED_STACK_TYPE};
use crate::Result;

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_792_152_000 + secs, 0).unwrap()
}

pub(crate) fn event(id: &str, secs: i64, logical: &str, resource_type: &str, status: &str) -> StackEvent {
    StackEvent {
        event_id: id.to_string(),
        stack_id: "app-arn".to_string(),
        stack_name: "app".to_string(),
        timestamp: at(secs),
        logical_resource_id: logical.to_string(),
        physical_resource_id: format!("{logical}-physical"),
        resource_type: resource_type.to_string(),
        resource_status: status.to_string(),
        status_reason: None,
    }
}

pub(crate) fn nested(id: &str, secs: i64, logical: &str, child: &str, status: &str) -> StackEvent {
    let mut ev = event(id, secs, logical, NESTED_STACK_TYPE, status);
    ev.physical_resource_id = child.to_string();
    ev
}

/// Replays scripted responses per stack, oldest script entry first. Once a
/// stack's script is used up every further call returns an empty page.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Result<Vec<StackEvent>>>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, stack: &str, response: Result<Vec<StackEvent>>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(stack.to_string())
            .or_default()
            .push_back(response);
    }

    pub(crate) fn calls(&self, stack: &str) -> usize {
        self.calls.lock().unwrap().get(stack).copied().unwrap_or(0)
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn list_events(&self, stack: &str) -> Result<Vec<StackEvent>> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(stack.to_string())
            .or_default() += 1;
        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(stack)
            .and_then(|script| script.pop_front());
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Record {
    Watching(String),
    Event(String, StackEvent),
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    records: Mutex<Vec<Record>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub(crate) fn watched(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Watching(stack) => Some(stack),
                Record::Event(..) => None,
            })
            .collect()
    }

    /// Event ids emitted for `stack`, in emission order.
    pub(crate) fn event_ids(&self, stack: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Event(s, ev) if s == stack => Some(ev.event_id),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn watching(&self, stack: &str) {
        self.records
            .lock()
            .unwrap()
            .push(Record::Watching(stack.to_string()));
    }

    fn emit(&self, stack: &str, event: &StackEvent) {
        self.records
            .lock()
            .unwrap()
            .push(Record::Event(stack.to_string(), event.clone()));
    }
}
