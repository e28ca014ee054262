//! Element model.
//!
//! An [`Element`] is one declared piece of content. Its category-specific
//! fields live in a statically typed [`ElementBody`] owned by the generator
//! that defines the category; they are flattened to a generic JSON map only
//! when the element is serialized into the manifest.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::capture::{ActionCapture, ActionList};
use crate::diagnostic::ModError;
use crate::normalize::normalize_path;

/// Category-specific element data.
pub trait ElementBody: fmt::Debug + Any {
    /// Fixed tag for the category (e.g. `"item"`).
    fn kind(&self) -> &'static str;

    /// Event names handlers may be registered for.
    fn event_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Flattened properties for the manifest.
    fn properties(&self) -> Map<String, Value>;

    fn as_any(&self) -> &dyn Any;
}

/// One declared content unit.
#[derive(Debug)]
pub struct Element {
    name: String,
    body: Box<dyn ElementBody>,
    events: BTreeMap<String, Vec<ActionList>>,
}

/// Serialized form of an element, as embedded in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub kind: String,
    pub name: String,
    pub properties: Map<String, Value>,
    pub events: BTreeMap<String, Vec<ActionList>>,
}

impl Element {
    /// Wraps a validated body. The name is normalized as a resource path,
    /// falling back to the category's kind.
    pub fn new(name: &str, body: impl ElementBody) -> Self {
        let kind = body.kind();
        let events = body
            .event_names()
            .iter()
            .map(|event| (event.to_string(), Vec::new()))
            .collect();

        Self {
            name: normalize_path(name, kind),
            body: Box::new(body),
            events,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.body.kind()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Downcasts the body to a concrete category type.
    pub fn body<T: ElementBody>(&self) -> Option<&T> {
        self.body.as_any().downcast_ref::<T>()
    }

    /// Captured action lists for one event, in registration order.
    pub fn events(&self, event: &str) -> &[ActionList] {
        self.events.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn event_table(&self) -> &BTreeMap<String, Vec<ActionList>> {
        &self.events
    }

    fn slot(&mut self, event: &str) -> Result<&mut Vec<ActionList>, ModError> {
        let kind = self.body.kind();
        let allowed = self.body.event_names();
        self.events
            .get_mut(event)
            .ok_or_else(|| ModError::UnknownEvent {
                kind: kind.to_string(),
                event: event.to_string(),
                allowed: if allowed.is_empty() {
                    "none".to_string()
                } else {
                    allowed.join(", ")
                },
            })
    }

    /// Runs `handler` once under capture and appends the recorded actions to
    /// the event's slot.
    pub fn register_event<F>(
        &mut self,
        capture: &ActionCapture,
        event: &str,
        handler: F,
    ) -> Result<(), ModError>
    where
        F: FnOnce(),
    {
        // Reject unknown events before running the handler.
        self.slot(event)?;
        let actions = capture.capture(handler);
        self.slot(event)?.push(actions);
        Ok(())
    }

    /// Fallible variant of [`register_event`](Self::register_event). Nothing is
    /// appended when the handler fails.
    pub fn try_register_event<F>(
        &mut self,
        capture: &ActionCapture,
        event: &str,
        handler: F,
    ) -> Result<(), ModError>
    where
        F: FnOnce() -> Result<(), ModError>,
    {
        self.slot(event)?;
        let actions = capture.try_capture(handler)?;
        self.slot(event)?.push(actions);
        Ok(())
    }

    pub fn serialize(&self) -> ElementRecord {
        ElementRecord {
            kind: self.kind().to_string(),
            name: self.name.clone(),
            properties: self.body.properties(),
            events: self.events.clone(),
        }
    }
}
