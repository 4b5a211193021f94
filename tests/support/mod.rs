//! Shared test support: an in-memory form driver
//!
//! `MockFormDriver` renders a fixed set of fields and records every
//! interaction in a shared `MockState`, so tests can assert which options
//! were activated, how often the form was submitted, and that the session
//! was released.

use async_trait::async_trait;
use formpilot::form::{FieldHandle, FieldKind, FormDriver, FormError, OptionHandle};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockField {
    pub title: Option<String>,
    pub kind: FieldKind,
    pub options: Vec<String>,
}

impl MockField {
    pub fn single(title: Option<&str>, options: &[&str]) -> Self {
        Self {
            title: title.map(String::from),
            kind: FieldKind::SingleSelect,
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn multi(title: Option<&str>, options: &[&str]) -> Self {
        Self {
            title: title.map(String::from),
            kind: FieldKind::MultiSelect,
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn unknown(title: Option<&str>) -> Self {
        Self {
            title: title.map(String::from),
            kind: FieldKind::Unknown,
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    opened: Vec<String>,
    activated: Vec<String>,
    submits: u32,
    closed: bool,
}

/// Interaction journal shared between a driver and its test
#[derive(Debug, Clone, Default)]
pub struct MockState(Arc<Mutex<Inner>>);

impl MockState {
    pub fn opened(&self) -> Vec<String> {
        self.0.lock().unwrap().opened.clone()
    }

    /// Activated option ids, formatted `<field index>-<option index>`
    pub fn activated(&self) -> Vec<String> {
        self.0.lock().unwrap().activated.clone()
    }

    pub fn submits(&self) -> u32 {
        self.0.lock().unwrap().submits
    }

    pub fn closed(&self) -> bool {
        self.0.lock().unwrap().closed
    }
}

pub struct MockFormDriver {
    fields: Vec<MockField>,
    state: MockState,
    /// Number of initial submit calls that fail with `MissingSubmit`
    fail_submits: u32,
}

impl MockFormDriver {
    pub fn new(fields: Vec<MockField>) -> (Self, MockState) {
        let state = MockState::default();
        (
            Self {
                fields,
                state: state.clone(),
                fail_submits: 0,
            },
            state,
        )
    }

    pub fn failing_submits(mut self, count: u32) -> Self {
        self.fail_submits = count;
        self
    }

    fn field(&self, handle: &FieldHandle) -> &MockField {
        let index: usize = handle.id.parse().expect("mock field handle");
        &self.fields[index]
    }
}

#[async_trait]
impl FormDriver for MockFormDriver {
    async fn open(&mut self, url: &str) -> Result<(), FormError> {
        self.state.0.lock().unwrap().opened.push(url.to_string());
        Ok(())
    }

    async fn fields(&mut self) -> Result<Vec<FieldHandle>, FormError> {
        Ok((0..self.fields.len())
            .map(|index| FieldHandle {
                id: index.to_string(),
            })
            .collect())
    }

    async fn title(&mut self, field: &FieldHandle) -> Result<Option<String>, FormError> {
        Ok(self.field(field).title.clone())
    }

    async fn probe(&mut self, field: &FieldHandle) -> Result<FieldKind, FormError> {
        Ok(self.field(field).kind)
    }

    async fn options(
        &mut self,
        field: &FieldHandle,
        kind: FieldKind,
    ) -> Result<Vec<OptionHandle>, FormError> {
        let mock = self.field(field);
        if mock.kind != kind {
            return Ok(Vec::new());
        }
        Ok(mock
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| OptionHandle {
                id: format!("{}-{}", field.id, index),
                label: label.clone(),
            })
            .collect())
    }

    async fn activate(&mut self, option: &OptionHandle) -> Result<(), FormError> {
        self.state
            .0
            .lock()
            .unwrap()
            .activated
            .push(option.id.clone());
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), FormError> {
        if self.fail_submits > 0 {
            self.fail_submits -= 1;
            return Err(FormError::MissingSubmit);
        }
        self.state.0.lock().unwrap().submits += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), FormError> {
        self.state.0.lock().unwrap().closed = true;
        Ok(())
    }
}
