//! Classified intent of a caller command and the update payload model.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::query::QuerySpec;
use crate::record::{self, IncidentState, RecordRef};

/// An update named a field outside the recognized set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized update field: {0}")]
pub struct UnknownField(pub String);

/// Field → new-value mapping for a mutation. Keys are restricted to the
/// recognized update set; a `BTreeMap` keeps iteration order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpdatePayload {
    fields: BTreeMap<String, String>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Unrecognized field names are rejected, never dropped.
    pub fn set(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        if !record::is_update_field(field) {
            return Err(UnknownField(field.to_string()));
        }
        self.fields.insert(field.to_string(), value.into());
        Ok(())
    }

    /// Set the incident state to a known lifecycle code.
    pub fn set_state(&mut self, state: IncidentState) {
        self.fields
            .insert("state".to_string(), state.code().to_string());
    }

    pub fn from_pairs<I, V>(pairs: I) -> Result<Self, UnknownField>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<String>,
    {
        let mut payload = Self::new();
        for (field, value) in pairs {
            payload.set(field, value)?;
        }
        Ok(payload)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Request body for the Table API PATCH.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.fields).unwrap_or_default()
    }
}

/// The resolved purpose of a caller command. Exactly one variant per
/// classification; `Unknown` means the text could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Search { table: String, spec: QuerySpec },
    Update { record: RecordRef, payload: UpdatePayload },
    Unknown { raw: String },
}
