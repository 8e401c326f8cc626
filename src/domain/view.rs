use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable identity of a field inside a [`View`]; rows are keyed by it, never by position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(value: u32) -> Self {
        FieldId(value)
    }
}

/// The document being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: u32,
    #[schemars(length(min = 1))]
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl View {
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    /// First id that appears more than once, if any.
    pub fn duplicate_field_id(&self) -> Option<FieldId> {
        let mut seen = std::collections::HashSet::with_capacity(self.fields.len());
        self.fields
            .iter()
            .map(|field| field.id)
            .find(|id| !seen.insert(*id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    #[serde(default)]
    pub show_in_grid: bool,
    #[serde(default)]
    pub show_in_panel: bool,
    #[serde(default)]
    pub show_in_filter: bool,
    #[serde(default)]
    pub show_in_browser: bool,
    #[serde(default)]
    pub part_of_key: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub foreign_key: bool,
    #[serde(default)]
    pub primary_name: bool,
}

impl Field {
    /// A field with every flag cleared.
    pub fn new(id: impl Into<FieldId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            show_in_grid: false,
            show_in_panel: false,
            show_in_filter: false,
            show_in_browser: false,
            part_of_key: false,
            required: false,
            read_only: false,
            foreign_key: false,
            primary_name: false,
        }
    }
}
