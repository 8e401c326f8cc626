use std::sync::LazyLock;

use indexmap::IndexMap;
use jsonschema::{Validator, validator_for};
use serde_json::Value;

use crate::domain::{FieldFlag, View};

use super::path::FieldPath;

/// Top-level inputs of the general form.
#[derive(Debug, Clone, Copy)]
pub struct GeneralField {
    pub path: FieldPath,
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

pub const GENERAL_FIELDS: [GeneralField; 2] = [
    GeneralField {
        path: FieldPath::Name,
        key: "name",
        label: "Name",
        required: true,
    },
    GeneralField {
        path: FieldPath::Label,
        key: "label",
        label: "Label",
        required: false,
    },
];

static VIEW_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::to_value(schemars::schema_for!(View)).expect("view schema serializes to JSON")
});

static VIEW_VALIDATOR: LazyLock<Validator> =
    LazyLock::new(|| validator_for(&VIEW_SCHEMA).expect("derived view schema compiles"));

/// JSON Schema the document is validated against, derived from [`View`].
pub fn view_schema() -> &'static Value {
    &VIEW_SCHEMA
}

/// Validation failures keyed by the path they belong to.
///
/// Failures that cannot be pinned to a path land in `global_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    field_errors: IndexMap<FieldPath, String>,
    global_errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    pub fn error_for(&self, path: &FieldPath) -> Option<&str> {
        self.field_errors.get(path).map(String::as_str)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.field_errors
            .iter()
            .map(|(path, message)| (path, message.as_str()))
    }

    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    pub fn issue_count(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }
}

pub fn validate_view(view: &View) -> ValidationReport {
    let mut report = ValidationReport::default();
    let value = match serde_json::to_value(view) {
        Ok(value) => value,
        Err(err) => {
            report.global_errors.push(err.to_string());
            return report;
        }
    };
    if VIEW_VALIDATOR.is_valid(&value) {
        return report;
    }
    for error in VIEW_VALIDATOR.iter_errors(&value) {
        let pointer = error.instance_path.to_string();
        match path_for_pointer(view, &pointer) {
            Some(path) => {
                let message = required_message(&path).unwrap_or_else(|| error.to_string());
                report.field_errors.entry(path).or_insert(message);
            }
            None => {
                let prefix = if pointer.is_empty() {
                    "<root>".to_string()
                } else {
                    pointer
                };
                report.global_errors.push(format!("{prefix}: {error}"));
            }
        }
    }
    report
}

// Surfaced for localisation later; the wording is the only rule today.
fn required_message(path: &FieldPath) -> Option<String> {
    GENERAL_FIELDS
        .iter()
        .find(|field| field.path == *path && field.required)
        .map(|field| format!("{} is required", field.key))
}

/// Map a JSON pointer into the serialized view back to a structured path.
pub fn path_for_pointer(view: &View, pointer: &str) -> Option<FieldPath> {
    let mut segments = pointer.strip_prefix('/')?.split('/');
    match (segments.next()?, segments.next(), segments.next()) {
        ("name", None, _) => Some(FieldPath::Name),
        ("label", None, _) => Some(FieldPath::Label),
        ("fields", Some(index), Some(key)) if segments.next().is_none() => {
            let field = view.fields.get(index.parse::<usize>().ok()?)?;
            if key == "name" {
                Some(FieldPath::FieldName(field.id))
            } else {
                FieldFlag::from_key(key).map(|flag| FieldPath::flag(field.id, flag))
            }
        }
        _ => None,
    }
}
