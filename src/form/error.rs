use crate::domain::FieldId;

use super::path::FieldPath;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no field with id {0}")]
    UnknownField(FieldId),
    #[error("{path} expects a {expected} value, got {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("field id {0} appears more than once")]
    DuplicateFieldId(FieldId),
}
