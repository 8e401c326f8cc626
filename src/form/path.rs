use std::fmt;

use crate::domain::{FieldFlag, FieldId};

/// Address of one scalar inside a [`View`](crate::domain::View).
///
/// Rows are addressed by [`FieldId`], so a path stays valid however the
/// field list is sorted or filtered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Name,
    Label,
    FieldName(FieldId),
    Flag { row: FieldId, flag: FieldFlag },
}

impl FieldPath {
    pub fn flag(row: impl Into<FieldId>, flag: FieldFlag) -> Self {
        FieldPath::Flag {
            row: row.into(),
            flag,
        }
    }

    pub fn row(&self) -> Option<FieldId> {
        match self {
            FieldPath::Name | FieldPath::Label => None,
            FieldPath::FieldName(row) | FieldPath::Flag { row, .. } => Some(*row),
        }
    }

    pub fn expects_flag(&self) -> bool {
        matches!(self, FieldPath::Flag { .. })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::Label => f.write_str("label"),
            FieldPath::FieldName(row) => write!(f, "fields[id={row}].name"),
            FieldPath::Flag { row, flag } => write!(f, "fields[id={row}].{flag}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Selects which writes a subscriber hears about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFilter {
    Any,
    Exact(FieldPath),
    Row(FieldId),
    Flag(FieldFlag),
}

impl PathFilter {
    pub fn matches(&self, path: &FieldPath) -> bool {
        match self {
            PathFilter::Any => true,
            PathFilter::Exact(expected) => expected == path,
            PathFilter::Row(row) => path.row() == Some(*row),
            PathFilter::Flag(expected) => {
                matches!(path, FieldPath::Flag { flag, .. } if flag == expected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_row_by_id() {
        let path = FieldPath::flag(12, FieldFlag::ReadOnly);
        assert_eq!(path.to_string(), "fields[id=12].readOnly");
        assert_eq!(FieldPath::Name.to_string(), "name");
    }

    #[test]
    fn filters_select_matching_paths() {
        let path = FieldPath::flag(3, FieldFlag::Required);
        assert!(PathFilter::Any.matches(&path));
        assert!(PathFilter::Row(FieldId(3)).matches(&path));
        assert!(!PathFilter::Row(FieldId(4)).matches(&path));
        assert!(PathFilter::Flag(FieldFlag::Required).matches(&path));
        assert!(!PathFilter::Flag(FieldFlag::ReadOnly).matches(&path));
        assert!(PathFilter::Exact(path).matches(&path));
        assert!(!PathFilter::Row(FieldId(3)).matches(&FieldPath::Label));
    }
}
