use std::fmt;

use super::view::Field;

/// Boolean display/behaviour switches carried by every [`Field`].
///
/// Declaration order is the column order of the field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldFlag {
    PartOfKey,
    ShowInGrid,
    ShowInPanel,
    ShowInFilter,
    ShowInBrowser,
    Required,
    ReadOnly,
    ForeignKey,
    PrimaryName,
}

impl FieldFlag {
    pub const ALL: [FieldFlag; 9] = [
        FieldFlag::PartOfKey,
        FieldFlag::ShowInGrid,
        FieldFlag::ShowInPanel,
        FieldFlag::ShowInFilter,
        FieldFlag::ShowInBrowser,
        FieldFlag::Required,
        FieldFlag::ReadOnly,
        FieldFlag::ForeignKey,
        FieldFlag::PrimaryName,
    ];

    /// Document key, as serialized.
    pub fn key(self) -> &'static str {
        match self {
            FieldFlag::PartOfKey => "partOfKey",
            FieldFlag::ShowInGrid => "showInGrid",
            FieldFlag::ShowInPanel => "showInPanel",
            FieldFlag::ShowInFilter => "showInFilter",
            FieldFlag::ShowInBrowser => "showInBrowser",
            FieldFlag::Required => "required",
            FieldFlag::ReadOnly => "readOnly",
            FieldFlag::ForeignKey => "foreignKey",
            FieldFlag::PrimaryName => "primaryName",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            FieldFlag::PartOfKey => "Key?",
            FieldFlag::ShowInGrid => "Grid?",
            FieldFlag::ShowInPanel => "Panel?",
            FieldFlag::ShowInFilter => "Filter?",
            FieldFlag::ShowInBrowser => "Browser?",
            FieldFlag::Required => "Required?",
            FieldFlag::ReadOnly => "Read Only?",
            FieldFlag::ForeignKey => "Foreign Key?",
            FieldFlag::PrimaryName => "Primary Name?",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }

    pub fn get(self, field: &Field) -> bool {
        match self {
            FieldFlag::PartOfKey => field.part_of_key,
            FieldFlag::ShowInGrid => field.show_in_grid,
            FieldFlag::ShowInPanel => field.show_in_panel,
            FieldFlag::ShowInFilter => field.show_in_filter,
            FieldFlag::ShowInBrowser => field.show_in_browser,
            FieldFlag::Required => field.required,
            FieldFlag::ReadOnly => field.read_only,
            FieldFlag::ForeignKey => field.foreign_key,
            FieldFlag::PrimaryName => field.primary_name,
        }
    }

    pub fn set(self, field: &mut Field, value: bool) {
        let slot = match self {
            FieldFlag::PartOfKey => &mut field.part_of_key,
            FieldFlag::ShowInGrid => &mut field.show_in_grid,
            FieldFlag::ShowInPanel => &mut field.show_in_panel,
            FieldFlag::ShowInFilter => &mut field.show_in_filter,
            FieldFlag::ShowInBrowser => &mut field.show_in_browser,
            FieldFlag::Required => &mut field.required,
            FieldFlag::ReadOnly => &mut field.read_only,
            FieldFlag::ForeignKey => &mut field.foreign_key,
            FieldFlag::PrimaryName => &mut field.primary_name,
        };
        *slot = value;
    }
}

impl fmt::Display for FieldFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
