use crate::domain::{Field, FieldFlag};

/// Header checkbox state of a flag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    All,
    None,
    Indeterminate,
}

impl Aggregate {
    /// Computed over every field, visible or not. An empty list is `None`.
    pub fn of<'a>(fields: impl IntoIterator<Item = &'a Field>, flag: FieldFlag) -> Self {
        let mut any_set = false;
        let mut any_clear = false;
        for field in fields {
            if flag.get(field) {
                any_set = true;
            } else {
                any_clear = true;
            }
        }
        match (any_set, any_clear) {
            (true, false) => Aggregate::All,
            (true, true) => Aggregate::Indeterminate,
            (false, _) => Aggregate::None,
        }
    }

    pub fn is_checked(self) -> bool {
        self == Aggregate::All
    }

    pub fn is_indeterminate(self) -> bool {
        self == Aggregate::Indeterminate
    }

    /// Value written to every field when the header checkbox is activated.
    pub fn toggle_target(self) -> bool {
        !self.is_checked()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Aggregate::All => "[x]",
            Aggregate::None => "[ ]",
            Aggregate::Indeterminate => "[-]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[bool]) -> Vec<Field> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mut field = Field::new(index as u32 + 1, format!("row_{}", index + 1));
                field.required = *value;
                field
            })
            .collect()
    }

    #[test]
    fn derives_tri_state_from_values() {
        let flag = FieldFlag::Required;
        assert_eq!(Aggregate::of(&fields(&[true, true, true]), flag), Aggregate::All);
        assert_eq!(
            Aggregate::of(&fields(&[true, false, true]), flag),
            Aggregate::Indeterminate
        );
        assert_eq!(
            Aggregate::of(&fields(&[false, false, false]), flag),
            Aggregate::None
        );
    }

    #[test]
    fn empty_list_is_not_all_checked() {
        let empty: Vec<Field> = Vec::new();
        let aggregate = Aggregate::of(&empty, FieldFlag::Required);
        assert_eq!(aggregate, Aggregate::None);
        assert!(!aggregate.is_checked());
        assert!(!aggregate.is_indeterminate());
    }

    #[test]
    fn activation_checks_unless_already_all() {
        assert!(Aggregate::None.toggle_target());
        assert!(Aggregate::Indeterminate.toggle_target());
        assert!(!Aggregate::All.toggle_target());
    }
}
