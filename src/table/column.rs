use std::cmp::Ordering;

use crate::domain::{Field, FieldFlag};

use super::sort::{compare_alphanumeric, compare_flags};

/// Columns of the field table: the field name followed by one column per flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Flag(FieldFlag),
}

impl Column {
    pub fn all() -> impl Iterator<Item = Column> {
        std::iter::once(Column::Name).chain(FieldFlag::ALL.into_iter().map(Column::Flag))
    }

    pub fn count() -> usize {
        1 + FieldFlag::ALL.len()
    }

    pub fn at(index: usize) -> Option<Column> {
        Self::all().nth(index)
    }

    pub fn index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Flag(flag) => {
                1 + FieldFlag::ALL
                    .iter()
                    .position(|candidate| *candidate == flag)
                    .unwrap_or(0)
            }
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Flag(flag) => flag.header(),
        }
    }

    pub fn is_filterable(self) -> bool {
        matches!(self, Column::Name)
    }

    pub fn flag(self) -> Option<FieldFlag> {
        match self {
            Column::Name => None,
            Column::Flag(flag) => Some(flag),
        }
    }

    /// Ascending comparison of two fields on this column.
    pub fn compare(self, a: &Field, b: &Field) -> Ordering {
        match self {
            Column::Name => compare_alphanumeric(&a.name, &b.name),
            Column::Flag(flag) => compare_flags(flag.get(a), flag.get(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_leads_then_every_flag_once() {
        let columns: Vec<_> = Column::all().collect();
        assert_eq!(columns.len(), Column::count());
        assert_eq!(columns[0], Column::Name);
        assert_eq!(columns[1], Column::Flag(FieldFlag::PartOfKey));
        for (index, column) in columns.iter().enumerate() {
            assert_eq!(column.index(), index);
            assert_eq!(Column::at(index), Some(*column));
        }
        assert_eq!(Column::at(Column::count()), None);
    }

    #[test]
    fn only_the_name_column_filters() {
        assert!(Column::Name.is_filterable());
        assert!(Column::all().skip(1).all(|column| !column.is_filterable()));
    }
}
