use tracing::debug;

use crate::{
    domain::{Field, FieldFlag, FieldId},
    form::{FieldPath, FormError, FormState},
};

use super::{
    aggregate::Aggregate,
    column::Column,
    filter::NameFilter,
    sort::{SortBy, next_sort},
};

/// A visible table row, borrowed from the form state on every derivation.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    field: &'a Field,
}

impl<'a> Row<'a> {
    pub fn id(&self) -> FieldId {
        self.field.id
    }

    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    pub fn flag(&self, flag: FieldFlag) -> bool {
        flag.get(self.field)
    }

    pub fn field(&self) -> &'a Field {
        self.field
    }
}

/// View-model of the field flag table.
///
/// Holds only presentation state (sort, filter, cursor). Flag values are
/// always read from, and written straight back to, the [`FormState`].
#[derive(Debug, Clone)]
pub struct FieldTable {
    sort: Option<SortBy>,
    filter: Option<NameFilter>,
    cursor_row: Option<FieldId>,
    cursor_column: Column,
}

impl Default for FieldTable {
    fn default() -> Self {
        Self {
            sort: None,
            filter: None,
            cursor_row: None,
            cursor_column: Column::Name,
        }
    }
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(&self) -> Option<SortBy> {
        self.sort
    }

    /// Header click on `column`; returns the resulting sort.
    pub fn toggle_sort(&mut self, column: Column) -> Option<SortBy> {
        self.sort = next_sort(self.sort, column);
        self.sort
    }

    pub fn filter(&self) -> Option<&NameFilter> {
        self.filter.as_ref()
    }

    pub fn filter_value(&self) -> &str {
        self.filter.as_ref().map(NameFilter::value).unwrap_or("")
    }

    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.filter = NameFilter::new(value);
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Filtered, then stably sorted rows. Ties keep document order in both directions.
    pub fn rows<'a>(&self, state: &'a FormState) -> Vec<Row<'a>> {
        let mut rows: Vec<Row<'a>> = state
            .view()
            .fields
            .iter()
            .filter(|field| {
                self.filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(&field.name))
            })
            .map(|field| Row { field })
            .collect();
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| sort.orient(sort.column.compare(a.field, b.field)));
        }
        rows
    }

    pub fn aggregate(state: &FormState, flag: FieldFlag) -> Aggregate {
        Aggregate::of(&state.view().fields, flag)
    }

    /// Flip one cell, addressed by row id. Returns the new value.
    pub fn toggle_cell(
        state: &mut FormState,
        row: FieldId,
        flag: FieldFlag,
    ) -> Result<bool, FormError> {
        let current = state.flag(row, flag).ok_or(FormError::UnknownField(row))?;
        state.set_value(&FieldPath::flag(row, flag), !current)?;
        Ok(!current)
    }

    /// Header checkbox: check every field unless all already are, then clear every field.
    ///
    /// Covers the whole field list regardless of filter, one write per field.
    pub fn toggle_all(state: &mut FormState, flag: FieldFlag) -> Result<bool, FormError> {
        let target = Self::aggregate(state, flag).toggle_target();
        let ids: Vec<FieldId> = state.view().fields.iter().map(|field| field.id).collect();
        for id in &ids {
            state.set_value(&FieldPath::flag(*id, flag), target)?;
        }
        debug!(%flag, target, fields = ids.len(), "toggled flag on every field");
        Ok(target)
    }

    pub fn selected_column(&self) -> Column {
        self.cursor_column
    }

    pub fn select_column(&mut self, column: Column) {
        self.cursor_column = column;
    }

    pub fn move_column(&mut self, delta: i32) {
        let len = Column::count() as i32;
        let next = (self.cursor_column.index() as i32 + delta).rem_euclid(len);
        self.cursor_column = Column::at(next as usize).unwrap_or(Column::Name);
    }

    /// The selected row, if it is still visible; otherwise the first visible row.
    pub fn selected_row(&self, state: &FormState) -> Option<FieldId> {
        let rows = self.rows(state);
        self.cursor_row
            .filter(|id| rows.iter().any(|row| row.id() == *id))
            .or_else(|| rows.first().map(Row::id))
    }

    /// Position of the selected row among the visible rows.
    pub fn selected_position(&self, state: &FormState) -> Option<usize> {
        let selected = self.selected_row(state)?;
        self.rows(state).iter().position(|row| row.id() == selected)
    }

    pub fn select_row(&mut self, row: FieldId) {
        self.cursor_row = Some(row);
    }

    pub fn move_row(&mut self, state: &FormState, delta: i32) {
        let rows = self.rows(state);
        if rows.is_empty() {
            self.cursor_row = None;
            return;
        }
        let current = self
            .selected_position(state)
            .unwrap_or(0)
            .min(rows.len() - 1) as i32;
        let next = (current + delta).clamp(0, rows.len() as i32 - 1) as usize;
        self.cursor_row = Some(rows[next].id());
    }

    /// Toggle the cell under the cursor. `None` when the cursor is on the name column
    /// or no row is visible.
    pub fn toggle_selected(&self, state: &mut FormState) -> Result<Option<bool>, FormError> {
        let (Some(flag), Some(row)) = (self.cursor_column.flag(), self.selected_row(state)) else {
            return Ok(None);
        };
        Self::toggle_cell(state, row, flag).map(Some)
    }

    pub fn toggle_selected_column(
        &self,
        state: &mut FormState,
    ) -> Result<Option<bool>, FormError> {
        let Some(flag) = self.cursor_column.flag() else {
            return Ok(None);
        };
        Self::toggle_all(state, flag).map(Some)
    }

    pub fn sort_selected_column(&mut self) -> Option<SortBy> {
        self.toggle_sort(self.cursor_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::View;

    fn state_with(values: &[bool]) -> FormState {
        let fields = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mut field = Field::new(index as u32 + 1, format!("row_{}", index + 1));
                field.read_only = *value;
                field
            })
            .collect();
        FormState::new(&View {
            id: 1,
            name: "user".into(),
            label: "User".into(),
            fields,
        })
        .expect("load")
    }

    fn ids(rows: &[Row<'_>]) -> Vec<u32> {
        rows.iter().map(|row| row.id().0).collect()
    }

    #[test]
    fn flag_sort_is_stable_in_both_directions() {
        let state = state_with(&[true, false, true, false]);
        let mut table = FieldTable::new();
        let column = Column::Flag(FieldFlag::ReadOnly);
        table.toggle_sort(column);
        assert_eq!(ids(&table.rows(&state)), vec![2, 4, 1, 3]);
        table.toggle_sort(column);
        assert_eq!(ids(&table.rows(&state)), vec![1, 3, 2, 4]);
        table.toggle_sort(column);
        assert_eq!(ids(&table.rows(&state)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn cursor_follows_row_id_across_sorting() {
        let mut state = state_with(&[true, false, true]);
        let mut table = FieldTable::new();
        table.select_column(Column::Flag(FieldFlag::ReadOnly));
        table.select_row(FieldId(1));
        table.toggle_sort(Column::Flag(FieldFlag::ReadOnly));
        assert_eq!(table.selected_position(&state), Some(1));
        assert_eq!(table.toggle_selected(&mut state), Ok(Some(false)));
        assert_eq!(state.flag(FieldId(1), FieldFlag::ReadOnly), Some(false));
        assert_eq!(state.flag(FieldId(2), FieldFlag::ReadOnly), Some(false));
        assert_eq!(state.flag(FieldId(3), FieldFlag::ReadOnly), Some(true));
    }

    #[test]
    fn hidden_selection_falls_back_to_first_visible_row() {
        let state = state_with(&[false; 12]);
        let mut table = FieldTable::new();
        table.select_row(FieldId(2));
        table.set_filter("row_1");
        assert_eq!(table.selected_row(&state), Some(FieldId(1)));
        table.move_row(&state, 1);
        assert_eq!(table.selected_row(&state), Some(FieldId(10)));
        table.move_row(&state, 50);
        assert_eq!(table.selected_row(&state), Some(FieldId(12)));
    }

    #[test]
    fn name_column_has_no_cell_toggle() {
        let mut state = state_with(&[false]);
        let table = FieldTable::new();
        assert_eq!(table.toggle_selected(&mut state), Ok(None));
        assert_eq!(table.toggle_selected_column(&mut state), Ok(None));
        assert!(!state.is_dirty());
    }

    #[test]
    fn column_cursor_wraps() {
        let mut table = FieldTable::new();
        table.move_column(-1);
        assert_eq!(table.selected_column(), Column::Flag(FieldFlag::PrimaryName));
        table.move_column(1);
        assert_eq!(table.selected_column(), Column::Name);
    }
}
