use pretty_assertions::assert_eq;
use viewedit::{
    Aggregate, Column, Field, FieldFlag, FieldId, FieldPath, FieldTable, FormState, SortDirection,
    View, template_view,
};

fn view_with_required(values: &[bool]) -> View {
    View {
        id: 7,
        name: "order".into(),
        label: "Order".into(),
        fields: values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mut field = Field::new(index as u32 + 1, format!("f{}", index + 1));
                field.required = *value;
                field
            })
            .collect(),
    }
}

fn visible_ids(table: &FieldTable, state: &FormState) -> Vec<u32> {
    table.rows(state).iter().map(|row| row.id().0).collect()
}

#[test]
fn ascending_flag_sort_puts_false_first_and_is_stable() {
    let state = FormState::new(&view_with_required(&[true, false, true])).expect("unique ids");
    let mut table = FieldTable::new();
    let column = Column::Flag(FieldFlag::Required);

    let sort = table.toggle_sort(column).expect("first click sorts");
    assert_eq!(sort.direction, SortDirection::Ascending);
    assert_eq!(visible_ids(&table, &state), vec![2, 1, 3]);

    table.toggle_sort(column);
    assert_eq!(visible_ids(&table, &state), vec![1, 3, 2]);

    assert_eq!(table.toggle_sort(column), None);
    assert_eq!(visible_ids(&table, &state), vec![1, 2, 3]);
}

#[test]
fn aggregate_is_tri_state_and_empty_means_none() {
    let cases: [(&[bool], Aggregate); 4] = [
        (&[true, true, true], Aggregate::All),
        (&[true, false, true], Aggregate::Indeterminate),
        (&[false, false, false], Aggregate::None),
        (&[], Aggregate::None),
    ];
    for (values, expected) in cases {
        let state = FormState::new(&view_with_required(values)).expect("unique ids");
        assert_eq!(
            FieldTable::aggregate(&state, FieldFlag::Required),
            expected,
            "required = {values:?}"
        );
    }
}

#[test]
fn check_all_writes_every_field_and_dirties() {
    let mut state =
        FormState::new(&view_with_required(&[true, false, true])).expect("unique ids");
    let writes = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&writes);
    state.subscribe(viewedit::PathFilter::Flag(FieldFlag::Required), move |_| {
        counter.set(counter.get() + 1)
    });

    let target = FieldTable::toggle_all(&mut state, FieldFlag::Required).expect("flags");
    assert!(target);
    assert!(state.is_dirty());
    assert_eq!(writes.get(), 3, "each field write is observable");
    assert!(state.view().fields.iter().all(|field| field.required));
    assert_eq!(
        FieldTable::aggregate(&state, FieldFlag::Required),
        Aggregate::All
    );

    let target = FieldTable::toggle_all(&mut state, FieldFlag::Required).expect("flags");
    assert!(!target);
    assert!(state.view().fields.iter().all(|field| !field.required));
}

#[test]
fn check_all_from_none_sets_true() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    assert!(FieldTable::toggle_all(&mut state, FieldFlag::ShowInGrid).expect("flags"));
    assert_eq!(
        state
            .view()
            .fields
            .iter()
            .filter(|field| field.show_in_grid)
            .count(),
        49
    );
}

#[test]
fn filtering_row_1_keeps_eleven_rows() {
    let state = FormState::new(&template_view()).expect("unique ids");
    let mut table = FieldTable::new();

    table.set_filter("row_1");
    let names: Vec<&str> = table.rows(&state).iter().map(|row| row.name()).collect();
    let mut expected = vec!["row_1".to_string()];
    expected.extend((10..=19).map(|i| format!("row_{i}")));
    assert_eq!(names, expected);

    table.set_filter("");
    assert_eq!(table.filter(), None);
    assert_eq!(table.rows(&state).len(), 49);
}

#[test]
fn filter_ignores_case() {
    let state = FormState::new(&template_view()).expect("unique ids");
    let mut table = FieldTable::new();
    table.set_filter("ROW_4");
    assert_eq!(table.rows(&state).len(), 11);
}

#[test]
fn toggles_follow_row_ids_after_sorting() {
    let mut state =
        FormState::new(&view_with_required(&[true, false, true])).expect("unique ids");
    let mut table = FieldTable::new();
    table.toggle_sort(Column::Flag(FieldFlag::Required));

    // the first visible row is now the field with id 2, stored at index 1
    let first = table.rows(&state)[0].id();
    assert_eq!(first, FieldId(2));
    FieldTable::toggle_cell(&mut state, first, FieldFlag::ReadOnly).expect("flag");

    assert_eq!(
        state.get_value(&FieldPath::flag(2, FieldFlag::ReadOnly)),
        Some(true.into())
    );
    assert!(!state.view().fields[0].read_only);
}

#[test]
fn name_sort_orders_digits_numerically() {
    let state = FormState::new(&template_view()).expect("unique ids");
    let mut table = FieldTable::new();
    table.toggle_sort(Column::Name);
    table.toggle_sort(Column::Name);
    let names: Vec<&str> = table
        .rows(&state)
        .iter()
        .take(3)
        .map(|row| row.name())
        .collect();
    assert_eq!(names, vec!["row_49", "row_48", "row_47"]);
}

#[test]
fn aggregate_and_check_all_ignore_the_active_filter() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    let mut table = FieldTable::new();
    table.set_filter("row_1");
    assert_eq!(table.rows(&state).len(), 11);

    // row_2 is hidden by the filter but still counts
    FieldTable::toggle_cell(&mut state, FieldId(2), FieldFlag::Required).expect("flag");
    assert!(table.rows(&state).iter().all(|row| !row.flag(FieldFlag::Required)));
    assert_eq!(
        FieldTable::aggregate(&state, FieldFlag::Required),
        Aggregate::Indeterminate
    );

    assert!(FieldTable::toggle_all(&mut state, FieldFlag::Required).expect("flags"));
    assert_eq!(
        state
            .view()
            .fields
            .iter()
            .filter(|field| field.required)
            .count(),
        49
    );
    assert_eq!(
        state.get_value(&FieldPath::flag(30, FieldFlag::Required)),
        Some(true.into())
    );
    assert_eq!(table.rows(&state).len(), 11);
}
