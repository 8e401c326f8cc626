use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use viewedit::{
    Change, Field, FieldFlag, FieldId, FieldPath, FieldValue, FormError, FormState, PathFilter,
    View, mock_view, template_view,
};

use rand::{SeedableRng, rngs::StdRng};

fn sample_view() -> View {
    let mut rng = StdRng::seed_from_u64(11);
    mock_view(&mut rng)
}

fn read_all(state: &FormState) -> Vec<(FieldPath, Option<FieldValue>)> {
    let mut paths = vec![FieldPath::Name, FieldPath::Label];
    for field in &state.view().fields {
        paths.push(FieldPath::FieldName(field.id));
        paths.extend(FieldFlag::ALL.iter().map(|flag| FieldPath::flag(field.id, *flag)));
    }
    paths
        .into_iter()
        .map(|path| {
            let value = state.get_value(&path);
            (path, value)
        })
        .collect()
}

#[test]
fn reset_restores_every_path_of_the_loaded_snapshot() {
    let loaded = sample_view();
    let mut state = FormState::new(&loaded).expect("unique ids");
    let before = read_all(&state);

    state.set_value(&FieldPath::Name, "renamed").expect("text");
    state.set_value(&FieldPath::Label, "").expect("text");
    for id in [1, 7, 49] {
        for flag in FieldFlag::ALL {
            let current = state.flag(FieldId(id), flag).expect("row exists");
            state
                .set_value(&FieldPath::flag(id, flag), !current)
                .expect("flag");
        }
    }
    assert!(state.is_dirty());

    state.reset();
    assert!(!state.is_dirty());
    assert_eq!(read_all(&state), before);
    assert_eq!(state.view(), &loaded);

    // a second reset is a no-op
    state.reset();
    assert_eq!(state.view(), &loaded);
}

#[test]
fn editing_never_touches_the_caller_snapshot() {
    let loaded = template_view();
    let original = loaded.clone();
    let mut state = FormState::new(&loaded).expect("unique ids");

    state
        .set_value(&FieldPath::flag(3, FieldFlag::ReadOnly), true)
        .expect("flag");
    state.set_value(&FieldPath::Name, "changed").expect("text");

    assert_eq!(loaded, original);
    assert_eq!(state.snapshot(), &original);
    assert!(state.view().fields[2].read_only);
}

#[test]
fn dirty_follows_writes_not_values() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    assert!(!state.is_dirty());

    state
        .set_value(&FieldPath::flag(1, FieldFlag::ShowInGrid), false)
        .expect("same value is still a write");
    assert!(state.is_dirty());

    state.reset();
    assert!(!state.is_dirty());

    state.set_value(&FieldPath::Name, "user").expect("text");
    assert!(state.is_dirty());

    state.load(&template_view()).expect("unique ids");
    assert!(!state.is_dirty());
}

#[test]
fn rejected_writes_leave_the_document_clean() {
    let mut state = FormState::new(&template_view()).expect("unique ids");

    let err = state
        .set_value(&FieldPath::flag(999, FieldFlag::Required), true)
        .expect_err("no such row");
    assert_eq!(err, FormError::UnknownField(FieldId(999)));

    let err = state
        .set_value(&FieldPath::Name, true)
        .expect_err("name is text");
    assert!(matches!(err, FormError::TypeMismatch { .. }));

    assert!(!state.is_dirty());
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let mut view = template_view();
    view.fields.push(Field::new(4, "again"));
    let mut state = FormState::default();
    assert_eq!(
        state.load(&view).expect_err("duplicate"),
        FormError::DuplicateFieldId(FieldId(4))
    );
    assert_eq!(state.view(), &template_view());
}

#[test]
fn subscribers_see_each_matching_write() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = state.subscribe(PathFilter::Flag(FieldFlag::Required), move |change| {
        if let Change::Written { path, .. } = change {
            sink.borrow_mut().push(path.to_string());
        }
    });

    state
        .set_value(&FieldPath::flag(2, FieldFlag::Required), true)
        .expect("flag");
    state
        .set_value(&FieldPath::flag(2, FieldFlag::ReadOnly), true)
        .expect("flag");
    state.set_value(&FieldPath::Label, "Users").expect("text");
    assert_eq!(*seen.borrow(), vec!["fields[id=2].required".to_string()]);

    assert!(state.unsubscribe(id));
    state
        .set_value(&FieldPath::flag(3, FieldFlag::Required), true)
        .expect("flag");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn validation_reports_a_missing_name() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    assert!(state.validate().is_valid());

    state.set_value(&FieldPath::Name, "").expect("text");
    let report = state.validate();
    assert!(!report.is_valid());
    assert_eq!(report.error_for(&FieldPath::Name), Some("name is required"));
    assert_eq!(report.error_for(&FieldPath::Label), None);
}

#[test]
fn mark_clean_moves_the_reset_point() {
    let mut state = FormState::new(&template_view()).expect("unique ids");
    state.set_value(&FieldPath::Label, "People").expect("text");
    let submitted = state.submit();
    assert!(state.is_dirty(), "submit alone keeps the document dirty");

    state.mark_clean();
    assert!(!state.is_dirty());
    state.set_value(&FieldPath::Label, "Other").expect("text");
    state.reset();
    assert_eq!(state.view(), &submitted);
}
