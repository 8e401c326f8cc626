use rand::Rng;

use super::{FieldFlag, view::{Field, View}};

/// Number of placeholder fields in the built-in template (`row_1..=row_49`).
pub const TEMPLATE_FIELD_COUNT: u32 = 49;

/// The document shown before any real data has been loaded.
pub fn template_view() -> View {
    View {
        id: 1,
        name: "user".to_string(),
        label: "User".to_string(),
        fields: (1..=TEMPLATE_FIELD_COUNT)
            .map(|index| Field::new(index, format!("row_{index}")))
            .collect(),
    }
}

/// The template with every flag flipped by a fair coin, standing in for a server fetch.
pub fn mock_view(rng: &mut impl Rng) -> View {
    let mut view = template_view();
    for field in &mut view.fields {
        for flag in FieldFlag::ALL {
            flag.set(field, rng.gen_bool(0.5));
        }
    }
    view
}
