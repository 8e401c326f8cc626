mod error;
mod observer;
mod path;
mod state;
mod validation;

pub use error::FormError;
pub use observer::{Change, SubscriptionId};
pub use path::{FieldPath, FieldValue, PathFilter};
pub use state::FormState;
pub use validation::{
    GENERAL_FIELDS, GeneralField, ValidationReport, path_for_pointer, validate_view, view_schema,
};
