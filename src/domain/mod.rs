mod flag;
mod template;
mod view;

pub use flag::FieldFlag;
pub use template::{TEMPLATE_FIELD_COUNT, mock_view, template_view};
pub use view::{Field, FieldId, View};
