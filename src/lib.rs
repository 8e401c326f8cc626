#![deny(rust_2018_idioms)]

mod app;
pub mod domain;
pub mod form;
pub mod io;
mod presentation;
pub mod table;

pub use app::{Screen, UiOptions, ViewEditor};
pub use domain::{Field, FieldFlag, FieldId, View, mock_view, template_view};
pub use form::{
    Change, FieldPath, FieldValue, FormError, FormState, PathFilter, SubscriptionId, ValidationReport,
};
pub use io::{
    DocumentFormat, EmitSink, FileSource, MockSource, OutputDestination, OutputOptions,
    TemplateSource, ViewSink, ViewSource, parse_view_str, serialize_view,
};
pub use table::{Aggregate, Column, FieldTable, SortBy, SortDirection};

pub mod prelude {
    pub use super::{
        FieldFlag, FieldId, FieldPath, FieldTable, FormState, UiOptions, View, ViewEditor,
        ViewSink, ViewSource,
    };
}
