mod format;
mod output;
mod source;

pub use format::DocumentFormat;
pub use output::{EmitSink, OutputDestination, OutputOptions, ViewSink, emit, serialize_view};
pub use source::{FileSource, MockSource, TemplateSource, ViewSource, parse_view_str};
