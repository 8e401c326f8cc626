mod aggregate;
mod column;
mod filter;
mod model;
mod sort;

pub use aggregate::Aggregate;
pub use column::Column;
pub use filter::NameFilter;
pub use model::{FieldTable, Row};
pub use sort::{SortBy, SortDirection, compare_alphanumeric, compare_flags, next_sort};
