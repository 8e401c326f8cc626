mod fields_table;
mod footer;
mod general;
mod tabs;

pub use fields_table::render_fields_table;
pub use footer::render_footer;
pub use general::render_general;
pub use tabs::render_tabs;
