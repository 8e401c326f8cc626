mod editor;
pub(crate) mod input;
pub(crate) mod keymap;
mod options;
mod runtime;
mod screen;
mod status;
mod terminal;
mod text_edit;

pub use editor::ViewEditor;
pub use options::UiOptions;
pub use screen::Screen;
