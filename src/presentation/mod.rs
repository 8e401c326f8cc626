mod components;
mod view;

pub use view::{UiContext, draw};
