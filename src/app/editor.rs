use std::fmt;

use anyhow::Result;
use tracing::info;

use crate::{
    domain::View,
    form::FormState,
    io::{ViewSink, ViewSource},
};

use super::{
    options::UiOptions,
    runtime::{App, PendingLoad},
};

const DEFAULT_TITLE: &str = "Edit View";

/// Terminal editor for a single view.
///
/// The editor opens on the built-in template and swaps in the document from
/// `source` as soon as the fetch completes.
pub struct ViewEditor {
    source: Box<dyn ViewSource + Send>,
    title: Option<String>,
    options: UiOptions,
}

impl fmt::Debug for ViewEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEditor")
            .field("source", &self.source.describe())
            .field("title", &self.title)
            .field("options", &self.options)
            .finish()
    }
}

impl ViewEditor {
    pub fn new(source: impl ViewSource + Send + 'static) -> Self {
        Self {
            source: Box::new(source),
            title: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the editor until the user quits. Every save goes to `sink`; the
    /// last saved view is returned, or `None` if nothing was saved.
    pub fn run(self, sink: &mut dyn ViewSink) -> Result<Option<View>> {
        let ViewEditor {
            source,
            title,
            options,
        } = self;

        info!(source = %source.describe(), "starting view editor");
        let pending = PendingLoad::spawn(source);
        let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let mut app = App::new(FormState::default(), title, options, sink).with_pending_load(pending);
        app.run()
    }
}
