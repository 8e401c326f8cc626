use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::domain::{View, mock_view, template_view};

use super::DocumentFormat;

/// Supplies the document to edit. Called once, off the UI thread, when the editor starts.
pub trait ViewSource {
    fn fetch(&mut self) -> Result<View>;

    fn describe(&self) -> String;
}

/// The built-in `row_1..row_49` template.
#[derive(Debug, Clone, Default)]
pub struct TemplateSource;

impl ViewSource for TemplateSource {
    fn fetch(&mut self) -> Result<View> {
        Ok(template_view())
    }

    fn describe(&self) -> String {
        "built-in template".to_string()
    }
}

/// Randomised flags over the template, after an optional simulated latency.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    seed: Option<u64>,
    delay: Duration,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl ViewSource for MockSource {
    fn fetch(&mut self) -> Result<View> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let view = mock_view(&mut rng);
        info!(seed = ?self.seed, "generated mock view");
        Ok(view)
    }

    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("mock data (seed {seed})"),
            None => "mock data".to_string(),
        }
    }
}

/// A document stored on disk; the format follows the file extension.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }
}

impl ViewSource for FileSource {
    fn fetch(&mut self) -> Result<View> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let view = parse_view_str(&contents, self.format)
            .with_context(|| format!("failed to load view from {}", self.path.display()))?;
        info!(path = %self.path.display(), fields = view.fields.len(), "loaded view file");
        Ok(view)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a view document in any supported format.
pub fn parse_view_str(contents: &str, format: DocumentFormat) -> Result<View> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<View>(contents).context("failed to parse JSON view")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<View>(contents).context("failed to parse YAML view")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<View>(contents).context("failed to parse TOML view"),
    }
}
