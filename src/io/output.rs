use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::View;

use super::DocumentFormat;

/// Receives the document when the user saves.
pub trait ViewSink {
    fn persist(&mut self, view: &View) -> Result<()>;
}

/// Destination for serialized output values.
#[derive(Debug, Clone)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }
}

/// Controls how the saved view is serialized.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize and write the view according to the configured format and destinations.
pub fn emit(view: &View, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let payload = serialize_view(view, options.format, options.pretty)?;
    for destination in &options.destinations {
        write_payload(destination, &payload).with_context(|| match destination {
            OutputDestination::Stdout => "failed to write to stdout".to_string(),
            OutputDestination::File(path) => {
                format!("failed to write to file {}", path.display())
            }
        })?;
    }
    Ok(())
}

pub fn serialize_view(view: &View, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(view).context("failed to serialize JSON")
            } else {
                serde_json::to_string(view).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(view).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if pretty {
                toml::to_string_pretty(view).context("failed to serialize TOML")
            } else {
                toml::to_string(view).context("failed to serialize TOML")
            }
        }
    }
}

fn write_payload(destination: &OutputDestination, payload: &str) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout();
            stdout
                .write_all(payload.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("failed to flush stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
        OutputDestination::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(payload.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
            Ok(())
        }
    }
}

/// Writes every saved view to its destinations immediately.
///
/// Stdout is written only after the terminal is restored, so a sink that
/// includes it buffers the last view and flushes it in [`EmitSink::finish`].
#[derive(Debug, Clone)]
pub struct EmitSink {
    options: OutputOptions,
    pending_stdout: Option<View>,
}

impl EmitSink {
    pub fn new(options: OutputOptions) -> Self {
        Self {
            options,
            pending_stdout: None,
        }
    }

    /// Emit anything deferred until the terminal was released.
    pub fn finish(self) -> Result<()> {
        let Some(view) = self.pending_stdout else {
            return Ok(());
        };
        let stdout_only = OutputOptions {
            destinations: vec![OutputDestination::Stdout],
            ..self.options
        };
        emit(&view, &stdout_only)
    }
}

impl ViewSink for EmitSink {
    fn persist(&mut self, view: &View) -> Result<()> {
        let mut files = Vec::new();
        for destination in &self.options.destinations {
            match destination {
                OutputDestination::Stdout => self.pending_stdout = Some(view.clone()),
                OutputDestination::File(_) => files.push(destination.clone()),
            }
        }
        let file_options = OutputOptions {
            destinations: files,
            ..self.options.clone()
        };
        emit(view, &file_options)?;
        info!(
            view = %view.name,
            destinations = self.options.destinations.len(),
            "persisted view"
        );
        Ok(())
    }
}
