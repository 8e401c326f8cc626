use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::{Level, info};

use viewedit::{
    DocumentFormat, EmitSink, FileSource, MockSource, OutputDestination, OutputOptions,
    TemplateSource, UiOptions, ViewEditor,
};

#[derive(Debug, Parser)]
#[command(
    name = "viewedit",
    version,
    about = "Edit a view configuration and its field flags in the terminal"
)]
struct Cli {
    /// View document to edit (.json, .yaml or .toml)
    #[arg(long = "view", value_name = "PATH", conflicts_with = "mock")]
    view: Option<PathBuf>,

    /// Start from a simulated fetch with random flags instead of the blank template
    #[arg(long = "mock")]
    mock: bool,

    /// Seed for --mock so the generated flags are reproducible
    #[arg(long = "seed", value_name = "N", requires = "mock")]
    seed: Option<u64>,

    /// Simulated latency of the --mock fetch
    #[arg(
        long = "fetch-delay-ms",
        value_name = "MS",
        default_value_t = 1000,
        requires = "mock"
    )]
    fetch_delay_ms: u64,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Defaults to stdout.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact output rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Write diagnostics to this file (the terminal belongs to the UI)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Most verbose level written to --log-file
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: Level,

    /// Quit immediately even with unsaved changes
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), cli.log_level)?;

    let mut diagnostics = DiagnosticCollector::default();
    let output = build_output_options(&cli, &mut diagnostics);
    diagnostics.into_result()?;

    let options = UiOptions::default().with_confirm_exit(!cli.no_confirm_exit);
    let mut editor = match (&cli.view, cli.mock) {
        (Some(path), _) => ViewEditor::new(FileSource::new(path)),
        (None, true) => {
            let mut source =
                MockSource::new().with_delay(Duration::from_millis(cli.fetch_delay_ms));
            if let Some(seed) = cli.seed {
                source = source.with_seed(seed);
            }
            ViewEditor::new(source)
        }
        (None, false) => ViewEditor::new(TemplateSource),
    }
    .with_options(options);
    if let Some(title) = cli.title.as_ref() {
        editor = editor.with_title(title.clone());
    }

    let mut sink = EmitSink::new(output);
    let saved = editor.run(&mut sink).map_err(Report::msg)?;
    sink.finish()
        .map_err(Report::msg)
        .wrap_err("failed to write the saved view")?;

    match saved {
        Some(view) => info!(view = %view.name, "editor closed after saving"),
        None => eprintln!("no changes saved"),
    }
    Ok(())
}

fn init_logging(path: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))?;
    Ok(())
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> OutputOptions {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();
    let format = infer_format_from_files(&file_paths, diagnostics).unwrap_or_default();
    if !cli.force {
        ensure_output_paths_available(&file_paths, diagnostics);
    }

    OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations)
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        let Some(format) = path
            .extension()
            .and_then(|ext| DocumentFormat::from_extension(&ext.to_string_lossy()))
        else {
            diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            ));
            continue;
        };
        match detected {
            Some(existing) if existing != format => diagnostics.push_output(format!(
                "output file {} uses {format} but other destinations use {existing}; align extensions",
                path.display()
            )),
            Some(_) => {}
            None => detected = Some(format),
        }
    }
    detected
}

fn ensure_output_paths_available(paths: &[PathBuf], diagnostics: &mut DiagnosticCollector) {
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
