//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use texpass_core::{needs_rerun, Renderer, Settings, CONFIG_FILE, LOG_FILE};

/// Path meaning stdin for input and stdout for output
const STDIO_PATH: &str = "-";

#[derive(Parser)]
#[command(name = "texpass")]
#[command(author, version, about = "Render LaTeX to PDF, rerunning until references settle", long_about = None)]
struct Cli {
    /// Show compiler passes and other progress details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings overrides shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Compiler executable (default: pdflatex)
    #[arg(short = 'c', long = "command")]
    pub compiler: Option<String>,

    /// Number of passes; 0 or less detects it from the log
    #[arg(short, long, allow_negative_numbers = true)]
    pub runs: Option<i32>,

    /// Settings file (default: texpass.toml next to the input, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a LaTeX document to PDF
    Render {
        /// Input LaTeX file, or - for stdin
        input: PathBuf,

        /// Output PDF file, or - for stdout (default: input with .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Check whether a working directory's log asks for another pass
    CheckRerun {
        /// Directory containing texpass.log
        dir: PathBuf,
    },

    /// Print the effective settings as TOML
    Config {
        /// Input file whose directory is searched for texpass.toml
        input: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            settings,
        } => {
            let resolved = load_settings(&settings, Some(&input))?;
            render_command(&input, output.as_deref(), &resolved)?;
        }
        Commands::CheckRerun { dir } => {
            check_rerun_command(&dir)?;
        }
        Commands::Config { input, settings } => {
            let resolved = load_settings(&settings, input.as_deref())?;
            config_command(&resolved)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` is honored; the default level is `warn`, or `debug` when
/// verbose.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .try_init();
}

/// Resolve settings: explicit file, else `texpass.toml` beside the input,
/// else defaults; then apply command-line overrides
pub fn load_settings(args: &SettingsArgs, input: Option<&Path>) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => match input.and_then(sibling_config) {
            Some(path) => Settings::load(&path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => Settings::default(),
        },
    };

    if let Some(compiler) = &args.compiler {
        settings.render.command = compiler.clone();
    }
    if let Some(runs) = args.runs {
        settings.render.runs = runs;
    }

    Ok(settings)
}

/// Settings file next to an input file, if one exists
fn sibling_config(input: &Path) -> Option<PathBuf> {
    if input == Path::new(STDIO_PATH) {
        return None;
    }
    let dir = match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let path = dir.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Execute the render command
pub fn render_command(input: &Path, output: Option<&Path>, settings: &Settings) -> Result<()> {
    let from_stdin = input == Path::new(STDIO_PATH);

    // Determine output path (default: input with .pdf extension)
    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None if from_stdin => {
            anyhow::bail!("An output path is required when reading from stdin (use -o)")
        }
        None => input.with_extension("pdf"),
    };

    let document = if from_stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?
    };

    eprintln!("texpass v{}", texpass_core::VERSION);
    eprintln!("Rendering: {}", input.display());
    eprintln!("  Compiler: {}", settings.render.resolved_command());

    let renderer = Renderer::new(settings.render.clone());
    let rendered = renderer
        .render_with_metadata(&document)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    if output_path == Path::new(STDIO_PATH) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&rendered.data)
            .and_then(|_| stdout.flush())
            .context("Failed to write PDF to stdout")?;
    } else {
        fs::write(&output_path, &rendered.data).with_context(|| {
            format!("Failed to write output file: {}", output_path.display())
        })?;
    }

    eprintln!();
    eprintln!("Render complete!");
    eprintln!("  Output: {}", output_path.display());
    eprintln!("  Passes: {}", rendered.passes);
    eprintln!("  Size: {} bytes", rendered.data.len());

    Ok(())
}

/// Execute the check-rerun command
///
/// Returns whether another pass is requested.
pub fn check_rerun_command(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }
    let log_path = dir.join(LOG_FILE);
    if !log_path.is_file() {
        eprintln!("warning: no {} in {}", LOG_FILE, dir.display());
    }

    let rerun = needs_rerun(dir);
    if rerun {
        println!("rerun needed");
    } else {
        println!("up to date");
    }
    Ok(rerun)
}

/// Execute the config command
pub fn config_command(settings: &Settings) -> Result<()> {
    let toml = settings
        .to_toml_string()
        .context("Failed to serialize settings")?;
    print!("{}", toml);
    Ok(())
}
