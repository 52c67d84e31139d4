//! docshift: convert Python doc-comments to another style as unified-diff patches.
//!
//! Two modes:
//!
//! - **stdin mode**: `docshift -d Google < module.py` prints the patch
//! - **file mode**: `docshift -d reST -o patches/ src/ lib/*.py` writes one
//!   `<file>.patch` per input that has something to change

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use docshift::model::Quote;
use docshift::{Dialect, FormatConfig, PatchLabels};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(
    name = "docshift",
    about = "Convert Python doc-comments between reST, Epytext, Google and Numpydoc styles"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Target style: Google, Numpydoc, reST or Epytext
    #[arg(short = 'd', long, default_value = "Numpydoc")]
    docstyle: String,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 4)]
    tab_width: usize,

    /// Maximum line width, indentation included
    #[arg(long, default_value_t = 80)]
    max_width: usize,

    /// Doc-comment delimiter: double or single. Keeps each one's own when omitted.
    #[arg(short = 'q', long)]
    quote: Option<String>,

    /// Directory for patch files (default: next to each input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Path prefix for the `a/` side of the patch header
    #[arg(long, default_value = "")]
    source_prefix: String,

    /// Path prefix for the `b/` side of the patch header
    #[arg(long, default_value = "")]
    target_prefix: String,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = format_config(&cli)?;
    let labels = PatchLabels::new(&cli.source_prefix, &cli.target_prefix);

    if cli.files.is_empty() {
        return stdin_mode(&config, &labels);
    }

    file_mode(&cli, &config, &labels)
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn format_config(cli: &Cli) -> Result<FormatConfig> {
    let dialect: Dialect = cli.docstyle.parse()?;
    let quote = cli.quote.as_deref().map(str::parse::<Quote>).transpose()?;
    Ok(FormatConfig {
        dialect,
        tab_width: cli.tab_width,
        max_line_width: cli.max_width,
        quote,
    })
}

/// stdin mode: read one source from stdin, print its patch to stdout.
fn stdin_mode(config: &FormatConfig, labels: &PatchLabels) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    print!("{}", docshift::patch(&input, "stdin", config, labels));
    Ok(())
}

/// file mode: one patch per input file that changes.
fn file_mode(cli: &Cli, config: &FormatConfig, labels: &PatchLabels) -> Result<()> {
    if let Some(dir) = cli.output.as_deref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let input_files = collect_inputs(&cli.files)?;

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = file_name(path);
        let diff = docshift::patch(&content, &name, config, labels);
        if diff.is_empty() {
            debug!(file = %path.display(), "nothing to change");
            continue;
        }

        let out_path = patch_path(path, cli.output.as_deref());
        fs::write(&out_path, &diff)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(patch = %out_path.display(), "wrote patch");
    }

    Ok(())
}

/// Extensions walked for when a directory is given.
const PYTHON_EXTENSIONS: [&str; 2] = ["py", "pyi"];

/// Resolve command-line inputs to files, sorted and without duplicates.
///
/// Files are taken as given, directories are walked recursively for Python
/// sources, and anything else must be a glob pattern.
fn collect_inputs(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut inputs = BTreeSet::new();
    for arg in args {
        let path = Path::new(arg);
        if path.is_file() {
            inputs.insert(path.to_path_buf());
        } else if path.is_dir() {
            inputs.extend(python_sources(path)?);
        } else if is_glob(arg) {
            let matched = glob_files(arg)?;
            if matched.is_empty() {
                warn!(pattern = %arg, "no files matched");
            }
            inputs.extend(matched);
        } else {
            bail!("can not find file: {}", arg);
        }
    }
    Ok(inputs.into_iter().collect())
}

fn python_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let mut sources = Vec::new();
    for ext in PYTHON_EXTENSIONS {
        sources.extend(glob_files(&format!("{root}/**/*.{ext}"))?);
    }
    debug!(dir = %dir.display(), count = sources.len(), "walked directory");
    Ok(sources)
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(paths.flatten().filter(|p| p.is_file()).collect())
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// `<name>.patch` in `output`, or next to the input.
fn patch_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let patch_name = format!("{}.patch", file_name(input));
    match output {
        Some(dir) => dir.join(patch_name),
        None => input.with_file_name(patch_name),
    }
}
