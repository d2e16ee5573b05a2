use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use isis_clv_core::{DecodeError, DecodeOptions, Decoding, InputFormat, PduKind};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "Examples:\n  isis-clv decode iih-clvs.hex -o report.json\n  isis-clv decode lsp.bin --format binary --offset 27 --pdu lsp --stdout\n  isis-clv decode 'captures/*.hex' --stdout --pretty --list-diagnostics";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ISIS_CLV_BUILD_COMMIT"),
    " ",
    env!("ISIS_CLV_BUILD_DATE"),
    ")\ncommit: ",
    env!("ISIS_CLV_BUILD_COMMIT_FULL"),
);

#[derive(Parser, Debug)]
#[command(name = "isis-clv")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder for IS-IS CLV regions (hex dumps or raw bytes).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one CLV region and generate a versioned JSON report.
    #[command(alias = "dissect")]
    #[command(after_help = EXAMPLES)]
    Decode {
        /// Path to a hex dump (.hex/.txt) or raw binary file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Input encoding
        #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Decoder table to use
        #[arg(long, value_enum, default_value_t = PduArg::Any)]
        pdu: PduArg,

        /// Start of the CLV region inside the input, in bytes
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Length of the CLV region (default: rest of the input)
        #[arg(long)]
        length: Option<usize>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any diagnostic was emitted
        #[arg(long)]
        strict: bool,

        /// List diagnostics after decoding
        #[arg(long)]
        list_diagnostics: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Auto,
    Hex,
    Binary,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Hex => InputFormat::Hex,
            FormatArg::Binary => InputFormat::Binary,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PduArg {
    Any,
    Hello,
    Lsp,
    Snp,
}

impl From<PduArg> for PduKind {
    fn from(arg: PduArg) -> Self {
        match arg {
            PduArg::Any => PduKind::Any,
            PduArg::Hello => PduKind::Hello,
            PduArg::Lsp => PduKind::Lsp,
            PduArg::Snp => PduKind::Snp,
        }
    }
}

struct OutputFlags {
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_diagnostics: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            format,
            pdu,
            offset,
            length,
            pretty,
            compact,
            quiet,
            strict,
            list_diagnostics,
        } => cmd_decode(
            input,
            report,
            DecodeOptions {
                format: format.into(),
                pdu: pdu.into(),
                offset,
                length,
            },
            OutputFlags {
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_diagnostics,
            },
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Region(_) => CliError::new(
                err.to_string(),
                Some("check --offset/--length against the input size".to_string()),
            ),
            DecodeError::Source(_) => CliError::new(
                format!("CLV decoding failed: {err}"),
                Some("use --format to select hex or binary input".to_string()),
            ),
        }
    }
}

fn cmd_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    options: DecodeOptions,
    flags: OutputFlags,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let report = match (flags.stdout, report) {
        (true, _) => None,
        (false, Some(path)) => {
            ensure_report_differs(&path, &resolved_input)?;
            Some(path)
        }
        (false, None) => {
            return Err(CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            ));
        }
    };

    debug!(input = %resolved_input.display(), ?options, "decoding CLV region");
    let rep = isis_clv_core::decode_file(&resolved_input, &options)?;
    let json = serialize_report(&rep, flags.pretty, flags.compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !flags.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if flags.list_diagnostics && !flags.quiet {
        print_diagnostics(&rep);
    }
    if flags.strict && rep.has_diagnostics() {
        return Err(CliError::new(
            "decode diagnostics detected",
            Some("use --list-diagnostics to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_report_differs(report_path: &Path, input: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory is created later, so it cannot hold the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Decoding, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn print_diagnostics(rep: &Decoding) {
    eprintln!("Diagnostics:");
    if rep.diagnostics.is_empty() {
        eprintln!("  (none)");
    }
    for diag in &rep.diagnostics {
        eprintln!(
            "  @{}+{} {}",
            diag.range.offset, diag.range.len, diag.message
        );
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a hex dump (.hex/.txt) or a raw binary CLV region".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a hex dump (.hex/.txt) or a raw binary CLV region".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut message = format!(
                "multiple files match pattern '{}' ({} matches); matches: ",
                pattern, count
            );
            message.push_str(
                &matches
                    .iter()
                    .take(3)
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if count > 3 {
                message.push_str(", ...");
            }
            Err(CliError::new(
                message,
                Some("pass a single input file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
