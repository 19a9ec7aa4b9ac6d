use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use filefp::cmd::{fingerprint, hash, session};
use filefp::domain::config::Config;
use filefp::domain::error::{FingerprintError, HashError, SessionError};
use filefp::domain::length::LengthArg;
use filefp::domain::report::{PipelineInput, PipelineInputSource, PipelineReport};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "filefp",
    version,
    about = "FNV-1a fingerprints for recognizing files across renames"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    emit_pipeline: bool,

    /// TOML file with a `[fingerprint]` section.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hash a whole input with FNV-1a 32 and 64.
    Hash(HashArgs),
    /// Take the 64-bit prefix fingerprint of a file.
    Fingerprint(FingerprintArgs),
    /// Replay hasher calls from JSON Lines on stdin.
    Session,
}

#[derive(Debug, clap::Args)]
struct HashArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    /// Leading bytes to hash; negative values hash nothing.
    #[arg(long, allow_negative_numbers = true)]
    length: Option<i64>,
}

#[derive(Debug, clap::Args)]
struct FingerprintArgs {
    #[arg(long)]
    path: PathBuf,

    #[arg(long)]
    offset: Option<u64>,

    /// Narrower fingerprint size, used only when below the window and the data read.
    #[arg(long)]
    size: Option<usize>,
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    init_tracing();
    process::exit(run());
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FILEFP_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "config"}),
                3,
            );
            return 3;
        }
    };

    let emit_pipeline = cli.emit_pipeline;
    match cli.command {
        Commands::Hash(args) => run_hash(args, emit_pipeline),
        Commands::Fingerprint(args) => run_fingerprint(args, &config, emit_pipeline),
        Commands::Session => run_session(emit_pipeline),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_hash(args: HashArgs, emit_pipeline: bool) -> i32 {
    let stdin = io::stdin();
    let exit_code = match hash::run(
        args.input.as_deref(),
        stdin.lock(),
        LengthArg::from(args.length),
    ) {
        Ok(report) => emit_serialized_stdout(&report, "hash"),
        Err(error) => {
            let (exit_code, error_kind) = map_hash_error(&error);
            emit_error(
                error_kind,
                error.to_string(),
                json!({"command": "hash"}),
                exit_code,
            );
            exit_code
        }
    };

    if emit_pipeline {
        let source = match &args.input {
            Some(path) => PipelineInputSource::path("input", path.display().to_string()),
            None => PipelineInputSource::stdin("input"),
        };
        emit_pipeline_report(&PipelineReport::new(
            "hash",
            PipelineInput::new(vec![source]),
            hash::pipeline_steps(),
            hash::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_fingerprint(args: FingerprintArgs, config: &Config, emit_pipeline: bool) -> i32 {
    let command_args = fingerprint::FingerprintCommandArgs::resolve(
        args.path,
        args.offset,
        args.size,
        &config.fingerprint,
    );
    let path = command_args.path.display().to_string();

    let exit_code = match fingerprint::run(&command_args) {
        Ok(report) => emit_serialized_stdout(&report, "fingerprint"),
        Err(error) => {
            let (exit_code, error_kind) = map_fingerprint_error(&error);
            emit_error(
                error_kind,
                error.to_string(),
                json!({"command": "fingerprint", "path": &path}),
                exit_code,
            );
            exit_code
        }
    };

    if emit_pipeline {
        emit_pipeline_report(&PipelineReport::new(
            "fingerprint",
            PipelineInput::new(vec![PipelineInputSource::path("path", path)]),
            fingerprint::pipeline_steps(),
            fingerprint::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_session(emit_pipeline: bool) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let exit_code = match session::run(stdin.lock(), stdout.lock()) {
        Ok(summary) if summary.failed > 0 => 2,
        Ok(_) => 0,
        Err(error) => {
            let (exit_code, error_kind) = map_session_error(&error);
            emit_error(
                error_kind,
                error.to_string(),
                json!({"command": "session"}),
                exit_code,
            );
            exit_code
        }
    };

    if emit_pipeline {
        emit_pipeline_report(&PipelineReport::new(
            "session",
            PipelineInput::new(vec![PipelineInputSource::stdin("calls")]),
            session::pipeline_steps(),
            session::deterministic_guards(),
        ));
    }
    exit_code
}

fn map_hash_error(error: &HashError) -> (i32, &'static str) {
    match error {
        HashError::Input(_) => (3, "input_usage_error"),
    }
}

fn map_fingerprint_error(error: &FingerprintError) -> (i32, &'static str) {
    match error {
        FingerprintError::Open(_) => (3, "input_usage_error"),
        FingerprintError::Duplicate { .. }
        | FingerprintError::Seek { .. }
        | FingerprintError::Read { .. } => (1, "internal_error"),
    }
}

fn map_session_error(error: &SessionError) -> (i32, &'static str) {
    match error {
        SessionError::ReadInput { .. } | SessionError::InvalidCall { .. } => {
            (3, "input_usage_error")
        }
        SessionError::WriteOutput { .. } => (1, "internal_error"),
    }
}

fn emit_serialized_stdout<T: Serialize>(value: &T, command: &'static str) -> i32 {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            println!("{serialized}");
            0
        }
        Err(error) => {
            emit_error(
                "internal_error",
                format!("failed to serialize {command} report: {error}"),
                json!({"command": command}),
                1,
            );
            1
        }
    }
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
