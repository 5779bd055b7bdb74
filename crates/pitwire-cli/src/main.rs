use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use pitwire_core::{
    DEFAULT_TELEMETRY_PORT, FeedError, PacketBody, PacketFeed, PacketHeader, PacketId,
    PcapReplaySource, UdpSocketSource,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PITWIRE_BUILD_COMMIT"),
    " ",
    env!("PITWIRE_BUILD_DATE"),
    ")"
);

/// Timestamp used when the wall clock cannot be formatted.
const FALLBACK_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

const KIND_HINT: &str = "valid kinds: motion, session, lap_data, event, participants, \
car_setups, car_telemetry, car_status, final_classification, lobby_info, car_damage, \
session_history";

#[derive(Parser, Debug)]
#[command(name = "pitwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for the racing simulation's UDP telemetry broadcast.",
    long_about = None,
    after_help = "Examples:\n  pitwire listen\n  pitwire listen --only event,lap_data --count 100\n  pitwire replay session.pcapng -o packets.jsonl --stats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Listen on a UDP port and print decoded packets as JSON lines.
    Listen {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// UDP port the simulation broadcasts on
        #[arg(short, long, default_value_t = DEFAULT_TELEMETRY_PORT)]
        port: u16,

        /// Stop after this many emitted packets
        #[arg(long)]
        count: Option<u64>,

        /// Comma-separated packet kinds to keep (e.g. event,car_telemetry)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code on the first undecodable datagram
        #[arg(long)]
        strict: bool,
    },

    /// Replay a capture file and print decoded packets as JSON lines.
    Replay {
        /// Path to a .pcap or .pcapng file
        input: PathBuf,

        /// UDP destination port to treat as telemetry
        #[arg(short, long, default_value_t = DEFAULT_TELEMETRY_PORT)]
        port: u16,

        /// Output path (JSON lines); stdout when omitted
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Comma-separated packet kinds to keep (e.g. event,car_telemetry)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code on the first undecodable datagram
        #[arg(long)]
        strict: bool,

        /// Print per-kind packet counts after the replay
        #[arg(long)]
        stats: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Listen {
            host,
            port,
            count,
            only,
            pretty,
            quiet,
            strict,
        } => cmd_listen(host, port, count, only, pretty, quiet, strict),
        Commands::Replay {
            input,
            port,
            output,
            only,
            pretty,
            quiet,
            strict,
            stats,
        } => cmd_replay(input, port, output, only, pretty, quiet, strict, stats),
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
        CliError::new(err.to_string(), None)
    }
}

/// One output line: a decoded packet plus where its timestamp came from
/// (wall clock when listening, capture time when replaying).
#[derive(Serialize)]
struct Record<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    received_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<f64>,
    kind: &'static str,
    header: &'a PacketHeader,
    body: &'a PacketBody,
}

fn cmd_listen(
    host: String,
    port: u16,
    count: Option<u64>,
    only: Vec<String>,
    pretty: bool,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let filter = parse_only(&only)?;
    let source = UdpSocketSource::bind((host.as_str(), port)).map_err(|err| {
        CliError::new(
            format!("failed to bind {host}:{port}: {err}"),
            Some("is another listener already bound to the port?".to_string()),
        )
    })?;
    let local = source
        .local_addr()
        .map_err(|err| CliError::new(format!("failed to read bound address: {err}"), None))?;
    if !quiet {
        eprintln!("listening on {local}");
    }

    let mut feed = PacketFeed::new(source);
    let mut emitted = 0u64;
    while count.is_none_or(|limit| emitted < limit) {
        match feed.next_packet() {
            Ok(Some(event)) => {
                if !selected(&filter, event.packet.body.id()) {
                    continue;
                }
                let record = Record {
                    received_at: Some(now_rfc3339()),
                    ts: None,
                    kind: event.packet.body.id().name(),
                    header: &event.packet.header,
                    body: &event.packet.body,
                };
                println!("{}", serialize_record(&record, pretty)?);
                emitted += 1;
            }
            Ok(None) => break,
            Err(FeedError::Decode(err)) => {
                if strict {
                    return Err(CliError::new(
                        format!("undecodable datagram: {err}"),
                        Some("malformed traffic; drop --strict to skip it".to_string()),
                    ));
                }
                eprintln!("warning: dropped datagram: {err}");
            }
            Err(FeedError::Source(err)) => {
                return Err(CliError::new(format!("socket read failed: {err}"), None));
            }
        }
    }
    Ok(())
}

fn cmd_replay(
    input: PathBuf,
    port: u16,
    output: Option<PathBuf>,
    only: Vec<String>,
    pretty: bool,
    quiet: bool,
    strict: bool,
    stats: bool,
) -> Result<(), CliError> {
    let filter = parse_only(&only)?;
    let resolved = resolve_input_path(&input)?;
    validate_input_file(&resolved)?;

    let source = PcapReplaySource::open(&resolved, port).map_err(|err| {
        CliError::new(
            format!("failed to open {}: {err}", resolved.display()),
            Some("expected a valid .pcap or .pcapng capture".to_string()),
        )
    })?;
    let mut feed = PacketFeed::new(source);

    let mut lines = output.as_ref().map(|_| Vec::new());
    let mut counts: BTreeMap<&'static str, u64> = BTreeMap::new();
    let mut emitted = 0u64;
    loop {
        match feed.next_packet() {
            Ok(Some(event)) => {
                let kind = event.packet.body.id().name();
                *counts.entry(kind).or_insert(0) += 1;
                if !selected(&filter, event.packet.body.id()) {
                    continue;
                }
                let record = Record {
                    received_at: None,
                    ts: event.ts,
                    kind,
                    header: &event.packet.header,
                    body: &event.packet.body,
                };
                let line = serialize_record(&record, pretty)?;
                match &mut lines {
                    Some(lines) => lines.push(line),
                    None => println!("{line}"),
                }
                emitted += 1;
            }
            Ok(None) => break,
            Err(FeedError::Decode(err)) => {
                if strict {
                    return Err(CliError::new(
                        format!("undecodable datagram: {err}"),
                        Some("malformed capture data; drop --strict to skip it".to_string()),
                    ));
                }
                eprintln!("warning: dropped datagram: {err}");
            }
            Err(FeedError::Source(err)) => {
                return Err(CliError::new(format!("capture read failed: {err}"), None));
            }
        }
    }

    if let (Some(path), Some(lines)) = (output.as_ref(), lines) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })
                    .map_err(CliError::from)?;
            }
        }
        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write output: {}", path.display()))
            .map_err(CliError::from)?;
        if !quiet {
            eprintln!("OK: {emitted} packets -> {}", path.display());
        }
    }

    if stats && !quiet {
        eprintln!("Packets by kind:");
        for (kind, count) in &counts {
            eprintln!("  {kind} {count}");
        }
    }
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}

fn parse_only(only: &[String]) -> Result<Option<Vec<PacketId>>, CliError> {
    if only.is_empty() {
        return Ok(None);
    }
    let mut kinds = Vec::with_capacity(only.len());
    for name in only {
        let kind = PacketId::from_name(name).ok_or_else(|| {
            CliError::new(
                format!("unknown packet kind '{name}'"),
                Some(KIND_HINT.to_string()),
            )
        })?;
        kinds.push(kind);
    }
    Ok(Some(kinds))
}

fn selected(filter: &Option<Vec<PacketId>>, id: PacketId) -> bool {
    match filter {
        Some(kinds) => kinds.contains(&id),
        None => true,
    }
}

fn serialize_record(record: &Record<'_>, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(record)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(record)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
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

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .pcap or .pcapng".to_string()),
        ));
    }
    if matches.len() > 1 {
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches)",
                pattern,
                matches.len()
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
