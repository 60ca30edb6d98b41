mod input;
mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gs1_core::{
    PrefixAllocation, Registry, ResolvedField, ScanOptions, country_for, load_options_from_str,
};
use gs1_diagnostics as diag;
use gs1_tables::load_registry_table_from_str;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::input::read_input;
use crate::render::{Format, located, print_fields_pretty, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gs1",
    version,
    about = "Scan and validate GS1 element strings"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log scan progress to stderr (`-v` debug, `-vv` trace). `RUST_LOG`
    /// applies when not given.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Arguments shared by the scanning commands.
#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Element string to scan, or `-` to read it from stdin. The group
    /// separator may be written as `\x1d`, `<GS>` or `^`.
    input: String,
    /// Path to a JSONC AI registry replacing the built-in one.
    #[arg(long)]
    registry: Option<String>,
    /// Path to a JSON scan options file.
    #[arg(long)]
    options: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Scan an element string and print every resolved field.
    Parse(ScanArgs),

    /// Scan an element string and print only its diagnostics.
    Check(ScanArgs),

    /// Explain a diagnostic by number (e.g. 2017) or name (e.g. NULL_VALUE).
    Explain { code: String },

    /// Show which GS1 member organisation a company prefix is allocated to.
    Country { prefix: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse(args) => cmd_parse(&args, format)?,
        Cmd::Check(args) => cmd_check(&args, format)?,
        Cmd::Explain { code } => cmd_explain(&code, format)?,
        Cmd::Country { prefix } => cmd_country(&prefix, format)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(args: &ScanArgs, format: Format) -> Result<()> {
    let (input, filename) = read_input(&args.input)?;
    let fields = scan(args, &input)?;

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            let out = serde_json::json!({
                "ok": !any_fatal(&fields),
                "fields": fields,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Fields to stdout, diagnostics to stderr.
            print_fields_pretty(&fields);
            render_diagnostics_pretty(&input, filename, &fields);
            print_summary(&fields);
        }
    }

    exit_on_fatal(&fields);
    Ok(())
}

fn cmd_check(args: &ScanArgs, format: Format) -> Result<()> {
    let (input, filename) = read_input(&args.input)?;
    let fields = scan(args, &input)?;
    let ok = !any_fatal(&fields);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "fields": fields.len(),
                "diagnostics": located(&fields),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics_pretty(&input, filename, &fields);
            print_summary(&fields);
            if ok {
                eprintln!("check ok ({} fields)", fields.len());
            }
        }
    }

    exit_on_fatal(&fields);
    Ok(())
}

fn cmd_explain(key: &str, format: Format) -> Result<()> {
    let matches = diag::lookup(key);
    match format {
        Format::Json => {
            let entries: Vec<serde_json::Value> = matches
                .iter()
                .map(|code| {
                    serde_json::json!({
                        "number": code.number(),
                        "name": code.name(),
                        "severity": code.default_severity(),
                        "explanation": diag::explain(code.name()),
                    })
                })
                .collect();
            let out = serde_json::json!({
                "id": key,
                "matches": entries,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanations go to stdout.
            use ariadne::Fmt;
            if matches.is_empty() {
                println!("{key}: (no explanation available)");
            }
            for code in matches {
                let text = diag::explain(code.name()).unwrap_or("(no explanation available)");
                println!(
                    "{} {} ({}): {}",
                    code.number().fg(ariadne::Color::Cyan),
                    code.name(),
                    code.default_severity(),
                    text
                );
            }
        }
    }
    Ok(())
}

fn cmd_country(prefix: &str, format: Format) -> Result<()> {
    let allocation = country_for(prefix);
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "prefix": prefix,
                "allocation": allocation,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => println!("{prefix}: {}", describe_allocation(allocation)),
    }
    if allocation.is_none() {
        process::exit(1);
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn describe_allocation(allocation: Option<PrefixAllocation>) -> String {
    match allocation {
        Some(PrefixAllocation::Member { iso, name }) => format!("{name} ({iso})"),
        Some(PrefixAllocation::RestrictedCirculation) => "restricted circulation".into(),
        Some(PrefixAllocation::Coupon) => "coupons".into(),
        Some(PrefixAllocation::RefundReceipt) => "refund receipts".into(),
        Some(PrefixAllocation::Issn) => "serial publications (ISSN)".into(),
        Some(PrefixAllocation::Isbn) => "books (ISBN)".into(),
        Some(PrefixAllocation::GlobalOffice) => "GS1 Global Office".into(),
        Some(_) => "special allocation".into(),
        None => "not allocated".into(),
    }
}

/// Scan `input` with the registry and options named in `args`.
fn scan(args: &ScanArgs, input: &str) -> Result<Vec<ResolvedField>> {
    let options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file '{path}'"))?;
            load_options_from_str(&text)
                .with_context(|| format!("failed to load options file '{path}'"))?
        }
        None => ScanOptions::default(),
    };

    let custom;
    let registry = match &args.registry {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read registry file '{path}'"))?;
            let table = load_registry_table_from_str(&text)
                .with_context(|| format!("failed to load registry file '{path}'"))?;
            custom = Registry::from_table(&table)
                .with_context(|| format!("failed to compile registry file '{path}'"))?;
            debug!(path = %path, entries = custom.len(), "loaded custom registry");
            &custom
        }
        None => Registry::builtin(),
    };

    Ok(gs1_core::Parser::new(registry)
        .with_options(options)
        .parse_to_vec(Some(input)))
}

fn any_fatal(fields: &[ResolvedField]) -> bool {
    fields.iter().any(ResolvedField::is_fatal)
}

/// Exit with code 1 if any field carries a fatal diagnostic.
/// Errors and warnings alone do not cause a non-zero exit.
fn exit_on_fatal(fields: &[ResolvedField]) {
    if any_fatal(fields) {
        process::exit(1);
    }
}
