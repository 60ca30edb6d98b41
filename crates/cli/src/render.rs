//! Pretty diagnostic rendering using ariadne.
//!
//! Converts field diagnostics into ariadne [`Report`]s annotated against the
//! scanned element string. Falls back to structured JSON when the output is
//! piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};
use std::ops::Range;

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use gs1_core::ResolvedField;
use gs1_diagnostics::{Diagnostic, Severity};
use serde::Serialize;

use crate::input::display_source;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pick based on whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Located diagnostics ─────────────────────────────────────────────────

/// A diagnostic together with the field it was attached to.
#[derive(Debug, Serialize)]
pub(crate) struct LocatedDiagnostic<'a> {
    /// Character position of the field in the input.
    pub(crate) position: usize,
    /// The field's identifier as written.
    pub(crate) identifier: &'a str,
    #[serde(flatten)]
    pub(crate) diagnostic: &'a Diagnostic,
}

/// Every diagnostic of every field, in scan order.
pub(crate) fn located(fields: &[ResolvedField]) -> Vec<LocatedDiagnostic<'_>> {
    fields
        .iter()
        .flat_map(|field| {
            field.diagnostics().iter().map(move |diagnostic| LocatedDiagnostic {
                position: field.character_position(),
                identifier: field.identifier(),
                diagnostic,
            })
        })
        .collect()
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Fatal => ReportKind::Custom("fatal", Color::Red),
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Fatal | Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        _ => Color::White,
    }
}

/// Character span a diagnostic points at, clamped to a non-empty source.
fn span(field: &ResolvedField, diag: &Diagnostic, source_len: usize) -> Range<usize> {
    let position = field.character_position();
    let (start, end) = match diag.offset {
        Some(offset) => (position + offset, position + offset + 1),
        None => {
            let chunk = field.identifier().chars().count() + field.value().chars().count();
            (position, position + chunk)
        }
    };
    let start = start.min(source_len.saturating_sub(1));
    let end = end.min(source_len).max(start + 1);
    start..end
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    diag.context.as_ref().filter(|ctx| !ctx.is_empty()).map(|ctx| {
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    })
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render every field diagnostic in pretty (ariadne) format to stderr.
///
/// Reports are annotated against the input with separators shown as `␝`.
/// An empty input has nothing to annotate, so its diagnostics are printed
/// as standalone messages.
pub(crate) fn render_diagnostics_pretty(input: &str, filename: &str, fields: &[ResolvedField]) {
    let source = display_source(input);
    let source_len = source.chars().count();
    let config = Config::default().with_compact(false);

    // Build the Source once (O(n) line index) and reuse across all reports.
    let mut cache = (filename, Source::from(source.as_str()));

    for field in fields {
        for diag in field.diagnostics() {
            if source_len == 0 {
                eprintln!("{}[{}]: {}", diag.severity, diag.code, diag.message);
                if let Some(explanation) = diag.explain() {
                    eprintln!("  = help: {explanation}");
                }
                continue;
            }

            let range = span(field, diag, source_len);
            let label_msg = match field.entity() {
                Some(_) => format!("AI ({}) {}", field.identifier(), field.data_title()),
                None => format!("field '{}'", field.identifier()),
            };
            let mut builder = Report::build(report_kind(diag.severity), (filename, range.clone()))
                .with_code(diag.code.number())
                .with_message(&diag.message)
                .with_config(config)
                .with_label(
                    Label::new((filename, range))
                        .with_message(label_msg)
                        .with_color(severity_color(diag.severity)),
                );

            if let Some(note) = context_note(diag) {
                builder = builder.with_note(note);
            }
            if let Some(explanation) = diag.explain() {
                builder = builder.with_help(explanation);
            }

            builder.finish().eprint(&mut cache).ok();
        }
    }
}

/// Print one line per field to stdout: position, identifier, value, title.
pub(crate) fn print_fields_pretty(fields: &[ResolvedField]) {
    for field in fields {
        let value = display_source(field.value());
        let marker = if field.is_fatal() {
            format!("{}", "✗".fg(Color::Red))
        } else if field.is_error() {
            format!("{}", "!".fg(Color::Yellow))
        } else {
            format!("{}", "✓".fg(Color::Green))
        };
        let mut line = format!(
            "{marker} {:>4}  ({}) {value}",
            field.character_position(),
            field.identifier().fg(Color::Cyan),
        );
        if !field.data_title().is_empty() {
            line.push_str(&format!("  [{}]", field.data_title()));
        }
        if let Some(decimal) = field.decimal_value() {
            line.push_str(&format!("  = {decimal}"));
        }
        println!("{line}");
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line showing fatal/error/warning counts.
///
/// Example: `1 fatal, 2 errors, 1 warning`
pub(crate) fn print_summary(fields: &[ResolvedField]) {
    let (mut fatals, mut errors, mut warnings) = (0usize, 0usize, 0usize);
    for d in fields.iter().flat_map(ResolvedField::diagnostics) {
        match d.severity {
            Severity::Fatal => fatals += 1,
            Severity::Error => errors += 1,
            _ => warnings += 1,
        }
    }

    // Only print summary when there are diagnostics.
    if fatals + errors + warnings == 0 {
        return;
    }

    let mut parts = Vec::new();
    if fatals > 0 {
        parts.push(format!("{}", format!("{fatals} fatal").fg(Color::Red)));
    }
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    eprintln!("{}", parts.join(", "));
}
