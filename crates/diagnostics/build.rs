//! Build script for generating diagnostic code data at compile time.
//!
//! Reads `spec/diagnostics.jsonc` and writes into `OUT_DIR`:
//! - `generated_codes.rs`: one `DiagnosticCode` constant per entry plus `ALL`
//! - `generated_explain.rs`: name → long description match
//! - `generated_severity.rs`: name → default severity match
//! - `generated_templates.rs`: (name, variant) → message template match
//! - `generated_policy.rs`: the set of scan-terminating codes

use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::Path;

use gs1_jsonc_strip::strip_jsonc;

const GENERATED_HEADER: &str = "// Auto-generated from spec/diagnostics.jsonc. DO NOT EDIT.\n\n";

struct Entry<'a> {
    number: u64,
    const_name: &'a str,
    severity_rs: &'static str,
    terminates_scan: bool,
    summary: &'a str,
    description: &'a str,
    templates: Vec<(&'a str, &'a str)>,
}

fn main() {
    let spec_path = Path::new("spec/diagnostics.jsonc");
    println!("cargo:rerun-if-changed={}", spec_path.display());

    let raw = fs::read_to_string(spec_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", spec_path.display()));
    let spec: serde_json::Value = serde_json::from_str(&strip_jsonc(&raw))
        .expect("failed to parse diagnostics.jsonc as JSON");
    let diagnostics = spec["diagnostics"]
        .as_array()
        .expect("diagnostics.jsonc: expected `diagnostics` array");

    let entries: Vec<Entry<'_>> = diagnostics
        .iter()
        .enumerate()
        .map(|(i, entry)| read_entry(i, entry))
        .collect();
    check_uniqueness(diagnostics, &entries);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = Path::new(&out_dir);

    // ── generated_codes.rs ──────────────────────────────────────────────
    let mut codes = String::from(GENERATED_HEADER);
    for e in &entries {
        codes.push_str(&format!("/// {} ({})\n", e.summary, e.number));
        codes.push_str(&format!(
            "pub const {name}: DiagnosticCode = DiagnosticCode::new({number}, \"{name}\");\n\n",
            name = e.const_name,
            number = e.number
        ));
    }
    codes.push_str("/// Every diagnostic code, in catalogue order.\npub const ALL: &[DiagnosticCode] = &[\n");
    for e in &entries {
        codes.push_str(&format!("    {},\n", e.const_name));
    }
    codes.push_str("];\n");
    write(out_path, "generated_codes.rs", &codes);

    // ── generated_explain.rs ────────────────────────────────────────────
    let mut explain = String::from("match name {\n");
    for e in &entries {
        explain.push_str(&format!(
            "    \"{}\" => Some(\"{}\"),\n",
            e.const_name,
            escape_rust_string_literal(e.description)
        ));
    }
    explain.push_str("    _ => None,\n}\n");
    write(out_path, "generated_explain.rs", &explain);

    // ── generated_severity.rs ───────────────────────────────────────────
    let mut severity = String::from("match name {\n");
    for e in &entries {
        severity.push_str(&format!(
            "    \"{}\" => Some({}),\n",
            e.const_name, e.severity_rs
        ));
    }
    severity.push_str("    _ => None,\n}\n");
    write(out_path, "generated_severity.rs", &severity);

    // ── generated_templates.rs ──────────────────────────────────────────
    let mut templates = String::from("match (name, variant) {\n");
    for e in &entries {
        for (variant, template) in &e.templates {
            templates.push_str(&format!(
                "    (\"{}\", \"{}\") => Some(\"{}\"),\n",
                e.const_name,
                variant,
                escape_rust_string_literal(template)
            ));
        }
    }
    templates.push_str("    _ => None,\n}\n");
    write(out_path, "generated_templates.rs", &templates);

    // ── generated_policy.rs ─────────────────────────────────────────────
    let mut policy = String::from(GENERATED_HEADER);
    policy.push_str("/// Codes for the structural conditions that stop the tokenizer.\n");
    policy.push_str("pub const SCAN_TERMINATING: &[DiagnosticCode] = &[\n");
    for e in entries.iter().filter(|e| e.terminates_scan) {
        policy.push_str(&format!("    crate::codes::{},\n", e.const_name));
    }
    policy.push_str("];\n");
    write(out_path, "generated_policy.rs", &policy);
}

fn read_entry(i: usize, entry: &serde_json::Value) -> Entry<'_> {
    let const_name = entry["constName"]
        .as_str()
        .unwrap_or_else(|| panic!("diagnostics[{i}] missing `constName`"));
    let number = entry["number"]
        .as_u64()
        .unwrap_or_else(|| panic!("diagnostics[{i}] ({const_name}) missing numeric `number`"));
    assert!(
        (2000..=2999).contains(&number),
        "diagnostics[{i}] ({const_name}): number {number} outside 2000..=2999"
    );
    assert!(
        !const_name.is_empty()
            && const_name
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
            && const_name.as_bytes()[0].is_ascii_uppercase(),
        "diagnostics[{i}]: constName '{const_name}' is not a valid SCREAMING_SNAKE_CASE identifier"
    );
    let severity_rs = match entry["severity"].as_str() {
        Some("fatal") => "Severity::Fatal",
        Some("error") => "Severity::Error",
        Some("warn") => "Severity::Warn",
        other => panic!("diagnostics[{i}] ({const_name}): invalid severity {other:?}"),
    };
    let terminates_scan = entry["terminatesScan"]
        .as_bool()
        .unwrap_or_else(|| panic!("diagnostics[{i}] ({const_name}) missing `terminatesScan`"));
    let summary = entry["summary"]
        .as_str()
        .unwrap_or_else(|| panic!("diagnostics[{i}] ({const_name}) missing `summary`"));
    let description = entry["description"]
        .as_str()
        .unwrap_or_else(|| panic!("diagnostics[{i}] ({const_name}) missing `description`"));
    let context_keys: HashSet<&str> = entry["contextKeys"]
        .as_array()
        .unwrap_or_else(|| panic!("diagnostics[{i}] ({const_name}) missing `contextKeys`"))
        .iter()
        .map(|k| {
            k.as_str().unwrap_or_else(|| {
                panic!("diagnostics[{i}] ({const_name}) contextKeys entries must be strings")
            })
        })
        .collect();

    let mut templates = Vec::new();
    if let Some(map) = entry["messageTemplates"].as_object() {
        for (variant, template) in map {
            let template = template.as_str().unwrap_or_else(|| {
                panic!("diagnostics[{i}] ({const_name}) messageTemplates.{variant} must be a string")
            });
            for placeholder in extract_template_placeholders(template) {
                assert!(
                    context_keys.contains(placeholder),
                    "diagnostics[{i}] ({const_name}) messageTemplates.{variant} references '{{{placeholder}}}' not listed in contextKeys"
                );
            }
            templates.push((variant.as_str(), template));
        }
    }
    assert!(
        templates.iter().any(|(variant, _)| *variant == "default"),
        "diagnostics[{i}] ({const_name}) needs a `default` message template"
    );

    Entry {
        number,
        const_name,
        severity_rs,
        terminates_scan,
        summary,
        description,
        templates,
    }
}

/// Names must be unique; a number may repeat only across different scopes.
fn check_uniqueness(raw: &[serde_json::Value], entries: &[Entry<'_>]) {
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut seen_numbers: HashMap<(u64, &str), &str> = HashMap::new();
    for (i, (json, e)) in raw.iter().zip(entries).enumerate() {
        assert!(
            seen_names.insert(e.const_name),
            "diagnostics[{i}]: duplicate constName '{}'",
            e.const_name
        );
        let scope = json["scope"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] ({}) missing `scope`", e.const_name));
        if let Some(previous) = seen_numbers.insert((e.number, scope), e.const_name) {
            panic!(
                "diagnostics[{i}]: number {} used twice in scope '{scope}' ({previous}, {})",
                e.number, e.const_name
            );
        }
    }
}

fn write(dir: &Path, file: &str, contents: &str) {
    fs::write(dir.join(file), contents).unwrap_or_else(|e| panic!("failed to write {file}: {e}"));
}

fn escape_rust_string_literal(value: &str) -> String {
    value.chars().flat_map(char::escape_default).collect()
}

fn extract_template_placeholders(template: &str) -> Vec<&str> {
    let mut placeholders = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            break;
        };
        let key = after_open[..close].trim();
        if !key.is_empty() {
            placeholders.push(key);
        }
        rest = &after_open[close + 1..];
    }
    placeholders
}
