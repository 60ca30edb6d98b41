use gs1_diagnostics::{Diagnostic, DiagnosticCode, message_template_for};
use std::collections::{BTreeMap, HashMap};

/// Build a diagnostic with the catalogue severity and rendered default
/// message. Substitutions double as the diagnostic's context map.
pub(crate) fn catalogue_diagnostic(
    code: DiagnosticCode,
    substitutions: &[(&str, String)],
    offset: Option<usize>,
) -> Diagnostic {
    let message = render_diagnostic_message(code, "default", substitutions);
    let diagnostic = Diagnostic::from_catalogue(code, message, offset);
    if substitutions.is_empty() {
        return diagnostic;
    }
    let context: BTreeMap<String, String> = substitutions
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect();
    diagnostic.with_context(context)
}

pub(crate) fn render_diagnostic_message(
    code: DiagnosticCode,
    variant: &str,
    substitutions: &[(&str, String)],
) -> String {
    let Some(template) = message_template_for(code.name(), variant) else {
        return code.name().to_ascii_lowercase().replace('_', " ");
    };
    let substitution_map: HashMap<&str, &str> = substitutions
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    let mut rendered = String::with_capacity(template.len() + 16);
    let mut scan_from = 0usize;
    while let Some(open_rel) = template[scan_from..].find('{') {
        let open = scan_from + open_rel;
        rendered.push_str(&template[scan_from..open]);
        let after_open = open + 1;
        if let Some(close_rel) = template[after_open..].find('}') {
            let close = after_open + close_rel;
            let key = &template[after_open..close];
            if let Some(value) = substitution_map.get(key) {
                rendered.push_str(value);
            } else {
                rendered.push_str(&template[open..=close]);
            }
            scan_from = close + 1;
        } else {
            rendered.push_str(&template[open..]);
            return rendered;
        }
    }
    rendered.push_str(&template[scan_from..]);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs1_diagnostics::{Severity, codes};

    #[test]
    fn renders_placeholders_and_context() {
        let d = catalogue_diagnostic(
            codes::INSUFFICIENT_LENGTH,
            &[
                ("ai", "01".into()),
                ("expected", "14".into()),
                ("actual", "13".into()),
            ],
            None,
        );
        assert_eq!(
            d.message,
            "fixed-width entity '01' does not contain sufficient characters (expected 14, found 13)"
        );
        assert_eq!(d.severity, Severity::Fatal);
        let ctx = d.context.expect("context");
        assert_eq!(ctx.get("expected").map(String::as_str), Some("14"));
    }

    #[test]
    fn unknown_placeholder_is_left_verbatim() {
        let msg = render_diagnostic_message(codes::VALUE_INVALID, "default", &[]);
        assert_eq!(msg, "value invalid for AI '{ai}'");
    }

    #[test]
    fn missing_variant_falls_back_to_name() {
        let msg = render_diagnostic_message(codes::NULL_VALUE, "nonexistent", &[]);
        assert_eq!(msg, "null value");
    }

    #[test]
    fn no_context_without_substitutions() {
        let d = catalogue_diagnostic(codes::NO_DATA, &[], None);
        assert!(d.context.is_none());
        assert_eq!(d.message, "no entity value provided");
    }
}
