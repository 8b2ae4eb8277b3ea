//! Preamble metadata probe: `Status`, `Last Updated`, `Owner`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Number of leading lines considered the document preamble.
pub const PREAMBLE_LINES: usize = 50;

/// Presence of each probed field, keyed by field name as requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderFields {
    present: BTreeMap<String, bool>,
}

impl HeaderFields {
    pub fn probe(text: &str, fields: &[String], preamble_lines: usize) -> Self {
        let preamble = text
            .split('\n')
            .take(preamble_lines)
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();
        let present = fields
            .iter()
            .map(|field| (field.clone(), field_present(&preamble, field)))
            .collect();
        Self { present }
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.present.get(field).copied().unwrap_or(false)
    }

    /// Missing fields, in the order they were requested.
    pub fn missing<'a>(&self, fields: &'a [String]) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|field| !self.is_present(field))
            .map(String::as_str)
            .collect()
    }
}

fn field_present(lowered_preamble: &str, field: &str) -> bool {
    let field = field.to_lowercase();
    [
        format!("**{field}**"),
        format!("> **{field}**"),
        format!("{field}:"),
        format!("{field} :"),
    ]
    .iter()
    .any(|needle| lowered_preamble.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        ["Status", "Last Updated", "Owner"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn detects_bold_and_colon_forms() {
        let text = "# Functional Viewpoint\n\n> **Status**: Active\n> **last updated**: 2025-01-15\nowner : Architecture Team\n";
        let probe = HeaderFields::probe(text, &fields(), PREAMBLE_LINES);
        assert!(probe.missing(&fields()).is_empty());
    }

    #[test]
    fn reports_each_missing_field() {
        let text = "# Doc\n\nStatus: Draft\n";
        let probe = HeaderFields::probe(text, &fields(), PREAMBLE_LINES);
        assert_eq!(probe.missing(&fields()), vec!["Last Updated", "Owner"]);
    }

    #[test]
    fn ignores_fields_after_the_preamble() {
        let mut text = String::from("# Doc\n");
        for _ in 0..60 {
            text.push_str("filler line\n");
        }
        text.push_str("**Owner**: late\n");
        let probe = HeaderFields::probe(&text, &fields(), PREAMBLE_LINES);
        assert!(!probe.is_present("Owner"));
    }
}
