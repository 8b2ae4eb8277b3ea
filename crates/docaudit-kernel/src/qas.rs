//! Quality Attribute Scenario extraction.
//!
//! A perspective documents its scenarios under a level-2 header containing
//! "Quality Attribute Scenarios". Each scenario opens with
//! `### Scenario N:`, `### QAS N`, or `**Scenario N`, and is measured by the
//! text following its `**Response Measure**:` marker.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const QAS_SECTION_TITLE: &str = "quality attribute scenarios";

static SCENARIO_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^###\s+Scenario\s+\d+[:\s]|^###\s+QAS\s+\d+|\*\*Scenario\s+\d+")
        .expect("scenario split regex")
});

static RESPONSE_MEASURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:-\s*)?\*\*Response Measure(?:\*\*:|:\*\*)").expect("response measure regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub title: String,
    /// Empty when the scenario has no `**Response Measure**:` marker.
    pub response_measure: String,
    /// 1-based document line of the scenario marker.
    pub line: usize,
}

/// Body of the Quality Attribute Scenarios section and the document line of
/// its first body line.
pub fn scenario_section(text: &str) -> Option<(usize, String)> {
    let lines: Vec<&str> = text.split('\n').collect();
    let header_idx = lines.iter().position(|line| {
        is_level_two(line) && line.to_lowercase().contains(QAS_SECTION_TITLE)
    })?;
    let body_start = header_idx + 1;
    let body_end = lines[body_start..]
        .iter()
        .position(|line| is_level_two(line))
        .map_or(lines.len(), |rel| body_start + rel);
    Some((body_start + 1, lines[body_start..body_end].join("\n")))
}

fn is_level_two(line: &str) -> bool {
    line.starts_with("## ") || line.starts_with("##\t")
}

pub fn extract_scenarios(text: &str) -> Vec<Scenario> {
    let Some((first_line, section)) = scenario_section(text) else {
        return Vec::new();
    };
    let markers: Vec<(usize, usize)> = SCENARIO_SPLIT_RE
        .find_iter(&section)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(idx, (start, end))| {
            let block_end = markers.get(idx + 1).map_or(section.len(), |next| next.0);
            let block = &section[*end..block_end];
            let marker = &section[*start..*end];
            Scenario {
                title: scenario_title(marker, block),
                response_measure: response_measure(block),
                line: first_line + crate::markdown::line_offset(&section, *start),
            }
        })
        .collect()
}

fn scenario_title(marker: &str, block: &str) -> String {
    let first = block
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c: char| c == '*' || c == ':')
        .trim();
    if first.is_empty() {
        marker
            .trim()
            .trim_matches(|c: char| c == '#' || c == '*' || c == ':')
            .trim()
            .to_string()
    } else {
        first.to_string()
    }
}

/// Text after the first `**Response Measure**:` up to the next blank line,
/// `###`/`##` header, or end of block.
pub fn response_measure(block: &str) -> String {
    let Some(marker) = RESPONSE_MEASURE_RE.find(block) else {
        return String::new();
    };
    let tail = &block[marker.end()..];
    let mut collected = Vec::new();
    for (idx, line) in tail.split('\n').enumerate() {
        let trimmed = line.trim();
        if idx > 0 && (trimmed.is_empty() || trimmed.starts_with("##")) {
            break;
        }
        collected.push(trimmed);
    }
    collected.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSPECTIVE: &str = "\
# Performance Perspective

## Overview

Intro.

## Quality Attribute Scenarios

Scenarios below are reviewed quarterly.

### Scenario 1: Peak checkout load
- **Source**: Customers
- **Response Measure**: 95th percentile latency < 2 seconds

### Scenario 2: Catalog search
**Response Measure**: 99.9% of queries
answered from cache

### QAS 3 Cold start
**Response Measure**: fast and reliable

## Related Documentation
### Scenario 9: outside the section
**Response Measure**: 1 ms
";

    #[test]
    fn splits_scenarios_within_section_only() {
        let scenarios = extract_scenarios(PERSPECTIVE);
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].title, "Peak checkout load");
        assert_eq!(scenarios[0].line, 11);
        assert_eq!(
            scenarios[0].response_measure,
            "95th percentile latency < 2 seconds"
        );
        assert_eq!(
            scenarios[1].response_measure,
            "99.9% of queries\nanswered from cache"
        );
        assert_eq!(scenarios[2].title, "Cold start");
        assert_eq!(scenarios[2].response_measure, "fast and reliable");
    }

    #[test]
    fn scenario_without_marker_has_empty_measure() {
        let text = "## Quality Attribute Scenarios (QAS)\n\n### Scenario 1: Outage\nNo measure here.\n";
        let scenarios = extract_scenarios(text);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].response_measure, "");
    }

    #[test]
    fn bold_scenario_markers_are_recognised() {
        let text = "## Quality Attribute Scenarios\n\n**Scenario 1**: Login storm\n- **Response Measure**: 500 TPS\n\n**Scenario 2**: Token refresh\n- **Response Measure**: < 100ms\n";
        let scenarios = extract_scenarios(text);
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].title, "Login storm");
        assert_eq!(scenarios[1].response_measure, "< 100ms");
    }

    #[test]
    fn no_section_no_scenarios() {
        assert!(extract_scenarios("## Overview\n### Scenario 1: x\n").is_empty());
    }
}
