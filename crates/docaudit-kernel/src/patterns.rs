//! Named predicates over document text: placeholder hits, date fields,
//! measurable response targets, and link context sufficiency.

use crate::policy::DateBounds;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const DEFAULT_PLACEHOLDER_PATTERNS: &[&str] = &[
    r"(?i)\bto be documented\b",
    r"(?i)\bcoming soon\b",
    r"(?i)\bplaceholder\b",
    r"(?i)\btodo\b",
    r"(?i)\bfixme\b",
    r"(?i)\btbd\b",
    r"(?i)\bwork in progress\b",
    r"(?i)\bwip\b",
    r"(?i)\bnot yet implemented\b",
    r"(?i)\bpending\b.*\bdocumentation\b",
    r"(?i)\bdocumentation pending\b",
    r"(?i)\bto be (?:added|completed|written|defined)\b",
    r"(?i)\bunder construction\b",
    r"(?i)\bneeds documentation\b",
    r"(?i)\[insert",
    r"(?i)\[add\b",
    r"(?i)\[fill in",
];

/// Lines containing any of these are negative self-references
/// ("shall not contain TODO") rather than placeholders.
pub const DEFAULT_ACCEPTABLE_PHRASES: &[&str] =
    &["shall not", "should not", "verify no", "patterns exist"];

/// Status-cell values that mark a table row as a status column.
pub const DEFAULT_STATUS_CELLS: &[&str] = &["in progress", "tbd", "work in progress", "wip"];

/// Words that mark a table row as a measurement/metric row.
pub const DEFAULT_METRIC_WORDS: &[&str] = &[
    "metric",
    "measure",
    "target",
    "threshold",
    "sla",
    "slo",
    "kpi",
    "latency",
    "throughput",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderHit {
    pub line: usize,
    pub matched: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PlaceholderDetector {
    patterns: Vec<Regex>,
    acceptable_phrases: Vec<String>,
    status_cells: Vec<String>,
    metric_words: Vec<String>,
}

impl PlaceholderDetector {
    pub fn new(
        patterns: &[&str],
        acceptable_phrases: &[&str],
        status_cells: &[&str],
        metric_words: &[&str],
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let owned = |items: &[&str]| -> Vec<String> {
            items.iter().map(|item| item.to_lowercase()).collect()
        };
        Ok(Self {
            patterns,
            acceptable_phrases: owned(acceptable_phrases),
            status_cells: owned(status_cells),
            metric_words: owned(metric_words),
        })
    }

    /// Unsuppressed placeholder hits, at most one per line.
    pub fn scan(&self, text: &str) -> Vec<PlaceholderHit> {
        let mut hits = Vec::new();
        let mut in_fence = false;
        for (idx, line) in text.split('\n').enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            let mut found: Vec<_> = self
                .patterns
                .iter()
                .flat_map(|re| re.find_iter(line))
                .collect();
            found.sort_by_key(|m| m.start());
            let Some(hit) = found
                .into_iter()
                .find(|m| !self.is_acceptable(line, m.as_str()))
            else {
                continue;
            };
            hits.push(PlaceholderHit {
                line: idx + 1,
                matched: hit.as_str().to_string(),
                text: line.trim().to_string(),
            });
        }
        hits
    }

    fn is_acceptable(&self, line: &str, matched: &str) -> bool {
        let lowered = line.to_lowercase();
        if self
            .acceptable_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
        {
            return true;
        }
        let trimmed = lowered.trim_start();
        if trimmed.starts_with("> **status**") {
            return true;
        }
        if lowered.contains("xxx") && lowered.contains("phone") {
            return true;
        }
        if !trimmed.starts_with('|') {
            return false;
        }
        let needle = matched
            .to_lowercase()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string();
        let in_status_cell = table_cells(&lowered).iter().any(|cell| {
            cell.contains(needle.as_str()) && self.status_cells.iter().any(|status| cell == status)
        });
        if in_status_cell {
            return true;
        }
        matched.eq_ignore_ascii_case("tbd")
            && self
                .metric_words
                .iter()
                .any(|word| lowered.contains(word.as_str()))
    }
}

/// Cells of a markdown table row, stripped of emphasis and decoration.
fn table_cells(row: &str) -> Vec<String> {
    row.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| {
            cell.trim()
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .collect()
}

// --- Dates ---------------------------------------------------------------

static FRONTMATTER_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*last_updated\s*:\s*["']?([^"'\r]*?)["']?\s*\r?$"#)
        .expect("frontmatter date regex")
});

static HEADER_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*last updated(?:\*\*\s*:|:\*\*)\s*(.*)$").expect("header date regex")
});

/// Year-first or year-last cells only; version strings like `1.0.0` are not dates.
static TABLE_DATE_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}/\d{1,2}/\d{2,4}|\d{1,2}-\d{1,2}-\d{4})$",
    )
    .expect("table date cell regex")
});

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("iso date regex"));

static DMY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("dmy date regex"));

static TEXT_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\b")
        .expect("text month regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Frontmatter,
    LastUpdatedHeader,
    ChangeHistoryTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateField {
    pub line: usize,
    pub raw: String,
    pub source: DateSource,
}

/// Every date-bearing field: `last_updated:` frontmatter, `**Last Updated**:`
/// headers, and date-shaped cells of table rows.
pub fn find_dates(text: &str) -> Vec<DateField> {
    let mut out = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        if let Some(raw) = FRONTMATTER_DATE_RE.captures(line).and_then(|c| c.get(1)) {
            out.push(DateField {
                line: line_no,
                raw: raw.as_str().trim().to_string(),
                source: DateSource::Frontmatter,
            });
            continue;
        }
        if let Some(raw) = HEADER_DATE_RE.captures(line).and_then(|c| c.get(1)) {
            let value = raw
                .as_str()
                .trim()
                .trim_end_matches(['*', '|', '\\'])
                .trim();
            if !value.is_empty() {
                out.push(DateField {
                    line: line_no,
                    raw: value.to_string(),
                    source: DateSource::LastUpdatedHeader,
                });
            }
            continue;
        }
        if line.trim_start().starts_with('|') {
            for cell in line.trim().trim_matches('|').split('|') {
                let cell = cell.trim();
                if TABLE_DATE_CELL_RE.is_match(cell) {
                    out.push(DateField {
                        line: line_no,
                        raw: cell.to_string(),
                        source: DateSource::ChangeHistoryTable,
                    });
                }
            }
        }
    }
    out
}

/// Why a date failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateIssue {
    Slash,
    DayMonthYear,
    TextMonth,
    YearOutOfRange(i32),
    MonthOutOfRange(u32),
    DayOutOfRange(u32),
    NotACalendarDate,
    Unrecognized,
}

impl std::fmt::Display for DateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slash => f.write_str("uses '/' instead of '-'"),
            Self::DayMonthYear => f.write_str("uses DD-MM-YYYY instead of YYYY-MM-DD"),
            Self::TextMonth => f.write_str("uses text month instead of YYYY-MM-DD"),
            Self::YearOutOfRange(year) => write!(f, "year {year} out of range"),
            Self::MonthOutOfRange(month) => write!(f, "month {month} out of range 1..=12"),
            Self::DayOutOfRange(day) => write!(f, "day {day} out of range 1..=31"),
            Self::NotACalendarDate => f.write_str("not a calendar date"),
            Self::Unrecognized => f.write_str("not in YYYY-MM-DD format"),
        }
    }
}

pub fn check_date(raw: &str, bounds: &DateBounds) -> Result<(), DateIssue> {
    let Some(caps) = ISO_DATE_RE.captures(raw) else {
        return Err(classify_date_failure(raw));
    };
    let number = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());
    let year: i32 = number(1).parse().map_err(|_| DateIssue::Unrecognized)?;
    let month: u32 = number(2).parse().map_err(|_| DateIssue::Unrecognized)?;
    let day: u32 = number(3).parse().map_err(|_| DateIssue::Unrecognized)?;
    if year < bounds.min_year || year > bounds.max_year {
        return Err(DateIssue::YearOutOfRange(year));
    }
    if !(1..=12).contains(&month) {
        return Err(DateIssue::MonthOutOfRange(month));
    }
    if !(1..=31).contains(&day) {
        return Err(DateIssue::DayOutOfRange(day));
    }
    if bounds.strict_calendar && NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(DateIssue::NotACalendarDate);
    }
    Ok(())
}

fn classify_date_failure(raw: &str) -> DateIssue {
    if raw.contains('/') {
        DateIssue::Slash
    } else if DMY_DATE_RE.is_match(raw) {
        DateIssue::DayMonthYear
    } else if TEXT_MONTH_RE.is_match(raw) {
        DateIssue::TextMonth
    } else {
        DateIssue::Unrecognized
    }
}

// --- Numeric targets -----------------------------------------------------

static MEASURABLE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+\.?\d*\s*%",
        r"(?i)\d+\.?\d*\s*(?:ms|milliseconds?|seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|years?)\b",
        r"[≤≥<>]\s*\d+",
        r"(?i)\b(?:tps|req/s|rps)\b",
        r"(?i)\d+\.?\d*\s*(?:mb|gb|kb)\b",
        r"\d+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("measurable target regex"))
    .collect()
});

/// A response measure is measurable when it carries a numeric target.
pub fn is_measurable(response_measure: &str) -> bool {
    MEASURABLE_RES
        .iter()
        .any(|re| re.is_match(response_measure))
}

// --- Link context --------------------------------------------------------

pub const CONTEXT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "for", "to", "of", "in", "on", "at", "by",
];

pub const MIN_CONTEXT_WORDS: usize = 3;
pub const MIN_CONTEXT_CHARS: usize = 20;

static ANY_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[[^\[\]]*\]\([^()]*\)").expect("any link regex"));

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+").expect("list marker regex"));

/// Meaningful words around a link after stripping links, list markers,
/// numerals, and markdown syntax.
pub fn context_words(lines: &[&str]) -> Vec<String> {
    let mut words = Vec::new();
    for line in lines {
        let without_links = ANY_LINK_RE.replace_all(line, " ");
        let without_marker = LIST_MARKER_RE.replace(&without_links, "");
        for raw in without_marker.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-')) {
            let word = raw.trim_matches(|c: char| c == '\'' || c == '-');
            if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let lowered = word.to_lowercase();
            if CONTEXT_STOP_WORDS.contains(&lowered.as_str()) {
                continue;
            }
            words.push(word.to_string());
        }
    }
    words
}

/// `lines` is previous, own, and next line of the link.
pub fn has_sufficient_context(lines: &[&str]) -> bool {
    let words = context_words(lines);
    let meaningful = words
        .iter()
        .filter(|word| word.chars().count() >= 3)
        .count();
    let text_len = words.join(" ").chars().count();
    meaningful >= MIN_CONTEXT_WORDS || text_len >= MIN_CONTEXT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PlaceholderDetector {
        PlaceholderDetector::new(
            DEFAULT_PLACEHOLDER_PATTERNS,
            DEFAULT_ACCEPTABLE_PHRASES,
            DEFAULT_STATUS_CELLS,
            DEFAULT_METRIC_WORDS,
        )
        .expect("default patterns compile")
    }

    fn permissive() -> DateBounds {
        DateBounds::default()
    }

    #[test]
    fn placeholder_hits_report_line_numbers() {
        let text = "# Doc\n\nThis section is TODO.\nCoverage: coming soon\nAll good here.\n";
        let hits = detector().scan(text);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].line, 3);
        assert_eq!(hits[0].matched, "TODO");
        assert_eq!(hits[1].line, 4);
    }

    #[test]
    fn placeholder_suppressions() {
        let text = "\
```
// TODO inside code
```
Documents shall not contain TODO markers.
> **Status**: Work in progress
| Component | Status |
| Search | In Progress |
| p99 latency target | TBD |
Call phone xxx-xxx-1234 placeholder mask
";
        assert!(detector().scan(text).is_empty());
    }

    #[test]
    fn exempt_match_does_not_hide_later_placeholder_on_same_line() {
        let hits = detector().scan("| p99 latency target | TBD | [insert value here] |\n");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched.to_lowercase(), "[insert");
    }

    #[test]
    fn status_badge_exemption_requires_quote_marker() {
        let hits = detector().scan("> **Status**: TBD\n**Status**: TBD\n");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn narrowed_table_rule_still_flags_prose_cells() {
        let text = "| Feature | Notes |\n| Export | work in progress, see later |\n";
        let hits = detector().scan(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn add_pattern_does_not_fire_on_words_starting_with_add() {
        let hits = detector().scan("See [Address Validation](address.md).\n[Add diagram here]\n");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn finds_dates_from_all_sources() {
        let text = "---\nlast_updated: \"2025-01-15\"\n---\n> **Last Updated**: 01/15/2025\n\n| Date | Change |\n|------|--------|\n| 2024-12-01 | Initial |\n";
        let dates = find_dates(text);
        assert_eq!(
            dates,
            vec![
                DateField {
                    line: 2,
                    raw: "2025-01-15".to_string(),
                    source: DateSource::Frontmatter,
                },
                DateField {
                    line: 4,
                    raw: "01/15/2025".to_string(),
                    source: DateSource::LastUpdatedHeader,
                },
                DateField {
                    line: 8,
                    raw: "2024-12-01".to_string(),
                    source: DateSource::ChangeHistoryTable,
                },
            ]
        );
    }

    #[test]
    fn version_cells_in_change_history_are_not_dates() {
        let text = "| Version | Date | Change |\n|---|---|---|\n| 1.0.0 | 2025-01-15 | Initial |\n| 2.1 | 03/04/2025 | Rework |\n";
        let raws: Vec<String> = find_dates(text).into_iter().map(|d| d.raw).collect();
        assert_eq!(raws, ["2025-01-15", "03/04/2025"]);
        assert!(check_date("2025-01-15", &permissive()).is_ok());
    }

    #[test]
    fn date_validation_and_failure_reasons() {
        let bounds = permissive();
        let check = |raw: &str| check_date(raw, &bounds);
        assert_eq!(check("2025-01-15"), Ok(()));
        assert_eq!(check("2025-02-30"), Ok(()));
        assert_eq!(check("2024-02-29"), Ok(()));
        assert_eq!(check("01/15/2025"), Err(DateIssue::Slash));
        assert_eq!(check("15-01-2025"), Err(DateIssue::DayMonthYear));
        assert_eq!(check("January 15, 2025"), Err(DateIssue::TextMonth));
        assert_eq!(check("2019-05-01"), Err(DateIssue::YearOutOfRange(2019)));
        assert_eq!(check("2025-13-01"), Err(DateIssue::MonthOutOfRange(13)));
        assert_eq!(check("2025-01-32"), Err(DateIssue::DayOutOfRange(32)));
        assert_eq!(check("soon"), Err(DateIssue::Unrecognized));
        assert_eq!(DateIssue::Slash.to_string(), "uses '/' instead of '-'");
    }

    #[test]
    fn strict_calendar_rejects_impossible_days_only() {
        let bounds = DateBounds {
            strict_calendar: true,
            ..DateBounds::default()
        };
        assert_eq!(
            check_date("2025-02-30", &bounds),
            Err(DateIssue::NotACalendarDate)
        );
        assert_eq!(check_date("2024-02-29", &bounds), Ok(()));
    }

    #[test]
    fn measurable_targets() {
        assert!(is_measurable("99.9%"));
        assert!(is_measurable("p95 under 200 ms"));
        assert!(is_measurable("≤ 5 errors"));
        assert!(is_measurable("sustains 1k TPS"));
        assert!(is_measurable("payload under 2 MB"));
        assert!(is_measurable("within 3 business cycles"));
        assert!(!is_measurable("fast and reliable"));
        assert!(!is_measurable(""));
    }

    #[test]
    fn link_context_sufficiency() {
        assert!(has_sufficient_context(&[
            "",
            "- [Security](../security/README.md) - authentication and authorization controls",
            "",
        ]));
        assert!(!has_sufficient_context(&["- [A](a.md)", "- [B](b.md)", "- [C](c.md)"]));
        assert!(!has_sufficient_context(&["", "1. [Guide](guide.md) see", ""]));
    }
}
