//! The immutable policy bundle an audit runs under.
//!
//! Every table the properties consult lives here: required sections,
//! domain keywords, placeholder patterns, the consolidated set, legacy
//! directory lists, and thresholds. `AuditPolicy::default()` is the
//! documented contract; the CLI may only adjust the Property 2 body
//! threshold and the date calendar mode.

use crate::markdown::has_section;
use crate::patterns::{
    DEFAULT_ACCEPTABLE_PHRASES, DEFAULT_METRIC_WORDS, DEFAULT_PLACEHOLDER_PATTERNS,
    DEFAULT_STATUS_CELLS, PlaceholderDetector,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRequirement {
    One(String),
    /// At least one member must be present.
    AnyOf(Vec<String>),
}

impl SectionRequirement {
    pub fn one(title: &str) -> Self {
        Self::One(title.to_string())
    }

    pub fn any_of(titles: &[&str]) -> Self {
        Self::AnyOf(titles.iter().map(|t| t.to_string()).collect())
    }

    pub fn is_satisfied(&self, titles: &[String]) -> bool {
        match self {
            Self::One(title) => has_section(titles, title),
            Self::AnyOf(options) => options.iter().any(|title| has_section(titles, title)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::One(title) => title.clone(),
            Self::AnyOf(options) => format!("one of [{}]", options.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min_year: i32,
    pub max_year: i32,
    pub strict_calendar: bool,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            min_year: 2020,
            max_year: 2030,
            strict_calendar: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditPolicy {
    pub consolidated_viewpoints: Vec<String>,
    pub consolidated_perspectives: Vec<String>,
    pub consolidated_viewpoint_sections: Vec<SectionRequirement>,
    pub consolidated_perspective_sections: Vec<SectionRequirement>,
    pub viewpoint_sections: Vec<SectionRequirement>,
    pub perspective_sections: Vec<SectionRequirement>,
    pub header_fields: Vec<String>,
    pub header_probe_lines: usize,
    pub domain_keywords: BTreeMap<String, Vec<String>>,
    pub consolidation_markers: Vec<String>,
    pub min_body_chars: usize,
    pub max_related_links: usize,
    pub min_scenarios: usize,
    pub legacy_viewpoint_dirs: Vec<String>,
    pub moved_target_dirs: Vec<String>,
    pub deleted_root_dirs: Vec<String>,
    /// Deleted root directories no link may point into. `development` is
    /// absent because `viewpoints/development` legitimately replaced it.
    pub forbidden_link_dirs: Vec<String>,
    pub umbrella_docs: Vec<String>,
    pub reorganized_segments: Vec<String>,
    pub generated_diagrams_dir: String,
    pub dates: DateBounds,
    pub placeholders: PlaceholderDetector,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Default for AuditPolicy {
    fn default() -> Self {
        let mut domain_keywords = BTreeMap::new();
        domain_keywords.insert(
            "functional".to_string(),
            strings(&[
                "bounded context",
                "domain-driven design",
                "hexagonal architecture",
                "aggregate",
                "domain event",
            ]),
        );
        domain_keywords.insert(
            "information".to_string(),
            strings(&[
                "data model",
                "data ownership",
                "consistency",
                "data flow",
                "retention",
            ]),
        );
        domain_keywords.insert(
            "performance".to_string(),
            strings(&[
                "response time",
                "throughput",
                "scalability",
                "caching",
                "load testing",
            ]),
        );
        domain_keywords.insert(
            "security".to_string(),
            strings(&[
                "authentication",
                "authorization",
                "encryption",
                "compliance",
                "data protection",
            ]),
        );

        let deleted_root_dirs = strings(&[
            "operations",
            "development",
            "infrastructure",
            "getting-started",
            "examples",
            "generated",
        ]);
        let mut reorganized_segments = deleted_root_dirs.clone();
        reorganized_segments.extend(strings(&[
            "operational",
            "deployment",
            "coding-standards",
            "diagrams",
        ]));

        Self {
            consolidated_viewpoints: strings(&["functional", "information"]),
            consolidated_perspectives: strings(&["performance", "security"]),
            consolidated_viewpoint_sections: vec![
                SectionRequirement::one("Overview"),
                SectionRequirement::one("Purpose"),
                SectionRequirement::one("Stakeholders"),
                SectionRequirement::one("Contents"),
                SectionRequirement::any_of(&["Key Concerns", "Key Principles"]),
            ],
            consolidated_perspective_sections: vec![
                SectionRequirement::one("Overview"),
                SectionRequirement::one("Purpose"),
                SectionRequirement::one("Stakeholders"),
                SectionRequirement::one("Key Concerns"),
                SectionRequirement::one("Quality Attribute Scenarios"),
            ],
            viewpoint_sections: vec![
                SectionRequirement::one("Overview"),
                SectionRequirement::one("Purpose"),
                SectionRequirement::one("Stakeholders"),
                SectionRequirement::one("Contents"),
                SectionRequirement::any_of(&["Key Concerns", "Key Principles"]),
            ],
            perspective_sections: vec![
                SectionRequirement::one("Overview"),
                SectionRequirement::one("Key Concerns"),
                SectionRequirement::one("Quality Attribute Scenarios"),
                SectionRequirement::any_of(&[
                    "Affected Viewpoints",
                    "Related Viewpoints",
                    "Contents",
                ]),
            ],
            header_fields: strings(&["Status", "Last Updated", "Owner"]),
            header_probe_lines: crate::header::PREAMBLE_LINES,
            domain_keywords,
            consolidation_markers: strings(&["consolidated", "merged", "overview.md"]),
            min_body_chars: 3000,
            max_related_links: 5,
            min_scenarios: 3,
            legacy_viewpoint_dirs: strings(&[
                "viewpoints/architecture",
                "viewpoints/infrastructure",
                "viewpoints/security",
            ]),
            moved_target_dirs: strings(&[
                "viewpoints/operational/deployment",
                "viewpoints/development/coding-standards",
                "viewpoints/deployment/infrastructure",
            ]),
            deleted_root_dirs,
            forbidden_link_dirs: strings(&[
                "operations",
                "infrastructure",
                "getting-started",
                "examples",
                "generated",
            ]),
            umbrella_docs: strings(&[
                "README.md",
                "viewpoints/README.md",
                "FAQ.md",
                "QUICK-START-GUIDE.md",
            ]),
            reorganized_segments,
            generated_diagrams_dir: "diagrams/generated".to_string(),
            dates: DateBounds::default(),
            placeholders: PlaceholderDetector::new(
                DEFAULT_PLACEHOLDER_PATTERNS,
                DEFAULT_ACCEPTABLE_PHRASES,
                DEFAULT_STATUS_CELLS,
                DEFAULT_METRIC_WORDS,
            )
            .expect("built-in placeholder patterns compile"),
        }
    }
}

impl AuditPolicy {
    pub fn with_min_body_chars(mut self, min_body_chars: usize) -> Self {
        self.min_body_chars = min_body_chars;
        self
    }

    pub fn with_strict_calendar(mut self, strict: bool) -> Self {
        self.dates.strict_calendar = strict;
        self
    }

    pub fn is_consolidated_viewpoint(&self, slug: &str) -> bool {
        self.consolidated_viewpoints.iter().any(|s| s == slug)
    }

    pub fn is_consolidated_perspective(&self, slug: &str) -> bool {
        self.consolidated_perspectives.iter().any(|s| s == slug)
    }

    pub fn keywords_for(&self, slug: &str) -> &[String] {
        self.domain_keywords
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternative_groups_need_one_member() {
        let requirement = SectionRequirement::any_of(&["Key Concerns", "Key Principles"]);
        let titles = vec!["Key Principles and Trade-offs".to_string()];
        assert!(requirement.is_satisfied(&titles));
        assert!(!requirement.is_satisfied(&["Overview".to_string()]));
        assert_eq!(
            requirement.describe(),
            "one of [Key Concerns, Key Principles]"
        );
    }

    #[test]
    fn default_policy_carries_the_contract_tables() {
        let policy = AuditPolicy::default();
        assert_eq!(policy.min_body_chars, 3000);
        assert_eq!(policy.max_related_links, 5);
        assert_eq!(policy.min_scenarios, 3);
        assert!(policy.is_consolidated_viewpoint("functional"));
        assert!(policy.is_consolidated_perspective("security"));
        assert!(!policy.is_consolidated_perspective("cost"));
        assert_eq!(policy.keywords_for("security").len(), 5);
        assert!(policy.keywords_for("cost").is_empty());
        assert!(!policy.dates.strict_calendar);
        assert!(
            policy
                .forbidden_link_dirs
                .iter()
                .all(|dir| policy.deleted_root_dirs.contains(dir))
        );
    }

    #[test]
    fn builder_overrides_only_named_fields() {
        let policy = AuditPolicy::default()
            .with_min_body_chars(1200)
            .with_strict_calendar(true);
        assert_eq!(policy.min_body_chars, 1200);
        assert!(policy.dates.strict_calendar);
        assert_eq!(policy.dates.min_year, 2020);
    }
}
