//! Verdicts and the audit report.
//!
//! The text form is what a human reads on stdout; the JSON form is a
//! witness with a stable digest so two runs over the same tree can be
//! compared byte-for-byte.

use crate::context::Evaluation;
use docaudit_kernel::error::sort_violations;
use docaudit_kernel::{PropertyId, Violation};
use serde::Serialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

pub const REPORT_KIND: &str = "docaudit.report.v1";
pub const REPORT_SCHEMA: u32 = 1;
const DIGEST_PREFIX: &str = "docrpt1_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    NotApplicable,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::NotApplicable => "N/A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditVerdict {
    pub property: PropertyId,
    pub outcome: Outcome,
    pub inspected: usize,
    /// Report order: file path, then line.
    pub violations: Vec<Violation>,
}

impl AuditVerdict {
    pub fn from_evaluation(property: PropertyId, evaluation: Evaluation) -> Self {
        let Evaluation {
            mut violations,
            inspected,
        } = evaluation;
        sort_violations(&mut violations);
        let outcome = if !violations.is_empty() {
            Outcome::Fail
        } else if inspected == 0 {
            Outcome::NotApplicable
        } else {
            Outcome::Pass
        };
        Self {
            property,
            outcome,
            inspected,
            violations,
        }
    }

    pub fn header_line(&self) -> String {
        let mut line = format!(
            "{} property {}: {} ({})",
            self.outcome.label(),
            self.property.number(),
            self.property.name(),
            self.property.validates_trail()
        );
        if self.outcome == Outcome::Fail {
            line.push_str(&format!(" violations={}", self.violations.len()));
        }
        line
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub pass: usize,
    pub fail: usize,
    pub not_applicable: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub root: String,
    pub verdicts: Vec<AuditVerdict>,
}

impl Report {
    /// True when no property failed. Not-applicable never fails an audit.
    pub fn passed(&self) -> bool {
        self.verdicts
            .iter()
            .all(|verdict| verdict.outcome != Outcome::Fail)
    }

    pub fn verdict(&self, property: PropertyId) -> Option<&AuditVerdict> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.property == property)
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for verdict in &self.verdicts {
            match verdict.outcome {
                Outcome::Pass => summary.pass += 1,
                Outcome::Fail => summary.fail += 1,
                Outcome::NotApplicable => summary.not_applicable += 1,
            }
        }
        summary
    }

    pub fn violation_count(&self) -> usize {
        self.verdicts
            .iter()
            .map(|verdict| verdict.violations.len())
            .sum()
    }

    /// Distinct violation kinds, sorted.
    pub fn failure_classes(&self) -> Vec<&'static str> {
        self.verdicts
            .iter()
            .flat_map(|verdict| verdict.violations.iter().map(|v| v.kind.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("[docaudit] root={}\n", self.root));
        for verdict in &self.verdicts {
            out.push_str(&verdict.header_line());
            out.push('\n');
            for violation in &verdict.violations {
                out.push_str(&violation.render());
                out.push('\n');
            }
        }
        let summary = self.summary();
        out.push_str(&format!(
            "[docaudit] {} (pass={}, fail={}, n/a={}, violations={})\n",
            if self.passed() { "OK" } else { "FAIL" },
            summary.pass,
            summary.fail,
            summary.not_applicable,
            self.violation_count()
        ));
        out
    }

    fn payload(&self) -> Value {
        let properties: Vec<Value> = self
            .verdicts
            .iter()
            .map(|verdict| {
                json!({
                    "id": verdict.property.number(),
                    "name": verdict.property.name(),
                    "validates": verdict.property.validates(),
                    "outcome": verdict.outcome,
                    "inspected": verdict.inspected,
                    "violations": verdict.violations,
                })
            })
            .collect();
        json!({
            "schema": REPORT_SCHEMA,
            "reportKind": REPORT_KIND,
            "root": self.root,
            "result": if self.passed() { "accepted" } else { "rejected" },
            "failureClasses": self.failure_classes(),
            "summary": self.summary(),
            "properties": properties,
        })
    }

    /// `docrpt1_` + SHA-256 over the canonical JSON payload.
    pub fn digest(&self) -> String {
        digest_payload(&self.payload())
    }

    pub fn to_json(&self) -> Value {
        let mut payload = self.payload();
        let digest = digest_payload(&payload);
        if let Some(object) = payload.as_object_mut() {
            object.insert("reportDigest".to_string(), Value::String(digest));
        }
        payload
    }
}

/// serde_json maps keep keys sorted, so compact serialization is canonical.
fn digest_payload(payload: &Value) -> String {
    let canonical = serde_json::to_string(payload).expect("report payload serializes to JSON");
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{DIGEST_PREFIX}{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docaudit_kernel::ViolationKind;

    fn evaluation(violations: Vec<Violation>, inspected: usize) -> Evaluation {
        Evaluation {
            violations,
            inspected,
        }
    }

    fn sample_report() -> Report {
        let short = Violation::new(
            PropertyId::ContentPreservation,
            "viewpoints/functional/README.md",
            ViolationKind::BodyTooShort,
            "body has 2500 chars (< 3000 chars)",
        );
        let keyword = Violation::new(
            PropertyId::ContentPreservation,
            "viewpoints/functional/README.md",
            ViolationKind::MissingKeyword,
            "missing domain keyword \"aggregate\"",
        );
        Report {
            root: "<memory>".to_string(),
            verdicts: vec![
                AuditVerdict::from_evaluation(
                    PropertyId::FileConsolidationCompleteness,
                    evaluation(Vec::new(), 4),
                ),
                AuditVerdict::from_evaluation(
                    PropertyId::ContentPreservation,
                    evaluation(vec![short, keyword], 4),
                ),
                AuditVerdict::from_evaluation(
                    PropertyId::CrossReferenceLimit,
                    evaluation(Vec::new(), 0),
                ),
            ],
        }
    }

    #[test]
    fn outcome_follows_violations_then_inspection() {
        let report = sample_report();
        let outcomes: Vec<Outcome> = report.verdicts.iter().map(|v| v.outcome).collect();
        assert_eq!(
            outcomes,
            vec![Outcome::Pass, Outcome::Fail, Outcome::NotApplicable]
        );
        assert!(!report.passed());
        assert_eq!(
            report.summary(),
            Summary {
                pass: 1,
                fail: 1,
                not_applicable: 1
            }
        );
        assert_eq!(
            report.failure_classes(),
            vec!["body_too_short", "missing_keyword"]
        );
    }

    #[test]
    fn not_applicable_does_not_fail_the_report() {
        let report = Report {
            root: "<memory>".to_string(),
            verdicts: vec![AuditVerdict::from_evaluation(
                PropertyId::QasCount,
                evaluation(Vec::new(), 0),
            )],
        };
        assert!(report.passed());
        assert_eq!(report.to_json()["result"], "accepted");
    }

    #[test]
    fn text_report_groups_violations_under_their_property() {
        insta::assert_snapshot!(sample_report().render_text(), @r#"
        [docaudit] root=<memory>
        PASS property 1: File Consolidation Completeness (Validates: 1.1, 1.2)
        FAIL property 2: Content Preservation (Validates: 1.3, 1.4) violations=2
        viewpoints/functional/README.md (body_too_short): body has 2500 chars (< 3000 chars)
        viewpoints/functional/README.md (missing_keyword): missing domain keyword "aggregate"
        N/A property 3: Cross-Reference Limit (Validates: 2.1)
        [docaudit] FAIL (pass=1, fail=1, n/a=1, violations=2)
        "#);
    }

    #[test]
    fn json_report_carries_a_stable_digest() {
        let report = sample_report();
        let payload = report.to_json();
        assert_eq!(payload["schema"], 1);
        assert_eq!(payload["reportKind"], REPORT_KIND);
        assert_eq!(payload["result"], "rejected");
        assert_eq!(payload["properties"][1]["outcome"], "fail");
        assert_eq!(payload["properties"][1]["violations"][0]["property"], 2);
        assert_eq!(payload["properties"][2]["outcome"], "not_applicable");

        let digest = payload["reportDigest"].as_str().unwrap_or_default();
        assert!(digest.starts_with("docrpt1_"));
        assert_eq!(digest.len(), "docrpt1_".len() + 64);
        assert_eq!(digest, sample_report().digest());
    }

    #[test]
    fn digest_hashes_the_serialized_payload() {
        let payload = sample_report().payload();
        let canonical = serde_json::to_string(&payload).expect("payload serializes");
        assert!(!canonical.is_empty());
        let expected = format!("{DIGEST_PREFIX}{:x}", Sha256::digest(canonical.as_bytes()));
        assert_eq!(sample_report().digest(), expected);
    }
}
