//! Properties 1 and 2: consolidated directories carry one complete README.

use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::fs_view::join;
use docaudit_kernel::{PropertyId, TopicKind, Violation, ViolationKind};

const PROPERTY_1: PropertyId = PropertyId::FileConsolidationCompleteness;
const PROPERTY_2: PropertyId = PropertyId::ContentPreservation;

pub fn file_consolidation_completeness(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for (kind, slug) in ctx.consolidated_dirs() {
        let dir = join(kind.dir(), &slug);
        eval.inspected += 1;

        let overview = join(&dir, "overview.md");
        if ctx.fs.exists(&overview) {
            eval.push(Violation::new(
                PROPERTY_1,
                overview,
                ViolationKind::UnexpectedFile,
                "overview.md must be merged into README.md and removed",
            ));
        }
        let readme = join(&dir, "README.md");
        if !ctx.fs.exists(&readme) {
            eval.push(Violation::new(
                PROPERTY_1,
                readme,
                ViolationKind::MissingFile,
                "consolidated README.md is missing",
            ));
        }
    }
    eval
}

pub fn content_preservation(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for (kind, slug, readme) in ctx.consolidated_readmes() {
        let Some(doc) = ctx.open(PROPERTY_2, &readme, OnMissing::Skip, &mut eval) else {
            continue;
        };

        let requirements = match kind {
            TopicKind::Viewpoint => &ctx.policy.consolidated_viewpoint_sections,
            TopicKind::Perspective => &ctx.policy.consolidated_perspective_sections,
        };
        for requirement in requirements {
            if !requirement.is_satisfied(doc.sections()) {
                eval.push(Violation::new(
                    PROPERTY_2,
                    &readme,
                    ViolationKind::MissingSection,
                    format!("missing required section: {}", requirement.describe()),
                ));
            }
        }

        let lowered = doc.text().to_lowercase();
        for keyword in ctx.policy.keywords_for(&slug) {
            if !lowered.contains(&keyword.to_lowercase()) {
                eval.push(Violation::new(
                    PROPERTY_2,
                    &readme,
                    ViolationKind::MissingKeyword,
                    format!("missing domain keyword \"{keyword}\""),
                ));
            }
        }

        let markers = &ctx.policy.consolidation_markers;
        if !markers
            .iter()
            .any(|marker| lowered.contains(&marker.to_lowercase()))
        {
            eval.push(Violation::new(
                PROPERTY_2,
                &readme,
                ViolationKind::MissingConsolidationNote,
                format!(
                    "does not record the consolidation (expected one of: {})",
                    markers.join(", ")
                ),
            ));
        }

        let chars = doc.char_len();
        if chars < ctx.policy.min_body_chars {
            eval.push(Violation::new(
                PROPERTY_2,
                &readme,
                ViolationKind::BodyTooShort,
                format!(
                    "body has {chars} chars (< {} chars)",
                    ctx.policy.min_body_chars
                ),
            ));
        }
    }
    eval
}
