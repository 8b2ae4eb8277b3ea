//! Properties 11 and 12: every viewpoint and perspective README follows its
//! template and carries the metadata header.

use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::root::VIEWPOINTS_DIR;
use docaudit_kernel::{
    Document, PropertyId, SectionRequirement, TopicDirectory, Violation, ViolationKind,
};

const PROPERTY_11: PropertyId = PropertyId::ViewpointStructureCompliance;
const PROPERTY_12: PropertyId = PropertyId::PerspectiveStructureCompliance;

pub fn viewpoint_structure_compliance(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    if !ctx.root.has_viewpoints_dir {
        eval.inspected += 1;
        eval.push(Violation::new(
            PROPERTY_11,
            VIEWPOINTS_DIR,
            ViolationKind::MissingDirectory,
            "viewpoints directory is missing",
        ));
        return eval;
    }
    for topic in ctx.root.viewpoints.values() {
        check_topic(
            ctx,
            PROPERTY_11,
            topic,
            &ctx.policy.viewpoint_sections,
            &mut eval,
        );
    }
    eval
}

/// A tree without a perspectives directory leaves Property 12 not
/// applicable rather than failing.
pub fn perspective_structure_compliance(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for topic in ctx.root.perspectives.values() {
        check_topic(
            ctx,
            PROPERTY_12,
            topic,
            &ctx.policy.perspective_sections,
            &mut eval,
        );
    }
    eval
}

fn check_topic(
    ctx: &AuditContext<'_>,
    property: PropertyId,
    topic: &TopicDirectory,
    sections: &[SectionRequirement],
    eval: &mut Evaluation,
) {
    let readme = topic.readme_path();
    let Some(doc) = ctx.open(property, &readme, OnMissing::Fail, eval) else {
        return;
    };
    check_sections(property, &doc, sections, eval);
    let header = doc.header_fields(&ctx.policy.header_fields, ctx.policy.header_probe_lines);
    for field in header.missing(&ctx.policy.header_fields) {
        eval.push(Violation::new(
            property,
            &readme,
            ViolationKind::MissingHeaderField,
            format!("missing header field: {field}"),
        ));
    }
}

fn check_sections(
    property: PropertyId,
    doc: &Document,
    sections: &[SectionRequirement],
    eval: &mut Evaluation,
) {
    for requirement in sections {
        if !requirement.is_satisfied(doc.sections()) {
            eval.push(Violation::new(
                property,
                doc.path(),
                ViolationKind::MissingSection,
                format!("missing required section: {}", requirement.describe()),
            ));
        }
    }
}
