use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::{PropertyId, Violation, ViolationKind};

const PROPERTY_6: PropertyId = PropertyId::LinkValidity;

/// Property 6: every internal link and image in a viewpoint or perspective
/// document resolves to an existing file.
///
/// External URLs and pure anchors are never checked.
pub fn link_validity(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for topic in ctx.root.topics() {
        for path in &topic.markdown_files {
            let Some(doc) = ctx.open(PROPERTY_6, path, OnMissing::Skip, &mut eval) else {
                continue;
            };
            for link in doc.links() {
                if let Some(resolved) = link.resolved()
                    && !ctx.fs.exists(resolved)
                {
                    eval.push(
                        Violation::new(
                            PROPERTY_6,
                            path,
                            ViolationKind::BrokenLink,
                            format!("link {} resolves to missing {resolved}", link.target),
                        )
                        .at_line(link.line),
                    );
                }
            }
            for image in doc.images() {
                if let Some(resolved) = image.resolved()
                    && !ctx.fs.exists(resolved)
                {
                    eval.push(
                        Violation::new(
                            PROPERTY_6,
                            path,
                            ViolationKind::BrokenImage,
                            format!("image {} resolves to missing {resolved}", image.target),
                        )
                        .at_line(image.line),
                    );
                }
            }
        }
    }
    eval
}
