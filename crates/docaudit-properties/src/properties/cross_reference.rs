//! Properties 3 and 4: the Related-Documentation section of consolidated
//! READMEs stays short and every link in it is explained.

use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::patterns::has_sufficient_context;
use docaudit_kernel::{Document, PropertyId, Violation, ViolationKind};

const PROPERTY_3: PropertyId = PropertyId::CrossReferenceLimit;
const PROPERTY_4: PropertyId = PropertyId::LinkContextRequirement;

pub fn cross_reference_limit(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    let max = ctx.policy.max_related_links;
    for (_, _, readme) in ctx.consolidated_readmes() {
        let Some(doc) = ctx.open(PROPERTY_3, &readme, OnMissing::Skip, &mut eval) else {
            continue;
        };
        let links = doc.related_links();
        if let Some(first_excess) = links.get(max) {
            eval.push(
                Violation::new(
                    PROPERTY_3,
                    &readme,
                    ViolationKind::TooManyCrossReferences,
                    format!(
                        "Related Documentation has {} internal links (> {max})",
                        links.len()
                    ),
                )
                .at_line(first_excess.line),
            );
        }
    }
    eval
}

pub fn link_context_requirement(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for (_, _, readme) in ctx.consolidated_readmes() {
        let Some(doc) = ctx.open(PROPERTY_4, &readme, OnMissing::Skip, &mut eval) else {
            continue;
        };
        for link in doc.related_links() {
            let window = [
                context_line(&doc, link.line.checked_sub(1)),
                context_line(&doc, Some(link.line)),
                context_line(&doc, Some(link.line + 1)),
            ];
            if !has_sufficient_context(&window) {
                eval.push(
                    Violation::new(
                        PROPERTY_4,
                        &readme,
                        ViolationKind::InsufficientLinkContext,
                        format!("link to {} lacks descriptive context", link.target),
                    )
                    .at_line(link.line),
                );
            }
        }
    }
    eval
}

/// Section headers and rules never count as describing a link.
fn context_line(doc: &Document, number: Option<usize>) -> &str {
    let line = number.and_then(|n| doc.line(n)).unwrap_or("");
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with("---") {
        ""
    } else {
        line
    }
}
