use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::{PropertyId, Violation, ViolationKind};

const PROPERTY_5: PropertyId = PropertyId::NoPlaceholderText;
const EXCERPT_CHARS: usize = 80;

/// Property 5: no viewpoint or perspective README ships placeholder text.
pub fn no_placeholder_text(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for topic in ctx.root.topics() {
        let readme = topic.readme_path();
        let Some(doc) = ctx.open(PROPERTY_5, &readme, OnMissing::Fail, &mut eval) else {
            continue;
        };
        for hit in ctx.policy.placeholders.scan(doc.text()) {
            eval.push(
                Violation::new(
                    PROPERTY_5,
                    &readme,
                    ViolationKind::PlaceholderText,
                    format!("placeholder \"{}\" in: {}", hit.matched, excerpt(&hit.text)),
                )
                .at_line(hit.line),
            );
        }
    }
    eval
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}...")
}
