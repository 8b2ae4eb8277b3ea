use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::patterns::{DateSource, check_date};
use docaudit_kernel::{PropertyId, Violation, ViolationKind};

const PROPERTY_10: PropertyId = PropertyId::DateFormatConsistency;

/// Property 10: every date field in a viewpoint or perspective document is
/// ISO-8601 within the policy's year range.
pub fn date_format_consistency(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for topic in ctx.root.topics() {
        for path in &topic.markdown_files {
            let Some(doc) = ctx.open(PROPERTY_10, path, OnMissing::Skip, &mut eval) else {
                continue;
            };
            for field in doc.dates() {
                if let Err(issue) = check_date(&field.raw, &ctx.policy.dates) {
                    eval.push(
                        Violation::new(
                            PROPERTY_10,
                            path,
                            ViolationKind::InvalidDate,
                            format!("{} \"{}\" {issue}", source_label(field.source), field.raw),
                        )
                        .at_line(field.line),
                    );
                }
            }
        }
    }
    eval
}

fn source_label(source: DateSource) -> &'static str {
    match source {
        DateSource::Frontmatter => "last_updated",
        DateSource::LastUpdatedHeader => "Last Updated",
        DateSource::ChangeHistoryTable => "change history date",
    }
}
