//! Properties 8 and 9: perspective READMEs define enough quality attribute
//! scenarios, each with a measurable response.

use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::patterns::is_measurable;
use docaudit_kernel::{PropertyId, Violation, ViolationKind};

const PROPERTY_8: PropertyId = PropertyId::QasCount;
const PROPERTY_9: PropertyId = PropertyId::QasMeasurability;

pub fn qas_count(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    let min = ctx.policy.min_scenarios;
    for topic in ctx.root.perspectives.values() {
        let readme = topic.readme_path();
        let Some(doc) = ctx.open(PROPERTY_8, &readme, OnMissing::Fail, &mut eval) else {
            continue;
        };
        let found = doc.scenarios().len();
        if found < min {
            eval.push(Violation::new(
                PROPERTY_8,
                &readme,
                ViolationKind::TooFewScenarios,
                format!("found {found} quality attribute scenarios (< {min})"),
            ));
        }
    }
    eval
}

pub fn qas_measurability(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for topic in ctx.root.perspectives.values() {
        let readme = topic.readme_path();
        let Some(doc) = ctx.open(PROPERTY_9, &readme, OnMissing::Fail, &mut eval) else {
            continue;
        };
        for scenario in doc.scenarios() {
            let message = if scenario.response_measure.is_empty() {
                format!("scenario \"{}\" has no Response Measure", scenario.title)
            } else if !is_measurable(&scenario.response_measure) {
                format!(
                    "scenario \"{}\" response measure has no numeric target: {}",
                    scenario.title, scenario.response_measure
                )
            } else {
                continue;
            };
            eval.push(
                Violation::new(
                    PROPERTY_9,
                    &readme,
                    ViolationKind::UnmeasurableScenario,
                    message,
                )
                .at_line(scenario.line),
            );
        }
    }
    eval
}
