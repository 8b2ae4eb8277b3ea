use crate::support::{exit_with_error, print_json};
use docaudit_kernel::{AuditPolicy, PropertyId};
use docaudit_properties::run_audit_at;
use std::path::Path;
use tracing::debug;

pub struct Args {
    pub root: String,
    pub properties: Vec<u8>,
    pub min_body_chars: Option<usize>,
    pub strict_calendar: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let selection = args
        .properties
        .iter()
        .map(|number| PropertyId::from_number(*number))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|err| exit_with_error(err));

    let mut policy = AuditPolicy::default().with_strict_calendar(args.strict_calendar);
    if let Some(min_body_chars) = args.min_body_chars {
        policy = policy.with_min_body_chars(min_body_chars);
    }
    debug!(
        root = %args.root,
        selected = selection.len(),
        min_body_chars = policy.min_body_chars,
        strict_calendar = policy.dates.strict_calendar,
        "starting audit"
    );

    let report = run_audit_at(Path::new(&args.root), &policy, &selection)
        .unwrap_or_else(|err| exit_with_error(err));

    if args.json {
        print_json(&report.to_json(), "audit report");
    } else {
        print!("{}", report.render_text());
    }

    if !report.passed() {
        std::process::exit(1);
    }
}
