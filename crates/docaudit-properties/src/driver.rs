use crate::context::AuditContext;
use crate::properties::evaluate_property;
use crate::report::{AuditVerdict, Report};
use docaudit_kernel::{
    AuditError, AuditPolicy, DocumentRoot, DocumentStore, FileSystemView, OsFileSystem, PropertyId,
};
use std::path::Path;
use tracing::{debug, info, info_span};

/// Run the selected properties (all of them when `selection` is empty) in
/// ascending id order. Every selected property runs; a failure never stops
/// the ones after it.
pub fn run_audit(
    fs: &dyn FileSystemView,
    policy: &AuditPolicy,
    selection: &[PropertyId],
) -> Report {
    let root = DocumentRoot::discover(fs);
    debug!(
        viewpoints = root.viewpoints.len(),
        perspectives = root.perspectives.len(),
        "discovered documentation root"
    );
    let store = DocumentStore::new(fs);
    let ctx = AuditContext {
        fs,
        policy,
        root: &root,
        store: &store,
    };

    let verdicts = normalize_selection(selection)
        .into_iter()
        .map(|property| {
            let span = info_span!("property", id = property.number());
            let _entered = span.enter();
            let verdict =
                AuditVerdict::from_evaluation(property, evaluate_property(property, &ctx));
            info!(
                outcome = verdict.outcome.label(),
                inspected = verdict.inspected,
                violations = verdict.violations.len(),
                "{}",
                property.name()
            );
            verdict
        })
        .collect();

    debug!(documents = store.cached_len(), "audit finished");
    Report {
        root: root.label.clone(),
        verdicts,
    }
}

/// Audit a directory on disk. Only a missing or non-directory root is an
/// error; everything found inside the tree becomes a violation.
pub fn run_audit_at(
    root: &Path,
    policy: &AuditPolicy,
    selection: &[PropertyId],
) -> Result<Report, AuditError> {
    let fs = OsFileSystem::new(root)?;
    Ok(run_audit(&fs, policy, selection))
}

fn normalize_selection(selection: &[PropertyId]) -> Vec<PropertyId> {
    if selection.is_empty() {
        return PropertyId::ALL.to_vec();
    }
    let mut selected = selection.to_vec();
    selected.sort();
    selected.dedup();
    selected
}
