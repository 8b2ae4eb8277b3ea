//! Properties 15 and 16: links in the umbrella documents and the viewpoint
//! subtree survived the directory reorganization.

use crate::context::{AuditContext, Evaluation, OnMissing};
use docaudit_kernel::fs_view::{parent, walk_markdown};
use docaudit_kernel::root::VIEWPOINTS_DIR;
use docaudit_kernel::{Link, PropertyId, Violation, ViolationKind};
use std::collections::BTreeMap;

const PROPERTY_15: PropertyId = PropertyId::LinkValidityAfterUpdate;
const PROPERTY_16: PropertyId = PropertyId::NoReferencesToDeletedDirectories;

/// Top-level entry points plus every viewpoint README, deduplicated, in
/// policy order.
fn umbrella_docs(ctx: &AuditContext<'_>) -> Vec<String> {
    let mut docs: Vec<String> = Vec::new();
    let viewpoint_readmes = ctx
        .root
        .viewpoints
        .values()
        .filter_map(|topic| topic.readme.clone());
    let configured = ctx.policy.umbrella_docs.iter().cloned();
    for path in configured.chain(viewpoint_readmes) {
        if !docs.contains(&path) {
            docs.push(path);
        }
    }
    docs
}

fn touches_reorganized_segment(target: &str, segments: &[String]) -> bool {
    let path = target.split('#').next().unwrap_or(target);
    path.split('/')
        .any(|part| segments.iter().any(|segment| segment == part))
}

pub fn link_validity_after_update(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for path in umbrella_docs(ctx) {
        let Some(doc) = ctx.open(PROPERTY_15, &path, OnMissing::Skip, &mut eval) else {
            continue;
        };
        for link in doc.links() {
            let Some(resolved) = link.resolved() else {
                continue;
            };
            if touches_reorganized_segment(&link.target, &ctx.policy.reorganized_segments)
                && !ctx.fs.exists(resolved)
            {
                eval.push(
                    Violation::new(
                        PROPERTY_15,
                        &path,
                        ViolationKind::BrokenLink,
                        format!(
                            "link {} into a reorganized directory resolves to missing {resolved}",
                            link.target
                        ),
                    )
                    .at_line(link.line),
                );
            }
        }
    }
    eval
}

#[derive(Debug, Default, Clone, Copy)]
struct Scope {
    /// A top-level umbrella document, where `dir/` means the root directory.
    root_umbrella: bool,
    viewpoint_subtree: bool,
}

pub fn no_references_to_deleted_directories(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    let mut scopes: BTreeMap<String, Scope> = BTreeMap::new();
    for path in &ctx.policy.umbrella_docs {
        let scope = scopes.entry(path.clone()).or_default();
        scope.root_umbrella = parent(path).is_empty();
    }
    for path in walk_markdown(ctx.fs, VIEWPOINTS_DIR) {
        scopes.entry(path).or_default().viewpoint_subtree = true;
    }

    for (path, scope) in scopes {
        let Some(doc) = ctx.open(PROPERTY_16, &path, OnMissing::Skip, &mut eval) else {
            continue;
        };
        for link in doc.links().iter().chain(doc.images()) {
            let Some(dir) = deleted_dir_reference(link, scope, &ctx.policy.forbidden_link_dirs)
            else {
                continue;
            };
            eval.push(
                Violation::new(
                    PROPERTY_16,
                    &path,
                    ViolationKind::DeletedDirectoryReference,
                    format!("link {} points into deleted directory {dir}/", link.target),
                )
                .at_line(link.line),
            );
        }
    }
    eval
}

/// The deleted root directory a link reaches, if any.
///
/// Literal prefixes catch the way these links were usually written;
/// resolution catches every other spelling that lands in the same place.
fn deleted_dir_reference<'d>(link: &Link, scope: Scope, deleted: &'d [String]) -> Option<&'d str> {
    let resolved = link.resolved()?;
    let target = link.target.as_str();
    deleted.iter().map(String::as_str).find(|dir| {
        let prefix = format!("{dir}/");
        let literal_root = scope.root_umbrella
            && (target.starts_with(&prefix) || target.starts_with(&format!("./{prefix}")));
        let literal_climb = scope.viewpoint_subtree && climbs_into(target, dir);
        let resolves_into = resolved == *dir || resolved.starts_with(&prefix);
        literal_root || literal_climb || resolves_into
    })
}

/// `../<dir>/`, `../../<dir>/`, and deeper climbs.
fn climbs_into(target: &str, dir: &str) -> bool {
    let mut rest = target;
    let mut climbed = false;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
        climbed = true;
    }
    climbed && rest.strip_prefix(dir).is_some_and(|t| t.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbs_into_requires_parent_prefix() {
        assert!(climbs_into("../examples/a.md", "examples"));
        assert!(climbs_into("../../development/setup.md", "development"));
        assert!(!climbs_into("examples/a.md", "examples"));
        assert!(!climbs_into("../examples-old/a.md", "examples"));
    }

    #[test]
    fn reorganized_segments_match_whole_path_parts() {
        let segments = vec!["deployment".to_string()];
        assert!(touches_reorganized_segment("viewpoints/deployment/README.md", &segments));
        assert!(touches_reorganized_segment("deployment/x.md#top", &segments));
        assert!(!touches_reorganized_segment("viewpoints/deployment-notes.md", &segments));
    }
}
