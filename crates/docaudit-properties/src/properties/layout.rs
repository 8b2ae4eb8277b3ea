//! Existence checks over the reorganized directory layout: Properties 7,
//! 13, 14, and 17. These always inspect their fixed targets, so they are
//! never not-applicable.

use crate::context::{AuditContext, Evaluation};
use docaudit_kernel::fs_view::{walk_files, walk_markdown};
use docaudit_kernel::{PropertyId, Violation, ViolationKind};

const PROPERTY_7: PropertyId = PropertyId::EmptyDirectoryRemoval;
const PROPERTY_13: PropertyId = PropertyId::ContentPreservationAfterMove;
const PROPERTY_14: PropertyId = PropertyId::SourceDirectoryDeletion;
const PROPERTY_17: PropertyId = PropertyId::GeneratedDiagramsSingleLocation;

/// Root-level location generated diagrams must no longer occupy.
const STRAY_GENERATED_DIR: &str = "generated";

pub fn empty_directory_removal(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for dir in &ctx.policy.legacy_viewpoint_dirs {
        eval.inspected += 1;
        if ctx.fs.exists(dir) {
            let leftover = walk_files(ctx.fs, dir).len();
            eval.push(Violation::new(
                PROPERTY_7,
                dir,
                ViolationKind::UnexpectedDirectory,
                format!("legacy directory still exists ({leftover} files left)"),
            ));
        }
    }
    eval
}

pub fn content_preservation_after_move(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for dir in &ctx.policy.moved_target_dirs {
        eval.inspected += 1;
        if !ctx.fs.is_dir(dir) {
            eval.push(Violation::new(
                PROPERTY_13,
                dir,
                ViolationKind::MissingDirectory,
                "moved content directory is missing",
            ));
        } else if walk_markdown(ctx.fs, dir).is_empty() {
            eval.push(Violation::new(
                PROPERTY_13,
                dir,
                ViolationKind::EmptyDirectory,
                "moved content directory contains no markdown files",
            ));
        }
    }
    eval
}

pub fn source_directory_deletion(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    for dir in &ctx.policy.deleted_root_dirs {
        eval.inspected += 1;
        if ctx.fs.exists(dir) {
            eval.push(Violation::new(
                PROPERTY_14,
                dir,
                ViolationKind::UnexpectedDirectory,
                "source directory should have been deleted after its content moved",
            ));
        }
    }
    eval
}

pub fn generated_diagrams_single_location(ctx: &AuditContext<'_>) -> Evaluation {
    let mut eval = Evaluation::default();
    let canonical = ctx.policy.generated_diagrams_dir.as_str();

    eval.inspected += 1;
    if !ctx.fs.is_dir(canonical) {
        eval.push(Violation::new(
            PROPERTY_17,
            canonical,
            ViolationKind::MissingDirectory,
            "generated diagrams directory is missing",
        ));
    } else if walk_files(ctx.fs, canonical).is_empty() {
        eval.push(Violation::new(
            PROPERTY_17,
            canonical,
            ViolationKind::EmptyDirectory,
            "generated diagrams directory is empty",
        ));
    }

    eval.inspected += 1;
    if ctx.fs.exists(STRAY_GENERATED_DIR) {
        eval.push(Violation::new(
            PROPERTY_17,
            STRAY_GENERATED_DIR,
            ViolationKind::UnexpectedDirectory,
            format!("generated diagrams must live only under {canonical}"),
        ));
    }
    eval
}
