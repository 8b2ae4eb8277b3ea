//! The seventeen property evaluators.
//!
//! Each evaluator is a pure function of the audit context. Properties are
//! dispatched by id so the driver never needs to know how any of them work.

pub mod consolidation;
pub mod cross_reference;
pub mod dates;
pub mod layout;
pub mod links;
pub mod placeholder;
pub mod references;
pub mod scenarios;
pub mod structure;

use crate::context::{AuditContext, Evaluation};
use docaudit_kernel::PropertyId;

pub fn evaluate_property(property: PropertyId, ctx: &AuditContext<'_>) -> Evaluation {
    match property {
        PropertyId::FileConsolidationCompleteness => {
            consolidation::file_consolidation_completeness(ctx)
        }
        PropertyId::ContentPreservation => consolidation::content_preservation(ctx),
        PropertyId::CrossReferenceLimit => cross_reference::cross_reference_limit(ctx),
        PropertyId::LinkContextRequirement => cross_reference::link_context_requirement(ctx),
        PropertyId::NoPlaceholderText => placeholder::no_placeholder_text(ctx),
        PropertyId::LinkValidity => links::link_validity(ctx),
        PropertyId::EmptyDirectoryRemoval => layout::empty_directory_removal(ctx),
        PropertyId::QasCount => scenarios::qas_count(ctx),
        PropertyId::QasMeasurability => scenarios::qas_measurability(ctx),
        PropertyId::DateFormatConsistency => dates::date_format_consistency(ctx),
        PropertyId::ViewpointStructureCompliance => {
            structure::viewpoint_structure_compliance(ctx)
        }
        PropertyId::PerspectiveStructureCompliance => {
            structure::perspective_structure_compliance(ctx)
        }
        PropertyId::ContentPreservationAfterMove => layout::content_preservation_after_move(ctx),
        PropertyId::SourceDirectoryDeletion => layout::source_directory_deletion(ctx),
        PropertyId::LinkValidityAfterUpdate => references::link_validity_after_update(ctx),
        PropertyId::NoReferencesToDeletedDirectories => {
            references::no_references_to_deleted_directories(ctx)
        }
        PropertyId::GeneratedDiagramsSingleLocation => {
            layout::generated_diagrams_single_location(ctx)
        }
    }
}
