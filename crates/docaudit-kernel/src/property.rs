//! The fixed table of audited properties.
//!
//! Properties 1..=12 audit documentation quality; 13..=17 audit the
//! directory reorganization. Report order is the numeric order.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PropertyId {
    FileConsolidationCompleteness,
    ContentPreservation,
    CrossReferenceLimit,
    LinkContextRequirement,
    NoPlaceholderText,
    LinkValidity,
    EmptyDirectoryRemoval,
    QasCount,
    QasMeasurability,
    DateFormatConsistency,
    ViewpointStructureCompliance,
    PerspectiveStructureCompliance,
    ContentPreservationAfterMove,
    SourceDirectoryDeletion,
    LinkValidityAfterUpdate,
    NoReferencesToDeletedDirectories,
    GeneratedDiagramsSingleLocation,
}

impl PropertyId {
    pub const ALL: [PropertyId; 17] = [
        Self::FileConsolidationCompleteness,
        Self::ContentPreservation,
        Self::CrossReferenceLimit,
        Self::LinkContextRequirement,
        Self::NoPlaceholderText,
        Self::LinkValidity,
        Self::EmptyDirectoryRemoval,
        Self::QasCount,
        Self::QasMeasurability,
        Self::DateFormatConsistency,
        Self::ViewpointStructureCompliance,
        Self::PerspectiveStructureCompliance,
        Self::ContentPreservationAfterMove,
        Self::SourceDirectoryDeletion,
        Self::LinkValidityAfterUpdate,
        Self::NoReferencesToDeletedDirectories,
        Self::GeneratedDiagramsSingleLocation,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::FileConsolidationCompleteness => 1,
            Self::ContentPreservation => 2,
            Self::CrossReferenceLimit => 3,
            Self::LinkContextRequirement => 4,
            Self::NoPlaceholderText => 5,
            Self::LinkValidity => 6,
            Self::EmptyDirectoryRemoval => 7,
            Self::QasCount => 8,
            Self::QasMeasurability => 9,
            Self::DateFormatConsistency => 10,
            Self::ViewpointStructureCompliance => 11,
            Self::PerspectiveStructureCompliance => 12,
            Self::ContentPreservationAfterMove => 13,
            Self::SourceDirectoryDeletion => 14,
            Self::LinkValidityAfterUpdate => 15,
            Self::NoReferencesToDeletedDirectories => 16,
            Self::GeneratedDiagramsSingleLocation => 17,
        }
    }

    pub fn from_number(number: u8) -> Result<Self, AuditError> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(usize::from(idx)).copied())
            .ok_or(AuditError::UnknownProperty(number))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FileConsolidationCompleteness => "File Consolidation Completeness",
            Self::ContentPreservation => "Content Preservation",
            Self::CrossReferenceLimit => "Cross-Reference Limit",
            Self::LinkContextRequirement => "Link Context Requirement",
            Self::NoPlaceholderText => "No Placeholder Text",
            Self::LinkValidity => "Link Validity",
            Self::EmptyDirectoryRemoval => "Empty Directory Removal",
            Self::QasCount => "QAS Count",
            Self::QasMeasurability => "QAS Measurability",
            Self::DateFormatConsistency => "Date Format Consistency",
            Self::ViewpointStructureCompliance => "Viewpoint Structure Compliance",
            Self::PerspectiveStructureCompliance => "Perspective Structure Compliance",
            Self::ContentPreservationAfterMove => "Content Preservation After Move",
            Self::SourceDirectoryDeletion => "Source Directory Deletion",
            Self::LinkValidityAfterUpdate => "Link Validity After Update",
            Self::NoReferencesToDeletedDirectories => "No References to Deleted Directories",
            Self::GeneratedDiagramsSingleLocation => "Generated Diagrams Single Location",
        }
    }

    /// Requirement ids this property validates.
    pub fn validates(self) -> &'static [&'static str] {
        match self {
            Self::FileConsolidationCompleteness => &["1.1", "1.2"],
            Self::ContentPreservation => &["1.3", "1.4"],
            Self::CrossReferenceLimit => &["2.1"],
            Self::LinkContextRequirement => &["2.2"],
            Self::NoPlaceholderText => &["3.1"],
            Self::LinkValidity => &["3.2", "3.3"],
            Self::EmptyDirectoryRemoval => &["4.1"],
            Self::QasCount => &["5.1"],
            Self::QasMeasurability => &["5.2"],
            Self::DateFormatConsistency => &["6.1"],
            Self::ViewpointStructureCompliance => &["7.1", "7.2"],
            Self::PerspectiveStructureCompliance => &["7.3", "7.4"],
            Self::ContentPreservationAfterMove => &["8.1"],
            Self::SourceDirectoryDeletion => &["8.2"],
            Self::LinkValidityAfterUpdate => &["8.3"],
            Self::NoReferencesToDeletedDirectories => &["8.4"],
            Self::GeneratedDiagramsSingleLocation => &["8.5"],
        }
    }

    /// Human description of the files the property inspects.
    pub fn targets(self) -> &'static str {
        match self {
            Self::FileConsolidationCompleteness => "consolidated topic directories",
            Self::ContentPreservation => "consolidated READMEs",
            Self::CrossReferenceLimit | Self::LinkContextRequirement => {
                "Related Documentation section of optimised READMEs"
            }
            Self::NoPlaceholderText => "every viewpoint and perspective README",
            Self::LinkValidity | Self::DateFormatConsistency => {
                "every markdown file under viewpoints/ and perspectives/"
            }
            Self::EmptyDirectoryRemoval => "legacy viewpoint directories",
            Self::QasCount | Self::QasMeasurability => "every perspective README",
            Self::ViewpointStructureCompliance => "every viewpoint README",
            Self::PerspectiveStructureCompliance => "every perspective README",
            Self::ContentPreservationAfterMove => "relocated target directories",
            Self::SourceDirectoryDeletion => "legacy top-level directories",
            Self::LinkValidityAfterUpdate => "umbrella READMEs",
            Self::NoReferencesToDeletedDirectories => "umbrella READMEs and viewpoints/ subtree",
            Self::GeneratedDiagramsSingleLocation => "diagrams/generated and generated/",
        }
    }

    /// `Validates: 1.1, 1.2`
    pub fn validates_trail(self) -> String {
        format!("Validates: {}", self.validates().join(", "))
    }
}

impl From<PropertyId> for u8 {
    fn from(value: PropertyId) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for PropertyId {
    type Error = AuditError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
