//! Error and violation types for docaudit.

use crate::property::PropertyId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors that stop an audit before any property runs.
///
/// Per-document problems (missing files, undecodable text) never surface
/// here; they become [`Violation`]s of the properties that inspect them.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit root missing: {path}")]
    RootMissing { path: String },

    #[error("audit root is not a directory: {path}")]
    RootNotDirectory { path: String },

    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file is not valid UTF-8: {path}: {source}")]
    InvalidUtf8 {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("unknown property id: {0} (expected 1..=17)")]
    UnknownProperty(u8),
}

/// Severity of a violation. The audit only ever emits errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
}

/// What went wrong, as a short machine tag rendered in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingFile,
    MissingDirectory,
    UnexpectedFile,
    UnexpectedDirectory,
    EmptyDirectory,
    ReadError,
    MissingSection,
    MissingKeyword,
    MissingConsolidationNote,
    BodyTooShort,
    TooManyCrossReferences,
    InsufficientLinkContext,
    PlaceholderText,
    BrokenLink,
    BrokenImage,
    TooFewScenarios,
    UnmeasurableScenario,
    InvalidDate,
    MissingHeaderField,
    DeletedDirectoryReference,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::MissingDirectory => "missing_directory",
            Self::UnexpectedFile => "unexpected_file",
            Self::UnexpectedDirectory => "unexpected_directory",
            Self::EmptyDirectory => "empty_directory",
            Self::ReadError => "read_error",
            Self::MissingSection => "missing_section",
            Self::MissingKeyword => "missing_keyword",
            Self::MissingConsolidationNote => "missing_consolidation_note",
            Self::BodyTooShort => "body_too_short",
            Self::TooManyCrossReferences => "too_many_cross_references",
            Self::InsufficientLinkContext => "insufficient_link_context",
            Self::PlaceholderText => "placeholder_text",
            Self::BrokenLink => "broken_link",
            Self::BrokenImage => "broken_image",
            Self::TooFewScenarios => "too_few_scenarios",
            Self::UnmeasurableScenario => "unmeasurable_scenario",
            Self::InvalidDate => "invalid_date",
            Self::MissingHeaderField => "missing_header_field",
            Self::DeletedDirectoryReference => "deleted_directory_reference",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete failure instance of a property.
///
/// `file` is relative to the audit root with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub property: PropertyId,
    pub severity: Severity,
    pub file: String,
    pub line: Option<usize>,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(
        property: PropertyId,
        file: impl Into<String>,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            property,
            severity: Severity::Error,
            file: file.into(),
            line: None,
            kind,
            message: message.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Report ordering: file path, then line (file-level rows first).
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then_with(|| self.line.cmp(&other.line))
    }

    /// `<relative-path> (line <n>, <kind>): <detail>`
    pub fn render(&self) -> String {
        match self.line {
            Some(line) => format!(
                "{} (line {line}, {}): {}",
                self.file, self.kind, self.message
            ),
            None => format!("{} ({}): {}", self.file, self.kind, self.message),
        }
    }
}

/// Sort violations into report order. Stable, so evaluator order breaks ties.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(Violation::report_order);
}
