//! # Docaudit Properties
//!
//! The seventeen documentation properties, the driver that runs them over a
//! documentation root, and the report they produce.
//!
//! ```text
//! run_audit(fs, policy, selection)
//!     ├─ DocumentRoot::discover      viewpoints/*, perspectives/*
//!     ├─ evaluate_property(id, ctx)  one evaluator per property id
//!     └─ Report                      PASS / FAIL / N/A + violations
//! ```
//!
//! Evaluators are independent of each other. They share only the
//! per-audit document cache, so a file read for Property 2 is not read
//! again for Property 3.

pub mod context;
pub mod driver;
pub mod properties;
pub mod report;

pub use context::{AuditContext, Evaluation, OnMissing};
pub use driver::{run_audit, run_audit_at};
pub use properties::evaluate_property;
pub use report::{AuditVerdict, Outcome, Report, Summary};
