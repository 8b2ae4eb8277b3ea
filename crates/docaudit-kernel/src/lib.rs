//! # Docaudit Kernel
//!
//! The vocabulary every documentation property is written in: a read-only
//! view of the documentation tree, documents with lazily derived attributes,
//! and the pattern matchers properties compose.
//!
//! Nothing in this crate mutates the audited tree. All I/O flows through
//! [`FileSystemView`]; everything above it is a pure function of file text.
//!
//! ## Architecture
//!
//! ```text
//! FileSystemView        ← list / read / exists (the only I/O boundary)
//!     │
//! DocumentRoot          ← viewpoints/<slug>, perspectives/<slug>
//!     │
//! DocumentStore         ← path → Document cache, one per audit
//!     │
//! Document              ← raw text + cached sections, links, images, QAS
//!     │
//! patterns              ← placeholder, date, numeric-target, link context
//! ```

pub mod document;
pub mod error;
pub mod fs_view;
pub mod header;
pub mod markdown;
pub mod patterns;
pub mod policy;
pub mod property;
pub mod qas;
pub mod root;

pub use document::{Document, DocumentStore, ReadState};
pub use error::{AuditError, Severity, Violation, ViolationKind};
pub use fs_view::{DirEntry, FileSystemView, MemoryFileSystem, OsFileSystem};
pub use header::HeaderFields;
pub use markdown::{Link, LinkKind, RelatedSection};
pub use policy::{AuditPolicy, DateBounds, SectionRequirement};
pub use property::PropertyId;
pub use qas::Scenario;
pub use root::{DocumentRoot, TopicDirectory, TopicKind};
