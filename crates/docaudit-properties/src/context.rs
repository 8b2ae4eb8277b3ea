use docaudit_kernel::fs_view::join;
use docaudit_kernel::{
    AuditPolicy, Document, DocumentRoot, DocumentStore, FileSystemView, PropertyId, TopicKind,
    Violation, ViolationKind,
};
use std::rc::Rc;

/// Everything an evaluator may consult. Evaluators never touch the file
/// system except through `fs` and `store`.
pub struct AuditContext<'a> {
    pub fs: &'a dyn FileSystemView,
    pub policy: &'a AuditPolicy,
    pub root: &'a DocumentRoot,
    pub store: &'a DocumentStore<'a>,
}

/// What to do when a targeted document is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// The property does not apply to this target.
    Skip,
    /// Absence is itself a violation.
    Fail,
}

/// Raw evaluator output before the driver assigns an outcome.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub violations: Vec<Violation>,
    /// Targets actually examined. Zero with no violations means the
    /// property is not applicable to this tree.
    pub inspected: usize,
}

impl Evaluation {
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

impl<'a> AuditContext<'a> {
    /// Load a targeted document, recording absence or read errors.
    ///
    /// Returns `None` when the document is missing. An unreadable document
    /// yields one `read_error` violation and is returned with empty text.
    pub fn open(
        &self,
        property: PropertyId,
        path: &str,
        on_missing: OnMissing,
        eval: &mut Evaluation,
    ) -> Option<Rc<Document>> {
        let doc = self.store.load(path);
        if doc.is_missing() {
            if on_missing == OnMissing::Fail {
                eval.inspected += 1;
                eval.push(Violation::new(
                    property,
                    path,
                    ViolationKind::MissingFile,
                    "required document is missing",
                ));
            }
            return None;
        }
        eval.inspected += 1;
        if let Some(reason) = doc.read_error() {
            eval.push(Violation::new(property, path, ViolationKind::ReadError, reason));
        }
        Some(doc)
    }

    /// Consolidated topic directories: viewpoints first, each kind sorted.
    pub fn consolidated_dirs(&self) -> Vec<(TopicKind, String)> {
        let mut viewpoints = self.policy.consolidated_viewpoints.clone();
        viewpoints.sort();
        let mut perspectives = self.policy.consolidated_perspectives.clone();
        perspectives.sort();
        viewpoints
            .into_iter()
            .map(|slug| (TopicKind::Viewpoint, slug))
            .chain(
                perspectives
                    .into_iter()
                    .map(|slug| (TopicKind::Perspective, slug)),
            )
            .collect()
    }

    /// `<kind dir>/<slug>/README.md` for each consolidated directory.
    pub fn consolidated_readmes(&self) -> Vec<(TopicKind, String, String)> {
        self.consolidated_dirs()
            .into_iter()
            .map(|(kind, slug)| {
                let readme = join(&join(kind.dir(), &slug), "README.md");
                (kind, slug, readme)
            })
            .collect()
    }
}
