//! Documents and the per-audit document cache.

use crate::error::AuditError;
use crate::fs_view::FileSystemView;
use crate::header::HeaderFields;
use crate::markdown::{self, Link};
use crate::patterns::{self, DateField};
use crate::qas::{self, Scenario};
use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadState {
    Present,
    Missing,
    /// The file exists but could not be read or decoded; text is empty.
    Unreadable(String),
}

/// A markdown file and its lazily derived attributes.
///
/// Derived attributes are computed on first access from the text captured
/// at load time and never invalidated.
#[derive(Debug)]
pub struct Document {
    path: String,
    text: String,
    state: ReadState,
    sections: OnceCell<Vec<String>>,
    links: OnceCell<Vec<Link>>,
    images: OnceCell<Vec<Link>>,
    scenarios: OnceCell<Vec<Scenario>>,
    dates: OnceCell<Vec<DateField>>,
}

impl Document {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_state(path.into(), text.into(), ReadState::Present)
    }

    fn with_state(path: String, text: String, state: ReadState) -> Self {
        Self {
            path,
            text,
            state,
            sections: OnceCell::new(),
            links: OnceCell::new(),
            images: OnceCell::new(),
            scenarios: OnceCell::new(),
            dates: OnceCell::new(),
        }
    }

    pub fn load(fs: &dyn FileSystemView, path: &str) -> Self {
        match fs.read_bytes(path) {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => Self::with_state(path.to_string(), text, ReadState::Present),
                Err(source) => {
                    let err = AuditError::InvalidUtf8 {
                        path: path.to_string(),
                        source,
                    };
                    warn!(path, error = %err, "document is not valid UTF-8");
                    Self::with_state(
                        path.to_string(),
                        String::new(),
                        ReadState::Unreadable(err.to_string()),
                    )
                }
            },
            Ok(None) => Self::with_state(path.to_string(), String::new(), ReadState::Missing),
            Err(err) => {
                warn!(path, error = %err, "document could not be read");
                Self::with_state(
                    path.to_string(),
                    String::new(),
                    ReadState::Unreadable(err.to_string()),
                )
            }
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &ReadState {
        &self.state
    }

    pub fn is_missing(&self) -> bool {
        self.state == ReadState::Missing
    }

    pub fn read_error(&self) -> Option<&str> {
        match &self.state {
            ReadState::Unreadable(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.text.split('\n').nth(idx))
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn sections(&self) -> &[String] {
        self.sections
            .get_or_init(|| markdown::section_titles(&self.text))
    }

    pub fn links(&self) -> &[Link] {
        self.links
            .get_or_init(|| markdown::extract_links(&self.path, &self.text, 1))
    }

    pub fn images(&self) -> &[Link] {
        self.images
            .get_or_init(|| markdown::extract_images(&self.path, &self.text, 1))
    }

    pub fn scenarios(&self) -> &[Scenario] {
        self.scenarios
            .get_or_init(|| qas::extract_scenarios(&self.text))
    }

    pub fn dates(&self) -> &[DateField] {
        self.dates.get_or_init(|| patterns::find_dates(&self.text))
    }

    /// Internal links of the Related-Documentation section.
    pub fn related_links(&self) -> Vec<Link> {
        markdown::related_internal_links(&self.path, &self.text)
    }

    pub fn header_fields(&self, fields: &[String], preamble_lines: usize) -> HeaderFields {
        HeaderFields::probe(&self.text, fields, preamble_lines)
    }
}

/// Path-keyed document cache for one audit.
pub struct DocumentStore<'fs> {
    fs: &'fs dyn FileSystemView,
    cache: RefCell<BTreeMap<String, Rc<Document>>>,
}

impl<'fs> DocumentStore<'fs> {
    pub fn new(fs: &'fs dyn FileSystemView) -> Self {
        Self {
            fs,
            cache: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn fs(&self) -> &'fs dyn FileSystemView {
        self.fs
    }

    pub fn load(&self, path: &str) -> Rc<Document> {
        if let Some(doc) = self.cache.borrow().get(path) {
            return Rc::clone(doc);
        }
        debug!(path, "loading document");
        let doc = Rc::new(Document::load(self.fs, path));
        self.cache
            .borrow_mut()
            .insert(path.to_string(), Rc::clone(&doc));
        doc
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_view::MemoryFileSystem;

    #[test]
    fn store_caches_by_path() {
        let fs =
            MemoryFileSystem::new().with_file("viewpoints/functional/README.md", "## Overview\n");
        let store = DocumentStore::new(&fs);
        let first = store.load("viewpoints/functional/README.md");
        let second = store.load("viewpoints/functional/README.md");
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(store.cached_len(), 1);
        assert_eq!(first.sections(), ["Overview".to_string()]);
    }

    #[test]
    fn missing_and_invalid_utf8_documents_are_empty() {
        let fs = MemoryFileSystem::new().with_file("bad.md", vec![0xff, 0xfe, b'#']);
        let store = DocumentStore::new(&fs);

        let missing = store.load("absent.md");
        assert!(missing.is_missing());
        assert_eq!(missing.text(), "");

        let bad = store.load("bad.md");
        assert!(!bad.is_missing());
        assert!(
            bad.read_error()
                .is_some_and(|reason| reason.contains("UTF-8"))
        );
        assert!(bad.sections().is_empty());
    }

    #[test]
    fn line_lookup_is_one_based() {
        let doc = Document::new("a.md", "first\nsecond\n");
        assert_eq!(doc.line(1), Some("first"));
        assert_eq!(doc.line(2), Some("second"));
        assert_eq!(doc.line(0), None);
    }
}
