//! Section, link, and image extraction over raw markdown text.

use crate::fs_view::{parent, resolve};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+?)[ \t]*\r?$").expect("section regex"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\[\]]*)\]\(\s*<?([^()\s<>]*)>?(?:\s+"[^"]*")?\s*\)"#).expect("link regex")
});

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\[\]]*)\]\(\s*<?([^()\s<>]*)>?(?:\s+"[^"]*")?\s*\)"#)
        .expect("image regex")
});

pub const RELATED_DOCUMENTATION_HEADER: &str = "## Related Documentation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkKind {
    External,
    Anchor,
    /// `resolved` is relative to the audit root, fragment stripped.
    InternalFile { resolved: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub target: String,
    /// 1-based line in the containing document.
    pub line: usize,
    #[serde(flatten)]
    pub kind: LinkKind,
}

impl Link {
    pub fn resolved(&self) -> Option<&str> {
        match &self.kind {
            LinkKind::InternalFile { resolved } => Some(resolved),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, LinkKind::InternalFile { .. })
    }
}

/// Level-2 header titles in document order.
pub fn section_titles(text: &str) -> Vec<String> {
    SECTION_RE
        .captures_iter(text)
        .filter_map(|row| row.get(1).map(|title| title.as_str().trim().to_string()))
        .collect()
}

/// Case-insensitive substring match of `needle` against any title.
pub fn has_section(titles: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    titles
        .iter()
        .any(|title| title.to_lowercase().contains(&needle))
}

pub fn classify(doc_path: &str, target: &str) -> LinkKind {
    let lowered = target.to_ascii_lowercase();
    if lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("mailto:")
    {
        return LinkKind::External;
    }
    if target.is_empty() || target.starts_with('#') {
        return LinkKind::Anchor;
    }
    let without_fragment = target.split('#').next().unwrap_or(target);
    LinkKind::InternalFile {
        resolved: resolve(parent(doc_path), without_fragment),
    }
}

/// Every `[text](url)` in `text`, excluding image syntax.
///
/// `first_line` is the document line number of `text`'s first line, so a
/// scoped slice still reports absolute line numbers.
pub fn extract_links(doc_path: &str, text: &str, first_line: usize) -> Vec<Link> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|row| {
            let whole = row.get(0)?;
            if whole.start() > 0 && text.as_bytes()[whole.start() - 1] == b'!' {
                return None;
            }
            Some(build_link(doc_path, text, first_line, whole.start(), &row))
        })
        .collect()
}

/// Every `![alt](url)` in `text`.
pub fn extract_images(doc_path: &str, text: &str, first_line: usize) -> Vec<Link> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|row| {
            let whole = row.get(0)?;
            Some(build_link(doc_path, text, first_line, whole.start(), &row))
        })
        .collect()
}

fn build_link(
    doc_path: &str,
    text: &str,
    first_line: usize,
    offset: usize,
    row: &regex::Captures<'_>,
) -> Link {
    let display = row.get(1).map_or("", |m| m.as_str()).trim().to_string();
    let target = row.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Link {
        kind: classify(doc_path, &target),
        text: display,
        target,
        line: first_line + line_offset(text, offset),
    }
}

/// Zero-based line index of a byte offset.
pub fn line_offset(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .filter(|byte| **byte == b'\n')
        .count()
}

/// The Related-Documentation section: from the line after
/// `## Related Documentation` to the next line starting with `##` or `---`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedSection {
    /// 1-based document line of the section's first body line.
    pub first_line: usize,
    pub body: String,
}

pub fn related_documentation(text: &str) -> Option<RelatedSection> {
    let lines: Vec<&str> = text.split('\n').collect();
    let header_idx = lines
        .iter()
        .position(|line| line.trim_end().starts_with(RELATED_DOCUMENTATION_HEADER))?;
    let body_start = header_idx + 1;
    let body_end = lines[body_start..]
        .iter()
        .position(|line| line.starts_with("##") || line.starts_with("---"))
        .map_or(lines.len(), |rel| body_start + rel);
    Some(RelatedSection {
        first_line: body_start + 1,
        body: lines[body_start..body_end].join("\n"),
    })
}

/// Internal links of the Related-Documentation section, every occurrence.
pub fn related_internal_links(doc_path: &str, text: &str) -> Vec<Link> {
    let Some(section) = related_documentation(text) else {
        return Vec::new();
    };
    extract_links(doc_path, &section.body, section.first_line)
        .into_iter()
        .filter(Link::is_internal)
        .collect()
}
