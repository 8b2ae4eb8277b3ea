//! Discovery of the viewpoint and perspective registries.

use crate::fs_view::{FileSystemView, join, walk_markdown};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

pub const VIEWPOINTS_DIR: &str = "viewpoints";
pub const PERSPECTIVES_DIR: &str = "perspectives";
pub const README: &str = "README.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Viewpoint,
    Perspective,
}

impl TopicKind {
    pub fn dir(self) -> &'static str {
        match self {
            Self::Viewpoint => VIEWPOINTS_DIR,
            Self::Perspective => PERSPECTIVES_DIR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicDirectory {
    pub slug: String,
    pub kind: TopicKind,
    /// `viewpoints/<slug>` or `perspectives/<slug>`.
    pub path: String,
    pub readme: Option<String>,
    /// Every markdown file under the directory, README included, sorted.
    pub markdown_files: Vec<String>,
    pub nested_dirs: Vec<String>,
}

impl TopicDirectory {
    /// Where the README is expected, whether or not it exists.
    pub fn readme_path(&self) -> String {
        join(&self.path, README)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentRoot {
    pub label: String,
    pub viewpoints: BTreeMap<String, TopicDirectory>,
    pub perspectives: BTreeMap<String, TopicDirectory>,
    pub has_viewpoints_dir: bool,
    pub has_perspectives_dir: bool,
}

impl DocumentRoot {
    pub fn discover(fs: &dyn FileSystemView) -> Self {
        let root = Self {
            label: fs.root_label(),
            viewpoints: discover_kind(fs, TopicKind::Viewpoint),
            perspectives: discover_kind(fs, TopicKind::Perspective),
            has_viewpoints_dir: fs.is_dir(VIEWPOINTS_DIR),
            has_perspectives_dir: fs.is_dir(PERSPECTIVES_DIR),
        };
        for slug in root.duplicate_slugs() {
            warn!(slug, "slug appears in both viewpoints/ and perspectives/");
        }
        root
    }

    /// Viewpoints alphabetically, then perspectives alphabetically.
    pub fn topics(&self) -> impl Iterator<Item = &TopicDirectory> {
        self.viewpoints.values().chain(self.perspectives.values())
    }

    pub fn duplicate_slugs(&self) -> Vec<&str> {
        self.viewpoints
            .keys()
            .filter(|slug| self.perspectives.contains_key(*slug))
            .map(String::as_str)
            .collect()
    }
}

fn discover_kind(fs: &dyn FileSystemView, kind: TopicKind) -> BTreeMap<String, TopicDirectory> {
    fs.list_dir(kind.dir())
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| {
            let path = join(kind.dir(), &entry.name);
            let readme = join(&path, README);
            let nested_dirs = fs
                .list_dir(&path)
                .into_iter()
                .filter(|child| child.is_dir)
                .map(|child| join(&path, &child.name))
                .collect();
            let topic = TopicDirectory {
                slug: entry.name.clone(),
                kind,
                readme: fs.exists(&readme).then_some(readme),
                markdown_files: walk_markdown(fs, &path),
                nested_dirs,
                path,
            };
            (entry.name, topic)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_view::MemoryFileSystem;

    #[test]
    fn discovers_registries_in_alphabetical_order() {
        let fs = MemoryFileSystem::new()
            .with_file("viewpoints/information/README.md", "")
            .with_file("viewpoints/functional/README.md", "")
            .with_file("viewpoints/functional/aggregates/order.md", "")
            .with_file("viewpoints/README.md", "")
            .with_dir("perspectives/cost")
            .with_file("perspectives/availability/README.md", "");
        let root = DocumentRoot::discover(&fs);

        let order: Vec<&str> = root.topics().map(|t| t.path.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "viewpoints/functional",
                "viewpoints/information",
                "perspectives/availability",
                "perspectives/cost",
            ]
        );
        let functional = &root.viewpoints["functional"];
        assert_eq!(
            functional.readme.as_deref(),
            Some("viewpoints/functional/README.md")
        );
        assert_eq!(functional.nested_dirs, ["viewpoints/functional/aggregates"]);
        assert_eq!(functional.markdown_files.len(), 2);
        assert_eq!(root.perspectives["cost"].readme, None);
        assert_eq!(
            root.perspectives["cost"].readme_path(),
            "perspectives/cost/README.md"
        );
        assert!(root.has_perspectives_dir);
    }

    #[test]
    fn reports_slugs_present_in_both_registries() {
        let fs = MemoryFileSystem::new()
            .with_dir("viewpoints/security")
            .with_dir("perspectives/security")
            .with_dir("perspectives/performance");
        let root = DocumentRoot::discover(&fs);
        assert_eq!(root.duplicate_slugs(), vec!["security"]);
    }
}
