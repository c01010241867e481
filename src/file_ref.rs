//! File identity within a project namespace.
//!
//! A [`FileRef`] is the primitive everything else builds on: an immutable
//! record of where a file sits in the project tree, expressed with `/`
//! separators regardless of host platform, together with the pieces link
//! computation cares about - directory, file name, extension, optional
//! `#anchor` fragment, and the wiki-home boundary the file falls under.

use std::fmt;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Settings;

/// Splits a slash path into directory, file name, and anchor. The anchor
/// marker only counts inside the last segment; a `#` in a directory name
/// stays in the directory portion.
static PATH_PARSER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<dir>.*/)?(?P<name>[^/#]*)(?:#(?P<anchor>.*))?$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileRef {
    full_path: String,
    project: String,
    path: String,
    file_name: String,
    anchor: Option<String>,
    ext: String,
    wiki_home: String,
    wiki_page_ext: String,
}

impl FileRef {
    /// Builds a file identity from an absolute slash-separated path and the
    /// id of the project namespace it belongs to. Host-specific file handles
    /// (virtual files, parsed documents) convert to this form at the boundary.
    pub fn new(settings: &Settings, full_path: &str, project: &str) -> FileRef {
        let captures = PATH_PARSER
            .captures(full_path)
            .expect("path parser matches any string");

        let path = captures
            .name("dir")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let file_name = captures
            .name("name")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let anchor = captures.name("anchor").map(|m| m.as_str().to_string());

        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default();

        let wiki_home = derive_wiki_home(&path, &settings.wiki_home_suffix);

        FileRef {
            full_path: full_path.to_string(),
            project: project.to_string(),
            path,
            file_name,
            anchor,
            ext,
            wiki_home,
            wiki_page_ext: settings.wiki_page_extension.clone(),
        }
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Directory portion of the path, including the trailing `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Wiki-home prefix of the path, or the empty string when the file does
    /// not lie under any wiki home.
    pub fn wiki_home(&self) -> &str {
        &self.wiki_home
    }

    /// File name with the anchor fragment stripped.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_name_no_ext(&self) -> &str {
        if self.ext.is_empty() {
            &self.file_name
        } else {
            &self.file_name[..self.file_name.len() - self.ext.len() - 1]
        }
    }

    pub fn file_name_with_anchor(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", self.file_name, anchor),
            None => self.file_name.clone(),
        }
    }

    pub fn file_name_with_anchor_no_ext(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", self.file_name_no_ext(), anchor),
            None => self.file_name_no_ext().to_string(),
        }
    }

    pub fn file_name_no_ext_as_wiki_ref(&self) -> String {
        as_wiki_ref(self.file_name_no_ext())
    }

    pub fn file_name_with_anchor_no_ext_as_wiki_ref(&self) -> String {
        as_wiki_ref(&self.file_name_with_anchor_no_ext())
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// The extension recognized for wiki pages in this project.
    pub fn wiki_page_ext(&self) -> &str {
        &self.wiki_page_ext
    }

    pub fn has_wiki_page_ext(&self) -> bool {
        self.ext == self.wiki_page_ext
    }

    pub fn is_under_wiki_home(&self) -> bool {
        !self.wiki_home.is_empty()
    }

    pub fn is_wiki_page(&self) -> bool {
        self.is_under_wiki_home() && self.has_wiki_page_ext()
    }

    pub fn file_name_contains_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn path_contains_anchor(&self) -> bool {
        self.path.contains('#')
    }

    pub fn contains_anchor(&self) -> bool {
        self.file_name_contains_anchor() || self.path_contains_anchor()
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FileRef(path = '{}', project = '{}', wikiHome = '{}')",
            self.full_path, self.project, self.wiki_home
        )
    }
}

/// Innermost directory whose name carries the wiki-home suffix, as a path
/// prefix. Empty when no directory on the path is a wiki home.
fn derive_wiki_home(dir: &str, suffix: &str) -> String {
    let segments = dir.trim_end_matches('/').split('/').collect_vec();
    segments
        .iter()
        .rposition(|s| !s.is_empty() && s.ends_with(suffix))
        .map(|idx| segments[..=idx].join("/"))
        .unwrap_or_default()
}

/// Wiki references show dashes as spaces.
pub fn as_wiki_ref(text: &str) -> String {
    text.replace('-', " ")
}

/// Inverse of [`as_wiki_ref`]: a wiki reference as the file name it denotes.
pub fn wiki_ref_as_file_name(wiki_ref: &str) -> String {
    wiki_ref.replace(' ', "-")
}

pub fn wiki_ref_as_file_name_with_ext(wiki_ref: &str, ext: &str) -> String {
    format!("{}.{}", wiki_ref_as_file_name(wiki_ref), ext)
}

/// Last path segment of `path` with its extension stripped.
pub fn file_name_no_ext_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_ref(path: &str) -> FileRef {
        FileRef::new(&Settings::default(), path, "proj")
    }

    /// Test: A plain path splits into directory, name, and extension.
    #[test]
    fn test_parse_plain_path() {
        let r = file_ref("/proj/docs/Page.md");

        assert_eq!(r.path(), "/proj/docs/");
        assert_eq!(r.file_name(), "Page.md");
        assert_eq!(r.file_name_no_ext(), "Page");
        assert_eq!(r.ext(), "md");
        assert_eq!(r.anchor(), None);
    }

    /// Test: An anchor on the file name is split off; the bare file name
    /// excludes it.
    #[test]
    fn test_parse_anchor_in_file_name() {
        let r = file_ref("/proj/docs/Page.md#section");

        assert_eq!(r.file_name(), "Page.md");
        assert_eq!(r.anchor(), Some("section"));
        assert_eq!(r.file_name_with_anchor(), "Page.md#section");
        assert_eq!(r.file_name_with_anchor_no_ext(), "Page#section");
        assert!(r.file_name_contains_anchor());
        assert!(!r.path_contains_anchor());
    }

    /// Test: A `#` inside a directory name counts as a path anchor, not a
    /// file-name anchor.
    #[test]
    fn test_anchor_in_directory_portion() {
        let r = file_ref("/proj/odd#dir/Page.md");

        assert_eq!(r.file_name(), "Page.md");
        assert_eq!(r.anchor(), None);
        assert!(r.path_contains_anchor());
        assert!(r.contains_anchor());
    }

    /// Test: The innermost `.wiki` directory bounds the wiki home.
    #[test]
    fn test_wiki_home_derivation() {
        let r = file_ref("/proj/proj.wiki/sub/Page.md");

        assert_eq!(r.wiki_home(), "/proj/proj.wiki");
        assert!(r.is_under_wiki_home());
        assert!(r.is_wiki_page());
    }

    /// Test: Nested wiki homes resolve to the innermost one.
    #[test]
    fn test_nested_wiki_home_uses_innermost() {
        let r = file_ref("/proj/outer.wiki/inner.wiki/Page.md");

        assert_eq!(r.wiki_home(), "/proj/outer.wiki/inner.wiki");
    }

    /// Test: Files outside any wiki home report an empty boundary.
    #[test]
    fn test_no_wiki_home() {
        let r = file_ref("/proj/docs/Page.md");

        assert_eq!(r.wiki_home(), "");
        assert!(!r.is_under_wiki_home());
        assert!(!r.is_wiki_page());
    }

    /// Test: A wiki page needs both the boundary and the recognized extension.
    #[test]
    fn test_wiki_page_requires_extension() {
        let r = file_ref("/proj/proj.wiki/image.png");

        assert!(r.is_under_wiki_home());
        assert!(!r.has_wiki_page_ext());
        assert!(!r.is_wiki_page());
    }

    /// Test: Wiki-ref conversions swap dashes and spaces both ways.
    #[test]
    fn test_wiki_ref_conversions() {
        assert_eq!(as_wiki_ref("My-Page"), "My Page");
        assert_eq!(wiki_ref_as_file_name("My Page"), "My-Page");
        assert_eq!(wiki_ref_as_file_name_with_ext("My Page", "md"), "My-Page.md");

        let r = file_ref("/proj/proj.wiki/My-Page.md");
        assert_eq!(r.file_name_no_ext_as_wiki_ref(), "My Page");
    }

    /// Test: file_name_no_ext_of handles paths, bare names, and dotless names.
    #[test]
    fn test_file_name_no_ext_of() {
        assert_eq!(file_name_no_ext_of("a/b/My-Page.md"), "My-Page");
        assert_eq!(file_name_no_ext_of("My Page"), "My Page");
        assert_eq!(file_name_no_ext_of("Page.md"), "Page");
    }
}
