//! Relative-link computation between two files in a project namespace.
//!
//! [`RelativeLink`] is a pure function of its `(source, target)` pair: the
//! `../` ascent and directory descent needed to reach the target from the
//! source's directory, the wiki-style page reference, and whether the link
//! is accessible as a wiki link. Everything is computed once at construction
//! and never mutated.

use std::cmp::Ordering;
use std::fmt;

use anyhow::bail;
use itertools::Itertools;

use crate::file_ref::{as_wiki_ref, FileRef};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeLink {
    source: FileRef,
    target: FileRef,
    path_prefix: String,
    up_directories: usize,
    down_directories: usize,
    wiki_accessible: bool,
}

impl RelativeLink {
    /// Builds the link from `source` to `target`. Both must belong to the
    /// same project namespace; mixing projects is a caller bug and fails
    /// fast rather than producing a meaningless link.
    pub fn new(source: FileRef, target: FileRef) -> anyhow::Result<RelativeLink> {
        if source.project() != target.project() {
            bail!(
                "link source project '{}' does not match target project '{}'",
                source.project(),
                target.project()
            );
        }

        let (path_prefix, up_directories, down_directories) =
            compute_link_ref_info(&source, &target);

        let link_ref = format!("{}{}", path_prefix, target.file_name());
        let wiki_accessible = !link_ref.contains(' ')
            && target.has_wiki_page_ext()
            && target.wiki_home().starts_with(source.wiki_home())
            && !target.contains_anchor();

        Ok(RelativeLink {
            source,
            target,
            path_prefix,
            up_directories,
            down_directories,
            wiki_accessible,
        })
    }

    pub fn source(&self) -> &FileRef {
        &self.source
    }

    pub fn target(&self) -> &FileRef {
        &self.target
    }

    /// The `../` ascent followed by the descent segments, each with a
    /// trailing `/`. `link_ref()` is exactly this prefix plus the target
    /// file name.
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn up_directories(&self) -> usize {
        self.up_directories
    }

    pub fn down_directories(&self) -> usize {
        self.down_directories
    }

    pub fn is_wiki_accessible(&self) -> bool {
        self.wiki_accessible
    }

    pub fn link_ref(&self) -> String {
        format!("{}{}", self.path_prefix, self.target.file_name())
    }

    pub fn link_ref_no_ext(&self) -> String {
        format!("{}{}", self.path_prefix, self.target.file_name_no_ext())
    }

    pub fn link_ref_with_anchor(&self) -> String {
        format!("{}{}", self.path_prefix, self.target.file_name_with_anchor())
    }

    pub fn link_ref_with_anchor_no_ext(&self) -> String {
        format!(
            "{}{}",
            self.path_prefix,
            self.target.file_name_with_anchor_no_ext()
        )
    }

    pub fn wiki_page_ref(&self) -> String {
        format!(
            "{}{}",
            as_wiki_ref(&self.path_prefix),
            self.target.file_name_no_ext_as_wiki_ref()
        )
    }

    pub fn wiki_page_ref_with_anchor(&self) -> String {
        format!(
            "{}{}",
            as_wiki_ref(&self.path_prefix),
            self.target.file_name_with_anchor_no_ext_as_wiki_ref()
        )
    }

    pub fn link_ref_has_spaces(&self) -> bool {
        self.link_ref().contains(' ')
    }

    pub fn link_ref_no_ext_has_spaces(&self) -> bool {
        self.link_ref_no_ext().contains(' ')
    }

    /// Ranking used to pick among candidate links to the same target:
    /// fewer ascents win, then fewer descents, then lexicographic link text.
    pub fn reflink_cmp(&self, other: &RelativeLink) -> Ordering {
        self.up_directories
            .cmp(&other.up_directories)
            .then_with(|| self.down_directories.cmp(&other.down_directories))
            .then_with(|| self.link_ref().cmp(&other.link_ref()))
    }
}

impl PartialOrd for RelativeLink {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelativeLink {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reflink_cmp(other)
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl fmt::Display for RelativeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RelativeLink(source = {}, target = {}, linkRef = '{}', wikiPageRef = '{}', \
             wikiAccessible = {}, upDirectories = {}, downDirectories = {})",
            self.source,
            self.target,
            self.link_ref(),
            self.wiki_page_ref(),
            self.wiki_accessible,
            self.up_directories,
            self.down_directories
        )
    }
}

/// Walks the two segment sequences to the first divergence and emits one
/// `../` per remaining source directory, then each remaining target
/// directory. Index 0 is the shared namespace root; the last segment on
/// each side is the file name and never takes part in the walk.
fn compute_link_ref_info(source: &FileRef, target: &FileRef) -> (String, usize, usize) {
    let target_parts = target.full_path().split('/').collect_vec();
    let source_parts = source.full_path().split('/').collect_vec();

    let target_dirs = &target_parts[..target_parts.len() - 1];
    let source_dirs = &source_parts[..source_parts.len() - 1];

    let bound = target_dirs.len().min(source_dirs.len());
    let mut i = 1;
    while i < bound && target_dirs[i] == source_dirs[i] {
        i += 1;
    }

    let up_directories = source_dirs.len().saturating_sub(i);
    let down_directories = target_dirs.len().saturating_sub(i);

    let mut path_prefix = "../".repeat(up_directories);
    for part in target_dirs.iter().skip(i) {
        path_prefix.push_str(part);
        path_prefix.push('/');
    }

    (path_prefix, up_directories, down_directories)
}
