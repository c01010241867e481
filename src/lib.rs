//! linkmark: link-reference resolution for markdown editing hosts
//!
//! This crate provides the computational core of a markdown-editing plugin:
//! given a source file and a target file (or wiki page) inside a project
//! namespace, it derives the relative link text that belongs in markdown
//! source, classifies why a wiki link might be inaccessible, and proposes
//! corrected forms that a host IDE can apply through its rename engine.
//!
//! # Overview
//!
//! - **File identity**: [`file_ref::FileRef`] captures a file's place in the
//!   project namespace (slash-separated path, wiki-home boundary, extension,
//!   anchor fragment)
//! - **Link computation**: [`link::RelativeLink`] computes the `../`-prefixed
//!   relative path between two files and the parallel wiki-page reference
//! - **Diagnostics**: [`diagnostics`] classifies a candidate wiki reference
//!   against a fixed set of inaccessibility reasons, each with a derived fix
//! - **Quick fixes**: [`codeactions`] turns a diagnostic report into
//!   independent correction proposals and drives the host's rename service
//!
//! # Architecture
//!
//! The computation is pure: a `RelativeLink` is a function of its two
//! `FileRef` inputs, computed once at construction and never mutated. The
//! only impure boundary is [`host::RenameHost`], the trait the embedding IDE
//! implements to resolve references, find usages, and perform renames.
//!
//! # Usage
//!
//! ```ignore
//! use linkmark::config::Settings;
//! use linkmark::file_ref::FileRef;
//! use linkmark::link::RelativeLink;
//!
//! let settings = Settings::default();
//! let source = FileRef::new(&settings, "/proj/proj.wiki/Home.md", "proj");
//! let target = FileRef::new(&settings, "/proj/proj.wiki/sub/Page.md", "proj");
//! let link = RelativeLink::new(source, target)?;
//! assert_eq!(link.link_ref(), "sub/Page.md");
//! ```

// Core modules - file identity and link computation
pub mod file_ref;
pub mod link;

// Diagnostics and quick-fix advice
pub mod codeactions;
pub mod diagnostics;

// Host IDE boundary
pub mod host;

// Configuration
pub mod config;
