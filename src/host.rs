//! Boundary traits for the services the embedding IDE provides.
//!
//! The computation core never touches the host's project model directly.
//! Applying a fix goes through [`RenameHost`]: resolve the reference, find
//! its usages, and perform the rename inside the host's write-transaction
//! scope. Rename behavior is controlled by [`RenameFlags`] passed explicitly
//! with each call; there is no process-wide flag state.

use anyhow::Result;

/// Named rename-behavior capabilities, threaded through to the host
/// unchanged. The core does not interpret them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenameFlags {
    pub keep_text: bool,
    pub keep_renamed_text: bool,
    pub keep_title: bool,
    pub keep_anchor: bool,
    pub keep_path: bool,
}

impl RenameFlags {
    pub const KEEP_ALL: RenameFlags = RenameFlags {
        keep_text: true,
        keep_renamed_text: true,
        keep_title: true,
        keep_anchor: true,
        keep_path: true,
    };
}

/// The host IDE's rename-refactoring service, abstracted over its element
/// and usage representations.
///
/// Calls happen on the host's single command thread; the core never
/// parallelizes renames.
pub trait RenameHost {
    /// A named element in the host's project model.
    type Element: Clone;
    /// A usage site of an element, consumed by [`RenameHost::rename`].
    type Usage;

    /// Resolves a reference element to the element it points at, or `None`
    /// when the host cannot resolve it.
    fn resolve_reference(&self, element: &Self::Element) -> Option<Self::Element>;

    fn find_usages(&self, element: &Self::Element) -> Vec<Self::Usage>;

    /// Renames `element` everywhere, updating the given usages.
    fn rename(
        &mut self,
        element: &Self::Element,
        new_name: &str,
        usages: Vec<Self::Usage>,
        flags: RenameFlags,
    ) -> Result<()>;

    /// Runs `action` inside the host's transactional write scope, so a
    /// failure partway rolls back every edit. The default runs the action
    /// directly, for hosts without a transaction model.
    fn run_write_action<F>(&mut self, action: F) -> Result<()>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<()>,
    {
        action(self)
    }
}
