//! Quick-fix advice for inaccessible wiki references.
//!
//! [`advise`] turns an [`InaccessibilityReport`] into independent
//! [`LinkFix`] proposals, one per set reason; each fixes its own concern
//! without necessarily fixing the others. Applying a fix delegates to the
//! host's rename service through [`RenameHost`].

use anyhow::Result;

use crate::config::Settings;
use crate::diagnostics::InaccessibilityReport;
use crate::host::{RenameFlags, RenameHost};

/// What a fix does, paired with a stable message key the host's
/// localization layer can look up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixKind {
    RenameTargetFile,
    MatchCaseToFile,
    RemoveDashes,
    AddWikiExt,
    RemoveExt,
    StripAnchor,
    UrlEncodeAnchor,
    RebaseUnderWikiHome,
    ChangeTarget,
}

impl FixKind {
    pub fn label_key(self) -> &'static str {
        match self {
            FixKind::RenameTargetFile => "quickfix.wikilink.rename-target",
            FixKind::MatchCaseToFile => "quickfix.wikilink.match-target",
            FixKind::RemoveDashes => "quickfix.wikilink.remove-dashes",
            FixKind::AddWikiExt => "quickfix.wikilink.add-ext",
            FixKind::RemoveExt => "quickfix.wikilink.remove-ext",
            FixKind::StripAnchor => "quickfix.wikilink.remove-anchor",
            FixKind::UrlEncodeAnchor => "quickfix.link.url-encode-anchor",
            FixKind::RebaseUnderWikiHome => "quickfix.wikilink.move-target",
            FixKind::ChangeTarget => "quickfix.wikilink.change-target",
        }
    }
}

/// One corrected-name proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkFix {
    pub kind: FixKind,
    pub new_link_ref: String,
    pub flags: RenameFlags,
}

impl LinkFix {
    fn new(kind: FixKind, new_link_ref: String) -> LinkFix {
        LinkFix {
            kind,
            new_link_ref,
            flags: RenameFlags::KEEP_ALL,
        }
    }

    /// Display label for the host's intention menu. Hosts with a message
    /// bundle use [`FixKind::label_key`] with `new_link_ref` as the
    /// parameter instead.
    pub fn label(&self) -> String {
        match self.kind {
            FixKind::RenameTargetFile => {
                format!("Rename target file to '{}'", self.new_link_ref)
            }
            FixKind::MatchCaseToFile => {
                format!("Match link case to file: '{}'", self.new_link_ref)
            }
            FixKind::RemoveDashes => {
                format!("Replace dashes with spaces: '{}'", self.new_link_ref)
            }
            FixKind::AddWikiExt => {
                format!("Use wiki page extension: '{}'", self.new_link_ref)
            }
            FixKind::RemoveExt => {
                format!("Remove extension: '{}'", self.new_link_ref)
            }
            FixKind::StripAnchor => {
                format!("Remove '#' from target name: '{}'", self.new_link_ref)
            }
            FixKind::UrlEncodeAnchor => {
                format!("URL-encode anchor: '{}'", self.new_link_ref)
            }
            FixKind::RebaseUnderWikiHome => {
                format!("Move target under the source wiki home: '{}'", self.new_link_ref)
            }
            FixKind::ChangeTarget => {
                format!("Change link target to '{}'", self.new_link_ref)
            }
        }
    }

    /// Applies the fix through the host's rename engine, inside its write
    /// scope. An unresolvable reference falls back to renaming the element
    /// itself; a rename failure propagates after the write scope unwinds.
    pub fn apply<H: RenameHost>(&self, host: &mut H, element: &H::Element) -> Result<()> {
        host.run_write_action(|host| {
            let root = host
                .resolve_reference(element)
                .unwrap_or_else(|| element.clone());
            let usages = host.find_usages(&root);
            host.rename(&root, &self.new_link_ref, usages, self.flags)
        })
    }
}

/// One fix per set reason; an anchored target name gets the strip and the
/// URL-encode alternative, and a candidate spelling out the wiki extension
/// gets one dropping it unless links are configured to keep extensions.
/// A path-level anchor has no textual remedy and produces no fix. An
/// accessible report produces none at all.
pub fn advise(report: &InaccessibilityReport, settings: &Settings) -> Vec<LinkFix> {
    let mut fixes = Vec::new();

    if report.is_accessible() {
        return fixes;
    }

    if report.target_name_has_spaces() {
        fixes.push(LinkFix::new(
            FixKind::RenameTargetFile,
            report.target_name_has_spaces_fixed(),
        ));
    }
    if report.case_mismatch() {
        fixes.push(LinkFix::new(
            FixKind::MatchCaseToFile,
            report.case_mismatch_wiki_ref_fixed(),
        ));
    }
    if report.wiki_ref_has_dashes() {
        fixes.push(LinkFix::new(
            FixKind::RemoveDashes,
            report.wiki_ref_has_dashes_fixed(),
        ));
    }
    if report.target_not_in_wiki_home() {
        fixes.push(LinkFix::new(
            FixKind::RebaseUnderWikiHome,
            report.target_not_in_wiki_home_fixed(),
        ));
    }
    if report.target_not_in_same_wiki_home() {
        fixes.push(LinkFix::new(
            FixKind::RebaseUnderWikiHome,
            report.target_not_in_same_wiki_home_fixed(),
        ));
    }
    if report.target_not_wiki_page_ext() {
        fixes.push(LinkFix::new(
            FixKind::AddWikiExt,
            report.target_not_wiki_page_ext_fixed(),
        ));
    }
    if report.target_name_has_anchor() {
        fixes.push(LinkFix::new(
            FixKind::StripAnchor,
            report.target_name_has_anchor_fixed(),
        ));
        fixes.push(LinkFix::new(
            FixKind::UrlEncodeAnchor,
            report.target_name_has_anchor_url_encoded(),
        ));
    }
    if !settings.include_md_extension_in_links {
        // Wiki page refs never carry the extension
        let ext_suffix = format!(".{}", report.link().target().wiki_page_ext());
        if let Some(stem) = report
            .candidate()
            .and_then(|candidate| candidate.strip_suffix(&ext_suffix))
        {
            fixes.push(LinkFix::new(FixKind::RemoveExt, stem.to_string()));
        }
    }

    fixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::file_ref::FileRef;
    use crate::link::RelativeLink;
    use anyhow::anyhow;

    fn link(source: &str, target: &str) -> RelativeLink {
        let settings = Settings::default();
        RelativeLink::new(
            FileRef::new(&settings, source, "proj"),
            FileRef::new(&settings, target, "proj"),
        )
        .expect("same-project link should construct")
    }

    /// Recording host: elements and usages are plain strings, renames are
    /// logged, and the write-action bracket counts its entries and exits.
    #[derive(Default)]
    struct MockHost {
        resolutions: Vec<(String, String)>,
        usages: Vec<String>,
        renames: Vec<(String, String, usize, RenameFlags)>,
        fail_rename: bool,
        write_actions_entered: usize,
        write_actions_exited: usize,
    }

    impl RenameHost for MockHost {
        type Element = String;
        type Usage = String;

        fn resolve_reference(&self, element: &String) -> Option<String> {
            self.resolutions
                .iter()
                .find(|(from, _)| from == element)
                .map(|(_, to)| to.clone())
        }

        fn find_usages(&self, _element: &String) -> Vec<String> {
            self.usages.clone()
        }

        fn rename(
            &mut self,
            element: &String,
            new_name: &str,
            usages: Vec<String>,
            flags: RenameFlags,
        ) -> Result<()> {
            if self.fail_rename {
                return Err(anyhow!("rename refused by host"));
            }
            self.renames
                .push((element.clone(), new_name.to_string(), usages.len(), flags));
            Ok(())
        }

        fn run_write_action<F>(&mut self, action: F) -> Result<()>
        where
            F: FnOnce(&mut Self) -> Result<()>,
        {
            self.write_actions_entered += 1;
            let result = action(self);
            self.write_actions_exited += 1;
            result
        }
    }

    /// Test: An accessible report yields no fixes.
    #[test]
    fn test_advise_accessible_is_empty() {
        let l = link("/proj/proj.wiki/Home.md", "/proj/proj.wiki/Page.md");
        let report = l.inaccessible_wiki_ref_reasons(Some("Page"));

        assert!(advise(&report, &Settings::default()).is_empty());
    }

    /// Test: Each set reason produces its own independent fix.
    #[test]
    fn test_advise_one_fix_per_reason() {
        let l = link("/proj/proj.wiki/Home.md", "/proj/proj.wiki/My Page.md");
        let report = l.inaccessible_wiki_ref_reasons(Some("my-page"));

        let fixes = advise(&report, &Settings::default());
        let kinds: Vec<FixKind> = fixes.iter().map(|f| f.kind).collect();

        assert!(kinds.contains(&FixKind::RenameTargetFile));
        assert!(kinds.contains(&FixKind::MatchCaseToFile));
        assert!(kinds.contains(&FixKind::RemoveDashes));
        assert_eq!(fixes.len(), 3);
    }

    /// Test: An anchored target name gets both the strip fix and the
    /// URL-encode alternative.
    #[test]
    fn test_advise_anchor_alternatives() {
        let l = link("/proj/docs/a.md", "/proj/docs/Page.md#sec");
        let report = l.inaccessible_wiki_ref_reasons(None);

        let fixes = advise(&report, &Settings::default());
        let kinds: Vec<FixKind> = fixes.iter().map(|f| f.kind).collect();

        assert!(kinds.contains(&FixKind::StripAnchor));
        assert!(kinds.contains(&FixKind::UrlEncodeAnchor));
        assert_eq!(fixes.len(), 2);

        let encoded = fixes
            .iter()
            .find(|f| f.kind == FixKind::UrlEncodeAnchor)
            .unwrap();
        assert_eq!(encoded.new_link_ref, "Page.md%23sec");
    }

    /// Test: A candidate spelling out the wiki extension gets a fix that
    /// drops it, alongside the fixes for its other reasons.
    #[test]
    fn test_advise_remove_ext_for_candidate_with_extension() {
        let l = link("/proj/proj.wiki/Home.md", "/proj/proj.wiki/My-Page.md");
        let report = l.inaccessible_wiki_ref_reasons(Some("my-page.md"));

        let fixes = advise(&report, &Settings::default());
        let remove_ext = fixes
            .iter()
            .find(|f| f.kind == FixKind::RemoveExt)
            .expect("candidate with extension should get a remove-ext fix");

        assert_eq!(remove_ext.new_link_ref, "my-page");
        assert_eq!(remove_ext.kind.label_key(), "quickfix.wikilink.remove-ext");
        assert!(
            fixes.iter().any(|f| f.kind == FixKind::RemoveDashes),
            "other reasons keep their own fixes"
        );
    }

    /// Test: Links configured to keep extensions suppress the remove-ext
    /// fix.
    #[test]
    fn test_advise_keeps_extension_when_configured() {
        let l = link("/proj/proj.wiki/Home.md", "/proj/proj.wiki/My-Page.md");
        let report = l.inaccessible_wiki_ref_reasons(Some("my-page.md"));

        let settings = Settings {
            include_md_extension_in_links: true,
            ..Settings::default()
        };
        let fixes = advise(&report, &settings);

        assert!(
            !fixes.iter().any(|f| f.kind == FixKind::RemoveExt),
            "remove-ext fix is only offered when links drop extensions"
        );
    }

    /// Test: Labels and message keys carry the corrected name.
    #[test]
    fn test_labels_and_keys() {
        let fix = LinkFix::new(FixKind::RemoveDashes, "My Page".to_string());

        assert_eq!(fix.kind.label_key(), "quickfix.wikilink.remove-dashes");
        assert!(fix.label().contains("My Page"));
    }

    /// Test: Applying a fix resolves the reference, gathers usages, and
    /// renames with the fix's flags, all inside one write action.
    #[test]
    fn test_apply_resolves_and_renames() {
        let mut host = MockHost {
            resolutions: vec![("link-element".to_string(), "target-file".to_string())],
            usages: vec!["u1".to_string(), "u2".to_string()],
            ..Default::default()
        };

        let fix = LinkFix::new(FixKind::RenameTargetFile, "My-Page.md".to_string());
        fix.apply(&mut host, &"link-element".to_string()).unwrap();

        assert_eq!(host.renames.len(), 1);
        let (element, new_name, usage_count, flags) = &host.renames[0];
        assert_eq!(element, "target-file", "rename targets the resolved element");
        assert_eq!(new_name, "My-Page.md");
        assert_eq!(*usage_count, 2);
        assert_eq!(*flags, RenameFlags::KEEP_ALL);
        assert_eq!(host.write_actions_entered, 1);
        assert_eq!(host.write_actions_exited, 1);
    }

    /// Test: An unresolvable reference falls back to renaming the element
    /// itself.
    #[test]
    fn test_apply_unresolved_falls_back() {
        let mut host = MockHost::default();

        let fix = LinkFix::new(FixKind::ChangeTarget, "Other.md".to_string());
        fix.apply(&mut host, &"orphan".to_string()).unwrap();

        assert_eq!(host.renames[0].0, "orphan");
    }

    /// Test: A rename failure propagates, and the write scope still unwinds.
    #[test]
    fn test_apply_rename_failure_propagates() {
        let mut host = MockHost {
            fail_rename: true,
            ..Default::default()
        };

        let fix = LinkFix::new(FixKind::ChangeTarget, "Other.md".to_string());
        let result = fix.apply(&mut host, &"element".to_string());

        assert!(result.is_err());
        assert_eq!(host.write_actions_entered, 1);
        assert_eq!(host.write_actions_exited, 1, "write scope must unwind");
    }
}
