//! Accessibility diagnostics for wiki page references.
//!
//! Given a computed [`RelativeLink`] and optionally the candidate wiki
//! reference as currently written in the source text, classify every reason
//! the reference is inaccessible. Reasons are independent and combine; each
//! carries a derived corrected string. An empty reason set means the link is
//! already fully accessible.

use crate::file_ref::{file_name_no_ext_of, wiki_ref_as_file_name_with_ext};
use crate::link::RelativeLink;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    TargetHasSpaces,
    CaseMismatch,
    WikiPageRefHasDashes,
    NotUnderWikiHome,
    TargetNotWikiPageExt,
    NotUnderSourceWikiHome,
    TargetNameHasAnchor,
    TargetPathHasAnchor,
}

impl Reason {
    pub const ALL: [Reason; 8] = [
        Reason::TargetHasSpaces,
        Reason::CaseMismatch,
        Reason::WikiPageRefHasDashes,
        Reason::NotUnderWikiHome,
        Reason::TargetNotWikiPageExt,
        Reason::NotUnderSourceWikiHome,
        Reason::TargetNameHasAnchor,
        Reason::TargetPathHasAnchor,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of [`Reason`] flags. Internally a bit set, but callers only ever see
/// the named flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reasons(u16);

impl Reasons {
    pub fn insert(&mut self, reason: Reason) {
        self.0 |= reason.bit();
    }

    pub fn contains(&self, reason: Reason) -> bool {
        self.0 & reason.bit() != 0
    }

    /// True when `reason` is the single flag set.
    pub fn only(&self, reason: Reason) -> bool {
        self.0 == reason.bit()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Reason> + '_ {
        Reason::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

/// Why a candidate wiki reference is inaccessible, with one corrected form
/// per reason. Holds a read-only back-reference to the link that produced
/// it; the report never outlives or mutates the link.
pub struct InaccessibilityReport<'a> {
    reasons: Reasons,
    candidate: Option<String>,
    link: &'a RelativeLink,
}

impl RelativeLink {
    /// Classifies `candidate` (the wiki reference as written in source text,
    /// if any) against this link. Wiki-home and extension checks apply only
    /// when the source itself is a wiki page.
    pub fn inaccessible_wiki_ref_reasons(&self, candidate: Option<&str>) -> InaccessibilityReport<'_> {
        let mut reasons = Reasons::default();

        if self.link_ref_has_spaces() {
            reasons.insert(Reason::TargetHasSpaces);
        }

        if let Some(candidate) = candidate {
            let folded = candidate.replace('-', " ");
            let canonical = self.wiki_page_ref().replace('-', " ");
            if folded.to_lowercase() == canonical.to_lowercase() && folded != canonical {
                reasons.insert(Reason::CaseMismatch);
            }
            if candidate.contains('-') {
                reasons.insert(Reason::WikiPageRefHasDashes);
            }
        }

        if self.source().is_wiki_page() {
            if !self.target().is_under_wiki_home() {
                reasons.insert(Reason::NotUnderWikiHome);
            } else if !self.target().wiki_home().starts_with(self.source().wiki_home()) {
                reasons.insert(Reason::NotUnderSourceWikiHome);
            }

            if !self.target().has_wiki_page_ext() {
                reasons.insert(Reason::TargetNotWikiPageExt);
            }
        }

        if self.target().path_contains_anchor() {
            reasons.insert(Reason::TargetPathHasAnchor);
        }
        if self.target().file_name_contains_anchor() {
            reasons.insert(Reason::TargetNameHasAnchor);
        }

        InaccessibilityReport {
            reasons,
            candidate: candidate.map(String::from),
            link: self,
        }
    }
}

impl<'a> InaccessibilityReport<'a> {
    pub fn reasons(&self) -> Reasons {
        self.reasons
    }

    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    pub fn link(&self) -> &'a RelativeLink {
        self.link
    }

    /// Zero reasons set. Callers must check this before offering any fix.
    pub fn is_accessible(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn target_name_has_spaces(&self) -> bool {
        self.reasons.contains(Reason::TargetHasSpaces)
    }

    pub fn target_name_has_spaces_fixed(&self) -> String {
        self.link.target().file_name().replace(' ', "-")
    }

    pub fn case_mismatch(&self) -> bool {
        self.reasons.contains(Reason::CaseMismatch)
    }

    pub fn case_mismatch_only(&self) -> bool {
        self.reasons.only(Reason::CaseMismatch)
    }

    /// Link-text side of the case fix: the canonical link with dashes shown
    /// as spaces.
    pub fn case_mismatch_wiki_ref_fixed(&self) -> String {
        self.link.link_ref_no_ext().replace('-', " ")
    }

    /// File-name side of the case fix: the candidate as the file name it
    /// would denote.
    pub fn case_mismatch_file_name_fixed(&self) -> String {
        wiki_ref_as_file_name_with_ext(
            file_name_no_ext_of(&self.wiki_ref_has_dashes_fixed()),
            self.link.target().wiki_page_ext(),
        )
    }

    pub fn wiki_ref_has_dashes(&self) -> bool {
        self.reasons.contains(Reason::WikiPageRefHasDashes)
    }

    pub fn wiki_ref_has_dashes_fixed(&self) -> String {
        self.candidate.as_deref().unwrap_or_default().replace('-', " ")
    }

    pub fn target_not_wiki_page_ext(&self) -> bool {
        self.reasons.contains(Reason::TargetNotWikiPageExt)
    }

    pub fn target_not_wiki_page_ext_fixed(&self) -> String {
        format!(
            "{}.{}",
            self.link.target().file_name_no_ext(),
            self.link.target().wiki_page_ext()
        )
    }

    pub fn target_not_in_wiki_home(&self) -> bool {
        self.reasons.contains(Reason::NotUnderWikiHome)
    }

    pub fn target_not_in_wiki_home_fixed(&self) -> String {
        format!(
            "{}{}",
            self.link.source().path(),
            self.link.target().file_name()
        )
    }

    pub fn target_not_in_same_wiki_home(&self) -> bool {
        self.reasons.contains(Reason::NotUnderSourceWikiHome)
    }

    // Shares the remedy with target_not_in_wiki_home_fixed: either way the
    // target belongs under the source's own wiki home.
    pub fn target_not_in_same_wiki_home_fixed(&self) -> String {
        format!(
            "{}{}",
            self.link.source().path(),
            self.link.target().file_name()
        )
    }

    pub fn target_name_has_anchor(&self) -> bool {
        self.reasons.contains(Reason::TargetNameHasAnchor)
    }

    pub fn target_name_has_anchor_fixed(&self) -> String {
        self.link.target().file_name_with_anchor().replace('#', "")
    }

    /// Alternative anchor remedy: keep the anchor but URL-encode it so the
    /// link survives as plain text.
    pub fn target_name_has_anchor_url_encoded(&self) -> String {
        match self.link.target().anchor() {
            Some(anchor) => format!(
                "{}{}",
                self.link.target().file_name(),
                urlencoding::encode(&format!("#{anchor}"))
            ),
            None => self.link.target().file_name().to_string(),
        }
    }

    pub fn target_path_has_anchor(&self) -> bool {
        self.reasons.contains(Reason::TargetPathHasAnchor)
    }
}
