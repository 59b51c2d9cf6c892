//! Anchored pattern segmentation of a release-notes blob.
//!
//! Each [`SectionRule`] captures the shortest span between its start anchor
//! and the first of its stop anchors (or end of text). Matching is
//! case-insensitive and spans line breaks. Rules run independently in
//! taxonomy order; one rule's match never consumes text for another.

use regex::Regex;
use tracing::debug;

use crate::error::QaError;
use crate::models::{SectionKind, SectionSet};

/// Where a section's capture may stop.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub kind: SectionKind,
    pub start: &'static str,
    pub stops: &'static [&'static str],
    /// Whether reaching end of text also terminates the capture.
    pub until_end: bool,
}

/// The seven extraction rules in taxonomy order.
pub const SECTION_RULES: [SectionRule; 7] = [
    SectionRule {
        kind: SectionKind::ProductInfo,
        start: "Product:",
        stops: &["Version"],
        until_end: false,
    },
    SectionRule {
        kind: SectionKind::VersionInfo,
        start: "Version",
        stops: &["New Features"],
        until_end: false,
    },
    SectionRule {
        kind: SectionKind::NewFeatures,
        start: "New Features:",
        stops: &[
            "Bug Fixes:",
            "Known Issues:",
            "End of Support:",
            "Version History:",
        ],
        until_end: true,
    },
    SectionRule {
        kind: SectionKind::BugFixes,
        start: "Bug Fixes:",
        stops: &["Known Issues:", "End of Support:", "Version History:"],
        until_end: true,
    },
    SectionRule {
        kind: SectionKind::KnownIssues,
        start: "Known Issues:",
        stops: &["End of Support:", "Version History:"],
        until_end: true,
    },
    SectionRule {
        kind: SectionKind::EndOfSupport,
        start: "End of Support:",
        stops: &["Version History:"],
        until_end: true,
    },
    SectionRule {
        kind: SectionKind::VersionHistory,
        start: "Version History:",
        stops: &[],
        until_end: true,
    },
];

impl SectionRule {
    /// Builds `(?is)<start>\s*(.*?)(?:<stop>|...|\z)`.
    ///
    /// Stops that require text after them (no end-of-text fallback) also
    /// swallow whitespace before the stop so it never reaches the capture.
    fn pattern(&self) -> String {
        let mut alternatives: Vec<String> = self.stops.iter().map(|s| regex::escape(s)).collect();
        if self.until_end {
            alternatives.push(r"\z".to_string());
        }
        let lead = if self.until_end { "" } else { r"\s*" };
        format!(
            r"(?is){}\s*(.*?){}(?:{})",
            regex::escape(self.start),
            lead,
            alternatives.join("|")
        )
    }
}

/// Compiled form of [`SECTION_RULES`].
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Vec<(SectionKind, Regex)>,
}

impl Segmenter {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_rules(&SECTION_RULES)
    }

    pub fn with_rules(rules: &[SectionRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| Ok((rule.kind, Regex::new(&rule.pattern())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Splits `text` into sections.
    ///
    /// A rule adds an entry only when it matches and the trimmed capture is
    /// non-empty. Fails with [`QaError::NoSectionsFound`] when nothing is produced.
    pub fn segment(&self, text: &str) -> Result<SectionSet, QaError> {
        let mut set = SectionSet::new();
        for (kind, re) in &self.rules {
            if let Some(content) = re.captures(text).and_then(|c| c.get(1)) {
                set.insert(*kind, content.as_str());
            }
        }
        if set.is_empty() {
            return Err(QaError::NoSectionsFound);
        }
        debug!(sections = ?set.kinds(), "segmented document");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Result<SectionSet, QaError> {
        Segmenter::new().unwrap().segment(text)
    }

    fn content(set: &SectionSet, kind: SectionKind) -> &str {
        &set.get(kind).unwrap().content
    }

    #[test]
    fn single_line_example() {
        let set = segment(
            "Product: Acme Version 2.1 New Features: Dark mode Bug Fixes: Crash on launch Known Issues: Minor lag",
        )
        .unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(content(&set, SectionKind::ProductInfo), "Acme");
        assert_eq!(content(&set, SectionKind::VersionInfo), "2.1");
        assert_eq!(content(&set, SectionKind::NewFeatures), "Dark mode");
        assert_eq!(content(&set, SectionKind::BugFixes), "Crash on launch");
        assert_eq!(content(&set, SectionKind::KnownIssues), "Minor lag");
        assert!(!set.contains(SectionKind::EndOfSupport));
        assert!(!set.contains(SectionKind::VersionHistory));
    }

    #[test]
    fn all_seven_sections_across_lines() {
        let text = "Product: Acme Editor\n\
                    Version 3.0 (released 2024-05-01)\n\
                    New Features:\n- Dark mode\n- Tabs\n\
                    Bug Fixes:\n- Crash on launch\n\
                    Known Issues:\n- Minor lag\n\
                    End of Support:\nWindows 7\n\
                    Version History:\n2.0, 1.0\n";
        let set = segment(text).unwrap();
        assert_eq!(set.len(), 7);
        assert_eq!(set.kinds(), SectionKind::ALL.to_vec());
        assert_eq!(content(&set, SectionKind::ProductInfo), "Acme Editor");
        assert_eq!(
            content(&set, SectionKind::VersionInfo),
            "3.0 (released 2024-05-01)"
        );
        assert_eq!(content(&set, SectionKind::NewFeatures), "- Dark mode\n- Tabs");
        assert_eq!(content(&set, SectionKind::EndOfSupport), "Windows 7");
        assert_eq!(content(&set, SectionKind::VersionHistory), "2.0, 1.0");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let set = segment("BUG FIXES: fixed the thing known issues: none really").unwrap();
        assert_eq!(content(&set, SectionKind::BugFixes), "fixed the thing");
        assert_eq!(content(&set, SectionKind::KnownIssues), "none really");
    }

    #[test]
    fn nearest_stop_anchor_wins() {
        let set = segment("New Features: A Version History: old Bug Fixes: B").unwrap();
        assert_eq!(content(&set, SectionKind::NewFeatures), "A");
        assert_eq!(content(&set, SectionKind::VersionHistory), "old Bug Fixes: B");
    }

    #[test]
    fn product_requires_version_anchor() {
        let err = segment("Product: Acme and nothing else").unwrap_err();
        assert_eq!(err, QaError::NoSectionsFound);
    }

    #[test]
    fn empty_capture_adds_nothing() {
        let set = segment("Bug Fixes:   Known Issues: slow start").unwrap();
        assert!(!set.contains(SectionKind::BugFixes));
        assert_eq!(content(&set, SectionKind::KnownIssues), "slow start");
    }

    #[test]
    fn no_anchors_is_no_sections_found() {
        let err = segment("Shopping list: eggs, milk, bread").unwrap_err();
        assert_eq!(err, QaError::NoSectionsFound);
    }

    #[test]
    fn anchors_are_literal_text() {
        let rules = [SectionRule {
            kind: SectionKind::BugFixes,
            start: "Fixes (1.x):",
            stops: &[],
            until_end: true,
        }];
        let set = Segmenter::with_rules(&rules)
            .unwrap()
            .segment("Fixes (1.x): patched")
            .unwrap();
        assert_eq!(content(&set, SectionKind::BugFixes), "patched");
    }
}
