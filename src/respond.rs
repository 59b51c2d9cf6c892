//! Turns a resolved section into the answer shown to the user.

use regex::Regex;

use crate::models::{Section, SectionKind};

/// Lead-in sentence for each section's answer.
pub fn lead_in(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::ProductInfo => "This release is about the product:",
        SectionKind::VersionInfo => "The version and release date details are:",
        SectionKind::NewFeatures => "The new features of the product in this release are:",
        SectionKind::BugFixes => "The bug fixes included in this release are:",
        SectionKind::KnownIssues => "The known issues reported in this release are:",
        SectionKind::EndOfSupport => "Regarding end of support, here is the information:",
        SectionKind::VersionHistory => "The version history details are:",
    }
}

/// Cleans section content and wraps it in its lead-in sentence.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    line_bullet: Regex,
    inline_bullet: Regex,
}

impl ResponseFormatter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            line_bullet: Regex::new(r"(?m)^[ \t]*-[ \t]*")?,
            inline_bullet: Regex::new(r"(?:^|\s+)-(?:\s+-)*(?:\s+|$)")?,
        })
    }

    /// Strips `- ` bullets at line starts, collapses each run of
    /// stand-alone hyphens elsewhere to a single space, and trims.
    ///
    /// Hyphens inside words and dates (`end-of-life`, `2024-05-01`) are kept.
    pub fn clean(&self, text: &str) -> String {
        let without_leading = self.line_bullet.replace_all(text, "");
        let collapsed = self.inline_bullet.replace_all(&without_leading, " ");
        collapsed.trim().to_string()
    }

    /// `"<lead-in>\n<cleaned content>"`.
    pub fn format(&self, section: &Section) -> String {
        format!("{}\n{}", lead_in(section.kind), self.clean(&section.content))
    }
}
