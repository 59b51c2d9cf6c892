//! Core data models for the release-notes pipeline.
//!
//! These types represent the segmented document and the conversation that
//! flow between the segmenter, the router, and the session.

use std::fmt;

/// One entry of the fixed release-notes taxonomy.
///
/// Variant order is the taxonomy order; [`SectionKind::ALL`] lists it
/// explicitly and every ordered structure in the crate follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    ProductInfo,
    VersionInfo,
    NewFeatures,
    BugFixes,
    KnownIssues,
    EndOfSupport,
    VersionHistory,
}

impl SectionKind {
    /// All sections in taxonomy order.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::ProductInfo,
        SectionKind::VersionInfo,
        SectionKind::NewFeatures,
        SectionKind::BugFixes,
        SectionKind::KnownIssues,
        SectionKind::EndOfSupport,
        SectionKind::VersionHistory,
    ];

    /// Human-readable title, also used as the embedding prefix.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::ProductInfo => "Product Info",
            SectionKind::VersionInfo => "Version Info",
            SectionKind::NewFeatures => "New Features",
            SectionKind::BugFixes => "Bug Fixes",
            SectionKind::KnownIssues => "Known Issues",
            SectionKind::EndOfSupport => "End of Support",
            SectionKind::VersionHistory => "Version History",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A segmented section of the active document.
///
/// `content` is always non-empty and already trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub content: String,
}

impl Section {
    /// Text fed to the embedder: `"<title> <content>"`.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.kind.title(), self.content)
    }
}

/// Sections of one document keyed by [`SectionKind`], kept in taxonomy order
/// regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the section for `kind`.
    ///
    /// Empty (after trimming) content is ignored so a set never holds a blank section.
    pub fn insert(&mut self, kind: SectionKind, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        let section = Section {
            kind,
            content: content.to_string(),
        };
        match self
            .sections
            .binary_search_by_key(&kind.position(), |s| s.kind.position())
        {
            Ok(i) => self.sections[i] = section,
            Err(i) => self.sections.insert(i, section),
        }
    }

    pub fn get(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

/// A single question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub question: String,
    pub answer: String,
}

/// Chronological question/answer log. Cleared only by an explicit reset.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(ConversationEntry {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Concatenate every entry as `Q: <question>\n\nA: <answer>\n\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str("Q: ");
            out.push_str(&entry.question);
            out.push_str("\n\nA: ");
            out.push_str(&entry.answer);
            out.push_str("\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_set_keeps_taxonomy_order() {
        let mut set = SectionSet::new();
        set.insert(SectionKind::KnownIssues, "lag");
        set.insert(SectionKind::ProductInfo, "Acme");
        set.insert(SectionKind::BugFixes, "crash");
        assert_eq!(
            set.kinds(),
            vec![
                SectionKind::ProductInfo,
                SectionKind::BugFixes,
                SectionKind::KnownIssues
            ]
        );
    }

    #[test]
    fn section_set_ignores_blank_content() {
        let mut set = SectionSet::new();
        set.insert(SectionKind::BugFixes, "  \n\t ");
        assert!(set.is_empty());
    }

    #[test]
    fn section_set_replaces_existing_kind() {
        let mut set = SectionSet::new();
        set.insert(SectionKind::BugFixes, "old");
        set.insert(SectionKind::BugFixes, " new ");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(SectionKind::BugFixes).unwrap().content, "new");
    }

    #[test]
    fn embedding_text_prefixes_title() {
        let section = Section {
            kind: SectionKind::EndOfSupport,
            content: "June 2025".to_string(),
        };
        assert_eq!(section.embedding_text(), "End of Support June 2025");
    }

    #[test]
    fn conversation_renders_in_order() {
        let mut log = Conversation::default();
        log.push("first?", "one");
        log.push("second?", "two");
        assert_eq!(log.render(), "Q: first?\n\nA: one\n\nQ: second?\n\nA: two\n\n");
    }

    #[test]
    fn empty_conversation_renders_empty() {
        assert_eq!(Conversation::default().render(), "");
    }
}
