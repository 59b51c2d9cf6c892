//! Question routing: keyword rules first, semantic fallback second.
//!
//! A question is spell-corrected and lower-cased once; that string is the
//! only form used afterwards. [`KEYWORD_RULES`] are tested in priority
//! order and the first rule with a trigger phrase contained in the question
//! wins. Only when no rule fires is the question embedded and compared
//! against the section index.

use tracing::debug;

use crate::embedding::{embed_one, Embedder};
use crate::error::QaError;
use crate::index::EmbeddingIndex;
use crate::models::{SectionKind, SectionSet};
use crate::spelling::SpellCorrector;

/// Trigger phrases that send a question straight to one section.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub section: SectionKind,
    pub triggers: &'static [&'static str],
}

impl KeywordRule {
    /// True when any trigger is a substring of the normalized question.
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }
}

/// Keyword rules in priority order (not taxonomy order).
pub static KEYWORD_RULES: [KeywordRule; 7] = [
    KeywordRule {
        section: SectionKind::BugFixes,
        triggers: &[
            "bug",
            "bugs",
            "fix",
            "fixed",
            "resolved",
            "resolve",
            "solved",
            "patch",
            "hotfix",
            "issue fixed",
            "problems fixed",
            "bugs resolved",
            "crashes fixed",
            "errors corrected",
        ],
    },
    KeywordRule {
        section: SectionKind::NewFeatures,
        triggers: &[
            "feature",
            "features",
            "improvement",
            "improvements",
            "enhancement",
            "enhancements",
            "newly added",
            "introduced",
            "new functionality",
            "what's new",
        ],
    },
    KeywordRule {
        section: SectionKind::KnownIssues,
        triggers: &[
            "known issues",
            "existing problems",
            "open issues",
            "still pending bugs",
            "unsolved issues",
            "limitations",
            "unresolved problems",
            "current issues",
        ],
    },
    KeywordRule {
        section: SectionKind::EndOfSupport,
        triggers: &[
            "end of support",
            "support end",
            "maintenance end",
            "lifecycle end",
            "updates end",
            "retirement date",
            "support termination",
            "deprecation notice",
        ],
    },
    KeywordRule {
        section: SectionKind::VersionHistory,
        triggers: &[
            "version history",
            "past versions",
            "previous releases",
            "previous updates",
            "evolution",
            "changelog",
            "release history",
            "prior versions",
        ],
    },
    KeywordRule {
        section: SectionKind::VersionInfo,
        triggers: &[
            "update",
            "latest update",
            "release date",
            "new release",
            "version date",
            "current version",
            "release information",
        ],
    },
    KeywordRule {
        section: SectionKind::ProductInfo,
        triggers: &[
            "product",
            "software",
            "product name",
            "document about",
            "release notes for",
            "which product",
            "application name",
            "software title",
        ],
    },
];

/// Every trigger phrase and section title, for seeding the spell corrector
/// so routing vocabulary is never "corrected" away.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    KEYWORD_RULES
        .iter()
        .flat_map(|rule| rule.triggers.iter().copied())
        .chain(SectionKind::ALL.into_iter().map(SectionKind::title))
}

/// How a question was resolved to a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Keyword(SectionKind),
    Semantic { section: SectionKind, score: f32 },
}

impl Route {
    pub fn section(&self) -> SectionKind {
        match self {
            Route::Keyword(section) => *section,
            Route::Semantic { section, .. } => *section,
        }
    }
}

/// First keyword rule firing on an already-normalized question.
pub fn match_keywords(normalized: &str) -> Option<SectionKind> {
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.matches(normalized))
        .map(|rule| rule.section)
}

/// Inclusive acceptance test for the semantic fallback.
pub fn meets_threshold(score: f32, threshold: f32) -> bool {
    score >= threshold
}

pub struct QueryRouter {
    speller: Option<SpellCorrector>,
    threshold: f32,
}

impl QueryRouter {
    /// `speller = None` disables correction (questions are only lower-cased).
    pub fn new(speller: Option<SpellCorrector>, threshold: f32) -> Self {
        Self { speller, threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Spell-corrects then lower-cases the question.
    pub fn normalize(&self, question: &str) -> String {
        match &self.speller {
            Some(speller) => speller.correct(question).to_lowercase(),
            None => question.to_lowercase(),
        }
    }

    /// Resolves `question` to a section present in `sections`.
    ///
    /// Fails with [`QaError::NoDocumentLoaded`] before doing any work when
    /// `sections` is empty, and with [`QaError::NoRelevantMatch`] when no
    /// rule fires and the best similarity is below the threshold, or when
    /// the chosen section is absent from this document.
    pub fn route(
        &self,
        question: &str,
        sections: &SectionSet,
        index: &EmbeddingIndex,
        embedder: &dyn Embedder,
    ) -> Result<Route, QaError> {
        if sections.is_empty() {
            return Err(QaError::NoDocumentLoaded);
        }

        let normalized = self.normalize(question);

        let route = match match_keywords(&normalized) {
            Some(section) => Route::Keyword(section),
            None => {
                let query = embed_one(embedder, &normalized)
                    .map_err(|e| QaError::Embedding(e.to_string()))?;
                let (section, score) = index.lookup(&query).ok_or(QaError::NoRelevantMatch)?;
                if !meets_threshold(score, self.threshold) {
                    debug!(%section, score, threshold = self.threshold, "semantic match below threshold");
                    return Err(QaError::NoRelevantMatch);
                }
                Route::Semantic { section, score }
            }
        };

        debug!(question = %normalized, ?route, "routed question");

        if !sections.contains(route.section()) {
            return Err(QaError::NoRelevantMatch);
        }
        Ok(route)
    }
}
