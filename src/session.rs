//! One user's question-answering session over a single release-notes document.
//!
//! A [`Session`] owns the active document (its [`SectionSet`] paired with the
//! matching [`EmbeddingIndex`]) and the conversation log. It exposes the
//! three boundary operations used by any front end:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`Session::ingest`] | Extract, segment, embed, then swap in the new document |
//! | [`Session::ask`] | Answer a question and append it to the log |
//! | [`Session::reset`] | Drop the document and clear the log |
//!
//! None of them return an error past this boundary except `ingest`, whose
//! [`QaError`] renders as the status text shown to the user.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::embedding::{create_embedder, Embedder};
use crate::error::QaError;
use crate::extract::extract_text;
use crate::index::EmbeddingIndex;
use crate::models::{Conversation, SectionSet};
use crate::respond::ResponseFormatter;
use crate::router::{self, QueryRouter, Route};
use crate::segment::Segmenter;
use crate::spelling::SpellCorrector;

pub const UPLOAD_OK: &str = "File uploaded successfully! You can now ask your questions.";
pub const NO_FILE: &str = "No file uploaded. Please upload a valid PDF, DOCX, or TXT file.";

/// Sections and their embeddings, always built and replaced together.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub name: String,
    pub sections: SectionSet,
    pub index: EmbeddingIndex,
}

pub struct Session {
    embedder: Box<dyn Embedder>,
    router: QueryRouter,
    segmenter: Segmenter,
    formatter: ResponseFormatter,
    max_file_bytes: usize,
    document: Option<LoadedDocument>,
    conversation: Conversation,
}

impl Session {
    /// Builds a session with the embedder named in `config.embedding`.
    pub fn new(config: &Config) -> Result<Self> {
        let embedder = create_embedder(&config.embedding)?;
        Self::with_embedder(config, embedder)
    }

    /// Builds a session around an existing embedder.
    pub fn with_embedder(config: &Config, embedder: Box<dyn Embedder>) -> Result<Self> {
        let speller = if config.spelling.enabled {
            let base = match &config.spelling.dictionary {
                Some(path) => SpellCorrector::load(path)?,
                None => SpellCorrector::bundled(),
            };
            Some(base.with_vocabulary(router::vocabulary()))
        } else {
            None
        };

        info!(
            embedder = embedder.model_name(),
            dims = embedder.dims(),
            spelling = speller.is_some(),
            threshold = config.routing.similarity_threshold,
            "session ready"
        );

        Ok(Self {
            embedder,
            router: QueryRouter::new(speller, config.routing.similarity_threshold),
            segmenter: Segmenter::new().context("Failed to compile section patterns")?,
            formatter: ResponseFormatter::new().context("Failed to compile bullet patterns")?,
            max_file_bytes: config.extract.max_file_bytes,
            document: None,
            conversation: Conversation::default(),
        })
    }

    /// Loads a new document, replacing the current one on success.
    ///
    /// On failure the previously loaded document stays active. The
    /// conversation log is left alone either way.
    pub fn ingest(&mut self, bytes: &[u8], filename: &str) -> Result<String, QaError> {
        if bytes.len() > self.max_file_bytes {
            warn!(
                file = filename,
                size = bytes.len(),
                limit = self.max_file_bytes,
                "upload exceeds size limit"
            );
            return Err(QaError::EmptyDocument);
        }

        let text = extract_text(bytes, filename)?;
        let sections = self.segmenter.segment(&text)?;
        let index = EmbeddingIndex::build(&sections, self.embedder.as_ref())
            .map_err(|e| QaError::Embedding(e.to_string()))?;

        info!(file = filename, sections = sections.len(), "document loaded");

        self.document = Some(LoadedDocument {
            name: filename.to_string(),
            sections,
            index,
        });
        Ok(UPLOAD_OK.to_string())
    }

    /// Answers `question`, logs the exchange, and returns the full log.
    ///
    /// Failures are logged as their message text. An empty question is
    /// ignored; whitespace-only questions are answered like any other.
    pub fn ask(&mut self, question: &str) -> String {
        if question.is_empty() {
            return self.conversation.render();
        }
        let answer = self.answer(question).unwrap_or_else(|e| e.to_string());
        self.conversation.push(question, answer);
        self.conversation.render()
    }

    /// Routes and formats an answer without touching the log.
    pub fn answer(&self, question: &str) -> Result<String, QaError> {
        let route = self.route(question)?;
        let document = self.document.as_ref().ok_or(QaError::NoDocumentLoaded)?;
        let section = document
            .sections
            .get(route.section())
            .ok_or(QaError::NoRelevantMatch)?;
        Ok(self.formatter.format(section))
    }

    /// The routing decision for `question` against the active document.
    pub fn route(&self, question: &str) -> Result<Route, QaError> {
        let document = self.document.as_ref().ok_or(QaError::NoDocumentLoaded)?;
        self.router.route(
            question,
            &document.sections,
            &document.index,
            self.embedder.as_ref(),
        )
    }

    /// Drops the active document and clears the conversation log.
    pub fn reset(&mut self) -> String {
        self.document = None;
        self.conversation.clear();
        info!("session reset");
        NO_FILE.to_string()
    }

    /// Sections of the active document; empty when none is loaded.
    pub fn sections(&self) -> SectionSet {
        self.document
            .as_ref()
            .map(|d| d.sections.clone())
            .unwrap_or_default()
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.name.as_str())
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}
