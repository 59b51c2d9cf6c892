//! # Release QA
//!
//! Question answering over a single release-notes document.
//!
//! A document (PDF, DOCX, or plain text) is split into a fixed taxonomy of
//! sections by anchor phrases such as `Bug Fixes:` or `End of Support:`.
//! Questions are spell-corrected, then routed to a section either by
//! keyword rules or, when none fires, by embedding similarity. The answer is
//! the section's content wrapped in a short lead-in sentence.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐
//! │ Extract  │──▶│ Segment  │──▶│   Index   │
//! │ PDF/DOCX │   │ 7 kinds  │   │ embedding │
//! └──────────┘   └──────────┘   └─────┬─────┘
//!                                     │
//!      question ──▶ ┌──────────┐◀─────┘
//!                   │  Router  │──▶ Respond ──▶ answer
//!                   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | User-facing error taxonomy |
//! | [`models`] | Sections, section sets, conversation log |
//! | [`extract`] | Text extraction from PDF, DOCX, and TXT |
//! | [`segment`] | Anchor-phrase section segmentation |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Nearest-section lookup |
//! | [`spelling`] | Question spell correction |
//! | [`router`] | Keyword rules and semantic fallback |
//! | [`respond`] | Answer formatting |
//! | [`session`] | Upload / ask / reset boundary |

pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod models;
pub mod respond;
pub mod router;
pub mod segment;
pub mod session;
pub mod spelling;
