//! # abbrkit
//!
//! Abbreviation support for markdown token pipelines.
//!
//! A document defines abbreviations on lines of their own:
//!
//! ```text
//! *[HTML]: Hyper Text Markup Language
//! ```
//!
//! Later plain-text occurrences of `HTML` are wrapped in marker tokens that
//! render as `<abbr title="Hyper Text Markup Language">HTML</abbr>`.
//!
//! ## Pipeline
//!
//! The crate plugs into a host that owns block and inline tokenization:
//!
//! 1. During block parsing the host offers candidate lines to
//!    [`parse_definition`], which records definitions in a [`DocumentEnv`].
//! 2. After inline tokenization the host calls [`replace_abbreviations`]
//!    once over the whole token stream.
//! 3. The renderer emits the markers with [`render_abbr_open`] and
//!    [`render_abbr_close`].
//!
//! ## Quick Start
//!
//! ```
//! use abbrkit::{
//!     AbbrOptions, BlockState, BlockToken, DocumentEnv, Token, collect_definitions,
//!     render_inline, replace_abbreviations,
//! };
//!
//! let src = "*[HTML]: Hyper Text Markup Language\nI like HTML.";
//! let mut env = DocumentEnv::new();
//! let mut state = BlockState::new(src);
//! let remaining = collect_definitions(&mut state, &mut env);
//! assert_eq!(remaining, vec![1]);
//!
//! // The host tokenizes the remaining line.
//! let mut blocks = vec![BlockToken::inline(vec![Token::text("I like HTML.", 0)])];
//! replace_abbreviations(&mut env, &mut blocks).unwrap();
//!
//! assert_eq!(
//!     render_inline(&blocks[0].children, &AbbrOptions::default()),
//!     r#"I like <abbr title="Hyper Text Markup Language">HTML</abbr>."#
//! );
//! ```

pub mod env;
pub mod error;
pub mod matcher;
pub mod options;
pub mod render;
pub mod rewriter;
pub mod scanner;
pub mod source;
pub mod token;

pub use env::{AbbreviationDictionary, DocumentEnv};
pub use error::{Error, Result};
pub use matcher::CompiledMatcher;
pub use options::{AbbrOptions, MatcherPolicy};
pub use render::{render_abbr_close, render_abbr_open, render_inline};
pub use rewriter::replace_abbreviations;
pub use scanner::{DefinitionDirective, collect_definitions, parse_definition};
pub use source::{BlockState, LineIndex, LineMarks};
pub use token::{BlockKind, BlockToken, Token, TokenKind};
