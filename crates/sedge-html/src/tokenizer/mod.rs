//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference parsing per § 13.2.5.72.
mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Tokenizer parse error codes.
pub mod error;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Tokenizer configuration.
pub mod options;
/// The receiving side of the tokenizer.
pub mod sink;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{HTMLTokenizer, TokenizerState};
pub use error::TokenizerError;
pub use named_character_references::EntityTable;
pub use options::TokenizerOptions;
pub use sink::{SinkResult, TokenCollector, TokenSink};
pub use token::{Attribute, Attributes, SourceSpan, Token};
