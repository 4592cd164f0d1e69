use sedge_common::error::OptionsError;

use super::core::TokenizerState;

/// Tokenizer configuration.
///
/// The defaults tokenize a full document conformantly. The `ignore_*` and
/// `skip_preprocess` switches trade conformance for speed on input the
/// caller already knows to be clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Input is already preprocessed: CR and CRLF are not normalized to LF,
    /// and control characters and noncharacters are not reported.
    pub skip_preprocess: bool,
    /// Treat '&' as an ordinary character everywhere.
    pub ignore_char_refs: bool,
    /// Pass U+0000 through untouched and without errors, in every state.
    pub ignore_nulls: bool,
    /// Do not report parse errors to the sink.
    pub ignore_errors: bool,
    /// Start in this state instead of the data state.
    pub initial_state: Option<TokenizerState>,
    /// The tag name that counts as "the last start tag emitted", for starting
    /// inside an RCDATA, RAWTEXT or script data element.
    pub appropriate_end_tag: Option<String>,
}

impl TokenizerOptions {
    /// Start in `state`, with `end_tag` closing it.
    #[must_use]
    pub fn with_initial_state(mut self, state: TokenizerState, end_tag: Option<&str>) -> Self {
        self.initial_state = Some(state);
        self.appropriate_end_tag = end_tag.map(str::to_string);
        self
    }

    /// Suppress parse error reporting.
    #[must_use]
    pub const fn with_ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Only the text states can be entered from outside.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnsupportedInitialState`] for any other state.
    pub fn validate(&self) -> Result<(), OptionsError> {
        match self.initial_state {
            None
            | Some(
                TokenizerState::Data
                | TokenizerState::RCDATA
                | TokenizerState::RAWTEXT
                | TokenizerState::ScriptData
                | TokenizerState::PLAINTEXT,
            ) => Ok(()),
            Some(other) => Err(OptionsError::UnsupportedInitialState(other.to_string())),
        }
    }
}
