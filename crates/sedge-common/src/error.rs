use thiserror::Error;

/// An invalid combination of parser options.
///
/// Parse errors in the markup itself are never reported through this type;
/// they are recovered from and handed to the tree handler instead. These
/// variants describe mistakes by the caller, detected before the first
/// character is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The tokenizer can only be started in one of the text states.
    #[error("unsupported initial tokenizer state: {0}")]
    UnsupportedInitialState(String),

    /// A fragment namespace was supplied without the context element's name.
    #[error("fragment namespace given without a fragment name")]
    MissingFragmentName,

    /// The fragment namespace is not HTML, SVG or MathML.
    #[error("unknown fragment namespace: {0}")]
    UnknownNamespace(String),
}
