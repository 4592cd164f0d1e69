//! Tests for the deduplicating warning channel and option errors.

use sedge_common::error::OptionsError;
use sedge_common::warning::{clear_warnings, warn_once};

// The warning set is process-global, so everything touching it lives in one
// test to keep the assertions free of cross-test interference.
#[test]
fn test_warn_once_deduplicates_until_cleared() {
    clear_warnings();
    assert!(warn_once("Test", "duplicate message"));
    assert!(!warn_once("Test", "duplicate message"));
    // Same message from another component is distinct.
    assert!(warn_once("Other", "duplicate message"));

    clear_warnings();
    assert!(warn_once("Test", "duplicate message"));
}

#[test]
fn test_options_error_messages() {
    assert_eq!(
        OptionsError::MissingFragmentName.to_string(),
        "fragment namespace given without a fragment name"
    );
    assert_eq!(
        OptionsError::UnknownNamespace("xul".to_string()).to_string(),
        "unknown fragment namespace: xul"
    );
    assert_eq!(
        OptionsError::UnsupportedInitialState("TagOpen".to_string()).to_string(),
        "unsupported initial tokenizer state: TagOpen"
    );
}
