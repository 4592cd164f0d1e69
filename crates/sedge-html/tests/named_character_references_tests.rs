//! Integration tests for named character reference lookup.

use sedge_html::tokenizer::named_character_references::EntityTable;

fn table() -> &'static EntityTable {
    EntityTable::html5()
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(table().lookup("amp;"), Some("&"));
    assert_eq!(table().lookup("lt;"), Some("<"));
    assert_eq!(table().lookup("gt;"), Some(">"));
    assert_eq!(table().lookup("quot;"), Some("\""));
    assert_eq!(table().lookup("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(table().lookup("amp"), Some("&"));
    assert_eq!(table().lookup("lt"), Some("<"));
    assert_eq!(table().lookup("gt"), Some(">"));
    // Not every name has a legacy form
    assert_eq!(table().lookup("hellip"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(table().lookup("notarealentity;"), None);
    assert_eq!(table().lookup(""), None);
}

#[test]
fn test_table_is_complete() {
    assert_eq!(table().len(), 2231);
    assert_eq!(
        table().lookup("CounterClockwiseContourIntegral;"),
        Some("\u{2233}")
    );
}

#[test]
fn test_prefix_matching() {
    assert!(table().has_prefix("a")); // amp, apos, alpha, etc.
    assert!(table().has_prefix("am")); // amp
    assert!(table().has_prefix("amp")); // amp, amp;
    assert!(table().has_prefix("amp;")); // amp;
    assert!(!table().has_prefix("ampx")); // nothing
    assert!(!table().has_prefix("xyz")); // nothing
}

#[test]
fn test_longest_match() {
    assert_eq!(table().longest_match("amp;rest"), Some((4, "&")));
    assert_eq!(table().longest_match("notin;"), Some((6, "\u{2209}")));
    assert_eq!(table().longest_match("notit;"), Some((3, "\u{AC}")));
    assert_eq!(table().longest_match("ampx"), Some((3, "&")));
    assert_eq!(table().longest_match("zzz;"), None);
}

#[test]
fn test_custom_table() {
    static SMALL: EntityTable = EntityTable::new(&[("a;", "A"), ("ab;", "B")]);
    assert_eq!(SMALL.longest_match("ab;"), Some((3, "B")));
    assert_eq!(SMALL.lookup("amp;"), None);
}
