//! Integration tests for the HTML tokenizer.

use sedge_html::tokenizer::TokenizerError;
use sedge_html::{HTMLTokenizer, SourceSpan, Token, TokenCollector, TokenizerOptions, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input, TokenCollector::new());
    tokenizer.run();
    tokenizer.into_sink().into_tokens()
}

/// Helper to tokenize and keep the spans and errors
fn collect(input: &str) -> TokenCollector {
    let mut tokenizer = HTMLTokenizer::new(input, TokenCollector::new());
    tokenizer.run();
    tokenizer.into_sink()
}

fn collect_with(input: &str, options: TokenizerOptions) -> TokenCollector {
    let mut tokenizer = HTMLTokenizer::with_options(input, TokenCollector::new(), options)
        .expect("options are valid");
    tokenizer.run();
    tokenizer.into_sink()
}

/// All character data, concatenated
fn text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 2); // one text run + EOF
    assert!(matches!(&tokens[0], Token::Character { data } if data == "Hello"));
    assert!(matches!(tokens[1], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_identifiers() {
    let tokens = tokenize(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#);
    match &tokens[0] {
        Token::Doctype {
            public_identifier,
            system_identifier,
            ..
        } => {
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV CLASS=x></DIV>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.get("class"), Some("x"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(tokens[1].is_end_tag("div"));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_quoting_styles() {
    for input in [r#"<div class="foo">"#, "<div class='foo'>", "<div class=foo>"] {
        let tokens = tokenize(input);
        match &tokens[0] {
            Token::StartTag {
                name, attributes, ..
            } => {
                assert_eq!(name, "div");
                assert_eq!(attributes.len(), 1, "{input}");
                assert_eq!(attributes.get("class"), Some("foo"), "{input}");
            }
            _ => panic!("Expected StartTag token for {input}"),
        }
    }
}

#[test]
fn test_multiple_attributes_keep_source_order() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            let pairs: Vec<(&str, &str)> = attributes
                .iter()
                .map(|a| (a.name.as_str(), a.value.as_str()))
                .collect();
            assert_eq!(pairs, [("type", "text"), ("id", "name"), ("disabled", "")]);
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let collector = collect(r#"<p a="1" a="2">"#);
    match &collector.tokens()[0].0 {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes.get("a"), Some("1"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(
        collector
            .errors()
            .iter()
            .any(|(e, _)| *e == TokenizerError::DuplicateAttribute)
    );
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 4); // <p>, "Hi", </p>, EOF
    assert!(tokens[0].is_start_tag("p"));
    assert!(matches!(&tokens[1], Token::Character { data } if data == "Hi"));
    assert!(tokens[2].is_end_tag("p"));
    assert!(matches!(tokens[3], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>";
    let tokens = tokenize(html);

    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();
    assert_eq!(start_tags, 4); // html, head, title, body
    assert_eq!(end_tags, 4); // /title, /head, /body, /html
}

// ========== Source spans ==========

#[test]
fn test_spans_cover_the_markup_of_each_token() {
    let input = "<p class=x>Hi &amp; bye</p><!--c-->";
    let collector = collect(input);
    let slices: Vec<&str> = collector
        .tokens()
        .iter()
        .map(|(_, span)| &input[span.start..span.end()])
        .collect();
    assert_eq!(slices, ["<p class=x>", "Hi &amp; bye", "</p>", "<!--c-->", ""]);
}

#[test]
fn test_eof_span_is_empty_at_end_of_input() {
    let input = "abc";
    let collector = collect(input);
    let (token, span) = &collector.tokens()[1];
    assert!(matches!(token, Token::EndOfFile));
    assert_eq!(*span, SourceSpan::empty_at(input.len()));
}

#[test]
fn test_spans_refer_to_input_before_newline_normalization() {
    let input = "a\r\nb<br>";
    let collector = collect(input);
    let (token, span) = &collector.tokens()[0];
    assert!(matches!(token, Token::Character { data } if data == "a\nb"));
    assert_eq!(&input[span.start..span.end()], "a\r\nb");
    assert_eq!(collector.tokens()[1].1, SourceSpan::between(4, 8));
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    let tokens = tokenize("<style>body { color: red; }</style>");
    assert!(tokens[0].is_start_tag("style"));
    assert_eq!(text(&tokens), "body { color: red; }");
    assert!(tokens[tokens.len() - 2].is_end_tag("style"));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize("<title>My &amp; Page</title>");
    assert!(tokens[0].is_start_tag("title"));
    assert_eq!(text(&tokens), "My & Page");
    assert!(tokens[tokens.len() - 2].is_end_tag("title"));
}

#[test]
fn test_style_with_fake_tags() {
    let tokens = tokenize("<style><div>not a tag</div></style>");
    assert_eq!(text(&tokens), "<div>not a tag</div>");
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_style_with_wrong_end_tag() {
    let tokens = tokenize("<style>a</notastyle>b</style>");
    assert_eq!(text(&tokens), "a</notastyle>b");
}

#[test]
fn test_textarea_element_rcdata() {
    let tokens = tokenize("<textarea><b>bold?</b></textarea>");
    assert_eq!(text(&tokens), "<b>bold?</b>");
    assert!(tokens[tokens.len() - 2].is_end_tag("textarea"));
}

#[test]
fn test_script_data_keeps_markup() {
    let tokens = tokenize("<script>if (a < b && c) { x = '</p>'; }</script>");
    assert_eq!(text(&tokens), "if (a < b && c) { x = '</p>'; }");
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext><b>x</plaintext>");
    assert_eq!(text(&tokens), "<b>x</plaintext>");
}

#[test]
fn test_initial_rcdata_state_with_appropriate_end_tag() {
    let options =
        TokenizerOptions::default().with_initial_state(TokenizerState::RCDATA, Some("title"));
    let tokens = collect_with("a<b>&lt;</title>c", options).into_tokens();
    assert!(matches!(&tokens[0], Token::Character { data } if data == "a<b><"));
    assert!(tokens[1].is_end_tag("title"));
}

#[test]
fn test_initial_state_must_be_a_text_state() {
    let options = TokenizerOptions {
        initial_state: Some(TokenizerState::TagOpen),
        ..TokenizerOptions::default()
    };
    assert!(HTMLTokenizer::with_options("x", TokenCollector::new(), options).is_err());
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    let tokens = tokenize("a & b");
    assert_eq!(tokens.len(), 2);
    assert_eq!(text(&tokens), "a & b");
}

#[test]
fn test_named_character_references() {
    assert_eq!(text(&tokenize("a &amp; b")), "a & b");
    assert_eq!(text(&tokenize("&lt;div&gt;")), "<div>");
    assert_eq!(text(&tokenize("&amp is ok")), "& is ok");
    assert_eq!(text(&tokenize("&notreal;")), "&notreal;");
    assert_eq!(text(&tokenize("&notit;")), "\u{AC}it;");
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text(&tokenize("&#65;&#x42;")), "AB");
    // Windows-1252 remapping
    assert_eq!(text(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text(&tokenize("&#0;")), "\u{FFFD}");
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2&copy=3">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            // Legacy references followed by '=' are left alone in attributes.
            assert_eq!(attributes.get("href"), Some("?a=1&b=2&copy=3"));
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_ignore_char_refs() {
    let options = TokenizerOptions {
        ignore_char_refs: true,
        ..TokenizerOptions::default()
    };
    let tokens = collect_with("&amp;", options).into_tokens();
    assert_eq!(text(&tokens), "&amp;");
}

// ========== Errors and preprocessing ==========

#[test]
fn test_null_is_replaced_in_attribute_values() {
    let tokens = tokenize("<p a=\"x\0y\">");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.get("a"), Some("x\u{FFFD}y"));
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_errors_are_positioned_and_not_fatal() {
    let collector = collect("<p>ok</p><");
    assert!(
        collector
            .errors()
            .iter()
            .any(|(e, pos)| *e == TokenizerError::EofBeforeTagName && *pos >= 9)
    );
    let tokens = collector.into_tokens();
    assert_eq!(text(&tokens), "ok<");
}

#[test]
fn test_ignore_errors_suppresses_reports() {
    let options = TokenizerOptions::default().with_ignore_errors();
    let collector = collect_with("<p a=1 a=2></p x>", options);
    assert!(collector.errors().is_empty());
    assert_eq!(collector.tokens().len(), 3);
}

#[test]
fn test_ignore_nulls_in_tags_and_attributes() {
    let options = TokenizerOptions {
        ignore_nulls: true,
        ..TokenizerOptions::default()
    };
    let collector = collect_with("<p\0 a\0b=\"c\0\" d='\0' e=f\0>x\0", options);
    assert!(collector.errors().is_empty(), "{:?}", collector.errors());
    let tokens = collector.into_tokens();
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "p\0");
            assert_eq!(attributes.get("a\0b"), Some("c\0"));
            assert_eq!(attributes.get("d"), Some("\0"));
            assert_eq!(attributes.get("e"), Some("f\0"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(text(&tokens), "x\0");
}

#[test]
fn test_ignore_nulls_in_comments_and_doctypes() {
    let options = TokenizerOptions {
        ignore_nulls: true,
        ..TokenizerOptions::default()
    };
    let collector = collect_with("<!--\0--><!DOCTYPE h\0 PUBLIC \"a\0\"><!DOCTYPE \0>", options);
    assert!(collector.errors().is_empty(), "{:?}", collector.errors());
    let tokens = collector.into_tokens();
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "\0".to_string()
        }
    );
    match &tokens[1] {
        Token::Doctype {
            name,
            public_identifier,
            force_quirks,
            ..
        } => {
            assert_eq!(name.as_deref(), Some("h\0"));
            assert_eq!(public_identifier.as_deref(), Some("a\0"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
    assert!(matches!(&tokens[2], Token::Doctype { name, .. } if name.as_deref() == Some("\0")));
}

#[test]
fn test_nulls_are_replaced_and_reported_by_default() {
    let collector = collect("<p\0 a\0=\"\0\"><!--\0-->");
    assert_eq!(collector.errors().len(), 4);
    assert!(
        collector
            .errors()
            .iter()
            .all(|(e, _)| *e == TokenizerError::UnexpectedNullCharacter)
    );
    let tokens = collector.into_tokens();
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "p\u{FFFD}");
            assert_eq!(attributes.get("a\u{FFFD}"), Some("\u{FFFD}"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(
        tokens[1],
        Token::Comment {
            data: "\u{FFFD}".to_string()
        }
    );
}

#[test]
fn test_skip_preprocess_keeps_crlf_and_control_characters() {
    let options = TokenizerOptions {
        skip_preprocess: true,
        ..TokenizerOptions::default()
    };
    let collector = collect_with("a\r\nb\rc\u{1}\u{FDD0}", options);
    assert!(collector.errors().is_empty(), "{:?}", collector.errors());
    assert_eq!(text(&collector.into_tokens()), "a\r\nb\rc\u{1}\u{FDD0}");
}

#[test]
fn test_preprocessing_normalizes_newlines_and_reports_controls() {
    let collector = collect("a\r\nb\rc\u{1}\u{FDD0}");
    let errors: Vec<TokenizerError> = collector.errors().iter().map(|(e, _)| *e).collect();
    assert_eq!(
        errors,
        [
            TokenizerError::ControlCharacterInInputStream,
            TokenizerError::NoncharacterInInputStream,
        ]
    );
    assert_eq!(text(&collector.into_tokens()), "a\nb\nc\u{1}\u{FDD0}");
}
