//! The modes before the `head` element exists.

use sedge_dom::QuirksMode;

use crate::tokenizer::Token;
use crate::tree_builder::quirks::quirks_mode_for_doctype;
use crate::tree_builder::{InsertionMode, TreeBuilder};
use crate::tree_handler::{Preposition, TreeHandler};

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::tree_builder) fn handle_initial_mode(&mut self, token: Token) {
        // "A character token that is one of U+0009 CHARACTER TABULATION,
        // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN
        // (CR), or U+0020 SPACE": "Ignore the token."
        let Some(token) = self.skip_leading_whitespace(token) else {
            return;
        };

        match &token {
            // "A comment token": "Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => self.insert_comment(data, Some(Preposition::Root)),

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's
                // public identifier is not missing, or the token's system
                // identifier is neither missing nor "about:legacy-compat",
                // then there is a parse error."
                if name.as_deref() != Some("html")
                    || public_identifier.is_some()
                    || system_identifier
                        .as_deref()
                        .is_some_and(|id| id != "about:legacy-compat")
                {
                    self.parse_error("unknown DOCTYPE");
                }

                let quirks = quirks_mode_for_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                );
                self.quirks_mode = quirks;

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing"
                self.handler.doctype(
                    name.as_deref().unwrap_or(""),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    quirks,
                    self.span,
                );

                // "Then, switch the insertion mode to "before html"."
                self.switch_mode(InsertionMode::BeforeHtml);
            }

            // "Anything else": "If the document is not an iframe srcdoc
            // document, then this is a parse error; if the parser cannot change
            // the mode flag is false, set the Document to quirks mode."
            _ => {
                self.parse_error("missing DOCTYPE");
                self.quirks_mode = QuirksMode::Quirks;
                self.switch_mode(InsertionMode::BeforeHtml);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::tree_builder) fn handle_before_html_mode(&mut self, token: Token) {
        let Some(token) = self.skip_leading_whitespace(token) else {
            return;
        };

        match &token {
            // "A DOCTYPE token": "Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected_token(&token),

            // "A comment token": "Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => self.insert_comment(data, Some(Preposition::Root)),

            // "A start tag whose tag name is "html"": "Create an element for
            // the token in the HTML namespace, with the Document as the
            // intended parent. Append it to the Document object. Put this
            // element in the stack of open elements."
            Token::StartTag { name, .. } if name == "html" => {
                let _ = self.insert_html_element(&token);
                self.switch_mode(InsertionMode::BeforeHead);
            }

            // "Any other end tag": "Parse error. Ignore the token."
            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.unexpected_token(&token);
            }

            // "Anything else": "Create an html element whose node document
            // is the Document object. Append it to the Document object. Put
            // this element in the stack of open elements."
            _ => {
                let _ = self.insert_implied_html_element("html");
                self.switch_mode(InsertionMode::BeforeHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::tree_builder) fn handle_before_head_mode(&mut self, token: Token) {
        let Some(token) = self.skip_leading_whitespace(token) else {
            return;
        };

        match &token {
            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            // "A start tag whose tag name is "html"": "Process the token using
            // the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "head"": "Insert an HTML element
            // for the token. Set the head element pointer to the newly created
            // head element. Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(&token);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
            }

            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.unexpected_token(&token);
            }

            // "Anything else": "Insert an HTML element for a "head" start tag
            // token with no attributes."
            _ => {
                let head = self.insert_implied_html_element("head");
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
                self.reprocess_token(token);
            }
        }
    }
}
