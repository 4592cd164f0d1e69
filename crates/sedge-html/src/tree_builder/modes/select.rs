//! [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)

use crate::tokenizer::Token;
use crate::tree_builder::{InsertionMode, TreeBuilder};
use crate::tree_handler::TreeHandler;

/// Table structure tags that end a `select` inside a table.
const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl<H: TreeHandler> TreeBuilder<H> {
    pub(in crate::tree_builder) fn handle_in_select_mode(&mut self, token: Token) {
        match &token {
            Token::Character { data } => {
                // "A character token that is U+0000 NULL": "Parse error. Ignore
                // the token."
                let text = if data.contains('\0') {
                    self.parse_error("unexpected-null-character in select");
                    data.replace('\0', "")
                } else {
                    data.clone()
                };
                let span = self.span;
                self.insert_characters(&text, span);
            }

            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_using_rules(InsertionMode::InBody, token),

                // "A start tag whose tag name is "option"": "If the current
                // node is an option element, pop that node from the stack of
                // open elements. Insert an HTML element for the token."
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.pop();
                    }
                    let _ = self.insert_html_element(&token);
                }

                // "A start tag whose tag name is "optgroup"" and "A start tag
                // whose tag name is "hr"": close an open option, then an open
                // optgroup.
                "optgroup" | "hr" => {
                    if self.current_node_is("option") {
                        let _ = self.pop();
                    }
                    if self.current_node_is("optgroup") {
                        let _ = self.pop();
                    }
                    let _ = self.insert_html_element(&token);
                }

                // "A start tag whose tag name is "select"": "Parse error. If
                // the stack of open elements does not have a select element in
                // select scope, ignore the token. (fragment case) Otherwise:
                // Pop elements from the stack of open elements until a select
                // element has been popped from the stack. Reset the insertion
                // mode appropriately."
                "select" => {
                    self.unexpected_token(&token);
                    let _ = self.close_select();
                }

                // "A start tag whose tag name is one of: "input", "keygen",
                // "textarea"": the same, but the token is reprocessed.
                "input" | "keygen" | "textarea" => {
                    self.unexpected_token(&token);
                    if self.close_select() {
                        self.reprocess_token(token);
                    }
                }

                "script" | "template" => self.process_using_rules(InsertionMode::InHead, token),

                _ => self.unexpected_token(&token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and the
                    // node immediately before it in the stack of open elements
                    // is an optgroup element, then pop the current node from the
                    // stack of open elements."
                    let depth = self.stack_of_open_elements.len();
                    if depth >= 2
                        && self.current_node_is("option")
                        && self
                            .element(self.stack_of_open_elements[depth - 2])
                            .is_html("optgroup")
                    {
                        let _ = self.pop();
                    }
                    // "If the current node is an optgroup element, then pop
                    // that node from the stack of open elements. Otherwise,
                    // this is a parse error; ignore the token."
                    if self.current_node_is("optgroup") {
                        let _ = self.pop();
                    } else {
                        self.unexpected_token(&token);
                    }
                }

                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.pop();
                    } else {
                        self.unexpected_token(&token);
                    }
                }

                "select" => {
                    if !self.close_select() {
                        self.unexpected_token(&token);
                    }
                }

                "template" => self.process_using_rules(InsertionMode::InHead, token),

                _ => self.unexpected_token(&token),
            },

            Token::EndOfFile => self.process_using_rules(InsertionMode::InBody, token),
        }
    }

    /// Pop through the open `select` and reset the insertion mode. Returns
    /// false if no `select` is in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_in_select_scope("select") {
            return false;
        }
        self.pop_until("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::tree_builder) fn handle_in_select_in_table_mode(&mut self, token: Token) {
        match &token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th"": "Parse error. Pop
            // elements from the stack of open elements until a select element
            // has been popped from the stack. Reset the insertion mode
            // appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected_token(&token);
                self.pop_until("select");
                self.reset_insertion_mode_appropriately();
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: ..." "If the stack of open
            // elements does not have an element in table scope that is an HTML
            // element with the same tag name as that of the token, then ignore
            // the token."
            Token::EndTag { name } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected_token(&token);
                if !self.has_in_table_scope(name) {
                    return;
                }
                self.pop_until("select");
                self.reset_insertion_mode_appropriately();
                self.reprocess_token(token);
            }

            _ => self.process_using_rules(InsertionMode::InSelect, token),
        }
    }
}
