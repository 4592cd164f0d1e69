//! The modes after `body` or `frameset` has been closed, and framesets.

use crate::tokenizer::Token;
use crate::tree_builder::{InsertionMode, TreeBuilder};
use crate::tree_handler::{Preposition, TreeHandler};

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::tree_builder) fn handle_after_body_mode(&mut self, token: Token) {
        let Some(token) = self.process_leading_whitespace_in_body(token) else {
            return;
        };

        match &token {
            // "A comment token": "Insert a comment as the last child of the
            // first element in the stack of open elements (the html element)."
            Token::Comment { data } => {
                let at = self
                    .stack_of_open_elements
                    .first()
                    .map_or(Preposition::Root, |&html| self.under(html));
                self.insert_comment(data, Some(at));
            }

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html"": "If the parser was created
            // as part of the HTML fragment parsing algorithm, this is a parse
            // error; ignore the token. (fragment case) Otherwise, switch the
            // insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                if self.context_element.is_some() {
                    self.unexpected_token(&token);
                } else {
                    self.switch_mode(InsertionMode::AfterAfterBody);
                }
            }

            Token::EndOfFile => self.stop_parsing(),

            // "Anything else": "Parse error. Switch the insertion mode to "in
            // body" and reprocess the token."
            _ => {
                self.unexpected_token(&token);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::tree_builder) fn handle_in_frameset_mode(&mut self, token: Token) {
        match &token {
            Token::Character { data } => self.insert_whitespace_only(data),

            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_using_rules(InsertionMode::InBody, token),
                // "A start tag whose tag name is "frameset"": "Insert an HTML
                // element for the token."
                // "A start tag whose tag name is "frame"": "Insert an HTML
                // element for the token. Immediately pop the current node off
                // the stack of open elements. Acknowledge the token's
                // self-closing flag, if it is set."
                "frameset" | "frame" => {
                    let _ = self.insert_html_element(&token);
                }
                "noframes" => self.process_using_rules(InsertionMode::InHead, token),
                _ => self.unexpected_token(&token),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.stack_of_open_elements.len() <= 1 {
                    self.unexpected_token(&token);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. If the parser was not created as part of the HTML
                // fragment parsing algorithm (fragment case), and the current
                // node is no longer a frameset element, then switch the
                // insertion mode to "after frameset"."
                let _ = self.pop();
                if self.context_element.is_none() && !self.current_node_is("frameset") {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
            }

            // "An end-of-file token": "If the current node is not the root html
            // element, then this is a parse error. Stop parsing."
            Token::EndOfFile => {
                if self.stack_of_open_elements.len() > 1 {
                    self.unexpected_token(&token);
                }
                self.stop_parsing();
            }

            Token::EndTag { .. } => self.unexpected_token(&token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::tree_builder) fn handle_after_frameset_mode(&mut self, token: Token) {
        match &token {
            Token::Character { data } => self.insert_whitespace_only(data),

            Token::Comment { data } => self.insert_comment(data, None),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html"": "Switch the insertion mode
            // to "after after frameset"."
            Token::EndTag { name } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
            }

            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules(InsertionMode::InHead, token);
            }

            Token::EndOfFile => self.stop_parsing(),

            // "Anything else": "Parse error. Ignore the token."
            _ => self.unexpected_token(&token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::tree_builder) fn handle_after_after_body_mode(&mut self, token: Token) {
        let Some(token) = self.process_leading_whitespace_in_body(token) else {
            return;
        };

        match &token {
            // "A comment token": "Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => self.insert_comment(data, Some(Preposition::Root)),

            Token::Doctype { .. } => self.process_using_rules(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            Token::EndOfFile => self.stop_parsing(),

            _ => {
                self.unexpected_token(&token);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::tree_builder) fn handle_after_after_frameset_mode(&mut self, token: Token) {
        let Some(token) = self.process_leading_whitespace_in_body(token) else {
            return;
        };

        match &token {
            Token::Comment { data } => self.insert_comment(data, Some(Preposition::Root)),

            Token::Doctype { .. } => self.process_using_rules(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            Token::EndOfFile => self.stop_parsing(),

            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules(InsertionMode::InHead, token);
            }

            // Whitespace further into the run still goes to "in body"; the
            // other characters are "Anything else".
            Token::Character { data } => {
                if let Some((whitespace, span)) = self.whitespace_only(data) {
                    let token_span = self.span;
                    self.span = span;
                    self.process_using_rules(
                        InsertionMode::InBody,
                        Token::Character { data: whitespace },
                    );
                    self.span = token_span;
                }
            }

            // "Anything else": "Parse error. Ignore the token."
            _ => self.unexpected_token(&token),
        }
    }
}
