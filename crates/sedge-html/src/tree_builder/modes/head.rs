//! `head` contents, the text mode, and the step from `head` to `body`.

use crate::tokenizer::{Token, TokenizerState};
use crate::tree_builder::{InsertionMode, TreeBuilder};
use crate::tree_handler::TreeHandler;

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::tree_builder) fn handle_in_head_mode(&mut self, token: Token) {
        // "A character token that is one of U+0009 CHARACTER TABULATION,
        // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN
        // (CR), or U+0020 SPACE": "Insert the character."
        let Some(token) = self.insert_leading_whitespace(token) else {
            return;
        };

        match &token {
            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_using_rules(InsertionMode::InBody, token),

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link"": "Insert an HTML element for the token.
                // Immediately pop the current node off the stack of open
                // elements. Acknowledge the token's self-closing flag, if it is
                // set."
                // "A start tag whose tag name is "meta"": the same.
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_html_element(&token);
                }

                // "A start tag whose tag name is "title"": "Follow the generic
                // RCDATA element parsing algorithm."
                "title" => self.parse_text_element(&token, TokenizerState::RCDATA),

                // "A start tag whose tag name is "noscript", if the scripting
                // flag is enabled"
                // "A start tag whose tag name is one of: "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.options.scripting => {
                    self.parse_text_element(&token, TokenizerState::RAWTEXT);
                }
                "noframes" | "style" => self.parse_text_element(&token, TokenizerState::RAWTEXT),

                // "A start tag whose tag name is "noscript", if the scripting
                // flag is disabled": "Insert an HTML element for the token.
                // Switch the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(&token);
                    self.switch_mode(InsertionMode::InHeadNoscript);
                }

                // "A start tag whose tag name is "script""
                "script" => {
                    // STEP 1-6: create the element and insert it at the
                    //           adjusted insertion location, then push it.
                    let _ = self.insert_html_element(&token);
                    // STEP 7: "Switch the tokenizer to the script data state."
                    self.switch_tokenizer(&token, TokenizerState::ScriptData);
                    // STEP 8: "Set the original insertion mode to the current
                    //          insertion mode."
                    self.original_insertion_mode = Some(self.insertion_mode);
                    // STEP 9: "Switch the insertion mode to "text"."
                    self.switch_mode(InsertionMode::Text);
                }

                // "A start tag whose tag name is "template""
                "template" => {
                    let _ = self.insert_html_element(&token);
                    self.insert_marker();
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InTemplate);
                    self.template_insertion_modes.push(InsertionMode::InTemplate);
                }

                // "A start tag whose tag name is "head"": "Parse error. Ignore
                // the token."
                "head" => self.unexpected_token(&token),

                _ => self.in_head_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "head"": "Pop the current node
                // (which will be the head element) off the stack of open
                // elements. Switch the insertion mode to "after head"."
                "head" => {
                    let _ = self.pop();
                    self.switch_mode(InsertionMode::AfterHead);
                }
                "body" | "html" | "br" => self.in_head_anything_else(token),
                "template" => self.close_template(),
                // "Any other end tag": "Parse error. Ignore the token."
                _ => self.unexpected_token(&token),
            },

            Token::Character { .. } | Token::EndOfFile => self.in_head_anything_else(token),
        }
    }

    /// "Anything else" in head: "Pop the current node (which will be the head
    /// element) off the stack of open elements. Switch the insertion mode to
    /// "after head". Reprocess the token."
    fn in_head_anything_else(&mut self, token: Token) {
        let _ = self.pop();
        self.switch_mode(InsertionMode::AfterHead);
        self.reprocess_token(token);
    }

    /// "An end tag whose tag name is "template"" in head.
    pub(in crate::tree_builder) fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.stack_has_html("template") {
            self.parse_error("unexpected </template> with no open template");
            return;
        }
        // "1. Generate all implied end tags thoroughly."
        self.generate_all_implied_end_tags_thoroughly();
        // "2. If the current node is not a template element, then this is a
        // parse error."
        if !self.current_node_is("template") {
            self.parse_error("unclosed elements before </template>");
        }
        // "3. Pop elements from the stack of open elements until a template
        // element has been popped from the stack."
        self.pop_until("template");
        // "4. Clear the list of active formatting elements up to the last
        // marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "5. Pop the current template insertion mode off the stack of
        // template insertion modes."
        let _ = self.template_insertion_modes.pop();
        // "6. Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::tree_builder) fn handle_in_head_noscript_mode(&mut self, token: Token) {
        // Whitespace, comments and the head-only tags are "processed using the
        // rules for the "in head" insertion mode".
        let Some(token) = self.insert_leading_whitespace(token) else {
            return;
        };

        match &token {
            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "noscript"": "Pop the current node
            // (which will be a noscript element) from the stack of open
            // elements; the new current node will be a head element. Switch
            // the insertion mode to "in head"."
            Token::EndTag { name } if name == "noscript" => {
                let _ = self.pop();
                self.switch_mode(InsertionMode::InHead);
            }

            Token::Comment { .. } => self.process_using_rules(InsertionMode::InHead, token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using_rules(InsertionMode::InHead, token);
            }

            // "A start tag whose tag name is one of: "head", "noscript"" and
            // "Any other end tag": "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.unexpected_token(&token);
            }
            Token::EndTag { name } if name != "br" => self.unexpected_token(&token),

            // "Anything else": "Parse error. Pop the current node (which will
            // be a noscript element) from the stack of open elements; the new
            // current node will be a head element. Switch the insertion mode to
            // "in head". Reprocess the token."
            _ => {
                self.unexpected_token(&token);
                let _ = self.pop();
                self.switch_mode(InsertionMode::InHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::tree_builder) fn handle_after_head_mode(&mut self, token: Token) {
        let Some(token) = self.insert_leading_whitespace(token) else {
            return;
        };

        match &token {
            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_using_rules(InsertionMode::InBody, token),

                // "A start tag whose tag name is "body"": "Insert an HTML
                // element for the token. Set the frameset-ok flag to "not ok".
                // Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(&token);
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InBody);
                }

                // "A start tag whose tag name is "frameset"": "Insert an HTML
                // element for the token. Switch the insertion mode to "in
                // frameset"."
                "frameset" => {
                    let _ = self.insert_html_element(&token);
                    self.switch_mode(InsertionMode::InFrameset);
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    // STEP 1: "Parse error."
                    self.unexpected_token(&token);
                    // STEP 2: "Push the node pointed to by the head element
                    //          pointer onto the stack of open elements."
                    let Some(head) = self.head_element_pointer else {
                        return;
                    };
                    self.push_open_element(head);
                    // STEP 3: "Process the token using the rules for the "in
                    //          head" insertion mode."
                    self.process_using_rules(InsertionMode::InHead, token);
                    // STEP 4: "Remove the node pointed to by the head element
                    //          pointer from the stack of open elements. (It
                    //          might not be the current node at this point.)"
                    if let Some(index) = self.stack_of_open_elements.iter().rposition(|&id| id == head) {
                        let _ = self.stack_of_open_elements.remove(index);
                    }
                }

                "head" => self.unexpected_token(&token),

                _ => self.after_head_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                "template" => self.process_using_rules(InsertionMode::InHead, token),
                "body" | "html" | "br" => self.after_head_anything_else(token),
                _ => self.unexpected_token(&token),
            },

            Token::Character { .. } | Token::EndOfFile => self.after_head_anything_else(token),
        }
    }

    /// "Anything else" after head: "Insert an HTML element for a "body" start
    /// tag token with no attributes. Switch the insertion mode to "in body".
    /// Reprocess the current token."
    fn after_head_anything_else(&mut self, token: Token) {
        let _ = self.insert_implied_html_element("body");
        self.switch_mode(InsertionMode::InBody);
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::tree_builder) fn handle_text_mode(&mut self, token: Token) {
        match token {
            // "A character token": "Insert the token's character."
            Token::Character { data } => {
                let span = self.span;
                self.insert_characters(&data, span);
            }

            // "An end-of-file token": "Parse error. If the current node is a
            // script element, then set its already started to true. Pop the
            // current node off the stack of open elements. Switch the insertion
            // mode to the original insertion mode and reprocess the token."
            Token::EndOfFile => {
                self.parse_error("unexpected end of file in text");
                let _ = self.pop();
                self.switch_to_original_mode();
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is "script"" and "Any other end tag":
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.pop();
                self.switch_to_original_mode();
            }

            // The tokenizer produces nothing else while in a text state.
            _ => {}
        }
    }

    pub(in crate::tree_builder) fn switch_to_original_mode(&mut self) {
        let mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        self.switch_mode(mode);
    }
}
