//! Tables: the "in table" family of insertion modes.

use crate::tokenizer::Token;
use crate::tree_builder::{InsertionMode, TreeBuilder, is_whitespace};
use crate::tree_handler::TreeHandler;

/// Start tags that close an open caption or cell and are then reprocessed.
const TABLE_STRUCTURE_START_TAGS: &[&str] = &[
    "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::tree_builder) fn handle_in_table_mode(&mut self, token: Token) {
        match &token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            Token::Character { .. }
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                // "Let the pending table character tokens be an empty list of
                // tokens. Let the original insertion mode be the current
                // insertion mode. Switch the insertion mode to "in table text"
                // and reprocess the token."
                self.pending_table_characters.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.switch_mode(InsertionMode::InTableText);
                self.reprocess_token(token);
            }

            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                "caption" => {
                    self.clear_stack_back_to_table_context();
                    self.insert_marker();
                    let _ = self.insert_html_element(&token);
                    self.switch_mode(InsertionMode::InCaption);
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(&token);
                    self.switch_mode(InsertionMode::InColumnGroup);
                }

                // "A start tag whose tag name is "col"": "Clear the stack back
                // to a table context. Insert an HTML element for a "colgroup"
                // start tag token with no attributes, then switch the insertion
                // mode to "in column group". Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_implied_html_element("colgroup");
                    self.switch_mode(InsertionMode::InColumnGroup);
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot",
                // "thead""
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(&token);
                    self.switch_mode(InsertionMode::InTableBody);
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_implied_html_element("tbody");
                    self.switch_mode(InsertionMode::InTableBody);
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    self.unexpected_token(&token);
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token."
                    if !self.has_in_table_scope("table") {
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately. Reprocess the token."
                    self.pop_until("table");
                    self.reset_insertion_mode_appropriately();
                    self.reprocess_token(token);
                }

                "style" | "script" | "template" => {
                    self.process_using_rules(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is "input""
                "input" if is_hidden_input(&token) => {
                    // "Parse error. Insert an HTML element for the token. Pop
                    // that input element off the stack of open elements.
                    // Acknowledge the token's self-closing flag, if it is set."
                    // The element is void, so it never reaches the stack.
                    self.unexpected_token(&token);
                    let _ = self.insert_html_element(&token);
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    self.unexpected_token(&token);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token."
                    if self.stack_has_html("template") || self.form_element_pointer.is_some() {
                        return;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set
                    // the form element pointer to point to the element created.
                    // Pop that form element off the stack of open elements."
                    let form = self.insert_html_element(&token);
                    self.form_element_pointer = Some(form);
                    let _ = self.pop();
                }

                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    if !self.has_in_table_scope("table") {
                        self.unexpected_token(&token);
                        return;
                    }
                    self.pop_until("table");
                    self.reset_insertion_mode_appropriately();
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                // "thead", "tr"": "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.unexpected_token(&token),

                "template" => self.process_using_rules(InsertionMode::InHead, token),

                _ => self.in_table_anything_else(token),
            },

            // "An end-of-file token": "Process the token using the rules for
            // the "in body" insertion mode."
            Token::EndOfFile => self.process_using_rules(InsertionMode::InBody, token),

            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Anything else" in table: "Parse error. Enable foster parenting,
    /// process the token using the rules for the "in body" insertion mode,
    /// and then disable foster parenting."
    fn in_table_anything_else(&mut self, token: Token) {
        self.unexpected_token(&token);
        self.process_with_foster_parenting(token);
    }

    fn process_with_foster_parenting(&mut self, token: Token) {
        self.foster_parenting = true;
        self.process_using_rules(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::tree_builder) fn handle_in_table_text_mode(&mut self, token: Token) {
        if let Token::Character { data } = token {
            // "A character token that is U+0000 NULL": "Parse error. Ignore
            // the token."
            let data = if data.contains('\0') {
                self.parse_error("unexpected-null-character in table text");
                data.replace('\0', "")
            } else {
                data
            };
            // "Any other character token": "Append the character token to the
            // pending table character tokens list."
            if !data.is_empty() {
                self.pending_table_characters.push((data, self.span));
            }
            return;
        }

        // "Anything else"
        self.flush_pending_table_characters();
        // "Switch the insertion mode to the original insertion mode and
        // reprocess the token."
        self.switch_to_original_mode();
        self.reprocess_token(token);
    }

    /// "If any of the tokens in the pending table character tokens list are
    /// character tokens that are not ASCII whitespace, then this is a parse
    /// error: reprocess the character tokens in the pending table character
    /// tokens list using the rules given in the "anything else" entry in the
    /// "in table" insertion mode. Otherwise, insert the characters given by
    /// the pending table character tokens list."
    fn flush_pending_table_characters(&mut self) {
        let pending = std::mem::take(&mut self.pending_table_characters);
        if pending.is_empty() {
            return;
        }
        let foster = pending
            .iter()
            .any(|(data, _)| !data.chars().all(is_whitespace));
        if foster {
            self.parse_error("unexpected characters in table");
        }

        let token_span = self.span;
        for (data, span) in pending {
            if foster {
                self.span = span;
                self.process_with_foster_parenting(Token::Character { data });
            } else {
                self.insert_characters(&data, span);
            }
        }
        self.span = token_span;
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::tree_builder) fn handle_in_caption_mode(&mut self, token: Token) {
        match &token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name } if name == "caption" => {
                let _ = self.close_caption(&token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"" and "An
            // end tag whose tag name is "table"": close the caption, then
            // reprocess the token.
            Token::StartTag { name, .. } if TABLE_STRUCTURE_START_TAGS.contains(&name.as_str()) => {
                if self.close_caption(&token) {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag { name } if name == "table" => {
                if self.close_caption(&token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr"": "Parse
            // error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                        | "thead" | "tr"
                ) =>
            {
                self.unexpected_token(&token);
            }

            // "Anything else": "Process the token using the rules for the "in
            // body" insertion mode."
            _ => self.process_using_rules(InsertionMode::InBody, token),
        }
    }

    /// Close the open caption. Returns false if there was none in table
    /// scope, in which case the token is ignored.
    fn close_caption(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a caption element in
        // table scope, this is a parse error; ignore the token. (fragment
        // case)"
        if !self.has_in_table_scope("caption") {
            self.unexpected_token(token);
            return false;
        }
        // "1. Generate implied end tags."
        self.generate_implied_end_tags();
        // "2. Now, if the current node is not a caption element, then this is
        // a parse error."
        if !self.current_node_is("caption") {
            self.parse_error("unclosed elements in caption");
        }
        // "3. Pop elements from this stack until a caption element has been
        // popped from the stack. 4. Clear the list of active formatting
        // elements up to the last marker. 5. Switch the insertion mode to "in
        // table"."
        self.pop_until("caption");
        self.clear_active_formatting_elements_to_last_marker();
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(in crate::tree_builder) fn handle_in_column_group_mode(&mut self, token: Token) {
        let Some(token) = self.insert_leading_whitespace(token) else {
            return;
        };

        match &token {
            Token::Comment { data } => self.insert_comment(data, None),

            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "col"": "Insert an HTML element
            // for the token. Immediately pop the current node off the stack of
            // open elements. Acknowledge the token's self-closing flag, if it
            // is set."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(&token);
            }

            // "An end tag whose tag name is "colgroup""
            Token::EndTag { name } if name == "colgroup" => {
                // "If the current node is not a colgroup element, then this is
                // a parse error; ignore the token."
                if !self.current_node_is("colgroup") {
                    self.unexpected_token(&token);
                    return;
                }
                let _ = self.pop();
                self.switch_mode(InsertionMode::InTable);
            }

            // "An end tag whose tag name is "col"": "Parse error. Ignore the
            // token."
            Token::EndTag { name } if name == "col" => self.unexpected_token(&token),

            Token::StartTag { name, .. } | Token::EndTag { name } if name == "template" => {
                self.process_using_rules(InsertionMode::InHead, token);
            }

            Token::EndOfFile => self.process_using_rules(InsertionMode::InBody, token),

            // "Anything else": "If the current node is not a colgroup element,
            // then this is a parse error; ignore the token. Otherwise, pop the
            // current node from the stack of open elements. Switch the
            // insertion mode to "in table". Reprocess the token."
            _ => {
                if !self.current_node_is("colgroup") {
                    // Each ignored character is its own token; whitespace
                    // behind one is still inserted.
                    if let Token::Character { data } = &token {
                        self.insert_whitespace_only(data);
                    } else {
                        self.unexpected_token(&token);
                    }
                    return;
                }
                let _ = self.pop();
                self.switch_mode(InsertionMode::InTable);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(in crate::tree_builder) fn handle_in_table_body_mode(&mut self, token: Token) {
        match &token {
            // "A start tag whose tag name is "tr""
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(&token);
                self.switch_mode(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "th", "td""
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.unexpected_token(&token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_implied_html_element("tr");
                self.switch_mode(InsertionMode::InRow);
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                if !self.has_in_table_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                self.clear_stack_back_to_table_body_context();
                let _ = self.pop();
                self.switch_mode(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead"" and "An end tag whose tag
            // name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_body(token);
            }
            Token::EndTag { name } if name == "table" => self.close_table_body(token),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr"": "Parse error. Ignore the
            // token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected_token(&token);
            }

            // "Anything else": "Process the token using the rules for the "in
            // table" insertion mode."
            _ => self.process_using_rules(InsertionMode::InTable, token),
        }
    }

    fn close_table_body(&mut self, token: Token) {
        // "If the stack of open elements does not have a tbody, thead, or tfoot
        // element in table scope, this is a parse error; ignore the token."
        if !self.has_one_of_in_table_scope(&["tbody", "thead", "tfoot"]) {
            self.unexpected_token(&token);
            return;
        }
        // "Otherwise: Clear the stack back to a table body context. Pop the
        // current node from the stack of open elements. Switch the insertion
        // mode to "in table". Reprocess the token."
        self.clear_stack_back_to_table_body_context();
        let _ = self.pop();
        self.switch_mode(InsertionMode::InTable);
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::tree_builder) fn handle_in_row_mode(&mut self, token: Token) {
        match &token {
            // "A start tag whose tag name is one of: "th", "td""
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(&token);
                self.switch_mode(InsertionMode::InCell);
                self.insert_marker();
            }

            // "An end tag whose tag name is "tr""
            Token::EndTag { name } if name == "tr" => {
                let _ = self.close_row(&token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr"" and "An end tag
            // whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_row(&token) {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag { name } if name == "table" => {
                if self.close_row(&token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // the token, this is a parse error; ignore the token."
                if !self.has_in_table_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if self.close_row(&token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th"": "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected_token(&token);
            }

            _ => self.process_using_rules(InsertionMode::InTable, token),
        }
    }

    /// Close the open row. Returns false if there was no `tr` in table scope.
    fn close_row(&mut self, token: &Token) -> bool {
        if !self.has_in_table_scope("tr") {
            self.unexpected_token(token);
            return false;
        }
        // "1. Clear the stack back to a table row context. 2. Pop the current
        // node (which will be a tr element) from the stack of open elements.
        // Switch the insertion mode to "in table body"."
        self.clear_stack_back_to_table_row_context();
        let _ = self.pop();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::tree_builder) fn handle_in_cell_mode(&mut self, token: Token) {
        match &token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name } if name == "td" || name == "th" => {
                if !self.has_in_table_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.unexpected_token(&token);
                }
                self.pop_until(name);
                self.clear_active_formatting_elements_to_last_marker();
                self.switch_mode(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            Token::StartTag { name, .. } if TABLE_STRUCTURE_START_TAGS.contains(&name.as_str()) => {
                // "Assert: The stack of open elements has a td or th element in
                // table scope." Fragment parses can break this.
                if !self.has_one_of_in_table_scope(&["td", "th"]) {
                    self.unexpected_token(&token);
                    return;
                }
                self.close_the_cell();
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html"": "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected_token(&token);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            Token::EndTag { name }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if !self.has_in_table_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                self.close_the_cell();
                self.reprocess_token(token);
            }

            _ => self.process_using_rules(InsertionMode::InBody, token),
        }
    }
}

/// "If the token does not have an attribute with the name "type", or if it
/// does, but that attribute's value is not an ASCII case-insensitive match
/// for the string "hidden"" the input is not hidden.
pub(super) fn is_hidden_input(token: &Token) -> bool {
    match token {
        Token::StartTag { attributes, .. } => attributes
            .get("type")
            .is_some_and(|value| value.eq_ignore_ascii_case("hidden")),
        _ => false,
    }
}
