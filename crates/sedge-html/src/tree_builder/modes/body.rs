//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use sedge_dom::{Namespace, QuirksMode};

use super::table::is_hidden_input;
use crate::tokenizer::{Attributes, Token, TokenizerState};
use crate::tree_builder::elements::{FORMATTING_ELEMENTS, HEADINGS, is_special};
use crate::tree_builder::{InsertionMode, TreeBuilder, is_whitespace};
use crate::tree_handler::{ElementId, TreeHandler};

/// "A start tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main",
/// "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
const BLOCK_START_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "search", "section", "summary", "ul",
];

/// "An end tag whose tag name is one of: ..." closed by name when in scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog",
    "dir", "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
    "listing", "main", "menu", "nav", "ol", "pre", "search", "section", "select", "summary",
    "ul",
];

/// Elements that may still be open at the end of the body without a parse
/// error.
const MAY_REMAIN_OPEN: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td",
    "tfoot", "th", "thead", "tr", "body", "html",
];

impl<H: TreeHandler> TreeBuilder<H> {
    pub(in crate::tree_builder) fn handle_in_body_mode(&mut self, token: Token) {
        match &token {
            Token::Character { data } => self.in_body_characters(data),

            // "A comment token": "Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token": "Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { name, .. } => {
                let name = name.clone();
                self.in_body_start_tag(&name, token);
            }

            Token::EndTag { name } => {
                let name = name.clone();
                self.in_body_end_tag(&name, token);
            }

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    self.process_using_rules(InsertionMode::InTemplate, token);
                    return;
                }
                self.check_open_elements_at_end();
                self.stop_parsing();
            }
        }
    }

    /// "If there is a node in the stack of open elements that is not either a
    /// dd element, ... or the html element, then this is a parse error."
    pub(in crate::tree_builder) fn check_open_elements_at_end(&mut self) {
        let unclosed = self
            .stack_of_open_elements
            .iter()
            .map(|&id| self.element(id))
            .find(|element| !element.is_html_one_of(MAY_REMAIN_OPEN))
            .map(ToString::to_string);
        if let Some(element) = unclosed {
            self.parse_error(&format!("unclosed element {element} at end of body"));
        }
    }

    fn in_body_characters(&mut self, data: &str) {
        // "A character token that is U+0000 NULL": "Parse error. Ignore the
        // token."
        let owned;
        let data = if data.contains('\0') {
            self.parse_error("unexpected-null-character in body");
            owned = data.replace('\0', "");
            owned.as_str()
        } else {
            data
        };
        if data.is_empty() {
            return;
        }

        // "Reconstruct the active formatting elements, if any. Insert the
        // token's character."
        self.reconstruct_active_formatting_elements();
        let span = self.span;
        self.insert_characters(data, span);

        // "Set the frameset-ok flag to "not ok"" for anything but whitespace.
        if !data.chars().all(is_whitespace) {
            self.frameset_ok = false;
        }
    }

    fn in_body_start_tag(&mut self, name: &str, token: Token) {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                self.unexpected_token(&token);
                // "If there is a template element on the stack of open
                // elements, then ignore the token."
                if self.stack_has_html("template") {
                    return;
                }
                // "Otherwise, for each attribute on the token, check to see if
                // the attribute is already present on the top element of the
                // stack of open elements. If it is not, add the attribute and
                // its corresponding value to that element."
                if let Some(&top) = self.stack_of_open_elements.first() {
                    self.merge_token_attributes(top, &token);
                }
            }

            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.process_using_rules(InsertionMode::InHead, token),

            // "A start tag whose tag name is "body""
            "body" => {
                self.unexpected_token(&token);
                // "If the stack of open elements has only one node on it, if
                // the second element on the stack of open elements is not a body
                // element, or if there is a template element on the stack of
                // open elements, then ignore the token. (fragment case or there
                // is a template element on the stack)"
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if self.stack_has_html("template") {
                    return;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                // each attribute on the token, check to see if the attribute is
                // already present on the body element (the second element) on
                // the stack of open elements, and if it is not, add the
                // attribute and its corresponding value to that element."
                self.frameset_ok = false;
                self.merge_token_attributes(body, &token);
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                self.unexpected_token(&token);
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the
                // token."
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                // "1. Remove the second element on the stack of open elements
                // from its parent node, if it has one."
                // "2. Pop all the nodes from the bottom of the stack of open
                // elements, from the current node up to, but not including, the
                // root html element."
                while self.stack_of_open_elements.len() > 1 {
                    let _ = self.pop();
                }
                let pos = self.span.start;
                let element = &self.elements[body.0];
                self.handler.remove_node(element, pos);
                // "3. Insert an HTML element for the token."
                let _ = self.insert_html_element(&token);
                // "4. Switch the insertion mode to "in frameset"."
                self.switch_mode(InsertionMode::InFrameset);
            }

            _ if BLOCK_START_TAGS.contains(&name) => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element. Insert an HTML element for the
                // token."
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                self.close_p_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.unexpected_token(&token);
                    let _ = self.pop();
                }
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(&token);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is
                // a parse error; ignore the token."
                let has_template = self.stack_has_html("template");
                if self.form_element_pointer.is_some() && !has_template {
                    self.unexpected_token(&token);
                    return;
                }
                self.close_p_if_in_button_scope();
                let form = self.insert_html_element(&token);
                // "if there is no template element on the stack of open
                // elements, set the form element pointer to point to the
                // element created."
                if !has_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => {
                self.close_list_item(&["li"]);
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                self.close_list_item(&["dd", "dt"]);
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is "plaintext""
            "plaintext" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(&token);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.switch_tokenizer(&token, TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "1. If the stack of open elements has a button element in
                // scope, then run these substeps: Parse error. Generate implied
                // end tags. Pop elements from the stack of open elements until
                // a button element has been popped from the stack."
                if self.has_in_scope("button") {
                    self.unexpected_token(&token);
                    self.generate_implied_end_tags();
                    self.pop_until("button");
                }
                // "2. Reconstruct the active formatting elements, if any.
                // 3. Insert an HTML element for the token. 4. Set the
                // frameset-ok flag to "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption agency
                // algorithm for the token, then remove that element from the
                // list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                if let Some(existing) = self.formatting_element_after_last_marker("a") {
                    self.unexpected_token(&token);
                    self.run_adoption_agency("a");
                    self.remove_formatting_element(existing);
                    self.remove_from_stack(existing);
                }
                self.insert_formatting_element(&token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            _ if FORMATTING_ELEMENTS.contains(&name) && name != "nobr" => {
                self.insert_formatting_element(&token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency algorithm
                // for the token, then once again reconstruct the active
                // formatting elements, if any."
                if self.has_in_scope("nobr") {
                    self.unexpected_token(&token);
                    self.run_adoption_agency("nobr");
                }
                self.insert_formatting_element(&token);
            }

            // "A start tag whose tag name is one of: "applet", "marquee",
            // "object""
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
                self.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(&token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                if !is_hidden_input(&token) {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(&token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image"": "Parse error. Change the
            // token's tag name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.unexpected_token(&token);
                let mut token = token;
                if let Token::StartTag { name, .. } = &mut token {
                    "img".clone_into(name);
                }
                self.reprocess_token(token);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // "1. Insert an HTML element for the token."
                let _ = self.insert_html_element(&token);
                // "2. If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.skip_next_newline = true;
                // "3. Switch the tokenizer to the RCDATA state."
                self.switch_tokenizer(&token, TokenizerState::RCDATA);
                // "4. Set the original insertion mode to the current insertion
                // mode."
                self.original_insertion_mode = Some(self.insertion_mode);
                // "5. Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // "6. Switch the insertion mode to "text"."
                self.switch_mode(InsertionMode::Text);
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(&token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(&token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed"" and "A start tag whose
            // tag name is "noscript", if the scripting flag is enabled"
            "noembed" => self.parse_text_element(&token, TokenizerState::RAWTEXT),
            "noscript" if self.options.scripting => {
                self.parse_text_element(&token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                let mode = if matches!(
                    self.insertion_mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                ) {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                };
                self.switch_mode(mode);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            "optgroup" | "option" => {
                // "If the current node is an option element, then pop the
                // current node off the stack of open elements."
                if self.current_node_is("option") {
                    let _ = self.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                if self.has_in_scope("ruby") {
                    self.generate_implied_end_tags();
                    if !self.current_node_is("ruby") {
                        self.unexpected_token(&token);
                    }
                }
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                if self.has_in_scope("ruby") {
                    self.generate_implied_end_tags_except(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.unexpected_token(&token);
                    }
                }
                let _ = self.insert_html_element(&token);
            }

            // "A start tag whose tag name is "math"" and "A start tag whose tag
            // name is "svg"": "Reconstruct the active formatting elements, if
            // any. Adjust MathML attributes for the token. Adjust foreign
            // attributes for the token. Insert a foreign element for the token,
            // with MathML namespace and false. If the token has its
            // self-closing flag set, pop the current node off the stack of open
            // elements and acknowledge the token's self-closing flag."
            "math" | "svg" => {
                self.reconstruct_active_formatting_elements();
                let namespace = if name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                let _ = self.insert_foreign_element(&token, namespace);
                if matches!(
                    token,
                    Token::StartTag {
                        self_closing: true,
                        ..
                    }
                ) {
                    let _ = self.pop();
                    self.acknowledge_self_closing();
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr"": "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.unexpected_token(&token),

            // "Any other start tag": "Reconstruct the active formatting
            // elements, if any. Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(&token);
            }
        }
    }

    fn in_body_end_tag(&mut self, name: &str, token: Token) {
        match name {
            "template" => self.process_using_rules(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element in
                // scope, this is a parse error; ignore the token."
                if !self.has_in_scope("body") {
                    self.unexpected_token(&token);
                    return;
                }
                self.check_open_elements_at_end();
                // "Switch the insertion mode to "after body"."
                self.switch_mode(InsertionMode::AfterBody);
                // For </html>: "Reprocess the token."
                if name == "html" {
                    self.reprocess_token(token);
                }
            }

            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as that
                // of the token, then this is a parse error; ignore the token."
                if !self.has_in_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                // "1. Generate implied end tags. 2. If the current node is not
                // an HTML element with the same tag name as that of the token,
                // then this is a parse error. 3. Pop elements from the stack of
                // open elements until an HTML element with the same tag name as
                // the token has been popped from the stack."
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.unexpected_token(&token);
                }
                self.pop_until(name);
            }

            // "An end tag whose tag name is "form""
            "form" => {
                if self.stack_has_html("template") {
                    // "If there is a template element on the stack of open
                    // elements, then run these substeps instead:"
                    if !self.has_in_scope("form") {
                        self.unexpected_token(&token);
                        return;
                    }
                    self.generate_implied_end_tags();
                    if !self.current_node_is("form") {
                        self.unexpected_token(&token);
                    }
                    self.pop_until("form");
                    return;
                }
                // "1. Let node be the element that the form element pointer is
                // set to, or null if it is not set to an element. 2. Set the
                // form element pointer to null."
                let node = self.form_element_pointer.take();
                // "3. If node is null or if the stack of open elements does not
                // have node in scope, then this is a parse error; return and
                // ignore the token."
                let Some(node) = node.filter(|&node| self.has_element_in_scope(node)) else {
                    self.unexpected_token(&token);
                    return;
                };
                // "4. Generate implied end tags. 5. If the current node is not
                // node, then this is a parse error. 6. Remove node from the
                // stack of open elements."
                self.generate_implied_end_tags();
                if self.current_node() != Some(node) {
                    self.unexpected_token(&token);
                }
                self.remove_from_stack(node);
            }

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML
                // element for a "p" start tag token with no attributes."
                if !self.has_in_button_scope("p") {
                    self.unexpected_token(&token);
                    let _ = self.insert_implied_html_element("p");
                }
                // "Close a p element."
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                if !self.has_in_list_item_scope("li") {
                    self.unexpected_token(&token);
                    return;
                }
                self.generate_implied_end_tags_except(Some("li"));
                if !self.current_node_is("li") {
                    self.unexpected_token(&token);
                }
                self.pop_until("li");
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.has_in_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                self.generate_implied_end_tags_except(Some(name));
                if !self.current_node_is(name) {
                    self.unexpected_token(&token);
                }
                self.pop_until(name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.has_one_of_in_scope(HEADINGS) {
                    self.unexpected_token(&token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.unexpected_token(&token);
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u"": "Run the adoption agency algorithm for the token."
            _ if FORMATTING_ELEMENTS.contains(&name) => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            "applet" | "marquee" | "object" => {
                if !self.has_in_scope(name) {
                    self.unexpected_token(&token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.unexpected_token(&token);
                }
                self.pop_until(name);
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br"": "Parse error. Drop the
            // attributes from the token, and act as described in the next
            // entry; i.e. act as if this was a "br" start tag token with no
            // attributes, rather than the end tag token that it actually is."
            "br" => {
                self.unexpected_token(&token);
                self.closing_tag = None;
                let start = Token::StartTag {
                    name: "br".to_string(),
                    self_closing: false,
                    attributes: Attributes::new(),
                };
                self.in_body_start_tag("br", start);
            }

            _ => self.any_other_end_tag(name),
        }
    }

    /// "Any other end tag" in body.
    pub(in crate::tree_builder) fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //         of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let element = self.element(node);
            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then: Generate implied end tags, except for
            //          HTML elements with the same tag name as the token. If
            //          node is not the current node, then this is a parse error.
            //          Pop all the nodes from the current node up to node,
            //          including node, then stop these steps."
            if element.is_html(name) {
                self.generate_implied_end_tags_except(Some(name));
                if self.current_node() != Some(node) {
                    self.parse_error(&format!("unclosed elements before </{name}>"));
                }
                self.pop_until_id(node);
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if is_special(element) {
                self.parse_error(&format!("unexpected end tag </{name}> in {}", self.insertion_mode));
                return;
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            //          elements. Return to the step labeled loop."
        }
    }

    /// The `li`, `dd` and `dt` start tag steps: close an open list item of
    /// the same kind before inserting a new one.
    fn close_list_item(&mut self, names: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;
        // STEP 2: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.element(self.stack_of_open_elements[index]);
            // STEP 3: "Loop: If node is an li element, then run these
            //          substeps: Generate implied end tags, except for li
            //          elements. If the current node is not an li element, then
            //          this is a parse error. Pop elements from the stack of open
            //          elements until an li element has been popped from the
            //          stack. Jump to the step labeled done below."
            if node.is_html_one_of(names) {
                let name = node.name.clone();
                self.generate_implied_end_tags_except(Some(&name));
                if !self.current_node_is(&name) {
                    self.parse_error(&format!("unclosed elements before implied </{name}>"));
                }
                self.pop_until(&name);
                break;
            }
            // STEP 4: "If node is in the special category, but is not an
            //          address, div, or p element, then jump to the step labeled
            //          done below."
            if is_special(node) && !node.is_html_one_of(&["address", "div", "p"]) {
                break;
            }
            // STEP 5: "Otherwise, set node to the previous entry in the stack of
            //          open elements and return to the step labeled loop."
        }
        // STEP 6: "Done: If the stack of open elements has a p element in button
        //          scope, then close a p element."
        self.close_p_if_in_button_scope();
    }

    /// Reconstruct, insert, and push onto the list of active formatting
    /// elements.
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let id = self.insert_html_element(token);
        self.push_active_formatting_element(id);
    }

    /// The body element, when it is the second element on the stack.
    fn second_element_if_body(&self) -> Option<ElementId> {
        self.stack_of_open_elements
            .get(1)
            .copied()
            .filter(|&id| self.element(id).is_html("body"))
    }

    /// Add the token's attributes that `id` lacks, and tell the handler.
    fn merge_token_attributes(&mut self, id: ElementId, token: &Token) {
        let Token::StartTag { attributes, .. } = token else {
            return;
        };
        if self.elements[id.0].attributes.merge_missing(attributes) == 0 {
            return;
        }
        if Some(id) == self.fragment_root {
            return;
        }
        let pos = self.span.start;
        let element = &self.elements[id.0];
        self.handler.merge_attributes(element, attributes, pos);
    }
}
