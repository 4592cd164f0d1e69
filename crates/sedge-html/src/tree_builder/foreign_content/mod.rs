//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! SVG and MathML subtrees: elements keep the namespace of their parent,
//! names get their case restored, and a fixed set of HTML tags breaks back
//! out into HTML.

mod mathml;
mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use sedge_dom::Namespace;

use super::{TreeBuilder, is_whitespace};
use crate::tokenizer::Token;
use crate::tree_handler::TreeHandler;

/// "A start tag whose tag name is one of: ..." these leave foreign content.
const BREAKOUT_TAGS: &[&str] = &[
    "b", "big", "blockquote", "body", "br", "center", "code", "dd", "div", "dl", "dt", "em",
    "embed", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
    "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong", "strike",
    "sub", "sup", "table", "tt", "u", "ul", "var",
];

/// True if a start tag leaves foreign content: one of the breakout tags, or a
/// `font` with a `color`, `face` or `size` attribute.
fn is_breakout(token: &Token) -> bool {
    match token {
        Token::StartTag {
            name, attributes, ..
        } => {
            BREAKOUT_TAGS.contains(&name.as_str())
                || (name == "font"
                    && ["color", "face", "size"]
                        .iter()
                        .any(|attr| attributes.contains(attr)))
        }
        _ => false,
    }
}

impl<H: TreeHandler> TreeBuilder<H> {
    /// Process a token with the foreign content rules.
    pub(super) fn process_in_foreign_content(&mut self, token: Token) {
        match &token {
            // "A character token that is U+0000 NULL"
            // "Insert the token's character." "If the token is not one of ...
            // whitespace, set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                let text = if data.contains('\0') {
                    self.parse_error("unexpected-null-character in foreign content");
                    data.replace('\0', "\u{FFFD}")
                } else {
                    data.clone()
                };
                if !text.chars().all(is_whitespace) {
                    self.frameset_ok = false;
                }
                let span = self.span;
                self.insert_characters(&text, span);
            }

            // "A comment token": "Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token": "Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected_token(&token),

            Token::StartTag { .. } if is_breakout(&token) => {
                self.unexpected_token(&token);
                self.break_out_of_foreign_content(token);
            }

            // "Any other start tag"
            Token::StartTag {
                name, self_closing, ..
            } => {
                let Some(adjusted) = self.adjusted_current_node() else {
                    return;
                };
                let namespace = self.element(adjusted).namespace;
                let self_closing = *self_closing;
                let is_script = name == "script";

                // "If the adjusted current node is an element in the SVG
                // namespace, adjust SVG tag name"
                let mut token = token;
                if namespace == Namespace::Svg
                    && let Token::StartTag { name, .. } = &mut token
                    && let Some(adjusted_name) = adjust_svg_tag_name(name)
                {
                    *name = adjusted_name.to_string();
                }

                // "Insert a foreign element for the token, with adjusted
                // current node's namespace"
                let _ = self.insert_foreign_element(&token, namespace);

                // "If the token has its self-closing flag set, then run the
                // appropriate steps from the following list": acknowledge it
                // and pop the element. An SVG script is handled the same way,
                // as if by its end tag.
                if self_closing {
                    self.acknowledge_self_closing();
                    if namespace == Namespace::Svg && is_script {
                        self.closing_tag = Some("script".to_string());
                    }
                    let _ = self.pop();
                }
            }

            // "An end tag whose tag name is "script", if the current node is
            // an SVG script element": "Pop the current script element off the
            // stack of open elements."
            Token::EndTag { name }
                if name == "script"
                    && self
                        .current_node()
                        .is_some_and(|id| self.element(id).is(Namespace::Svg, "script")) =>
            {
                let _ = self.pop();
            }

            // "An end tag whose tag name is "br", "p"": "Parse error." Then
            // leave foreign content like a breakout start tag.
            Token::EndTag { name } if name == "br" || name == "p" => {
                self.unexpected_token(&token);
                self.break_out_of_foreign_content(token);
            }

            Token::EndTag { name } => {
                let name = name.clone();
                self.foreign_any_other_end_tag(&name, token);
            }

            // The dispatcher sends end-of-file to the insertion mode.
            Token::EndOfFile => {
                let mode = self.insertion_mode;
                self.process_using_rules(mode, token);
            }
        }
    }

    /// "While the current node is not a MathML text integration point, an
    /// HTML integration point, or an element in the HTML namespace, pop
    /// elements from the stack of open elements." "Reprocess the token
    /// according to the rules given in the section corresponding to the
    /// current insertion mode in HTML content."
    fn break_out_of_foreign_content(&mut self, token: Token) {
        while let Some(id) = self.current_node() {
            let node = self.element(id);
            if node.namespace == Namespace::Html
                || node.is_mathml_text_integration_point()
                || node.is_html_integration_point()
            {
                break;
            }
            let _ = self.pop();
        }
        let mode = self.insertion_mode;
        self.process_using_rules(mode, token);
    }

    /// "Any other end tag" in foreign content.
    fn foreign_any_other_end_tag(&mut self, name: &str, token: Token) {
        let Some(mut index) = self.stack_of_open_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 1-2: "Initialize node to be the current node (the bottommost
        //            node of the stack)." "If node's tag name, converted to
        //            ASCII lowercase, is not the same as the tag name of the
        //            token, then this is a parse error."
        let current = self.stack_of_open_elements[index];
        if !self.element(current).name.eq_ignore_ascii_case(name) {
            self.unexpected_token(&token);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return. (fragment case)"
            if index == 0 {
                return;
            }
            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            let node = self.stack_of_open_elements[index];
            if self.element(node).name.eq_ignore_ascii_case(name) {
                self.pop_until_id(node);
                return;
            }
            // STEP 5: "Set node to the previous entry in the stack of open
            //          elements."
            index -= 1;
            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules
            //          given in the section corresponding to the current
            //          insertion mode in HTML content."
            let node = self.stack_of_open_elements[index];
            if self.element(node).namespace == Namespace::Html {
                let mode = self.insertion_mode;
                self.process_using_rules(mode, token);
                return;
            }
        }
    }
}
