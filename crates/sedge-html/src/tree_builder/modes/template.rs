//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
//!
//! Template contents can be any fragment of a document, so the first start
//! tag decides which mode the rest of the template is parsed in.

use crate::tokenizer::Token;
use crate::tree_builder::{InsertionMode, TreeBuilder};
use crate::tree_handler::TreeHandler;

impl<H: TreeHandler> TreeBuilder<H> {
    pub(in crate::tree_builder) fn handle_in_template_mode(&mut self, token: Token) {
        match &token {
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.process_using_rules(InsertionMode::InBody, token);
            }

            Token::StartTag { name, .. } => {
                let mode = match name.as_str() {
                    "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                    | "style" | "template" | "title" => {
                        self.process_using_rules(InsertionMode::InHead, token);
                        return;
                    }
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    "col" => InsertionMode::InColumnGroup,
                    "tr" => InsertionMode::InTableBody,
                    "td" | "th" => InsertionMode::InRow,
                    _ => InsertionMode::InBody,
                };
                // "Pop the current template insertion mode off the stack of
                // template insertion modes. Push "in table" onto the stack of
                // template insertion modes so that it is the new current
                // template insertion mode. Switch the insertion mode to "in
                // table", and reprocess the token." Likewise for the others.
                let _ = self.template_insertion_modes.pop();
                self.template_insertion_modes.push(mode);
                self.switch_mode(mode);
                self.reprocess_token(token);
            }

            Token::EndTag { name } if name == "template" => {
                self.process_using_rules(InsertionMode::InHead, token);
            }

            // "Any other end tag": "Parse error. Ignore the token."
            Token::EndTag { .. } => self.unexpected_token(&token),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.stack_has_html("template") {
                    self.stop_parsing();
                    return;
                }
                // "Otherwise, this is a parse error. Pop elements from the
                // stack of open elements until a template element has been
                // popped from the stack. Clear the list of active formatting
                // elements up to the last marker. Pop the current template
                // insertion mode off the stack of template insertion modes.
                // Reset the insertion mode appropriately. Reprocess the token."
                self.unexpected_token(&token);
                self.pop_until("template");
                self.clear_active_formatting_elements_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                self.reprocess_token(token);
            }
        }
    }
}
