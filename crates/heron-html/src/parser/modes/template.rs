use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder};
use crate::parser::sink::TreeSink;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { .. } | Token::Comment { .. } | Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } => {
                let next = match name.as_str() {
                    "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
                    | "template" | "title" => return self.handle_in_head_mode(token),
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    "col" => InsertionMode::InColumnGroup,
                    "tr" => InsertionMode::InTableBody,
                    "td" | "th" => InsertionMode::InRow,
                    _ => InsertionMode::InBody,
                };
                // "Pop the current template insertion mode off the stack of
                // template insertion modes. Push X onto the stack of template
                // insertion modes so that it is the new current template
                // insertion mode. Switch the insertion mode to X, and reprocess
                // the token."
                let _ = self.template_modes.pop();
                self.template_modes.push(next);
                ProcessResult::Reprocess(next, token)
            }
            Token::EndTag { name } if name == "template" => self.handle_in_head_mode(token),
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.stack_contains("template") {
                    self.stop_parsing();
                    return ProcessResult::Done;
                }
                // "Otherwise, this is a parse error. Pop elements from the stack
                // of open elements until a template element has been popped from
                // the stack. Clear the list of active formatting elements up to
                // the last marker. Pop the current template insertion mode off
                // the stack of template insertion modes. Reset the insertion mode
                // appropriately. Reprocess the token."
                self.unexpected(&token);
                self.pop_until("template");
                self.clear_active_formatting_to_last_marker();
                let _ = self.template_modes.pop();
                self.reset_insertion_mode();
                ProcessResult::Reprocess(self.mode, token)
            }
        }
    }
}
