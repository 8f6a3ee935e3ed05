//! Writer for converting FormatElement IR to strings
//!
//! Static tokens are appended in bulk; tree text is processed per character
//! so the current line width stays correct for wide Unicode characters.
//! Indentation is written lazily, when the first element of a line arrives,
//! so indent changes may come before or after the line break that opens the
//! line.

use super::format_element::FormatElement;
use unicode_width::UnicodeWidthChar;

/// Writer configuration
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Number of spaces per indentation level
    pub indent_size: usize,

    /// Tab width for width calculations inside text
    pub tab_width: u32,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            tab_width: 4,
        }
    }
}

pub struct Writer {
    options: WriterOptions,
    buffer: String,
    current_line_width: u32,
    max_line_width: u32,
    indent_level: usize,
    line_number: usize,
    at_line_start: bool,
}

impl Writer {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            buffer: String::with_capacity(4096),
            current_line_width: 0,
            max_line_width: 0,
            indent_level: 0,
            line_number: 1,
            at_line_start: true,
        }
    }

    /// Print a sequence of format elements to a string
    pub fn print(&mut self, elements: &[FormatElement]) -> String {
        for element in elements {
            self.print_element(element);
        }
        std::mem::take(&mut self.buffer)
    }

    fn print_element(&mut self, element: &FormatElement) {
        match element {
            FormatElement::Token(token) => {
                if token.is_empty() {
                    return;
                }
                self.write_indent();
                self.buffer.push_str(token);
                self.current_line_width += token.len() as u32;
            }

            FormatElement::Text { text, .. } => {
                if text.is_empty() {
                    return;
                }
                self.write_indent();
                for c in text.chars() {
                    let width = match c {
                        '\t' => self.options.tab_width,
                        '\n' => {
                            self.buffer.push('\n');
                            self.new_line();
                            // Continuation lines of multi-line text keep
                            // their own leading whitespace
                            self.at_line_start = false;
                            continue;
                        }
                        '\r' => continue,
                        c => c.width().unwrap_or(0) as u32,
                    };
                    self.buffer.push(c);
                    self.current_line_width += width;
                }
            }

            FormatElement::HardLineBreak => {
                self.buffer.push('\n');
                self.new_line();
            }

            FormatElement::Space => {
                if self.at_line_start {
                    return;
                }
                self.buffer.push(' ');
                self.current_line_width += 1;
            }

            FormatElement::Indent => {
                self.indent_level += 1;
            }

            FormatElement::Dedent => {
                self.indent_level = self.indent_level.saturating_sub(1);
            }
        }
    }

    fn new_line(&mut self) {
        self.max_line_width = self.max_line_width.max(self.current_line_width);
        self.current_line_width = 0;
        self.line_number += 1;
        self.at_line_start = true;
    }

    fn write_indent(&mut self) {
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        let width = self.indent_level * self.options.indent_size;
        self.buffer.extend(std::iter::repeat_n(' ', width));
        self.current_line_width += width as u32;
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn current_line_width(&self) -> u32 {
        self.current_line_width
    }

    /// Widest line written so far, in display columns
    pub fn max_line_width(&self) -> u32 {
        self.max_line_width.max(self.current_line_width)
    }

    /// Reset writer state (keeps options)
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.current_line_width = 0;
        self.max_line_width = 0;
        self.indent_level = 0;
        self.line_number = 1;
        self.at_line_start = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::format_element::{dedent, hard_line_break, indent, space, text, token};
    use rowan::TextSize;

    #[test]
    fn test_token_fast_path() {
        let mut writer = Writer::new(WriterOptions::default());
        let result = writer.print(&[token("let"), space(), token("x"), token(";")]);
        assert_eq!(result, "let x;");
    }

    #[test]
    fn test_unicode_width_calculation() {
        let mut writer = Writer::new(WriterOptions::default());
        let result = writer.print(&[
            text("s", TextSize::from(0)),
            space(),
            text("世界", TextSize::from(2)),
        ]);
        assert_eq!(result, "s 世界");
        assert_eq!(writer.current_line_width(), 6);
    }

    #[test]
    fn test_lazy_indentation() {
        let mut writer = Writer::new(WriterOptions::default());
        let result = writer.print(&[
            token("{"),
            indent(),
            hard_line_break(),
            token("a;"),
            dedent(),
            hard_line_break(),
            token("}"),
        ]);
        assert_eq!(result, "{\n  a;\n}");
        assert_eq!(writer.line_number(), 3);
    }

    #[test]
    fn test_space_is_dropped_at_line_start() {
        let mut writer = Writer::new(WriterOptions::default());
        let result = writer.print(&[token("a"), hard_line_break(), space(), token("b")]);
        assert_eq!(result, "a\nb");
    }

    #[test]
    fn test_reset() {
        let mut writer = Writer::new(WriterOptions {
            indent_size: 4,
            ..Default::default()
        });
        assert_eq!(writer.print(&[indent(), token("x")]), "    x");
        writer.reset();
        assert_eq!(writer.print(&[token("x")]), "x");
        assert_eq!(writer.max_line_width(), 1);
    }
}
