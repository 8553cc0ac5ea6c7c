//! Selector Tokenizer
//!
//! Converts a selector string into the node tree. The scanner is total:
//! spans it cannot model (quoted strings, nth formulas, unclosed
//! constructs) become `Invalid` nodes carrying the raw text, so
//! `stringify(parse(input))` reproduces the input byte for byte.

use crate::ast::{Selector, SelectorList, SelectorNode};

/// Parse a full selector list, splitting on top-level commas.
pub fn parse(input: &str) -> SelectorList {
    let mut scanner = Scanner::new(input);
    let mut selectors = Vec::new();
    let mut before = String::new();
    loop {
        let nodes = scanner.parse_selector_nodes(false);
        selectors.push(Selector {
            nodes,
            before: std::mem::take(&mut before),
        });
        if scanner.eat(',') {
            before = scanner.take_whitespace();
        } else {
            break;
        }
    }
    SelectorList::new(selectors)
}

// CSS counts only these five characters as whitespace; char::is_whitespace
// would also match non-breaking space, which is a valid identifier char.
fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Scanner {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn take_whitespace(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !is_css_whitespace(c) {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        out
    }

    /// Identifier with CSS escape sequences kept verbatim. A hex escape
    /// absorbs up to six hex digits plus the single whitespace that
    /// terminates it.
    fn take_identifier(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                out.push(c);
                self.pos += 1;
                let mut hex_len = 0;
                while hex_len < 6 {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            out.push(h);
                            self.pos += 1;
                            hex_len += 1;
                        }
                        _ => break,
                    }
                }
                if hex_len > 0 {
                    if let Some(ws) = self.peek() {
                        if is_css_whitespace(ws) {
                            out.push(ws);
                            self.pos += 1;
                        }
                    }
                } else if let Some(escaped) = self.bump() {
                    out.push(escaped);
                }
            } else if is_identifier_char(c) {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        out
    }

    /// Quoted string including both quotes, escapes kept verbatim.
    fn take_string(&mut self, quote: char) -> String {
        let mut out = String::new();
        out.push(quote);
        self.pos += 1;
        while let Some(c) = self.bump() {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    out.push(escaped);
                }
            } else if c == quote {
                break;
            }
        }
        out
    }

    fn take_comment(&mut self) -> String {
        let mut out = String::from("/*");
        self.pos += 2;
        while let Some(c) = self.bump() {
            out.push(c);
            if c == '*' && self.peek() == Some('/') {
                out.push('/');
                self.pos += 1;
                break;
            }
        }
        out
    }

    /// Scan nodes until end of input, a top-level comma, or the closing
    /// paren of the surrounding functional pseudo-class. Inside an
    /// argument, commas are operators rather than list separators.
    fn parse_selector_nodes(&mut self, in_argument: bool) -> Vec<SelectorNode> {
        let mut nodes: Vec<SelectorNode> = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                ',' if !in_argument => break,
                ')' if in_argument => break,
                c if is_css_whitespace(c) => {
                    let before = self.take_whitespace();
                    // whitespace preceding a combinator belongs to it
                    match self.peek() {
                        Some(op @ ('>' | '+' | '~')) => {
                            self.pos += 1;
                            let after = self.take_whitespace();
                            nodes.push(SelectorNode::Operator {
                                value: op.to_string(),
                                before,
                                after,
                            });
                        }
                        Some(',') if in_argument => {
                            self.pos += 1;
                            let after = self.take_whitespace();
                            nodes.push(SelectorNode::Operator {
                                value: ",".to_string(),
                                before,
                                after,
                            });
                        }
                        _ => nodes.push(SelectorNode::Spacing { value: before }),
                    }
                }
                '>' | '+' | '~' => {
                    self.pos += 1;
                    let after = self.take_whitespace();
                    nodes.push(SelectorNode::Operator {
                        value: c.to_string(),
                        before: String::new(),
                        after,
                    });
                }
                ',' => {
                    self.pos += 1;
                    let after = self.take_whitespace();
                    nodes.push(SelectorNode::Operator {
                        value: ",".to_string(),
                        before: String::new(),
                        after,
                    });
                }
                '.' => {
                    self.pos += 1;
                    if self.peek().map_or(false, is_identifier_start) {
                        nodes.push(SelectorNode::Class {
                            name: self.take_identifier(),
                        });
                    } else {
                        push_invalid(&mut nodes, ".".to_string());
                    }
                }
                '#' => {
                    self.pos += 1;
                    if self.peek().map_or(false, is_identifier_start) {
                        nodes.push(SelectorNode::Id {
                            name: self.take_identifier(),
                        });
                    } else {
                        push_invalid(&mut nodes, "#".to_string());
                    }
                }
                '*' => {
                    self.pos += 1;
                    nodes.push(SelectorNode::Universal);
                }
                '[' => {
                    self.pos += 1;
                    self.scan_attribute(&mut nodes);
                }
                ':' => self.scan_pseudo(&mut nodes),
                '"' | '\'' => {
                    let raw = self.take_string(c);
                    push_invalid(&mut nodes, raw);
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let raw = self.take_comment();
                    push_invalid(&mut nodes, raw);
                }
                c if is_identifier_start(c) => {
                    nodes.push(SelectorNode::Element {
                        name: self.take_identifier(),
                    });
                }
                c => {
                    self.pos += 1;
                    push_invalid(&mut nodes, c.to_string());
                }
            }
        }
        nodes
    }

    fn scan_attribute(&mut self, nodes: &mut Vec<SelectorNode>) {
        let mut content = String::new();
        let mut closed = false;
        while let Some(c) = self.peek() {
            match c {
                ']' => {
                    self.pos += 1;
                    closed = true;
                    break;
                }
                '"' | '\'' => content.push_str(&self.take_string(c)),
                '\\' => {
                    content.push(c);
                    self.pos += 1;
                    if let Some(escaped) = self.bump() {
                        content.push(escaped);
                    }
                }
                _ => {
                    content.push(c);
                    self.pos += 1;
                }
            }
        }
        if closed {
            nodes.push(SelectorNode::Attribute { content });
        } else {
            push_invalid(nodes, format!("[{}", content));
        }
    }

    fn scan_pseudo(&mut self, nodes: &mut Vec<SelectorNode>) {
        if self.peek_at(1) == Some(':') {
            if self.peek_at(2).map_or(false, is_identifier_start) {
                self.pos += 2;
                nodes.push(SelectorNode::PseudoElement {
                    name: self.take_identifier(),
                });
            } else {
                self.pos += 2;
                push_invalid(nodes, "::".to_string());
            }
            return;
        }
        if !self.peek_at(1).map_or(false, is_identifier_start) {
            self.pos += 1;
            push_invalid(nodes, ":".to_string());
            return;
        }
        self.pos += 1;
        let name = self.take_identifier();
        if self.eat('(') {
            let inner = self.parse_selector_nodes(true);
            if self.eat(')') {
                nodes.push(SelectorNode::NestedPseudoClass {
                    name,
                    selector: Selector::new(inner),
                });
            } else {
                // unclosed argument: fall back to raw nodes so the input
                // still serializes unchanged
                push_invalid(nodes, format!(":{}(", name));
                nodes.extend(inner);
            }
        } else {
            nodes.push(SelectorNode::PseudoClass { name });
        }
    }
}

fn push_invalid(nodes: &mut Vec<SelectorNode>, text: String) {
    if let Some(SelectorNode::Invalid { value }) = nodes.last_mut() {
        value.push_str(&text);
    } else {
        nodes.push(SelectorNode::Invalid { value: text });
    }
}
