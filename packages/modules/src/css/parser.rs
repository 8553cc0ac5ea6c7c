//! Stylesheet Parser
//!
//! Hand-written scanner producing the raws-preserving tree in `ast`. The
//! parser is deliberately lenient: anything it does not understand inside
//! selectors, params or values is kept as raw text, and only structural
//! problems (unclosed blocks, stray `}`) are reported as errors.

use crate::css::ast::{
    AtRule, AtRuleRaws, Declaration, DeclarationRaws, Node, Root, Rule, RuleRaws, SourcePosition,
};
use crate::error::{CompileError, ErrorKind};

/// Parse a stylesheet.
pub fn parse(input: &str) -> Result<Root, CompileError> {
    let mut parser = Parser::new(input);
    let (nodes, after) = parser.parse_nodes(true)?;
    Ok(Root { nodes, after })
}

fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn split_trailing_whitespace(raw: &str) -> (String, String) {
    let kept = raw.trim_end_matches(is_css_whitespace);
    (kept.to_string(), raw[kept.len()..].to_string())
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Parser {
    fn new(input: &str) -> Parser {
        Parser {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn position(&self) -> SourcePosition {
        SourcePosition {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Whitespace, comments and stray semicolons between nodes.
    fn take_trivia(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.peek() {
                Some(c) if is_css_whitespace(c) || c == ';' => {
                    out.push(c);
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.take_comment(&mut out);
                }
                _ => return out,
            }
        }
    }

    /// `/* ... */`, or the rest of the input if the comment never closes.
    fn take_comment(&mut self, out: &mut String) {
        out.push('/');
        out.push('*');
        self.bump();
        self.bump();
        while let Some(c) = self.bump() {
            out.push(c);
            if c == '*' && self.peek() == Some('/') {
                out.push('/');
                self.bump();
                return;
            }
        }
    }

    /// A quoted string, quotes included. Unterminated strings run to the
    /// end of the input.
    fn take_string(&mut self, out: &mut String) {
        let quote = match self.bump() {
            Some(c) => c,
            None => return,
        };
        out.push(quote);
        while let Some(c) = self.bump() {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    out.push(escaped);
                }
            } else if c == quote {
                return;
            }
        }
    }

    /// Raw text up to (not including) the next top-level `{`, `;` or `}`.
    /// Strings, comments and parenthesized groups are opaque.
    fn take_until_terminator(&mut self) -> (String, Option<char>) {
        let mut out = String::new();
        let mut parens = 0usize;
        loop {
            match self.peek() {
                None => return (out, None),
                Some(c @ ('{' | ';' | '}')) if parens == 0 => return (out, Some(c)),
                Some('"') | Some('\'') => self.take_string(&mut out),
                Some('/') if self.peek_at(1) == Some('*') => self.take_comment(&mut out),
                Some('(') => {
                    parens += 1;
                    out.push('(');
                    self.bump();
                }
                Some(')') => {
                    parens = parens.saturating_sub(1);
                    out.push(')');
                    self.bump();
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    fn take_at_rule_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    /// Nodes until `}` (left unconsumed) or the end of input. The second
    /// element is the trivia trailing the last node.
    fn parse_nodes(&mut self, top: bool) -> Result<(Vec<Node>, String), CompileError> {
        let mut nodes = Vec::new();
        loop {
            let before = self.take_trivia();
            match self.peek() {
                None => {
                    if top {
                        return Ok((nodes, before));
                    }
                    return Err(CompileError::new(
                        ErrorKind::syntax("Unclosed block"),
                        self.position(),
                    ));
                }
                Some('}') => {
                    if top {
                        return Err(CompileError::new(
                            ErrorKind::syntax("Unexpected }"),
                            self.position(),
                        ));
                    }
                    return Ok((nodes, before));
                }
                Some('@') => nodes.push(Node::AtRule(self.parse_at_rule(before)?)),
                Some(_) => nodes.push(self.parse_rule_or_declaration(before)?),
            }
        }
    }

    fn parse_at_rule(&mut self, before: String) -> Result<AtRule, CompileError> {
        let pos = self.position();
        self.bump();
        let name = self.take_at_rule_name();
        let mut after_name = String::new();
        while let Some(c) = self.peek() {
            if is_css_whitespace(c) {
                after_name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let (raw, terminator) = self.take_until_terminator();
        let (params, between) = split_trailing_whitespace(&raw);
        let mut raws = AtRuleRaws {
            before,
            after_name,
            between,
            after: String::new(),
        };
        match terminator {
            Some('{') => {
                self.bump();
                let (children, after) = self.parse_nodes(false)?;
                if self.peek() != Some('}') {
                    return Err(CompileError::new(
                        ErrorKind::syntax("Unclosed block"),
                        self.position(),
                    ));
                }
                self.bump();
                raws.after = after;
                Ok(AtRule {
                    name,
                    params,
                    nodes: Some(children),
                    has_semicolon: false,
                    raws,
                    pos,
                })
            }
            Some(';') => {
                self.bump();
                Ok(AtRule {
                    name,
                    params,
                    nodes: None,
                    has_semicolon: true,
                    raws,
                    pos,
                })
            }
            // `}` stays for the enclosing block, EOF ends the statement.
            Some(_) | None => Ok(AtRule {
                name,
                params,
                nodes: None,
                has_semicolon: false,
                raws,
                pos,
            }),
        }
    }

    fn parse_rule_or_declaration(&mut self, before: String) -> Result<Node, CompileError> {
        let pos = self.position();
        let (raw, terminator) = self.take_until_terminator();
        match terminator {
            Some('{') => {
                self.bump();
                let (selector, between) = split_trailing_whitespace(&raw);
                let (children, after) = self.parse_nodes(false)?;
                if self.peek() != Some('}') {
                    return Err(CompileError::new(
                        ErrorKind::syntax("Unclosed block"),
                        self.position(),
                    ));
                }
                self.bump();
                Ok(Node::Rule(Rule {
                    selector,
                    nodes: children,
                    raws: RuleRaws {
                        before,
                        between,
                        after,
                    },
                    pos,
                }))
            }
            Some(';') => {
                self.bump();
                self.build_declaration(raw, before, true, pos)
            }
            // `}` stays for the enclosing block, EOF ends the declaration.
            Some(_) | None => self.build_declaration(raw, before, false, pos),
        }
    }

    fn build_declaration(
        &self,
        raw: String,
        before: String,
        has_semicolon: bool,
        pos: SourcePosition,
    ) -> Result<Node, CompileError> {
        let Some(colon) = find_top_level_colon(&raw) else {
            return Err(CompileError::new(
                ErrorKind::syntax(format!("Unknown word \"{}\"", raw.trim())),
                pos,
            ));
        };
        let chars: Vec<char> = raw.chars().collect();
        let prop_raw: String = chars[..colon].iter().collect();
        let value_raw: String = chars[colon + 1..].iter().collect();

        let (prop, prop_trailing) = split_trailing_whitespace(&prop_raw);
        if prop.is_empty() {
            return Err(CompileError::new(
                ErrorKind::syntax(format!("Unknown word \"{}\"", raw.trim())),
                pos,
            ));
        }
        let value_leading: String = value_raw
            .chars()
            .take_while(|c| is_css_whitespace(*c))
            .collect();
        let (value_body, after_value) = split_trailing_whitespace(&value_raw[value_leading.len()..]);

        let mut between = prop_trailing;
        between.push(':');
        between.push_str(&value_leading);

        Ok(Node::Declaration(Declaration {
            prop,
            value: value_body,
            has_semicolon,
            raws: DeclarationRaws {
                before,
                between,
                after_value,
            },
            pos,
        }))
    }
}

/// Index (in chars) of the colon separating prop from value, skipping
/// strings and parenthesized groups.
fn find_top_level_colon(raw: &str) -> Option<usize> {
    let chars: Vec<char> = raw.chars().collect();
    let mut parens = 0usize;
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            quote @ ('"' | '\'') => {
                index += 1;
                while index < chars.len() {
                    if chars[index] == '\\' {
                        index += 1;
                    } else if chars[index] == quote {
                        break;
                    }
                    index += 1;
                }
            }
            ':' if parens == 0 => return Some(index),
            _ => {}
        }
        index += 1;
    }
    None
}
