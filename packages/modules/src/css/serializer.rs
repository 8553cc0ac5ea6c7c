//! Stylesheet Serializer
//!
//! Inverse of the parser: emits every node together with its raws, so
//! parse + serialize is the identity on any input the parser accepts.

use crate::css::ast::{Node, Root};

pub fn serialize(root: &Root) -> String {
    let mut out = String::new();
    for node in &root.nodes {
        serialize_node(node, &mut out);
    }
    out.push_str(&root.after);
    out
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Rule(rule) => {
            out.push_str(&rule.raws.before);
            out.push_str(&rule.selector);
            out.push_str(&rule.raws.between);
            out.push('{');
            for child in &rule.nodes {
                serialize_node(child, out);
            }
            out.push_str(&rule.raws.after);
            out.push('}');
        }
        Node::AtRule(at_rule) => {
            out.push_str(&at_rule.raws.before);
            out.push('@');
            out.push_str(&at_rule.name);
            out.push_str(&at_rule.raws.after_name);
            out.push_str(&at_rule.params);
            out.push_str(&at_rule.raws.between);
            match &at_rule.nodes {
                Some(children) => {
                    out.push('{');
                    for child in children {
                        serialize_node(child, out);
                    }
                    out.push_str(&at_rule.raws.after);
                    out.push('}');
                }
                None => {
                    if at_rule.has_semicolon {
                        out.push(';');
                    }
                }
            }
        }
        Node::Declaration(declaration) => {
            out.push_str(&declaration.raws.before);
            out.push_str(&declaration.prop);
            out.push_str(&declaration.raws.between);
            out.push_str(&declaration.value);
            out.push_str(&declaration.raws.after_value);
            if declaration.has_semicolon {
                out.push(';');
            }
        }
    }
}
