//! Visibility scope resolution.
//!
//! A single depth-first walk over the parse tree that answers one question:
//! which method names are declared inside a `private` region of their
//! enclosing class, module, or singleton-class body?
//!
//! The active [`ScopeState`] is threaded explicitly through the recursion -
//! each call receives the state in effect before its node and returns the
//! state in effect after it. There is no shared mutable field, which is what
//! makes concurrent invocation over distinct inputs trivially safe.
//!
//! Two asymmetries are intentional and load-bearing:
//! - Only the bare, zero-argument `private` statement flips the region.
//!   `public` and `protected` statements, and every argument-taking form
//!   (`private :name`, `private def ...`), leave the state untouched here;
//!   those forms are the metadata extractor's concern.
//! - In the tree-sitter-ruby grammar the bare statement surfaces as a plain
//!   `identifier` node in statement position, while argument-taking forms
//!   surface as `call` nodes. The walker keys off that distinction.

use std::collections::HashSet;

use tree_sitter::Node;

use crate::parser::ParsedFile;

/// The active visibility region within one lexical scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Public,
    Private,
}

/// Resolve the set of method names declared inside `private` regions.
///
/// Names are collected across every class, module, and singleton-class body
/// in the tree. Each body starts over at [`ScopeState::Public`]; whatever
/// state a body ends in is discarded when it closes, so regions never leak
/// to sibling or parent scopes.
pub fn resolve_private_methods(parsed: &ParsedFile) -> HashSet<String> {
    let mut names = HashSet::new();
    walk(parsed.tree.root_node(), parsed, ScopeState::Public, &mut names);
    names
}

/// Body of a class/module/singleton-class node. Falls back to the named
/// child when the grammar does not expose it as a field.
pub(crate) fn type_body(node: Node) -> Option<Node> {
    node.child_by_field_name("body").or_else(|| {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "body_statement");
        found
    })
}

/// Visit one node. Returns the state in effect for the node's next sibling.
fn walk(
    node: Node,
    parsed: &ParsedFile,
    state: ScopeState,
    names: &mut HashSet<String>,
) -> ScopeState {
    match node.kind() {
        // A type or singleton-class body opens a fresh scope. The ending
        // state of the nested traversal is discarded.
        "class" | "module" | "singleton_class" => {
            if let Some(body) = type_body(node) {
                walk_scope_body(body, parsed, names);
            }
            state
        }

        "method" | "singleton_method" => {
            if state == ScopeState::Private {
                if let Some(name) = node.child_by_field_name("name") {
                    // Operator and setter definitions are not plain
                    // identifiers and stay out of the set.
                    if name.kind() == "identifier" {
                        names.insert(parsed.node_text(name).to_string());
                    }
                }
            }
            // The body may hide nested type declarations. Anything that
            // happens inside stays inside: a def never changes the region
            // its siblings see.
            if let Some(body) = node.child_by_field_name("body") {
                walk(body, parsed, state, names);
            }
            state
        }

        // Bare statement form. Only `private` flips the region.
        "identifier" => {
            if parsed.node_text(node) == "private" {
                ScopeState::Private
            } else {
                state
            }
        }

        // Argument-taking calls never flip the region, but a call can carry
        // a block with nested declarations, so descend. State changes inside
        // are confined to the call.
        "call" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                walk(child, parsed, state, names);
            }
            state
        }

        // Everything else is a transparent structural container: thread the
        // state through its children in source order and let the result
        // propagate to the container's siblings.
        _ => {
            let mut current = state;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                current = walk(child, parsed, current, names);
            }
            current
        }
    }
}

/// Traverse a type/singleton body with a fresh `Public` state.
fn walk_scope_body(body: Node, parsed: &ParsedFile, names: &mut HashSet<String>) {
    if body.kind() == "body_statement" {
        let mut state = ScopeState::Public;
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            state = walk(child, parsed, state, names);
        }
    } else {
        // Single-expression body.
        walk(body, parsed, ScopeState::Public, names);
    }
}
