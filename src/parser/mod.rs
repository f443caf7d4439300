//! Ruby source parsing.
//!
//! Thin wrapper around tree-sitter-ruby. The rest of the crate never talks
//! to tree-sitter's parser directly; it consumes a [`ParsedFile`], which
//! bundles the parse tree with the source bytes it was built from so node
//! text can be recovered without re-reading anything.
//!
//! A tree containing ERROR or MISSING nodes is treated as a failed parse:
//! the pipeline produces either a complete document or a [`ParseError`],
//! never partial output.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors produced while parsing Ruby source.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to load Ruby grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser returned no tree")]
    Failed,
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Holds a parsed tree together with the source it came from.
///
/// Kept separate from the extracted metadata so the tree can serve multiple
/// analysis passes (scope resolution, metadata extraction) on one parse.
#[derive(Debug)]
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
}

impl ParsedFile {
    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Parse a unit of Ruby source.
///
/// Fails when the grammar cannot be loaded, when tree-sitter bails out
/// entirely, or when the resulting tree contains syntax errors.
pub fn parse(source: &str) -> Result<ParsedFile, ParseError> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_ruby::LANGUAGE.into();
    parser.set_language(&language)?;

    let tree = parser.parse(source, None).ok_or(ParseError::Failed)?;

    if tree.root_node().has_error() {
        let (line, column) = first_error_position(tree.root_node());
        return Err(ParseError::Syntax { line, column });
    }

    Ok(ParsedFile {
        tree,
        source: source.as_bytes().to_vec(),
    })
}

/// Locate the first ERROR or MISSING node, depth-first.
fn first_error_position(node: Node) -> (usize, usize) {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return (pos.row + 1, pos.column + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            return first_error_position(child);
        }
    }
    let pos = node.start_position();
    (pos.row + 1, pos.column + 1)
}
