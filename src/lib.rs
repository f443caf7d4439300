//! docsynth - Ruby documentation synthesizer.
//!
//! docsynth analyzes Ruby source and produces YARD-style documentation
//! blocks for every declared method, inferring each method's effective
//! visibility from the `private` regions of its enclosing class, module, or
//! singleton-class body, then rendering per-method and per-type blocks
//! around the unmodified source.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter-ruby wrapper producing a [`ParsedFile`]
//! - `analysis`: scope walker, metadata extraction, visibility classification
//! - `literal`: default-value literal heuristics
//! - `render`: documentation block synthesis
//! - `cli`: command-line frontend
//!
//! The core entry point is [`generate_documentation`]. It is a pure
//! function of the source text: identical input yields byte-identical
//! output, and concurrent invocation over distinct inputs needs no
//! coordination.

pub mod analysis;
pub mod cli;
pub mod literal;
pub mod parser;
pub mod render;

pub use analysis::{
    classify, extract_types, resolve_private_methods, DeclaredVisibility, MethodInfo, MethodScope,
    ParamInfo, ScopeState, Span, TypeInfo, TypeKind, VisibilityTag,
};
pub use parser::{parse, ParseError, ParsedFile};
pub use render::{render_param, synthesize};

/// Generate documentation for one unit of Ruby source.
///
/// Parses the source, resolves private-visibility regions, extracts type
/// and method metadata, and renders the final document. Source declaring no
/// classes or modules yields an empty string. The only failure mode is a
/// [`ParseError`]; there is no partial output.
pub fn generate_documentation(source: &str) -> Result<String, ParseError> {
    let parsed = parser::parse(source)?;
    let private_names = analysis::resolve_private_methods(&parsed);
    let types = analysis::extract_types(&parsed);
    Ok(render::synthesize(&types, &private_names))
}
