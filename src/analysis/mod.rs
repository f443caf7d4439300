//! Ruby source analysis.
//!
//! Three passes over one parse tree:
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌──────────────────┐
//! │ ParsedFile   │────▶│ scope walker    │────▶│ private-name set │
//! │ (tree-sitter)│     └─────────────────┘     └──────────────────┘
//! │              │     ┌─────────────────┐     ┌──────────────────┐
//! │              │────▶│ extractor       │────▶│ TypeInfo list    │
//! └──────────────┘     └─────────────────┘     └──────────────────┘
//!                                 both feed ▼
//!                      ┌─────────────────┐
//!                      │ classifier      │──▶ VisibilityTag per method
//!                      └─────────────────┘
//! ```
//!
//! All passes are pure functions of the parse; nothing is cached or shared
//! across invocations.

mod extract;
mod facts;
mod scope;
mod visibility;

pub use extract::extract_types;
pub use facts::{DeclaredVisibility, MethodInfo, MethodScope, ParamInfo, Span, TypeInfo, TypeKind};
pub use scope::{resolve_private_methods, ScopeState};
pub use visibility::{classify, VisibilityTag};
