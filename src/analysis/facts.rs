//! Metadata structures extracted from Ruby parse trees.

use std::fmt;

use serde::Serialize;

/// Source location span with byte offsets and line positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// End line (1-indexed).
    pub end_line: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: node.start_position().row + 1, // tree-sitter is 0-indexed
            end_line: node.end_position().row + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_line, self.end_line)
    }
}

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Module,
}

impl TypeKind {
    /// The Ruby keyword that opens this kind of declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Module => "module",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Whether a method is defined on instances or on the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodScope {
    Instance,
    Singleton,
}

impl MethodScope {
    /// The separator conventionally used between type and method name in
    /// documentation headers: `#` for instance methods, `.` for singleton.
    pub fn separator(&self) -> &'static str {
        match self {
            MethodScope::Instance => "#",
            MethodScope::Singleton => ".",
        }
    }
}

/// Visibility as declared in source, before scope-region classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredVisibility {
    Public,
    Private,
    Protected,
}

/// A single formal parameter.
///
/// Keyword parameters keep their trailing `:` marker in `name` (`"opts:"`);
/// splat and block parameters keep their sigils (`"*args"`, `"&blk"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    /// Parameter name as written, including marker/sigil.
    pub name: String,
    /// Raw source text of the default value, when one is present.
    pub default: Option<String>,
}

impl ParamInfo {
    /// A parameter with no default value.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter with a default value.
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// A method declared directly in a type body.
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    /// Method name as written (`"abc"`, `"=="`, `"name="`).
    pub name: String,
    /// Instance or singleton scope.
    pub scope: MethodScope,
    /// Formal parameters in declaration order.
    pub params: Vec<ParamInfo>,
    /// Visibility as declared in source.
    pub visibility: DeclaredVisibility,
    /// Verbatim definition text. Always ends with a newline.
    #[serde(skip)]
    pub source: String,
    /// Span of the definition in the original source.
    pub span: Span,
}

/// A class or module together with the methods declared directly in it.
#[derive(Debug, Clone, Serialize)]
pub struct TypeInfo {
    /// Fully qualified name (`"Outer::Inner"` for nested declarations).
    pub name: String,
    /// Class or module.
    pub kind: TypeKind,
    /// Methods in declaration order. Does not include inherited methods.
    pub methods: Vec<MethodInfo>,
    /// Span of the declaration in the original source.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_separator() {
        assert_eq!(MethodScope::Instance.separator(), "#");
        assert_eq!(MethodScope::Singleton.separator(), ".");
    }

    #[test]
    fn test_kind_keyword() {
        assert_eq!(TypeKind::Class.keyword(), "class");
        assert_eq!(TypeKind::Module.keyword(), "module");
    }

    #[test]
    fn test_param_constructors() {
        let required = ParamInfo::required("name");
        assert_eq!(required.name, "name");
        assert!(required.default.is_none());

        let optional = ParamInfo::with_default("opts:", "{}");
        assert_eq!(optional.default.as_deref(), Some("{}"));
    }
}
