//! Type and method metadata extraction.
//!
//! One walk over the parse tree producing every class and module in
//! declaration order, each with the methods declared directly in its body:
//! name, instance/singleton scope, formal parameters with raw default-value
//! text, declared visibility, and the verbatim source of the definition.
//!
//! Declared visibility here is the full Ruby notion, tracked per lexical
//! scope: bare `private`/`protected`/`public` statements switch the running
//! visibility for subsequent definitions, `private :name` retroactively
//! marks an already-defined method, and `private def name ...` marks the
//! inline definition. This deliberately differs from the scope walker,
//! which only recognizes the bare `private` statement - the classifier
//! renders an explicit marker only where both signals agree.

use tree_sitter::Node;

use super::scope::type_body;
use crate::analysis::{DeclaredVisibility, MethodInfo, MethodScope, ParamInfo, Span, TypeInfo, TypeKind};
use crate::parser::ParsedFile;

/// Extract all type declarations, with their methods, in declaration order.
///
/// Returns an empty list for source containing no class or module
/// declarations; methods defined outside any type are ignored.
pub fn extract_types(parsed: &ParsedFile) -> Vec<TypeInfo> {
    let mut extractor = Extractor {
        parsed,
        types: Vec::new(),
        frames: Vec::new(),
        path: Vec::new(),
    };
    extractor.visit(parsed.tree.root_node());
    extractor.types
}

/// One open lexical scope: which type methods attach to, the running
/// declared visibility, and whether definitions land on the singleton.
struct Frame {
    type_index: usize,
    visibility: DeclaredVisibility,
    singleton: bool,
}

struct Extractor<'a> {
    parsed: &'a ParsedFile,
    /// Finished and in-progress types, ordered by first declaration.
    types: Vec<TypeInfo>,
    frames: Vec<Frame>,
    /// Enclosing type names, for qualified paths.
    path: Vec<String>,
}

impl<'a> Extractor<'a> {
    fn visit(&mut self, node: Node) {
        match node.kind() {
            "class" => self.visit_type(node, TypeKind::Class),
            "module" => self.visit_type(node, TypeKind::Module),
            "singleton_class" => self.visit_singleton_class(node),
            "method" => self.visit_method(node, false, None),
            "singleton_method" => self.visit_method(node, true, None),
            "call" => self.visit_call(node),
            _ => {
                // Structural containers may wrap nested declarations.
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    fn visit_type(&mut self, node: Node, kind: TypeKind) {
        let name_node = match node.child_by_field_name("name") {
            Some(n) => n,
            None => return,
        };
        let name = self.parsed.node_text(name_node).to_string();

        self.path.push(name);
        let type_index = self.types.len();
        self.types.push(TypeInfo {
            name: self.path.join("::"),
            kind,
            methods: Vec::new(),
            span: Span::from_node(node),
        });
        self.frames.push(Frame {
            type_index,
            visibility: DeclaredVisibility::Public,
            singleton: false,
        });

        if let Some(body) = type_body(node) {
            self.visit_body(body);
        }

        self.frames.pop();
        self.path.pop();
    }

    /// `class << self` reopens the enclosing type at singleton scope with a
    /// fresh visibility region. Outside any type it has nothing to attach
    /// methods to and is skipped.
    fn visit_singleton_class(&mut self, node: Node) {
        let type_index = match self.frames.last() {
            Some(frame) => frame.type_index,
            None => return,
        };
        self.frames.push(Frame {
            type_index,
            visibility: DeclaredVisibility::Public,
            singleton: true,
        });

        if let Some(body) = type_body(node) {
            self.visit_body(body);
        }

        self.frames.pop();
    }

    fn visit_body(&mut self, body: Node) {
        if body.kind() != "body_statement" {
            self.visit(body);
            return;
        }
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            // Bare visibility modifiers appear as plain identifier nodes in
            // statement position.
            if child.kind() == "identifier" {
                match self.parsed.node_text(child) {
                    "private" => {
                        self.set_running_visibility(DeclaredVisibility::Private);
                        continue;
                    }
                    "protected" => {
                        self.set_running_visibility(DeclaredVisibility::Protected);
                        continue;
                    }
                    "public" => {
                        self.set_running_visibility(DeclaredVisibility::Public);
                        continue;
                    }
                    _ => {}
                }
            }
            self.visit(child);
        }
    }

    fn set_running_visibility(&mut self, visibility: DeclaredVisibility) {
        if let Some(frame) = self.frames.last_mut() {
            frame.visibility = visibility;
        }
    }

    /// Record one method definition on the current type.
    ///
    /// `singleton_def` is the `def self.name` form, which Ruby always leaves
    /// public regardless of the running visibility. `override_visibility`
    /// carries the inline `private def ...` form. Method bodies are not
    /// descended into: a def nested inside another def is not a declaration
    /// of the enclosing type.
    fn visit_method(
        &mut self,
        node: Node,
        singleton_def: bool,
        override_visibility: Option<DeclaredVisibility>,
    ) {
        let frame = match self.frames.last() {
            Some(f) => f,
            None => return,
        };
        let name_node = match node.child_by_field_name("name") {
            Some(n) => n,
            None => return,
        };

        let scope = if singleton_def || frame.singleton {
            MethodScope::Singleton
        } else {
            MethodScope::Instance
        };
        let visibility = override_visibility.unwrap_or(if singleton_def {
            DeclaredVisibility::Public
        } else {
            frame.visibility
        });

        let mut source = self.parsed.node_text(node).to_string();
        source.push('\n');

        let method = MethodInfo {
            name: self.parsed.node_text(name_node).to_string(),
            scope,
            params: self.extract_params(node),
            visibility,
            source,
            span: Span::from_node(node),
        };
        let type_index = frame.type_index;
        self.types[type_index].methods.push(method);
    }

    fn extract_params(&self, node: Node) -> Vec<ParamInfo> {
        let params_node = match node.child_by_field_name("parameters") {
            Some(n) => n,
            None => return Vec::new(),
        };

        let mut params = Vec::new();
        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    params.push(ParamInfo::required(self.parsed.node_text(child)));
                }
                "optional_parameter" => {
                    let (Some(name), Some(value)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    params.push(ParamInfo::with_default(
                        self.parsed.node_text(name),
                        self.parsed.node_text(value),
                    ));
                }
                "keyword_parameter" => {
                    let Some(name) = child.child_by_field_name("name") else {
                        continue;
                    };
                    // The trailing marker stays in the recorded name.
                    let name = format!("{}:", self.parsed.node_text(name));
                    match child.child_by_field_name("value") {
                        Some(value) => params.push(ParamInfo::with_default(
                            name,
                            self.parsed.node_text(value),
                        )),
                        None => params.push(ParamInfo::required(name)),
                    }
                }
                "splat_parameter" => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| self.parsed.node_text(n))
                        .unwrap_or("");
                    params.push(ParamInfo::required(format!("*{name}")));
                }
                "hash_splat_parameter" => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| self.parsed.node_text(n))
                        .unwrap_or("");
                    params.push(ParamInfo::required(format!("**{name}")));
                }
                "block_parameter" => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| self.parsed.node_text(n))
                        .unwrap_or("");
                    params.push(ParamInfo::required(format!("&{name}")));
                }
                _ => {}
            }
        }
        params
    }

    /// Receiver-less `private`/`protected`/`public` calls with arguments:
    /// the inline-def form marks the contained definition, the symbol form
    /// retroactively marks an already-defined instance method.
    fn visit_call(&mut self, node: Node) {
        if node.child_by_field_name("receiver").is_some() {
            return;
        }
        let visibility = match node
            .child_by_field_name("method")
            .map(|n| self.parsed.node_text(n))
        {
            Some("private") => DeclaredVisibility::Private,
            Some("protected") => DeclaredVisibility::Protected,
            Some("public") => DeclaredVisibility::Public,
            _ => return,
        };
        let args = match node.child_by_field_name("arguments") {
            Some(a) => a,
            None => return,
        };

        let mut cursor = args.walk();
        for arg in args.named_children(&mut cursor) {
            match arg.kind() {
                "method" => self.visit_method(arg, false, Some(visibility)),
                // `private def self.x` still defines a public singleton
                // method; the modifier targets the instance method named by
                // the returned symbol, which does not exist here.
                "singleton_method" => self.visit_method(arg, true, None),
                "simple_symbol" => {
                    let name = self.parsed.node_text(arg).trim_start_matches(':').to_string();
                    self.mark_retroactively(&name, visibility);
                }
                "string" => {
                    let name = self
                        .parsed
                        .node_text(arg)
                        .trim_matches(|c| c == '"' || c == '\'')
                        .to_string();
                    self.mark_retroactively(&name, visibility);
                }
                _ => {}
            }
        }
    }

    fn mark_retroactively(&mut self, name: &str, visibility: DeclaredVisibility) {
        let type_index = match self.frames.last() {
            Some(frame) => frame.type_index,
            None => return,
        };
        if let Some(method) = self.types[type_index]
            .methods
            .iter_mut()
            .rev()
            .find(|m| m.scope == MethodScope::Instance && m.name == name)
        {
            method.visibility = visibility;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn extract(source: &str) -> Vec<TypeInfo> {
        let parsed = parse(source).expect("test source should parse");
        extract_types(&parsed)
    }

    #[test]
    fn test_empty_source_yields_no_types() {
        assert!(extract("").is_empty());
        assert!(extract("x = 1\nputs x\n").is_empty());
    }

    #[test]
    fn test_top_level_methods_are_ignored() {
        assert!(extract("def helper\nend\n").is_empty());
    }

    #[test]
    fn test_single_class_with_method() {
        let types = extract("class A\n  def abc\n    123\n  end\nend\n");
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "A");
        assert_eq!(types[0].kind, TypeKind::Class);
        assert_eq!(types[0].methods.len(), 1);

        let method = &types[0].methods[0];
        assert_eq!(method.name, "abc");
        assert_eq!(method.scope, MethodScope::Instance);
        assert_eq!(method.visibility, DeclaredVisibility::Public);
        assert!(method.params.is_empty());
        assert_eq!(method.source, "def abc\n    123\n  end\n");
    }

    #[test]
    fn test_module_kind() {
        let types = extract("module Util\n  def helper\n  end\nend\n");
        assert_eq!(types[0].kind, TypeKind::Module);
        assert_eq!(types[0].name, "Util");
    }

    #[test]
    fn test_nested_types_have_qualified_names_in_declaration_order() {
        let types = extract(
            "module Outer\n  class Inner\n    def a\n    end\n  end\n\n  def b\n  end\nend\n",
        );
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "Outer");
        assert_eq!(types[1].name, "Outer::Inner");
        // `b` is declared after Inner closes but still belongs to Outer.
        assert_eq!(types[0].methods[0].name, "b");
        assert_eq!(types[1].methods[0].name, "a");
    }

    #[test]
    fn test_running_visibility_tracks_bare_modifiers() {
        let types = extract(
            "class A\n  def pub\n  end\n\n  private\n\n  def priv\n  end\n\n  protected\n\n  def prot\n  end\n\n  public\n\n  def pub2\n  end\nend\n",
        );
        let m = &types[0].methods;
        assert_eq!(m[0].visibility, DeclaredVisibility::Public);
        assert_eq!(m[1].visibility, DeclaredVisibility::Private);
        assert_eq!(m[2].visibility, DeclaredVisibility::Protected);
        assert_eq!(m[3].visibility, DeclaredVisibility::Public);
    }

    #[test]
    fn test_singleton_def_is_singleton_scope_and_stays_public() {
        let types = extract("class A\n  private\n\n  def self.build\n  end\nend\n");
        let method = &types[0].methods[0];
        assert_eq!(method.scope, MethodScope::Singleton);
        assert_eq!(method.visibility, DeclaredVisibility::Public);
    }

    #[test]
    fn test_singleton_class_body_methods() {
        let types = extract(
            "class A\n  class << self\n    def build\n    end\n\n    private\n\n    def construct\n    end\n  end\nend\n",
        );
        let m = &types[0].methods;
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].scope, MethodScope::Singleton);
        assert_eq!(m[0].visibility, DeclaredVisibility::Public);
        assert_eq!(m[1].scope, MethodScope::Singleton);
        assert_eq!(m[1].visibility, DeclaredVisibility::Private);
    }

    #[test]
    fn test_retroactive_symbol_form() {
        let types = extract("class A\n  def foo\n  end\n  private :foo\nend\n");
        assert_eq!(types[0].methods[0].visibility, DeclaredVisibility::Private);
    }

    #[test]
    fn test_inline_def_form() {
        let types = extract("class A\n  private def foo\n  end\n\n  def bar\n  end\nend\n");
        let m = &types[0].methods;
        assert_eq!(m[0].name, "foo");
        assert_eq!(m[0].visibility, DeclaredVisibility::Private);
        // The inline form does not change the running visibility.
        assert_eq!(m[1].visibility, DeclaredVisibility::Public);
    }

    #[test]
    fn test_parameter_extraction() {
        let types = extract(
            "class A\n  def m(req, opt = 1, *rest, name:, opts: {}, **extra, &blk)\n  end\nend\n",
        );
        let params = &types[0].methods[0].params;
        assert_eq!(
            params
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>(),
            vec!["req", "opt", "*rest", "name:", "opts:", "**extra", "&blk"],
        );
        assert_eq!(params[0].default, None);
        assert_eq!(params[1].default.as_deref(), Some("1"));
        assert_eq!(params[2].default, None);
        assert_eq!(params[3].default, None);
        assert_eq!(params[4].default.as_deref(), Some("{}"));
    }

    #[test]
    fn test_method_source_keeps_layout_and_trailing_newline() {
        let types = extract("class A\n  def abc(x)\n    x + 1\n  end\nend\n");
        let source = &types[0].methods[0].source;
        assert!(source.starts_with("def abc(x)"));
        assert!(source.ends_with("end\n"));
        assert!(source.contains("\n    x + 1\n"));
    }

    #[test]
    fn test_operator_and_setter_names() {
        let types = extract("class A\n  def ==(other)\n  end\n\n  def name=(v)\n  end\nend\n");
        let names: Vec<_> = types[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["==", "name="]);
    }

    #[test]
    fn test_empty_class_has_no_methods() {
        let types = extract("class A\nend\n");
        assert_eq!(types.len(), 1);
        assert!(types[0].methods.is_empty());
    }
}
