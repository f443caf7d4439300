//! Documentation block rendering.
//!
//! Turns classified metadata into the final document text: one block per
//! type, each containing YARD-style doc comments for its rendered methods
//! followed by the method's verbatim source. The output is a pure function
//! of the inputs - byte-identical across runs - because it is meant to be
//! inserted back into source verbatim.

use std::collections::HashSet;

use crate::analysis::{classify, MethodInfo, ParamInfo, TypeInfo, VisibilityTag};
use crate::literal;

/// Placeholder type used for parameters and return values alike.
const PLACEHOLDER_TYPE: &str = "Object";

/// Render the documentation line for one parameter, if it gets one.
///
/// Rules, in order:
/// 1. no default: a plain `@param` line with the name as written - a
///    keyword parameter keeps its trailing `:` here;
/// 2. default present, keyword marker, default parses as a JSON object: an
///    `@option` bundle line, marker stripped;
/// 3. default present, keyword marker, not a bundle: a `@param` line typed
///    by the default's runtime class, marker stripped;
/// 4. default present, no keyword marker: no line at all.
pub fn render_param(param: &ParamInfo) -> Option<String> {
    let default = match &param.default {
        None => {
            return Some(format!(
                "# @param [{PLACEHOLDER_TYPE}] {} param documentation.",
                param.name
            ));
        }
        Some(d) => d,
    };

    // A positional parameter with a default gets no doc line.
    let name = param.name.strip_suffix(':')?;

    if literal::looks_like_hash(default) {
        Some(format!(
            "# @option [{PLACEHOLDER_TYPE}] {name} option documentation."
        ))
    } else {
        Some(format!(
            "# @param [{}] {name} param documentation.",
            literal::runtime_type_name(default)
        ))
    }
}

/// Render one method block: header, description, optional `@private`
/// marker, parameter lines, return line, then the verbatim source.
fn render_method(type_name: &str, method: &MethodInfo, tag: VisibilityTag) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "# {}{}{} -> {}",
        type_name,
        method.scope.separator(),
        method.name,
        PLACEHOLDER_TYPE
    ));
    lines.push("#".to_string());
    lines.push("# Method documentation.".to_string());
    lines.push("#".to_string());
    if tag == VisibilityTag::PrivateExplicit {
        lines.push("# @private".to_string());
    }
    lines.extend(method.params.iter().filter_map(render_param));
    lines.push(format!("# @return [{PLACEHOLDER_TYPE}]"));

    let mut block = lines.join("\n");
    block.push('\n');
    // Method source already carries its trailing newline.
    block.push_str(&method.source);
    block
}

/// Render one type block: header, public section, private section with its
/// marker line, closing `end`. Protected methods are dropped entirely.
fn render_type(ty: &TypeInfo, private_names: &HashSet<String>) -> String {
    let mut public_blocks: Vec<String> = Vec::new();
    let mut private_blocks: Vec<String> = Vec::new();

    for method in &ty.methods {
        let tag = match classify(method, private_names) {
            Some(tag) => tag,
            None => continue,
        };
        let block = render_method(&ty.name, method, tag);
        if tag.is_private() {
            private_blocks.push(block);
        } else {
            public_blocks.push(block);
        }
    }

    let mut out = format!("{} {}\n", ty.kind.keyword(), ty.name);
    if !public_blocks.is_empty() {
        out.push_str(&public_blocks.join("\n"));
    }
    if !private_blocks.is_empty() {
        out.push('\n');
        out.push_str("private\n");
        out.push_str(&private_blocks.join("\n"));
    }
    out.push_str("end\n");
    out
}

/// Compose the final document: one block per type in declaration order,
/// joined by a blank line. Empty input yields an empty string.
pub fn synthesize(types: &[TypeInfo], private_names: &HashSet<String>) -> String {
    types
        .iter()
        .map(|ty| render_type(ty, private_names))
        .collect::<Vec<_>>()
        .join("\n")
}
