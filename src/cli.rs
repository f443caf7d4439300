//! Command-line interface for docsynth.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::analysis::{classify, MethodInfo, MethodScope, TypeInfo, VisibilityTag};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Generate YARD-style documentation blocks for Ruby source.
///
/// docsynth analyzes Ruby files, infers each method's effective visibility
/// from the `private` regions of its enclosing scope, and prints one
/// documentation block per class or module with the original source
/// embedded verbatim.
#[derive(Parser)]
#[command(name = "docsynth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a Ruby file, or a directory to scan for .rb files
    pub path: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Per-file entry of the JSON output format.
#[derive(Serialize)]
struct JsonFile {
    path: String,
    documentation: String,
    types: Vec<JsonType>,
}

/// Classified type metadata for JSON output.
#[derive(Serialize)]
struct JsonType {
    name: String,
    kind: String,
    methods: Vec<JsonMethod>,
}

#[derive(Serialize)]
struct JsonMethod {
    name: String,
    scope: MethodScope,
    visibility: VisibilityTag,
    params: Vec<JsonParam>,
}

#[derive(Serialize)]
struct JsonParam {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

/// Run the CLI. Returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let files = collect_ruby_files(&cli.path)?;
    if files.is_empty() {
        anyhow::bail!("no Ruby files found under {}", cli.path.display());
    }
    let single = files.len() == 1;

    // Generation is a pure function of the source text, so the batch
    // parallelizes with no shared state. Order is preserved by collect.
    let results: Vec<(PathBuf, anyhow::Result<String>)> = files
        .into_par_iter()
        .map(|path| {
            let result = fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|source| match cli.format.as_str() {
                    "json" => render_json_entry(&path, &source),
                    _ => Ok(crate::generate_documentation(&source)?),
                });
            (path, result)
        })
        .collect();

    let mut failed = 0;
    let mut json_entries: Vec<String> = Vec::new();

    for (path, result) in results {
        match result {
            Ok(output) if cli.format == "json" => json_entries.push(output),
            Ok(output) => {
                if !single {
                    println!("# {}", path.display());
                }
                print!("{output}");
                if !single {
                    println!();
                }
            }
            Err(e) => {
                if single {
                    return Err(e.context(path.display().to_string()));
                }
                eprintln!(
                    "{} {}: {}",
                    "warning:".yellow().bold(),
                    path.display(),
                    e
                );
                failed += 1;
            }
        }
    }

    if cli.format == "json" {
        println!("[{}]", json_entries.join(","));
    }

    Ok(if failed > 0 { EXIT_FAILED } else { EXIT_SUCCESS })
}

/// Build one JSON entry for a file: the rendered document plus the
/// classified metadata behind it.
fn render_json_entry(path: &Path, source: &str) -> anyhow::Result<String> {
    let parsed = crate::parser::parse(source)?;
    let private_names = crate::analysis::resolve_private_methods(&parsed);
    let types = crate::analysis::extract_types(&parsed);
    let documentation = crate::render::synthesize(&types, &private_names);

    let entry = JsonFile {
        path: path.display().to_string(),
        documentation,
        types: types
            .iter()
            .map(|ty| json_type(ty, &private_names))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&entry)?)
}

fn json_type(ty: &TypeInfo, private_names: &std::collections::HashSet<String>) -> JsonType {
    JsonType {
        name: ty.name.clone(),
        kind: ty.kind.keyword().to_string(),
        methods: ty
            .methods
            .iter()
            .filter_map(|m| json_method(m, private_names))
            .collect(),
    }
}

fn json_method(
    method: &MethodInfo,
    private_names: &std::collections::HashSet<String>,
) -> Option<JsonMethod> {
    // Protected methods are excluded here too, matching the document.
    let visibility = classify(method, private_names)?;
    Some(JsonMethod {
        name: method.name.clone(),
        scope: method.scope,
        visibility,
        params: method
            .params
            .iter()
            .map(|p| JsonParam {
                name: p.name.clone(),
                default: p.default.clone(),
            })
            .collect(),
    })
}

/// Collect the Ruby files under a path: the file itself, or every `.rb`
/// file below a directory, sorted for deterministic output.
fn collect_ruby_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("{} is neither a file nor a directory", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("rb"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.rb");
        fs::write(&file, "class A\nend\n").unwrap();

        let files = collect_ruby_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_directory_is_recursive_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("lib")).unwrap();
        fs::write(temp.path().join("lib/z.rb"), "").unwrap();
        fs::write(temp.path().join("a.rb"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let files = collect_ruby_files(temp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.rb"));
        assert!(files[1].ends_with("lib/z.rb"));
    }

    #[test]
    fn test_collect_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(collect_ruby_files(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_json_entry_shape() {
        let source = "class A\n  def abc\n  end\n\n  private\n\n  def hidden\n  end\nend\n";
        let entry = render_json_entry(Path::new("a.rb"), source).unwrap();
        let value: serde_json::Value = serde_json::from_str(&entry).unwrap();

        assert_eq!(value["path"], "a.rb");
        assert_eq!(value["types"][0]["name"], "A");
        assert_eq!(value["types"][0]["kind"], "class");
        assert_eq!(value["types"][0]["methods"][0]["visibility"], "public");
        assert_eq!(
            value["types"][0]["methods"][1]["visibility"],
            "private_explicit"
        );
    }
}
