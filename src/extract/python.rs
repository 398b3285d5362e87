//! Python extractor backed by tree-sitter.
//!
//! Unlike the pattern-based extractors, names are not deduplicated: a name
//! declared twice (e.g. a module function and a method) appears twice.

use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language as TsLanguage, Node, Parser, Query, QueryCursor, Tree};

use super::Extractor;
use crate::language::Language;
use crate::scan::Declarations;

/// Captures:
/// - `func_name`: name of a `def`
/// - `class_name`: name of a `class`
/// - `import`: a plain `import ...` statement (`from ... import` is not captured)
const DECLARATION_QUERY: &str = r#"
(function_definition
  name: (identifier) @func_name
) @function

(class_definition
  name: (identifier) @class_name
)

(import_statement) @import
"#;

pub struct PythonExtractor {
    language: TsLanguage,
    /// Compiled on first use and shared by every file.
    query: OnceCell<Query>,
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
            query: OnceCell::new(),
        }
    }

    fn query(&self) -> anyhow::Result<&Query> {
        Ok(self
            .query
            .get_or_try_init(|| Query::new(&self.language, DECLARATION_QUERY))?)
    }

    fn parse(&self, source: &str) -> anyhow::Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))?;

        if tree.root_node().has_error() {
            if let Some(node) = first_error_node(tree.root_node()) {
                let pos = node.start_position();
                anyhow::bail!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1);
            }
            anyhow::bail!("invalid syntax");
        }

        Ok(tree)
    }
}

impl Extractor for PythonExtractor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract(&self, source: &str) -> anyhow::Result<Declarations> {
        let tree = self.parse(source)?;
        let bytes = source.as_bytes();

        let query = self.query()?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, tree.root_node(), bytes);

        let mut declarations = Declarations::new();

        while let Some(m) = matches.next() {
            let mut func_name = None;
            let mut is_async = false;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "func_name" => func_name = Some(node_text(capture.node, bytes)),
                    "function" => is_async = is_async_def(capture.node),
                    "class_name" => declarations
                        .classes
                        .push(node_text(capture.node, bytes).to_string()),
                    "import" => {
                        if let Some(module) = first_imported_module(capture.node, bytes) {
                            declarations.imports.push(module);
                        }
                    }
                    _ => {}
                }
            }

            // async defs are a distinct node kind in Python's own AST and are not listed
            if let Some(name) = func_name {
                if !is_async {
                    declarations.functions.push(name.to_string());
                }
            }
        }

        Ok(declarations)
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn is_async_def(node: Node) -> bool {
    node.child(0).map(|c| c.kind() == "async").unwrap_or(false)
}

/// Module of the first item of `import a.b as c, d` (here `a.b`).
fn first_imported_module(import: Node, source: &[u8]) -> Option<String> {
    let first = import.child_by_field_name("name")?;
    let module = if first.kind() == "aliased_import" {
        first.child_by_field_name("name")?
    } else {
        first
    };
    let text = node_text(module, source);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// First ERROR or MISSING node in pre-order.
fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}
