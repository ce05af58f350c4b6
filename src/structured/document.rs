//! JSON and YAML documents as `serde_json::Value` trees.

use serde::Deserialize;
use serde_json::Value;

use crate::validator::FileKind;

/// Why a document could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// 1-based line reported by the parser, when known.
    pub line: Option<usize>,
}

/// A parsed structured file, or the reason it could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Parsed(Value),
    /// A YAML stream of more than one `---` separated document.
    Stream(Vec<Value>),
    Invalid(SyntaxError),
}

/// A scalar reached by walking the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf<'a> {
    /// Nearest enclosing object key, if any.
    pub key: Option<&'a str>,
    pub value: &'a Value,
}

impl Document {
    /// Parse `content` as JSON, or as YAML when `kind` is [`FileKind::Yaml`].
    ///
    /// An empty YAML file is a null document; an empty JSON file is a
    /// syntax error. A YAML stream with several documents is a
    /// [`Document::Stream`]; the first document that fails to parse makes
    /// the whole file invalid.
    pub fn parse(kind: FileKind, content: &str) -> Self {
        match kind {
            FileKind::Yaml if is_blank_yaml(content) => Document::Parsed(Value::Null),
            FileKind::Yaml => match parse_yaml_stream(content) {
                Ok(mut values) if values.len() == 1 => Document::Parsed(values.remove(0)),
                Ok(values) if values.is_empty() => Document::Parsed(Value::Null),
                Ok(values) => Document::Stream(values),
                Err(err) => Document::Invalid(err),
            },
            _ => match serde_json::from_str::<Value>(content) {
                Ok(value) => Document::Parsed(value),
                Err(err) => Document::Invalid(SyntaxError {
                    line: (err.line() > 0).then_some(err.line()),
                    message: err.to_string(),
                }),
            },
        }
    }

    /// Every scalar in the document with its dotted path.
    ///
    /// Array items keep their order; object keys are visited sorted.
    /// Documents of a stream are prefixed with their index, `[1].password`.
    ///
    /// # Example
    ///
    /// ```
    /// use infralint::structured::Document;
    /// use infralint::validator::FileKind;
    ///
    /// let doc = Document::parse(FileKind::Json, r#"{"db": {"password": "x"}, "items": [{"token": "y"}]}"#);
    /// let paths: Vec<String> = doc.leaves().into_iter().map(|(path, _)| path).collect();
    ///
    /// assert_eq!(paths, vec!["db.password", "items[0].token"]);
    /// ```
    pub fn leaves(&self) -> Vec<(String, Leaf<'_>)> {
        let mut leaves = Vec::new();
        match self {
            Document::Parsed(value) => collect(value, String::new(), None, &mut leaves),
            Document::Stream(values) => {
                for (index, value) in values.iter().enumerate() {
                    collect(value, format!("[{}]", index), None, &mut leaves);
                }
            }
            Document::Invalid(_) => {}
        }
        leaves
    }
}

fn parse_yaml_stream(content: &str) -> Result<Vec<Value>, SyntaxError> {
    serde_yaml::Deserializer::from_str(content)
        .map(|document| {
            Value::deserialize(document).map_err(|err| SyntaxError {
                line: err.location().map(|l| l.line()),
                message: err.to_string(),
            })
        })
        .collect()
}

/// Only blank lines and comments: a YAML stream with no document.
fn is_blank_yaml(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn collect<'a>(value: &'a Value, path: String, key: Option<&'a str>, out: &mut Vec<(String, Leaf<'a>)>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", path, name)
                };
                collect(child, child_path, Some(name.as_str()), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(child, format!("{}[{}]", path, index), key, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            out.push((path, Leaf { key, value }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_syntax_error_has_line() {
        let doc = Document::parse(FileKind::Json, "{\n  \"a\": 1,\n  \"b\":\n}\n");

        match doc {
            Document::Invalid(err) => assert_eq!(err.line, Some(4)),
            _ => panic!("expected a syntax error"),
        }
    }

    #[test]
    fn yaml_syntax_error_has_line() {
        let doc = Document::parse(FileKind::Yaml, "a: 1\nb: [unclosed\n");
        assert!(matches!(doc, Document::Invalid(SyntaxError { line: Some(_), .. })));
    }

    #[test]
    fn empty_documents() {
        assert_eq!(Document::parse(FileKind::Yaml, "\n"), Document::Parsed(Value::Null));
        assert_eq!(
            Document::parse(FileKind::Yaml, "# defaults only\n\n"),
            Document::Parsed(Value::Null)
        );
        assert!(matches!(Document::parse(FileKind::Json, ""), Document::Invalid(_)));
    }

    #[test]
    fn yaml_leaves_keep_nearest_key() {
        let doc = Document::parse(FileKind::Yaml, "tokens:\n  - abc\n  - def\nport: 80\n");
        let leaves = doc.leaves();

        // Object keys come back sorted.
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[0].0, "port");
        assert_eq!(leaves[1].0, "tokens[0]");
        assert_eq!(leaves[2].1.key, Some("tokens"));
    }

    #[test]
    fn multi_document_yaml_is_a_stream() {
        let doc = Document::parse(
            FileKind::Yaml,
            "apiVersion: v1\nkind: Service\n---\napiVersion: v1\nkind: ConfigMap\n",
        );

        match &doc {
            Document::Stream(values) => assert_eq!(values.len(), 2),
            other => panic!("expected a stream, got {:?}", other),
        }
        let paths: Vec<String> = doc.leaves().into_iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["[0].apiVersion", "[0].kind", "[1].apiVersion", "[1].kind"]);
    }

    #[test]
    fn leading_separator_is_one_document() {
        let doc = Document::parse(FileKind::Yaml, "---\nport: 80\n");
        assert_eq!(doc.leaves()[0].0, "port");
    }

    #[test]
    fn broken_later_document_invalidates_stream() {
        let doc = Document::parse(FileKind::Yaml, "a: 1\n---\nb: [unclosed\n");
        assert!(matches!(doc, Document::Invalid(_)));
    }

    #[test]
    fn scalar_root_is_one_leaf() {
        let doc = Document::parse(FileKind::Json, "42");
        let leaves = doc.leaves();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].0, "");
        assert_eq!(leaves[0].1.key, None);
    }
}
