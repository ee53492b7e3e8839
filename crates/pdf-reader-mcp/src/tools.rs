//! Operation contracts and typed request variants.
//!
//! Every tool declares a [`ToolContract`]. An incoming argument bag is
//! checked against its contract first; only a bag that passes is turned
//! into a [`QueryRequest`].

use pdf_reader_core::{QueryError, QueryResult};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// JSON type accepted for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
}

impl FieldKind {
    fn schema_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// Documented default of an optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Bool(bool),
}

/// One declared argument of a tool.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
    pub description: &'static str,
}

/// The declared argument contract of one tool.
#[derive(Debug)]
pub struct ToolContract {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

const FILE_FIELD: FieldSpec = FieldSpec {
    name: "file",
    kind: FieldKind::String,
    required: true,
    default: None,
    description: "Path to the PDF file (relative paths resolve against the server's working directory)",
};

pub const READ_PDF: ToolContract = ToolContract {
    name: "read-pdf",
    description: "Read the text content of a PDF file, optionally limited to a page range and whitespace-cleaned",
    fields: &[
        FILE_FIELD,
        FieldSpec {
            name: "pages",
            kind: FieldKind::String,
            required: false,
            default: Some(FieldDefault::Str("all")),
            description: "Pages to read: \"all\" or a list like \"1,3-5\"",
        },
        FieldSpec {
            name: "clean_text",
            kind: FieldKind::Boolean,
            required: false,
            default: Some(FieldDefault::Bool(false)),
            description: "Collapse all whitespace (removes line and paragraph breaks)",
        },
        FieldSpec {
            name: "include_metadata",
            kind: FieldKind::Boolean,
            required: false,
            default: Some(FieldDefault::Bool(true)),
            description: "Prefix the text with the document metadata",
        },
    ],
};

pub const SEARCH_PDF: ToolContract = ToolContract {
    name: "search-pdf",
    description: "Search a PDF for text and return each matching line with two lines of context on either side",
    fields: &[
        FILE_FIELD,
        FieldSpec {
            name: "query",
            kind: FieldKind::String,
            required: true,
            default: None,
            description: "Text to search for",
        },
        FieldSpec {
            name: "case_sensitive",
            kind: FieldKind::Boolean,
            required: false,
            default: Some(FieldDefault::Bool(false)),
            description: "Match letter case exactly",
        },
        FieldSpec {
            name: "whole_word",
            kind: FieldKind::Boolean,
            required: false,
            default: Some(FieldDefault::Bool(false)),
            description: "Only match on word boundaries (the query is interpreted as a regular expression)",
        },
    ],
};

pub const PDF_METADATA: ToolContract = ToolContract {
    name: "pdf-metadata",
    description: "Report page count, document properties and PDF version of a PDF file",
    fields: &[FILE_FIELD],
};

/// All tools, in the order `tools/list` reports them.
pub const TOOLS: [&ToolContract; 3] = [&READ_PDF, &SEARCH_PDF, &PDF_METADATA];

/// Look up a tool contract by name.
pub fn contract(name: &str) -> Option<&'static ToolContract> {
    TOOLS.iter().copied().find(|c| c.name == name)
}

impl ToolContract {
    /// Check `args` against this contract, reporting every offending field.
    ///
    /// A missing bag (`null`) is treated as an empty object.
    pub fn validate(&self, args: &Value) -> QueryResult<()> {
        let empty = Map::new();
        let bag = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(QueryError::validation(
                    Vec::<String>::new(),
                    format!("arguments must be an object, got {}", json_type_name(other)),
                ));
            }
        };

        let mut fields = Vec::new();
        let mut problems = Vec::new();

        for spec in self.fields {
            match bag.get(spec.name) {
                None if spec.required => {
                    fields.push(spec.name.to_string());
                    problems.push(format!("missing required field `{}`", spec.name));
                }
                None => {}
                Some(value) if !spec.kind.accepts(value) => {
                    fields.push(spec.name.to_string());
                    problems.push(format!(
                        "field `{}` must be a {}, got {}",
                        spec.name,
                        spec.kind.schema_type(),
                        json_type_name(value)
                    ));
                }
                Some(_) => {}
            }
        }

        for key in bag.keys() {
            if !self.fields.iter().any(|spec| spec.name == key) {
                fields.push(key.clone());
                problems.push(format!("unrecognized field `{key}`"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(QueryError::validation(
                fields,
                format!("{}: {}", self.name, problems.join("; ")),
            ))
        }
    }

    /// JSON Schema describing the argument bag.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in self.fields {
            let mut prop = json!({
                "type": spec.kind.schema_type(),
                "description": spec.description,
            });
            match spec.default {
                Some(FieldDefault::Str(s)) => prop["default"] = json!(s),
                Some(FieldDefault::Bool(b)) => prop["default"] = json!(b),
                None => {}
            }
            properties.insert(spec.name.to_string(), prop);
        }
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// The `tools/list` entry for this tool.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn default_pages() -> String {
    "all".to_string()
}

fn default_true() -> bool {
    true
}

/// Arguments of `read-pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadArgs {
    pub file: String,
    #[serde(default = "default_pages")]
    pub pages: String,
    #[serde(default)]
    pub clean_text: bool,
    #[serde(default = "default_true")]
    pub include_metadata: bool,
}

/// Arguments of `search-pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    pub file: String,
    pub query: String,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub whole_word: bool,
}

/// Arguments of `pdf-metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataArgs {
    pub file: String,
}

/// A validated request for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    Read(ReadArgs),
    Search(SearchArgs),
    Metadata(MetadataArgs),
}

impl QueryRequest {
    /// Validate `args` against the contract of tool `name` and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Validation`] for an unknown tool or a bag that
    /// breaks the contract.
    pub fn from_call(name: &str, args: Value) -> QueryResult<Self> {
        let contract = contract(name).ok_or_else(|| {
            QueryError::validation(Vec::<String>::new(), format!("unknown tool `{name}`"))
        })?;
        contract.validate(&args)?;

        let args = if args.is_null() { json!({}) } else { args };
        let invalid =
            |e: serde_json::Error| QueryError::validation(Vec::<String>::new(), e.to_string());

        match contract.name {
            "read-pdf" => serde_json::from_value(args).map(QueryRequest::Read),
            "search-pdf" => serde_json::from_value(args).map(QueryRequest::Search),
            _ => serde_json::from_value(args).map(QueryRequest::Metadata),
        }
        .map_err(invalid)
    }

    /// The file the request targets.
    pub fn file(&self) -> &str {
        match self {
            QueryRequest::Read(a) => &a.file,
            QueryRequest::Search(a) => &a.file,
            QueryRequest::Metadata(a) => &a.file,
        }
    }
}
