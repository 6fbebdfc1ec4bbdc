// Declarative tool definitions: schema, upstream path, body mapping and shaping

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::schema::{json_schema_object, validate, Param, ValidatedInput};
use crate::tools::shape::Shape;
use serde_json::{Map, Value};

/// Public fields of a single-file input, forwarded as `inputMethod` + target.
const FILE_INPUT_FIELDS: [&str; 2] = ["url", "base64"];

/// Everything needed to expose one upstream endpoint as a tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub params: Vec<Param>,
    /// Groups of parameters of which at least one must be present.
    pub one_of: Vec<&'static [&'static str]>,
    /// Upstream field receiving a `url`/`base64` file input.
    pub file_input: Option<&'static str>,
    pub shape: Shape,
}

impl ToolDefinition {
    pub fn new(name: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            path,
            params: Vec::new(),
            one_of: Vec::new(),
            file_input: None,
            shape: Shape::Json,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn require_one_of(mut self, names: &'static [&'static str]) -> Self {
        self.one_of.push(names);
        self
    }

    /// Accept the file as a `url` or inline `base64` string and forward it as
    /// `{"inputMethod": ..., target: ...}`.
    pub fn file_input(mut self, target: &'static str) -> Self {
        self.params.insert(
            0,
            Param::string("url", "URL of the file to process (provide this or base64)"),
        );
        self.params.insert(
            1,
            Param::string("base64", "Base64-encoded file content (provide this or url)"),
        );
        self.one_of.push(&FILE_INPUT_FIELDS);
        self.file_input = Some(target);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: json_schema_object(&self.params),
        }
    }

    pub fn validate(&self, arguments: &Value) -> Result<ValidatedInput, ToolError> {
        validate(&self.params, arguments)
    }

    /// Check cross-field requirements that the schema cannot express.
    pub fn check_preconditions(&self, input: &ValidatedInput) -> Result<(), ToolError> {
        for group in &self.one_of {
            if !group.iter().any(|name| input.contains(name)) {
                return Err(ToolError::Precondition(format!(
                    "{}: one of {} must be supplied",
                    self.name,
                    describe_group(group)
                )));
            }
        }
        Ok(())
    }

    /// Build the upstream request body from validated input.
    pub fn build_body(&self, input: &ValidatedInput) -> Value {
        let mut body = Map::new();

        if let Some(target) = self.file_input {
            let chosen = FILE_INPUT_FIELDS
                .iter()
                .find_map(|method| input.get(method).map(|v| (*method, v.clone())));
            if let Some((method, value)) = chosen {
                body.insert("inputMethod".into(), Value::from(method));
                body.insert(target.into(), value);
            }
        }

        for param in &self.params {
            if self.file_input.is_some() && FILE_INPUT_FIELDS.contains(&param.name) {
                continue;
            }
            if let Some(value) = input.get(param.name) {
                insert_path(&mut body, param.upstream_path(), value.clone());
            }
        }

        Value::Object(body)
    }
}

fn describe_group(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("`{}`", n)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        _ => quoted.join(""),
    }
}

// Insert at a dotted path, creating intermediate objects.
fn insert_path(body: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            body.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = body
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}
