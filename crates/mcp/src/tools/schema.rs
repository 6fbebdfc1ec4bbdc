// Declarative parameter schemas: JSON Schema rendering and argument validation

use crate::error::ToolError;
use serde_json::{json, Map, Value};

/// Type of a single parameter.
#[derive(Debug, Clone)]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enum(&'static [&'static str]),
    Array(Box<ParamKind>),
    /// An object with declared fields, validated recursively.
    Object(Vec<Param>),
    /// A free-form object, forwarded as given.
    Map,
}

impl ParamKind {
    fn type_name(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) | Self::Map => "object",
        }
    }

    pub fn json_schema(&self) -> Value {
        match self {
            Self::Enum(values) => json!({ "type": "string", "enum": values }),
            Self::Array(items) => json!({ "type": "array", "items": items.json_schema() }),
            Self::Object(fields) => json_schema_object(fields),
            Self::Map => json!({ "type": "object", "additionalProperties": true }),
            other => json!({ "type": other.type_name() }),
        }
    }
}

/// One named parameter of a tool's input.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Dotted path of the field in the upstream body, when it differs from `name`.
    pub upstream: Option<&'static str>,
}

impl Param {
    pub fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            upstream: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Boolean, description)
    }

    pub fn choice(
        name: &'static str,
        values: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParamKind::Enum(values), description)
    }

    pub fn array(name: &'static str, items: ParamKind, description: &'static str) -> Self {
        Self::new(name, ParamKind::Array(Box::new(items)), description)
    }

    pub fn object(name: &'static str, fields: Vec<Param>, description: &'static str) -> Self {
        Self::new(name, ParamKind::Object(fields), description)
    }

    pub fn map(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Map, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn max(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn upstream(mut self, path: &'static str) -> Self {
        self.upstream = Some(path);
        self
    }

    /// Path of this parameter in the upstream request body.
    pub fn upstream_path(&self) -> &'static str {
        self.upstream.unwrap_or(self.name)
    }

    pub fn json_schema(&self) -> Value {
        let mut schema = self.kind.json_schema();
        if let Value::Object(ref mut obj) = schema {
            obj.insert("description".into(), Value::from(self.description));
            if let Some(default) = &self.default {
                obj.insert("default".into(), default.clone());
            }
            if let Some(min) = self.minimum {
                obj.insert("minimum".into(), number_value(min));
            }
            if let Some(max) = self.maximum {
                obj.insert("maximum".into(), number_value(max));
            }
        }
        schema
    }

    fn check_bounds(&self, n: f64, path: &str) -> Result<(), ToolError> {
        if let Some(min) = self.minimum {
            if n < min {
                return Err(ToolError::validation(
                    path,
                    format!("must be >= {}", number_value(min)),
                ));
            }
        }
        if let Some(max) = self.maximum {
            if n > max {
                return Err(ToolError::validation(
                    path,
                    format!("must be <= {}", number_value(max)),
                ));
            }
        }
        Ok(())
    }
}

// Integral bounds render as integers ("1", not "1.0").
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Build an object schema from a parameter list, preserving declaration order.
pub fn json_schema_object(params: &[Param]) -> Value {
    let properties: Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.json_schema()))
        .collect();
    let required: Vec<&str> = params.iter().filter(|p| p.required).map(|p| p.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Arguments after schema checking and default substitution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInput(Map<String, Value>);

impl ValidatedInput {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Validate raw tool arguments against a parameter list.
///
/// `null` arguments count as an empty object. Keys that are not declared are
/// dropped.
pub fn validate(params: &[Param], raw: &Value) -> Result<ValidatedInput, ToolError> {
    let empty = Map::new();
    let obj = match raw {
        Value::Null => &empty,
        Value::Object(obj) => obj,
        _ => return Err(ToolError::validation("arguments", "expected object")),
    };
    validate_fields(params, obj, "").map(ValidatedInput)
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn validate_fields(
    params: &[Param],
    obj: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, ToolError> {
    let mut out = Map::new();

    for param in params {
        let path = join_path(prefix, param.name);
        match obj.get(param.name).filter(|v| !v.is_null()) {
            Some(value) => {
                let checked = validate_value(param, &param.kind, value, &path)?;
                out.insert(param.name.to_string(), checked);
            }
            None if param.required => {
                return Err(ToolError::validation(path, "is required"));
            }
            None => {
                if let Some(default) = &param.default {
                    out.insert(param.name.to_string(), default.clone());
                }
            }
        }
    }

    Ok(out)
}

fn validate_value(
    param: &Param,
    kind: &ParamKind,
    value: &Value,
    path: &str,
) -> Result<Value, ToolError> {
    let mismatch = || ToolError::validation(path, format!("expected {}", kind.type_name()));

    match kind {
        ParamKind::String => value.is_string().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Boolean => value.is_boolean().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Number => {
            let n = value.as_f64().ok_or_else(mismatch)?;
            param.check_bounds(n, path)?;
            Ok(value.clone())
        }
        ParamKind::Integer => {
            let n = value.as_f64().filter(|n| n.fract() == 0.0).ok_or_else(mismatch)?;
            param.check_bounds(n, path)?;
            // 5.0 is forwarded as 5
            Ok(if value.is_f64() { number_value(n) } else { value.clone() })
        }
        ParamKind::Enum(allowed) => {
            let s = value.as_str().ok_or_else(mismatch)?;
            if allowed.contains(&s) {
                Ok(value.clone())
            } else {
                Err(ToolError::validation(
                    path,
                    format!("must be one of [{}]", allowed.join(", ")),
                ))
            }
        }
        ParamKind::Array(items) => {
            let elements = value.as_array().ok_or_else(mismatch)?;
            elements
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    validate_value(param, items, element, &format!("{}[{}]", path, i))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        ParamKind::Object(fields) => {
            let obj = value.as_object().ok_or_else(mismatch)?;
            validate_fields(fields, obj, path).map(Value::Object)
        }
        ParamKind::Map => value.is_object().then(|| value.clone()).ok_or_else(mismatch),
    }
}
