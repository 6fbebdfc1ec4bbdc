// Response shaping: turn a raw upstream reply into tool output

use serde_json::{Map, Value};

/// How a tool republishes the upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The whole response, pretty-printed.
    Json,
    /// Organic results projection plus optional answer sections.
    Search,
    /// News article projection.
    News,
    /// The whole response with long strings under these keys cut to a preview.
    Truncate(&'static [&'static str]),
}

const ORGANIC_FIELDS: &[&str] = &["title", "link", "snippet", "position"];
const SEARCH_SECTIONS: &[&str] = &["featuredSnippet", "peopleAlsoAsk", "relatedSearches"];
const NEWS_FIELDS: &[&str] = &["title", "link", "snippet", "date", "source", "position"];

impl Shape {
    pub fn apply(&self, raw: Value, preview_length: usize) -> Value {
        match self {
            Self::Json => raw,
            Self::Search => project_search(&raw),
            Self::News => project_news(&raw),
            Self::Truncate(keys) => {
                let mut value = raw;
                truncate_fields(&mut value, keys, preview_length);
                value
            }
        }
    }

    /// Shape `raw` and render it as the text of a tool result.
    pub fn render(&self, raw: Value, preview_length: usize) -> String {
        let shaped = self.apply(raw, preview_length);
        // Serializing a Value cannot fail
        serde_json::to_string_pretty(&shaped).unwrap_or_default()
    }
}

fn pick(item: &Value, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|f| {
            item.get(*f)
                .filter(|v| !v.is_null())
                .map(|v| (f.to_string(), v.clone()))
        })
        .collect()
}

fn project_items(raw: &Value, key: &str, fields: &[&str], keep_scrape: bool) -> Value {
    let items = raw
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let mut out = pick(item, fields);
                    if keep_scrape {
                        if let Some(scraped) = item.get("scrapeOutput").filter(|v| !v.is_null()) {
                            out.insert("scrapeOutput".into(), scraped.clone());
                        }
                    }
                    Value::Object(out)
                })
                .collect()
        })
        .unwrap_or_default();
    Value::Array(items)
}

pub fn project_search(raw: &Value) -> Value {
    let mut out = Map::new();
    out.insert(
        "organicResults".into(),
        project_items(raw, "organic", ORGANIC_FIELDS, true),
    );
    out.extend(pick(raw, SEARCH_SECTIONS));
    Value::Object(out)
}

pub fn project_news(raw: &Value) -> Value {
    let mut out = Map::new();
    out.insert(
        "newsResults".into(),
        project_items(raw, "news", NEWS_FIELDS, false),
    );
    Value::Object(out)
}

/// Cut `s` to `len` characters plus an ellipsis when it is longer than `len`.
pub fn preview(s: &str, len: usize) -> Option<String> {
    let mut chars = s.char_indices();
    let (cut, _) = chars.nth(len)?;
    Some(format!("{}...", &s[..cut]))
}

/// Truncate string values stored under any of `keys`, at any depth.
pub fn truncate_fields(value: &mut Value, keys: &[&str], len: usize) {
    match value {
        Value::Object(obj) => {
            for (k, v) in obj.iter_mut() {
                match v {
                    Value::String(s) if keys.contains(&k.as_str()) => {
                        if let Some(short) = preview(s, len) {
                            *s = short;
                        }
                    }
                    other => truncate_fields(other, keys, len),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                truncate_fields(item, keys, len);
            }
        }
        _ => {}
    }
}
