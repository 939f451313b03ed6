use serde::Serialize;
use serde_json::Value;

/// Server description in both forms: `raw` as the server sent it (a chat
/// component for modern Java servers, a plain string otherwise) and `clean`
/// with every formatting code removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Motd {
    pub raw: Value,
    pub clean: String,
}

impl Motd {
    pub fn from_legacy(text: &str) -> Self {
        Self {
            raw: Value::String(text.to_string()),
            clean: strip_formatting(text),
        }
    }

    pub fn from_component(raw: Value) -> Self {
        let mut flat = String::new();
        flatten_component(&raw, &mut flat);
        Self {
            clean: strip_formatting(&flat),
            raw,
        }
    }
}

fn flatten_component(component: &Value, out: &mut String) {
    match component {
        Value::String(text) => out.push_str(text),
        Value::Array(parts) => {
            for part in parts {
                flatten_component(part, out);
            }
        }
        Value::Object(map) => {
            match map.get("text") {
                Some(text) => flatten_component(text, out),
                None => {
                    if let Some(Value::String(key)) = map.get("translate") {
                        out.push_str(key);
                    }
                }
            }
            if let Some(extra) = map.get("extra") {
                flatten_component(extra, out);
            }
        }
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => {}
    }
}

/// Removes `§x` formatting codes and trims surrounding whitespace.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\u{00A7}' {
            chars.next();
            continue;
        }
        out.push(c);
    }

    out.trim().to_string()
}
