use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn render_text_from_model<T: Serialize + ?Sized>(model: &T) -> String {
    let value = serde_json::to_value(model).unwrap_or(Value::Null);
    render_value(&value, 0)
}

/// Absent data (null, empty list or map) is left out of text output.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_value(value: &Value, indent: usize) -> String {
    let pad = " ".repeat(indent);
    match value {
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => format!("{pad}{value}\n"),
        Value::String(s) => s.lines().map(|line| format!("{pad}{line}\n")).collect(),
        Value::Array(items) => {
            let mut out = String::new();
            for item in items {
                if item.is_array() || item.is_object() {
                    out.push_str(&format!("{pad}-\n"));
                    out.push_str(&render_value(item, indent + 2));
                } else {
                    out.push_str(&format!("{pad}- {}\n", scalar(item)));
                }
            }
            out
        }
        Value::Object(map) => {
            let mut out = String::new();
            for (key, v) in map.iter().filter(|(_, v)| !is_blank(v)) {
                match v {
                    Value::Array(_) | Value::Object(_) => {
                        out.push_str(&format!("{pad}{key}:\n"));
                        out.push_str(&render_value(v, indent + 2));
                    }
                    // Multi-line text (request bodies, docs) goes on its own lines.
                    Value::String(s) if s.contains('\n') => {
                        out.push_str(&format!("{pad}{key}:\n"));
                        out.push_str(&render_value(v, indent + 2));
                    }
                    _ => out.push_str(&format!("{pad}{key}: {}\n", scalar(v))),
                }
            }
            out
        }
    }
}

pub struct Formatter {
    engine: OutputFormat,
}

impl Formatter {
    pub fn new(engine: OutputFormat) -> Self {
        Self { engine }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.engine, OutputFormat::Json)
    }

    pub fn format<T: Serialize>(&self, model: &T) -> String {
        match self.engine {
            OutputFormat::Text => render_text_from_model(model),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(model).unwrap_or_default();
                json.push('\n');
                json
            }
        }
    }

    pub fn format_list<T: Serialize>(&self, list: &[T], title: &str, empty_msg: &str) -> String {
        match self.engine {
            OutputFormat::Text => {
                if list.is_empty() {
                    format!("{empty_msg}\n")
                } else {
                    let content = render_text_from_model(list);
                    if title.is_empty() {
                        content
                    } else {
                        format!("{title}\n{content}")
                    }
                }
            }
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(list).unwrap_or_else(|_| "[]".to_string());
                json.push('\n');
                json
            }
        }
    }
}

pub fn get_formatter(output_format: &OutputFormat) -> Formatter {
    Formatter::new(*output_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_skips_blank_fields() {
        let model = json!({"name": "Ping", "docs": null, "headers": {}, "tests": []});
        assert_eq!(render_text_from_model(&model), "name: Ping\n");
    }

    #[test]
    fn test_text_nests_objects_and_lists() {
        let model = json!({"headers": {"A": "1"}, "tests": ["ok", "fails"]});
        assert_eq!(
            render_text_from_model(&model),
            "headers:\n  A: 1\ntests:\n  - ok\n  - fails\n"
        );
    }

    #[test]
    fn test_multiline_strings_are_indented() {
        let model = json!({"body": "{\n  \"a\": 1\n}"});
        assert_eq!(
            render_text_from_model(&model),
            "body:\n  {\n    \"a\": 1\n  }\n"
        );
    }

    #[test]
    fn test_empty_list_message() {
        let formatter = Formatter::new(OutputFormat::Text);
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            formatter.format_list(&empty, "Requests:", "No requests found"),
            "No requests found\n"
        );
        let json = Formatter::new(OutputFormat::Json);
        assert_eq!(json.format_list(&empty, "", ""), "[]\n");
    }
}
