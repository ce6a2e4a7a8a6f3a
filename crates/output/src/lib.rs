use anyhow::Result;
use clap::ValueEnum;
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Nested fields worth a table column of their own, keyed by the name they
/// commonly carry inside Space entities.
const NESTED_LABELS: &[&str] = &["name", "key", "id", "username", "text"];

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    /// Print one id per row.
    Quiet,
}

pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, value: &Value) -> Result<()> {
        let text = self.format_value(value)?;
        if !text.is_empty() {
            println!("{text}");
        }
        Ok(())
    }

    /// Prints a list result, or a short note when it is empty.
    pub fn render_list(&self, rows: &[Value], empty_note: &str) -> Result<()> {
        if rows.is_empty() && self.format == OutputFormat::Table {
            eprintln!("{empty_note}");
            return Ok(());
        }
        self.render(&Value::Array(rows.to_vec()))
    }

    pub fn format_value(&self, value: &Value) -> Result<String> {
        let text = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
            OutputFormat::Table => match table(value) {
                Some(table) => table,
                None => serde_json::to_string_pretty(value)?,
            },
            OutputFormat::Quiet => match quiet(value) {
                Some(ids) => ids,
                None => serde_json::to_string_pretty(value)?,
            },
        };
        Ok(text)
    }
}

fn table(value: &Value) -> Option<String> {
    let rows: Vec<Map<String, Value>> = match value {
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_object().map(flatten))
            .collect::<Option<_>>()?,
        Value::Object(obj) => vec![flatten(obj)],
        _ => return None,
    };

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return None;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in &rows {
        builder.push_record(
            headers
                .iter()
                .map(|header| row.get(header).map(cell).unwrap_or_default()),
        );
    }

    Some(builder.build().with(Style::rounded()).to_string())
}

/// Keeps top-level scalars and lifts one level of well-known nested fields,
/// so `{"key": {"key": "ABC"}}` becomes a `key` column and
/// `{"name": {"firstName": "A"}}` becomes `name.firstName`.
fn flatten(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (field, value) in obj {
        match value {
            Value::Object(inner) => {
                if let Some(label) = NESTED_LABELS
                    .iter()
                    .find_map(|label| inner.get(*label).filter(|v| is_scalar(v)))
                {
                    flat.insert(field.clone(), label.clone());
                } else {
                    for (inner_field, inner_value) in inner {
                        if is_scalar(inner_value) {
                            flat.insert(format!("{field}.{inner_field}"), inner_value.clone());
                        }
                    }
                }
            }
            Value::Array(items) => {
                flat.insert(field.clone(), Value::from(format!("[{}]", items.len())));
            }
            scalar => {
                flat.insert(field.clone(), scalar.clone());
            }
        }
    }
    flat
}

fn quiet(value: &Value) -> Option<String> {
    let id_of = |item: &Value| item.get("id").map(cell);
    let lines: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(id_of).collect(),
        Value::Object(_) => id_of(value).into_iter().collect(),
        Value::Null => return None,
        other => vec![cell(other)],
    };
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_flatten_lifts_nested_labels() {
        let row = json!({
            "id": "p1",
            "key": {"key": "ABC"},
            "name": "Alphabet",
            "admins": [{"id": "u1"}, {"id": "u2"}],
            "archived": false
        });
        let flat = flatten(row.as_object().unwrap());
        assert_eq!(flat["key"], "ABC");
        assert_eq!(flat["admins"], "[2]");
        assert_eq!(flat["archived"], false);
    }

    #[test]
    fn test_flatten_expands_unlabeled_objects() {
        let row = json!({"name": {"firstName": "Pix", "lastName": "El"}});
        let flat = flatten(row.as_object().unwrap());
        assert_eq!(flat["name.firstName"], "Pix");
        assert_eq!(flat["name.lastName"], "El");
    }

    #[test]
    fn test_table_has_union_of_columns() {
        let value = json!([
            {"id": "1", "name": "Alice"},
            {"id": "2", "email": "bob@acme.io"}
        ]);
        let rendered = table(&value).unwrap();
        assert!(rendered.contains("email"));
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("bob@acme.io"));
    }

    #[test]
    fn test_table_rejects_primitives() {
        assert!(table(&json!([])).is_none());
        assert!(table(&json!(["one", "two"])).is_none());
        assert!(table(&json!("plain")).is_none());
    }

    #[test]
    fn test_table_falls_back_to_json() {
        let renderer = OutputRenderer::new(OutputFormat::Table);
        let text = renderer.format_value(&json!(["one", "two"])).unwrap();
        assert!(text.contains("\"one\""));
    }

    #[test]
    fn test_quiet_prints_ids() {
        let renderer = OutputRenderer::new(OutputFormat::Quiet);
        let text = renderer
            .format_value(&json!([{"id": "a"}, {"name": "no id"}, {"id": "b"}]))
            .unwrap();
        assert_eq!(text, "a\nb");

        let text = renderer.format_value(&json!({"id": "m1"})).unwrap();
        assert_eq!(text, "m1");
    }

    #[test]
    fn test_quiet_without_ids_falls_back() {
        let renderer = OutputRenderer::new(OutputFormat::Quiet);
        let text = renderer.format_value(&json!({"name": "x"})).unwrap();
        assert!(text.contains("\"name\""));
    }

    #[test]
    fn test_json_and_yaml() {
        let value = json!({"id": "1", "count": 42});

        let json_text = OutputRenderer::new(OutputFormat::Json)
            .format_value(&value)
            .unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json_text).unwrap(), value);

        let yaml_text = OutputRenderer::new(OutputFormat::Yaml)
            .format_value(&value)
            .unwrap();
        assert!(yaml_text.contains("count: 42"));
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(&json!("hello")), "hello");
        assert_eq!(cell(&json!(42)), "42");
        assert_eq!(cell(&json!(true)), "true");
        assert_eq!(cell(&json!(null)), "");
    }
}
