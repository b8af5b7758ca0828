use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format. `columns`
/// narrows and orders table columns; JSON output is never narrowed.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    columns: Option<&[&str]>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = table::TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(render_value_table(serde_json::to_value(value)?, columns, options))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format, None)?);
    Ok(())
}

/// Print a list, showing only `columns` in table mode.
pub fn output_list<T: Serialize>(
    value: &T,
    format: OutputFormat,
    columns: &[&str],
) -> anyhow::Result<()> {
    println!("{}", render(value, format, Some(columns))?);
    Ok(())
}

fn render_value_table(
    value: Value,
    columns: Option<&[&str]>,
    options: table::TableOptions,
) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(sin resultados)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let headers: Vec<String> = match columns {
                Some(columns) => columns.iter().map(ToString::to_string).collect(),
                None => {
                    let mut keys: Vec<String> = Vec::new();
                    for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
                        if !keys.contains(key) {
                            keys.push(key.clone());
                        }
                    }
                    keys
                }
            };
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                        .collect()
                })
                .collect::<Vec<Vec<String>>>();
            let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
            table::render_table(&header_refs, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .filter(|(key, _)| columns.is_none_or(|c| c.contains(&key.as_str())))
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["campo", "valor"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell(&scalar)]], options),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
