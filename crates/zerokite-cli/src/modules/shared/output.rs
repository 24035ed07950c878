use serde_json::{json, Value};

use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

pub(crate) struct Column<'a> {
    header: &'a str,
    key: &'a str,
    align: Align,
    format: Option<fn(&Value) -> String>,
}

impl<'a> Column<'a> {
    pub(crate) fn new(header: &'a str, key: &'a str) -> Self {
        Self {
            header,
            key,
            align: Align::Left,
            format: None,
        }
    }

    pub(crate) fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub(crate) fn format(mut self, format: fn(&Value) -> String) -> Self {
        self.format = Some(format);
        self
    }

    fn cell(&self, row: &Value) -> String {
        let value = row.get(self.key).unwrap_or(&Value::Null);
        match self.format {
            Some(format) => format(value),
            None => value_text(value),
        }
    }

    fn pad(&self, text: &str, width: usize) -> String {
        match self.align {
            Align::Left => format!("{text:<width$}"),
            Align::Right => format!("{text:>width$}"),
        }
    }
}

/// Renders `rows` and then `footer` under a header and a dashed divider.
/// Columns are separated by two spaces.
pub(crate) fn render_table(rows: &[Value], columns: &[Column<'_>], footer: &[Value]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .chain(footer)
        .map(|row| columns.iter().map(|column| column.cell(row)).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .fold(column.header.chars().count(), usize::max)
        })
        .collect();

    let line = |texts: Vec<String>| {
        columns
            .iter()
            .zip(&widths)
            .zip(texts)
            .map(|((column, width), text)| column.pad(&text, *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(line(
        columns.iter().map(|column| column.header.to_string()).collect(),
    ));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(cells.into_iter().map(line));
    lines.join("\n")
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => integer.to_string(),
            (None, Some(float)) => float.to_string(),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Numeric reading of a JSON value: numbers and numeric strings, else 0.
pub(crate) fn number_or_zero(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite()).unwrap_or(0.0)
}

pub(crate) fn format_fixed(value: &Value) -> String {
    format!("{:.2}", number_or_zero(value))
}

/// Like [`format_fixed`], but absent values stay blank.
pub(crate) fn format_price(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) if text.is_empty() => String::new(),
        other => format_fixed(other),
    }
}

pub(crate) fn print_success_json(command: &str, data: Value) {
    println!("{:#}", json!({ "ok": true, "command": command, "data": data }));
}

pub(crate) fn error_payload(err: &CliError) -> Value {
    let mut payload = json!({ "type": err.kind(), "message": err.to_string() });
    if let Some(status_code) = err.status_code() {
        payload["status_code"] = json!(status_code);
    }
    payload
}

pub(crate) fn print_error_json(command: &str, err: &CliError) {
    println!(
        "{:#}",
        json!({ "ok": false, "command": command, "error": error_payload(err) })
    );
}

pub(crate) fn print_error_text(err: &CliError) {
    eprintln!("{}: {}", err.kind(), err);
    if let Some(status_code) = err.status_code() {
        eprintln!("HTTP status: {status_code}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerokite_core::ApiError;

    #[test]
    fn renders_aligned_columns_with_footer() {
        let rows = vec![
            json!({"tradingsymbol": "INFY", "quantity": 10, "pnl": 12.5}),
            json!({"tradingsymbol": "TCS", "quantity": 2, "pnl": -3}),
        ];
        let footer = vec![json!({"tradingsymbol": "TOTAL", "quantity": 12.0, "pnl": 9.5})];
        let columns = [
            Column::new("Symbol", "tradingsymbol"),
            Column::new("Qty", "quantity").right(),
            Column::new("PnL", "pnl").right().format(format_fixed),
        ];
        let table = render_table(&rows, &columns, &footer);
        let expected = [
            "Symbol  Qty    PnL",
            "------  ---  -----",
            "INFY     10  12.50",
            "TCS       2  -3.00",
            "TOTAL    12   9.50",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_rows_render_placeholder() {
        let columns = [Column::new("Order ID", "order_id")];
        assert_eq!(render_table(&[], &columns, &[]), "No records found.");
    }

    #[test]
    fn number_helpers_tolerate_strings_and_garbage() {
        assert_eq!(number_or_zero(&json!("12.5")), 12.5);
        assert_eq!(number_or_zero(&json!("abc")), 0.0);
        assert_eq!(number_or_zero(&Value::Null), 0.0);
        assert_eq!(format_fixed(&json!(3)), "3.00");
        assert_eq!(format_price(&json!("")), "");
        assert_eq!(format_price(&json!(1.005)), "1.00");
        assert_eq!(value_text(&json!(15.0)), "15");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn error_payload_carries_status_for_api_errors() {
        let err = CliError::from(ApiError {
            kind: "TokenException".to_string(),
            message: "Incorrect api_key or access_token.".to_string(),
            status_code: Some(403),
            raw_body: None,
        });
        assert_eq!(
            error_payload(&err),
            json!({
                "type": "TokenException",
                "message": "Incorrect api_key or access_token.",
                "status_code": 403
            })
        );
        let payload = error_payload(&CliError::HandshakeTimeout);
        assert!(payload.get("status_code").is_none());
    }
}
