/// A flat record that knows how to render itself as one CSV row.
pub trait CsvRecord {
    fn headers() -> &'static [&'static str];
    fn values(&self) -> Vec<String>;
}

/// Renders rows as CSV. The header line comes from the record type; an
/// empty slice produces an empty string with no header.
pub fn to_csv<T: CsvRecord>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&T::headers().join(","));
    out.push('\n');
    for row in rows {
        let line = row
            .values()
            .iter()
            .map(|value| escape(value))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// standard CSV escaping: quote any field containing a comma, quote or
// newline, doubling internal quotes
fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
