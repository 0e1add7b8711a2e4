use enviroscan_api::Metric;

/// Formats a reading the way it is printed on a card: `NaN` and infinities are
/// spelled out, whole numbers carry no decimals.
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    value.to_string()
}

pub fn format_reading(metric: Metric, value: f64) -> String {
    match metric.unit() {
        Some(unit) => format!("{} {unit}", format_number(value)),
        None if value == 1.0 => "On".to_string(),
        None => "Off".to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
