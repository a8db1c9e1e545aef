/// Locale separators used for grouped numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl NumberFormat {
    pub fn new(thousands_separator: &str, decimal_separator: &str) -> Self {
        Self {
            thousands_separator: thousands_separator.to_string(),
            decimal_separator: decimal_separator.to_string(),
        }
    }

    /// Grouped rendering with at most three fraction digits, e.g. `12,345.679`.
    pub fn grouped(&self, value: f64) -> String {
        if !value.is_finite() {
            return plain(value);
        }

        let rounded = format!("{:.3}", value.abs());
        let (int_part, frac_part) = match rounded.split_once('.') {
            Some((i, f)) => (i, f.trim_end_matches('0')),
            None => (rounded.as_str(), ""),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }

        let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
        let mut out = String::new();
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&grouped);
        if !frac_part.is_empty() {
            out.push_str(&self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

/// Shortest plain rendering, `800` rather than `800.0`.
pub fn plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}
