//! Coercion of raw form input into payload values.
//!
//! Numbers are read the lenient way browsers do: the longest leading numeric
//! prefix counts, anything else is treated as absent.

use crate::domain::ports::FormSource;
use regex::Regex;
use std::sync::OnceLock;

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
    })
}

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("valid int pattern"))
}

pub fn parse_float(raw: &str) -> Option<f64> {
    let m = float_prefix().find(raw.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_int(raw: &str) -> Option<i64> {
    let m = int_prefix().find(raw.trim_start())?;
    m.as_str().parse::<i64>().ok()
}

/// Empty or unparseable input becomes 0.
pub fn number_or_zero(raw: &str) -> f64 {
    parse_float(raw).unwrap_or(0.0)
}

pub fn int_or_zero(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(0)
}

/// Blank or unparseable input becomes `None` (serialized as `null`).
pub fn optional_number(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_float(raw)
}

pub fn optional_int(raw: &str) -> Option<i64> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_int(raw)
}

pub fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Typed accessors over a [`FormSource`].
pub struct FormReader<'a> {
    source: &'a dyn FormSource,
}

impl<'a> FormReader<'a> {
    pub fn new(source: &'a dyn FormSource) -> Self {
        Self { source }
    }

    pub fn text(&self, id: &str) -> String {
        self.source.value(id)
    }

    pub fn number(&self, id: &str) -> f64 {
        number_or_zero(&self.source.value(id))
    }

    pub fn int(&self, id: &str) -> i64 {
        int_or_zero(&self.source.value(id))
    }

    pub fn optional_number(&self, id: &str) -> Option<f64> {
        optional_number(&self.source.value(id))
    }

    pub fn optional_int(&self, id: &str) -> Option<i64> {
        optional_int(&self.source.value(id))
    }

    pub fn optional_text(&self, id: &str) -> Option<String> {
        optional_text(&self.source.value(id))
    }
}
