use std::fmt;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

pub type LabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

const MINUS_SIGN: char = '\u{2212}';

/// Tick value to label text mapping for one axis.
///
/// Every variant maps non-finite input to an empty string without invoking
/// the underlying formatter.
#[derive(Clone, Default)]
pub enum LabelFormatter {
    /// Shortest round-trip decimal, as a JavaScript `String(number)` would print it.
    #[default]
    Default,
    /// Whole percentage: `0.5 -> "50%"`.
    Percent,
    Custom(LabelFormatterFn),
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Percent => f.write_str("Percent"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl LabelFormatter {
    /// A caller formatter wins over percent, which wins over the default.
    #[must_use]
    pub fn resolve(custom: Option<&LabelFormatterFn>, percent: bool) -> Self {
        match custom {
            Some(formatter) => Self::Custom(Arc::clone(formatter)),
            None if percent => Self::Percent,
            None => Self::Default,
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match self {
            Self::Default => format_default_label(value),
            Self::Percent => format_percent_label(value),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

#[must_use]
pub fn format_default_label(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        // Covers negative zero.
        return "0".to_owned();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(value).to_owned()
}

/// Formats `value * 100` rounded half away from zero with a `%` suffix.
///
/// Negative results use U+2212; values that round to zero never carry a sign.
#[must_use]
pub fn format_percent_label(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let scaled = value * 100.0;
    let (negative, digits) = match Decimal::from_f64_retain(scaled) {
        Some(decimal) => {
            let rounded = decimal.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            (
                rounded.is_sign_negative() && !rounded.is_zero(),
                rounded.abs().normalize().to_string(),
            )
        }
        None => {
            // Beyond decimal range; print like `toFixed` does past 1e21.
            let rounded = scaled.abs().round();
            let mut buffer = ryu_js::Buffer::new();
            (scaled < 0.0 && rounded != 0.0, buffer.format(rounded).to_owned())
        }
    };

    let mut label = String::with_capacity(digits.len() + 4);
    if negative {
        label.push(MINUS_SIGN);
    }
    label.push_str(&digits);
    label.push('%');
    label
}
