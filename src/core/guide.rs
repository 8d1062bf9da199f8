/// Reference value the frame emphasizes when an axis asks for a guide line.
pub const DEFAULT_GUIDE_VALUE: f64 = 0.0;

/// Returns `true` when `value` lies inside the closed domain interval.
///
/// Reversed domains are accepted; NaN is never inside.
#[must_use]
pub fn is_in_domain(value: f64, domain: (f64, f64)) -> bool {
    let (min, max) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    value >= min && value <= max
}

/// Resolves the guide value to inject into one axis's tick set for this pass.
#[must_use]
pub fn resolve_guide_value(show_guide: bool, value: f64, domain: (f64, f64)) -> Option<f64> {
    (show_guide && is_in_domain(value, domain)).then_some(value)
}
