// wl-core/src/units.rs
//
// SI-prefix helpers. Component values are stored as plain base-unit floats;
// these exist so callers can write `kilo(4.7)` or `"4.7k"` instead of 4700.0.

use crate::numeric::{Real, ensure_finite};
use crate::{WlError, WlResult};

#[inline]
pub fn pico(v: Real) -> Real {
    v * 1e-12
}

#[inline]
pub fn nano(v: Real) -> Real {
    v * 1e-9
}

#[inline]
pub fn micro(v: Real) -> Real {
    v * 1e-6
}

#[inline]
pub fn milli(v: Real) -> Real {
    v * 1e-3
}

#[inline]
pub fn kilo(v: Real) -> Real {
    v * 1e3
}

#[inline]
pub fn mega(v: Real) -> Real {
    v * 1e6
}

#[inline]
pub fn giga(v: Real) -> Real {
    v * 1e9
}

/// Suffix table, longest spellings first so "meg" wins over "m".
const SUFFIXES: &[(&str, Real)] = &[
    ("meg", 1e6),
    ("Meg", 1e6),
    ("MEG", 1e6),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("K", 1e3),
    ("M", 1e6),
    ("G", 1e9),
];

/// Prefixes used when formatting, ascending.
const PREFIXES: &[(&str, Real)] = &[
    ("p", 1e-12),
    ("n", 1e-9),
    ("µ", 1e-6),
    ("m", 1e-3),
    ("", 1.0),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
];

/// Parse a number with an optional SI suffix: `"330"`, `"4.7k"`, `"10u"`,
/// `"1meg"`, `"2.2e-9"`.
pub fn parse_si(text: &str) -> WlResult<Real> {
    let text = text.trim();
    let bad = || WlError::BadQuantity {
        text: text.to_string(),
    };

    if let Ok(v) = text.parse::<Real>() {
        return ensure_finite(v, "quantity");
    }

    for (suffix, scale) in SUFFIXES {
        if let Some(mantissa) = text.strip_suffix(suffix) {
            let v = mantissa.parse::<Real>().map_err(|_| bad())?;
            return ensure_finite(v * scale, "quantity");
        }
    }

    Err(bad())
}

/// Format a value with the closest SI prefix, e.g. `4700.0, "Ω"` -> `"4.7kΩ"`.
pub fn format_si(value: Real, unit: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}{unit}");
    }

    let magnitude = value.abs();
    let (prefix, scale) = PREFIXES
        .iter()
        .rev()
        .find(|(_, scale)| magnitude >= *scale)
        .copied()
        .unwrap_or(PREFIXES[0]);

    let mantissa = format!("{:.3}", value / scale);
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{mantissa}{prefix}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers() {
        assert_eq!(kilo(4.7), 4700.0);
        assert_eq!(mega(1.0), 1e6);
        assert!((micro(10.0) - 1e-5).abs() < 1e-18);
        assert!((pico(100.0) - 1e-10).abs() < 1e-22);
    }

    #[test]
    fn parse_plain_and_suffixed() {
        assert_eq!(parse_si("330").unwrap(), 330.0);
        assert_eq!(parse_si("4.7k").unwrap(), 4700.0);
        assert_eq!(parse_si("1meg").unwrap(), 1e6);
        assert_eq!(parse_si("2M").unwrap(), 2e6);
        assert!((parse_si("10u").unwrap() - 1e-5).abs() < 1e-18);
        assert!((parse_si("5m").unwrap() - 5e-3).abs() < 1e-15);
        assert_eq!(parse_si("2.2e-9").unwrap(), 2.2e-9);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_si("ten"),
            Err(WlError::BadQuantity { .. })
        ));
        assert!(parse_si("4.7x").is_err());
        assert!(parse_si("inf").is_err());
    }

    #[test]
    fn format_picks_prefix() {
        assert_eq!(format_si(4700.0, "Ω"), "4.7kΩ");
        assert_eq!(format_si(330.0, "Ω"), "330Ω");
        assert_eq!(format_si(1e-6, "F"), "1µF");
        assert_eq!(format_si(0.0, "V"), "0V");
        assert_eq!(format_si(-12.0, "V"), "-12V");
    }
}
