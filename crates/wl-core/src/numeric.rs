use crate::WlError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, WlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WlError::NonFinite { what, value: v })
    }
}

/// Render a float the way generated source and diagnostics expect: the
/// shortest text that parses back to the identical value.
pub fn fmt_real(v: Real) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn fmt_real_is_exact() {
        assert_eq!(fmt_real(330.0), "330");
        assert_eq!(fmt_real(-5.0), "-5");
        assert_eq!(fmt_real(0.7), "0.7");
        for v in [1e-12, 4.7e-6, 0.1 + 0.2, 123456.789] {
            assert_eq!(fmt_real(v).parse::<f64>().unwrap(), v);
        }
    }

    proptest::proptest! {
        #[test]
        fn fmt_real_parses_back(v in proptest::num::f64::NORMAL) {
            proptest::prop_assert_eq!(fmt_real(v).parse::<f64>().unwrap(), v);
        }
    }
}
