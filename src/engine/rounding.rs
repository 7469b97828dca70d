/// Round half away from zero to the nearest integer.
///
/// All quantities rounded this way are non-negative, where this is the
/// same as round-half-up.
pub fn round0(x: f64) -> i64 {
    x.round() as i64
}

/// Round to one decimal place.
///
/// Values too large to scale (including the amortisation sentinel) are
/// returned unchanged; they carry no fractional digits anyway.
pub fn round1(x: f64) -> f64 {
    let scaled = x * 10.0;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round0_half_up() {
        assert_eq!(round0(799.5), 800);
        assert_eq!(round0(799.49), 799);
        assert_eq!(round0(0.0), 0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(2.1917), 2.2);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round1(146.0), 146.0);
    }

    #[test]
    fn test_round1_passes_sentinel_through() {
        assert_eq!(round1(f64::MAX), f64::MAX);
    }

    proptest! {
        #[test]
        fn round1_is_idempotent(x in -1.0e9f64..1.0e9f64) {
            let once = round1(x);
            prop_assert_eq!(round1(once), once);
        }
    }
}
