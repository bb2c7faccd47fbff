//! Utility functions and types used accross the library
use crate::Scalar;

/// Round to the nearest integer, halfway cases are rounded away from zero.
///
/// Pixel centers are at `.5` so this is the tie-break rule for span ends.
#[inline]
pub fn round_to_int(value: Scalar) -> i32 {
    value.round() as i32
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(($v0 - $v1).abs() < $crate::EPSILON, "{} != {}", $v0, $v1);
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!(($v0 - $v1).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }

    #[test]
    fn test_round_to_int() {
        assert_eq!(round_to_int(0.5), 1);
        assert_eq!(round_to_int(1.49), 1);
        assert_eq!(round_to_int(2.5), 3);
        assert_eq!(round_to_int(-0.5), -1);
        assert_eq!(round_to_int(-0.4), 0);
    }
}
