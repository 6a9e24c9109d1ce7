//! Total-enough ordering over [`Element`] values.

use std::cmp::Ordering;

use algoviz_types::Element;

/// Orders two elements.
///
/// Integers compare exactly, floats with [`f64::total_cmp`], mixed integer
/// and float pairs numerically, and strings lexicographically by byte. A
/// string against a number is reported as `Equal`; the algorithm contract
/// rejects such mixtures before any algorithm runs.
pub fn compare(a: &Element, b: &Element) -> Ordering {
    match (a, b) {
        (Element::Int(x), Element::Int(y)) => x.cmp(y),
        (Element::Float(x), Element::Float(y)) => x.total_cmp(y),
        (Element::Int(x), Element::Float(y)) => int_to_f64(*x).total_cmp(y),
        (Element::Float(x), Element::Int(y)) => x.total_cmp(&int_to_f64(*y)),
        (Element::Str(x), Element::Str(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Whether `a` sorts strictly after `b`.
pub fn greater(a: &Element, b: &Element) -> bool {
    compare(a, b) == Ordering::Greater
}

/// Maps an ordering to the `-1 / 0 / 1` convention used on the wire.
pub const fn ordering_to_i8(ordering: Ordering) -> i8 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[allow(clippy::cast_precision_loss)]
const fn int_to_f64(value: i64) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_compare_numerically() {
        assert_eq!(compare(&Element::Int(2), &Element::Float(2.5)), Ordering::Less);
        assert_eq!(compare(&Element::Float(3.0), &Element::Int(3)), Ordering::Equal);
        assert_eq!(compare(&Element::Int(-1), &Element::Int(-4)), Ordering::Greater);
    }

    #[test]
    fn strings_compare_by_byte() {
        assert_eq!(compare(&"apple".into(), &"banana".into()), Ordering::Less);
        assert_eq!(compare(&"Zed".into(), &"abc".into()), Ordering::Less);
    }

    #[test]
    fn string_against_number_is_equal() {
        assert_eq!(compare(&"7".into(), &Element::Int(7)), Ordering::Equal);
        assert_eq!(compare(&Element::Float(1.5), &"x".into()), Ordering::Equal);
    }

    #[test]
    fn ordering_maps_to_signed_result() {
        assert_eq!(ordering_to_i8(Ordering::Less), -1);
        assert_eq!(ordering_to_i8(Ordering::Equal), 0);
        assert_eq!(ordering_to_i8(Ordering::Greater), 1);
    }
}
