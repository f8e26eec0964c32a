//! Large-number abbreviation ("1.5k", "2.25m", ...).

/// One abbreviation breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub threshold: f64,
    pub suffix: &'static str,
}

impl Unit {
    pub const fn new(threshold: f64, suffix: &'static str) -> Self {
        Self { threshold, suffix }
    }
}

/// Default breakpoint table: thousand through sextillion.
pub const KMBT: &[Unit] = &[
    Unit::new(1e3, "k"),
    Unit::new(1e6, "m"),
    Unit::new(1e9, "B"),
    Unit::new(1e12, "T"),
    Unit::new(1e15, "Qd"),
    Unit::new(1e18, "Qt"),
    Unit::new(1e21, "Sx"),
];

/// Abbreviate `value` with the default [`KMBT`] table.
pub fn convert(value: f64) -> String {
    convert_with(value, KMBT)
}

/// Abbreviate `value` using the largest breakpoint whose threshold is at most
/// `|value|`. The quotient is rounded to two decimals and printed without
/// trailing zeros. Values below every threshold are printed as-is.
///
/// `units` may be in any order; it is never modified.
pub fn convert_with(value: f64, units: &[Unit]) -> String {
    let abs = value.abs();

    let mut sorted: Vec<&Unit> = units.iter().collect();
    sorted.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));

    match sorted.into_iter().find(|u| abs >= u.threshold) {
        Some(unit) => format!("{}{}", round2(value / unit.threshold), unit.suffix),
        None => plain(value),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn plain(value: f64) -> String {
    // -0.0 would otherwise print as "-0"
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_plain() {
        assert_eq!(convert(0.0), "0");
        assert_eq!(convert(-0.0), "0");
        assert_eq!(convert(1.0), "1");
        assert_eq!(convert(999.0), "999");
        assert_eq!(convert(2.5), "2.5");
        assert_eq!(convert(-42.0), "-42");
    }

    #[test]
    fn thousands() {
        assert_eq!(convert(1000.0), "1k");
        assert_eq!(convert(1500.0), "1.5k");
        assert_eq!(convert(1234.0), "1.23k");
        assert_eq!(convert(1235.0), "1.24k");
    }

    #[test]
    fn every_suffix() {
        assert_eq!(convert(2.5e6), "2.5m");
        assert_eq!(convert(3e9), "3B");
        assert_eq!(convert(4.75e12), "4.75T");
        assert_eq!(convert(1e15), "1Qd");
        assert_eq!(convert(1e18), "1Qt");
        assert_eq!(convert(7e21), "7Sx");
    }

    #[test]
    fn beyond_last_breakpoint_keeps_largest_suffix() {
        assert_eq!(convert(1e24), "1000Sx");
    }

    #[test]
    fn rounding_can_reach_next_band_value() {
        // 999.999k rounds to 1000k rather than switching to "m"
        assert_eq!(convert(999_999.0), "1000k");
    }

    #[test]
    fn negative_values_use_magnitude() {
        assert_eq!(convert(-1500.0), "-1.5k");
        assert_eq!(convert(-2e6), "-2m");
    }

    #[test]
    fn unsorted_custom_table() {
        let units = [Unit::new(10.0, "da"), Unit::new(100.0, "h")];
        assert_eq!(convert_with(250.0, &units), "2.5h");
        assert_eq!(convert_with(25.0, &units), "2.5da");
        assert_eq!(convert_with(5.0, &units), "5");
        // table is untouched
        assert_eq!(units[0].threshold, 10.0);
    }

    #[test]
    fn empty_table_is_plain() {
        assert_eq!(convert_with(123456.0, &[]), "123456");
    }

    #[test]
    fn nan_is_plain() {
        assert_eq!(convert(f64::NAN), "NaN");
    }
}
