pub const WATTS_PER_KILOWATT: u32 = 1_000;
pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const HOURS_PER_DAY: u32 = 24;
pub const HOURS_PER_YEAR: u32 = 8_760;
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Volumetric heat capacity of air, in J / (m3.K)
pub const AIR_VOLUMETRIC_HEAT_CAPACITY: f64 = 1_200.;

/// Convert an energy total in Wh into kWh per m2 of floor area.
pub fn watt_hours_to_kwh_per_m2(energy: f64, floor_area: f64) -> f64 {
    energy / (WATTS_PER_KILOWATT as f64 * floor_area)
}

/// Zero-based month (January = 0) in which the given hour of a non-leap year falls. Hours past
/// the end of the year wrap around.
pub fn month_for_hour(hour: u32) -> usize {
    let mut day_of_year = (hour % HOURS_PER_YEAR) / HOURS_PER_DAY;
    for (month, days) in DAYS_IN_MONTH.iter().enumerate() {
        if day_of_year < *days {
            return month;
        }
        day_of_year -= days;
    }
    DAYS_IN_MONTH.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_watt_hours_to_kwh_per_m2() {
        assert_relative_eq!(watt_hours_to_kwh_per_m2(34_300., 34.3), 1.);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(743, 0)]
    #[case(744, 1)]
    #[case(1_416, 2)]
    #[case(8_759, 11)]
    #[case(8_760, 0)]
    fn test_month_for_hour(#[case] hour: u32, #[case] expected: usize) {
        assert_eq!(month_for_hour(hour), expected);
    }
}
