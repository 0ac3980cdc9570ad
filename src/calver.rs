// Calendar version transform for moodle.org release identifiers

use crate::moodle::Maturity;

/// Convert a moodle.org version (e.g. 2024071800) into a calendar version string
///
/// The digits are read positionally: year `[0..4]`, month `[4..6]`, day `[6..8]`
/// and minor `[8..10]`. Leading zeros are dropped and a group missing from a
/// short identifier reads as 0. A pre-release suffix is appended for every
/// maturity below stable.
///
/// # Examples
/// ```
/// use moodleorg::calver::to_calver;
/// use moodleorg::moodle::Maturity;
///
/// assert_eq!(to_calver(2024071800, Maturity::Stable), "2024.7.18.0");
/// assert_eq!(to_calver(2024071800, Maturity::Alpha), "2024.7.18.0-alpha");
/// ```
pub fn to_calver(version: u64, maturity: Maturity) -> String {
    let digits = version.to_string();

    let year = digit_group(&digits, 0, 4);
    let month = digit_group(&digits, 4, 6);
    let day = digit_group(&digits, 6, 8);
    let minor = digit_group(&digits, 8, 10);

    format!("{}.{}.{}.{}{}", year, month, day, minor, maturity.suffix())
}

fn digit_group(digits: &str, start: usize, end: usize) -> u64 {
    digits
        .get(start..end.min(digits.len()))
        .and_then(|group| group.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_version() {
        assert_eq!(to_calver(2024071800, Maturity::Stable), "2024.7.18.0");
        assert_eq!(to_calver(2023010100, Maturity::Stable), "2023.1.1.0");
        assert_eq!(to_calver(2019111812, Maturity::Stable), "2019.11.18.12");
    }

    #[test]
    fn test_maturity_suffixes() {
        assert_eq!(to_calver(2024071800, Maturity::Alpha), "2024.7.18.0-alpha");
        assert_eq!(to_calver(2024071800, Maturity::Beta), "2024.7.18.0-beta");
        assert_eq!(to_calver(2024071801, Maturity::Rc), "2024.7.18.1-rc");
    }

    #[test]
    fn test_short_identifiers_pad_missing_groups() {
        assert_eq!(to_calver(20240718, Maturity::Stable), "2024.7.18.0");
        assert_eq!(to_calver(202407, Maturity::Stable), "2024.7.0.0");
        assert_eq!(to_calver(2024071, Maturity::Stable), "2024.7.1.0");
        assert_eq!(to_calver(0, Maturity::Stable), "0.0.0.0");
    }

    #[test]
    fn test_extra_digits_are_ignored() {
        assert_eq!(to_calver(202407180012, Maturity::Stable), "2024.7.18.0");
    }

    #[test]
    fn test_groups_are_positional() {
        for (version, expected) in [
            (2000010100u64, "2000.1.1.0"),
            (2099123199, "2099.12.31.99"),
            (2015050509, "2015.5.5.9"),
        ] {
            assert_eq!(to_calver(version, Maturity::Stable), expected);
        }
    }
}
