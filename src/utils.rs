use lighthouse_timer::limits;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for duration entry parsing
static ENTRY_COLON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());
static ENTRY_SECONDS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*s$").unwrap());
static ENTRY_MINUTES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*m$").unwrap());

/// Unit a parsed duration entry carries, when the text names one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryUnit {
    Seconds,
    Minutes,
}

/// A parsed duration field entry. `unit` is `None` for a bare number, which
/// keeps whatever unit the field is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationEntry {
    pub value: u32,
    pub unit: Option<EntryUnit>,
}

/// Duration parsing error types for user-facing validation messages
#[derive(Debug, PartialEq, Eq)]
pub enum DurationParseError {
    EmptyInput,
    InvalidFormat,
    InvalidSeconds(u32),
    OutOfRange { max: u32 },
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationParseError::EmptyInput => write!(f, "Duration cannot be empty"),
            DurationParseError::InvalidFormat => {
                write!(f, "Invalid duration. Use: 90, 1:30, 90s, or 2m")
            }
            DurationParseError::InvalidSeconds(s) => {
                write!(f, "Invalid seconds: {} (must be 0-59)", s)
            }
            DurationParseError::OutOfRange { max } => {
                write!(f, "Duration must be between 1 and {}", max)
            }
        }
    }
}

impl std::error::Error for DurationParseError {}

/// Parse a duration field entry in various formats.
///
/// Supported formats:
/// - Bare number: "90" (stays in the field's current unit)
/// - Minutes:seconds: "1:30" (becomes seconds)
/// - Explicit seconds: "90s"
/// - Explicit minutes: "2m"
pub fn parse_duration_entry(input: &str) -> Result<DurationEntry, DurationParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationParseError::EmptyInput);
    }

    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(DurationEntry { value, unit: None });
    }

    if let Some(captures) = ENTRY_COLON_REGEX.captures(trimmed) {
        let minutes: u32 = captures[1]
            .parse()
            .map_err(|_| DurationParseError::InvalidFormat)?;
        let seconds: u32 = captures[2]
            .parse()
            .map_err(|_| DurationParseError::InvalidFormat)?;
        if seconds > 59 {
            return Err(DurationParseError::InvalidSeconds(seconds));
        }
        return Ok(DurationEntry {
            value: minutes * 60 + seconds,
            unit: Some(EntryUnit::Seconds),
        });
    }

    if let Some(captures) = ENTRY_SECONDS_REGEX.captures(trimmed) {
        let value: u32 = captures[1]
            .parse()
            .map_err(|_| DurationParseError::InvalidFormat)?;
        return Ok(DurationEntry {
            value,
            unit: Some(EntryUnit::Seconds),
        });
    }

    if let Some(captures) = ENTRY_MINUTES_REGEX.captures(trimmed) {
        let value: u32 = captures[1]
            .parse()
            .map_err(|_| DurationParseError::InvalidFormat)?;
        return Ok(DurationEntry {
            value,
            unit: Some(EntryUnit::Minutes),
        });
    }

    Err(DurationParseError::InvalidFormat)
}

/// Upper bound for a duration field given its current unit.
pub fn duration_max(in_minutes: bool) -> u32 {
    if in_minutes {
        limits::MAX_MINUTES
    } else {
        limits::MAX_SECONDS
    }
}

/// Validate a parsed duration entry against the field's unit bounds.
/// The entry's own unit, when present, decides which bound applies.
pub fn validate_duration_entry(
    entry: DurationEntry,
    field_in_minutes: bool,
) -> Result<DurationEntry, DurationParseError> {
    let in_minutes = match entry.unit {
        Some(EntryUnit::Minutes) => true,
        Some(EntryUnit::Seconds) => false,
        None => field_in_minutes,
    };
    let max = duration_max(in_minutes);
    if entry.value < limits::MIN_TIME || entry.value > max {
        return Err(DurationParseError::OutOfRange { max });
    }
    Ok(entry)
}

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Convert a duration value when its unit toggle flips. Seconds round to the
/// nearest minute; minutes expand to seconds clamped at the seconds bound.
pub fn convert_on_unit_toggle(value: u32, currently_minutes: bool) -> u32 {
    if currently_minutes {
        (value * 60).min(limits::MAX_SECONDS)
    } else {
        ((value as f64 / 60.0).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers_keep_the_field_unit() {
        assert_eq!(
            parse_duration_entry("90"),
            Ok(DurationEntry {
                value: 90,
                unit: None
            })
        );
    }

    #[test]
    fn colon_and_suffix_formats_carry_their_unit() {
        assert_eq!(
            parse_duration_entry("1:30"),
            Ok(DurationEntry {
                value: 90,
                unit: Some(EntryUnit::Seconds)
            })
        );
        assert_eq!(
            parse_duration_entry("45s"),
            Ok(DurationEntry {
                value: 45,
                unit: Some(EntryUnit::Seconds)
            })
        );
        assert_eq!(
            parse_duration_entry("2m"),
            Ok(DurationEntry {
                value: 2,
                unit: Some(EntryUnit::Minutes)
            })
        );
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert_eq!(
            parse_duration_entry(""),
            Err(DurationParseError::EmptyInput)
        );
        assert_eq!(
            parse_duration_entry("1:75"),
            Err(DurationParseError::InvalidSeconds(75))
        );
        assert_eq!(
            parse_duration_entry("abc"),
            Err(DurationParseError::InvalidFormat)
        );
    }

    #[test]
    fn bounds_follow_the_effective_unit() {
        let seconds_entry = DurationEntry {
            value: 9999,
            unit: None,
        };
        assert!(validate_duration_entry(seconds_entry, false).is_ok());
        assert_eq!(
            validate_duration_entry(seconds_entry, true),
            Err(DurationParseError::OutOfRange {
                max: limits::MAX_MINUTES
            })
        );

        let explicit_minutes = DurationEntry {
            value: 200,
            unit: Some(EntryUnit::Minutes),
        };
        // explicit unit wins over the field unit
        assert_eq!(
            validate_duration_entry(explicit_minutes, false),
            Err(DurationParseError::OutOfRange {
                max: limits::MAX_MINUTES
            })
        );
    }

    #[test]
    fn unit_toggle_converts_and_clamps() {
        assert_eq!(convert_on_unit_toggle(2, true), 120);
        assert_eq!(convert_on_unit_toggle(300, true), 9999); // clamped
        assert_eq!(convert_on_unit_toggle(90, false), 2); // rounds up
        assert_eq!(convert_on_unit_toggle(20, false), 1); // never to zero
    }
}
