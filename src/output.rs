//! Render plugin output lines and performance data
//!
//! The output format is the one every Nagios/Icinga-compatible scheduler
//! consumes: a state keyword, a human message, and an optional perf data
//! section of `'label'=value[unit];warn;crit;min;max;` tokens after a
//! literal pipe.

use std::fmt;

use crate::errors::CheckError;
use crate::Status;

/// Render one performance data token.
///
/// The unit and its brackets are omitted when `unit` is empty; absent min
/// and max render as empty fields. Values appear in their natural string
/// form, so integers come out without a decimal point.
pub fn perf_data_string<V, T, B>(
    label: &str,
    value: V,
    warn: T,
    crit: T,
    unit: &str,
    min: Option<B>,
    max: Option<B>,
) -> String
where
    V: fmt::Display,
    T: fmt::Display,
    B: fmt::Display,
{
    let min = min.map(|m| m.to_string()).unwrap_or_default();
    let max = max.map(|m| m.to_string()).unwrap_or_default();
    if unit.is_empty() {
        format!("'{}'={};{};{};{};{};", label, value, warn, crit, min, max)
    } else {
        format!(
            "'{}'={}[{}];{};{};{};{};",
            label, value, unit, warn, crit, min, max
        )
    }
}

/// Render the final check line for an already-validated status.
///
/// Each perf token gets one leading and one trailing space; a `Some` perf
/// list produces the pipe section even when the list is empty, `None`
/// produces no pipe at all. Blank messages become the literal `-`.
pub fn format_line(status: Status, message: &str, perfdata: Option<&[String]>) -> String {
    let message = if message.trim().is_empty() {
        "-"
    } else {
        message
    };
    match perfdata {
        Some(tokens) => {
            let joined: String = tokens.iter().map(|t| format!(" {} ", t)).collect();
            format!("{}: {} |{}", status, message, joined)
        }
        None => format!("{}: {} ", status, message),
    }
}

/// Like [`format_line`], but validating a state keyword given as text.
pub fn check_output_string(
    state: &str,
    message: &str,
    perfdata: Option<&[String]>,
) -> Result<String, CheckError> {
    let status: Status = state.parse()?;
    Ok(format_line(status, message, perfdata))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn perf_data_with_unit_and_bounds() {
        assert_eq!(
            perf_data_string("heap_used", 42, 80, 90, "%", Some(0), Some(100)),
            "'heap_used'=42[%];80;90;0;100;"
        );
    }

    #[test]
    fn perf_data_without_unit_or_bounds() {
        assert_eq!(
            perf_data_string("x", 5, 1, 2, "", None::<i64>, None::<i64>),
            "'x'=5;1;2;;;"
        );
    }

    #[test]
    fn perf_data_floats_keep_their_natural_form() {
        assert_eq!(
            perf_data_string("disk_io_op", 2.5, 80.0, 90.0, "IOps", None::<i64>, None::<i64>),
            "'disk_io_op'=2.5[IOps];80;90;;;"
        );
    }

    #[test]
    fn line_with_perf_tokens() {
        let perf = vec!["'x'=5;1;2;;;".to_owned()];
        assert_eq!(
            check_output_string("OK", "all good", Some(&perf)).unwrap(),
            "OK: all good | 'x'=5;1;2;;; "
        );
    }

    #[test]
    fn line_with_empty_perf_list_keeps_the_pipe() {
        assert_eq!(
            check_output_string("Warning", "watch out", Some(&[])).unwrap(),
            "Warning: watch out |"
        );
    }

    #[test]
    fn line_without_perf_has_no_pipe() {
        assert_eq!(
            check_output_string("Critical", "", None).unwrap(),
            "Critical: - "
        );
    }

    #[test]
    fn bogus_state_is_rejected() {
        match check_output_string("Bogus", "nope", None) {
            Err(CheckError::InvalidState(s)) => assert_eq!(s, "Bogus"),
            other => panic!("expected InvalidState, got {:?}", other),
        }
    }
}
