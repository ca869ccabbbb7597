//! Check plugins for Elasticsearch clusters
//!
//! The goal is to make it easy to run strongly-typed Nagios/Icinga-style
//! checks against an Elasticsearch cluster's HTTP stats endpoints, because
//! your monitoring system shouldn't page the wrong person because a check
//! script crashed on a typo'd status string.
//!
//! Expected use: each check binary in `src/bin` builds a
//! [`ConnectionTarget`](elasticsearch/struct.ConnectionTarget.html) from its
//! arguments, fetches (or samples) a stats snapshot, projects one metric out
//! of it, compares it against its thresholds, and renders a [`CheckResult`]
//! that both prints the standard plugin output line and picks the exit code.
//!
//! See the [`scripts`](scripts/index.html) module for docs about the
//! individual check binaries.

use std::fmt;
use std::process;
use std::str::FromStr;

use crate::errors::CheckError;
use crate::output::format_line;

pub mod elasticsearch;
pub mod errors;
pub mod metrics;
pub mod output;
pub mod scripts;

/// The state that a check has determined, ordered by severity.
///
/// Ordering matters: threshold evaluation escalates with `std::cmp::max`,
/// so a check can only ever get more severe within a single run.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Exit the process with the exit code that monitoring schedulers
    /// expect for this state.
    pub fn exit(self) -> ! {
        use crate::Status::*;
        match self {
            Ok => process::exit(0),
            Warning => process::exit(1),
            Critical => process::exit(2),
            Unknown => process::exit(3),
        }
    }

    /// The state keywords that are legal in a check output line.
    pub fn str_values() -> [&'static str; 4] {
        ["OK", "Warning", "Critical", "Unknown"]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::Status::*;
        let name = match *self {
            Ok => "OK",
            Warning => "Warning",
            Critical => "Critical",
            Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Status {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Status, CheckError> {
        match s {
            "OK" => Ok(Status::Ok),
            "Warning" => Ok(Status::Warning),
            "Critical" => Ok(Status::Critical),
            "Unknown" => Ok(Status::Unknown),
            _ => Err(CheckError::InvalidState(s.to_owned())),
        }
    }
}

/// Everything a finished check run has decided: state, human message, and
/// perf data tokens.
///
/// Every execution path of a check must produce either a `CheckResult` or
/// a `CheckError` before any exit code gets chosen.
#[derive(Debug)]
pub struct CheckResult {
    status: Status,
    message: String,
    perf: Option<Vec<String>>,
}

impl CheckResult {
    pub fn new<S: Into<String>>(status: Status, message: S, perf: Option<Vec<String>>) -> CheckResult {
        CheckResult {
            status,
            message: message.into(),
            perf,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The full plugin output line, perf data section included.
    pub fn render(&self) -> String {
        format_line(self.status, &self.message, self.perf.as_deref())
    }

    /// Print the output line and exit with the status' exit code.
    pub fn print_and_exit(self) -> ! {
        println!("{}", self.render());
        self.status.exit()
    }
}
