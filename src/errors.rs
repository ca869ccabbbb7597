//! Errors shared by every check
//!
//! None of these are recovered from inside the library: a check run is
//! single-shot, so the binary catches whatever bubbles up, prints a single
//! `Error: {message}` line, and exits Critical. No partial measurement is
//! ever reported as a success.

use std::fmt;

use reqwest::StatusCode;

/// Everything that can go wrong between the HTTP request and the final
/// output line.
#[derive(Debug)]
pub enum CheckError {
    /// Network-level failure: DNS, connection refused, timeout.
    Transport(reqwest::Error),
    /// The stats endpoint answered, but with a non-2xx status.
    Http { status: StatusCode, url: String },
    /// The response body was not valid JSON.
    Parse { url: String, detail: String },
    /// An expected key path was absent, or held the wrong type.
    Schema { path: String, detail: String },
    /// The output formatter was handed an unrecognized state keyword.
    InvalidState(String),
    /// Required configuration was missing.
    Config(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::errors::CheckError::*;
        match *self {
            Transport(ref e) => write!(f, "{}", e),
            Http {
                ref status,
                ref url,
            } => write!(f, "HTTP {} from {}", status, url),
            Parse {
                ref url,
                ref detail,
            } => write!(f, "invalid JSON from {}: {}", url, detail),
            Schema {
                ref path,
                ref detail,
            } => write!(f, "unexpected stats format at '{}': {}", path, detail),
            InvalidState(ref state) => write!(f, "bad check output state: {}", state),
            Config(ref msg) => write!(f, "{}", msg),
        }
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(e: reqwest::Error) -> CheckError {
        CheckError::Transport(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schema_error_names_the_path() {
        let err = CheckError::Schema {
            path: "indices.docs.count".to_owned(),
            detail: "key not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected stats format at 'indices.docs.count': key not found"
        );
    }

    #[test]
    fn http_error_names_status_and_url() {
        let err = CheckError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://es:9200/_cluster/stats".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 500 Internal Server Error from http://es:9200/_cluster/stats"
        );
    }
}
