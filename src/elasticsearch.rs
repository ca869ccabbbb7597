//! Talk to the Elasticsearch stats API
//!
//! This module knows how to build the two stats URIs, fetch one JSON
//! snapshot over HTTP, and collect an ordered series of snapshots spaced by
//! a fixed delay. Everything here is synchronous: rate checks need strictly
//! sequential snapshots of a monotonically advancing counter, so the only
//! suspension point is the sleep between samples.

use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::errors::CheckError;

/// Node selector used when no node id has been configured.
const ALL_NODES: &str = "_all";

/// Where to find the cluster. Immutable for the lifetime of one check run.
#[derive(Debug, Clone)]
pub struct ConnectionTarget {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub node: Option<String>,
}

impl ConnectionTarget {
    pub fn new(scheme: &str, host: &str, port: u16, node: Option<&str>) -> ConnectionTarget {
        ConnectionTarget {
            scheme: scheme.to_owned(),
            host: host.to_owned(),
            port,
            node: node.map(|n| n.to_owned()),
        }
    }

    /// `{scheme}://{host}:{port}/_cluster/stats`
    pub fn cluster_stats_url(&self) -> String {
        format!("{}://{}:{}/_cluster/stats", self.scheme, self.host, self.port)
    }

    /// `{scheme}://{host}:{port}/_nodes/{node}/stats`, selecting all nodes
    /// when no node id was given.
    pub fn node_stats_url(&self) -> String {
        let node = self.node.as_deref().unwrap_or(ALL_NODES);
        format!(
            "{}://{}:{}/_nodes/{}/stats",
            self.scheme, self.host, self.port, node
        )
    }

    /// The node id this target selects, for checks that cannot work
    /// cluster-wide.
    pub fn require_node(&self) -> Result<&str, CheckError> {
        match self.node.as_deref() {
            Some(node) if !node.is_empty() => Ok(node),
            _ => Err(CheckError::Config(
                "a node id is required for this check".to_owned(),
            )),
        }
    }
}

/// Fetches stats snapshots over HTTP.
///
/// One GET per snapshot, no retries. The transport timeout is the only
/// timeout; the monitoring scheduler is responsible for killing checks that
/// run too long.
pub struct StatsClient {
    client: Client,
    debug: bool,
}

impl StatsClient {
    pub fn new(debug: bool) -> Result<StatsClient, CheckError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(StatsClient { client, debug })
    }

    /// Issue exactly one GET and parse the body as JSON.
    pub fn fetch(&self, url: &str) -> Result<Value, CheckError> {
        if self.debug {
            println!("INFO: querying {}", url);
        }
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Http {
                status,
                url: url.to_owned(),
            });
        }
        let body = response.text()?;
        let stats: Value = serde_json::from_str(&body).map_err(|e| CheckError::Parse {
            url: url.to_owned(),
            detail: e.to_string(),
        })?;
        if self.debug {
            println!("INFO: response from {}:\n{:#}", url, stats);
        }
        Ok(stats)
    }

    /// Take `count` snapshots of `url`, sleeping `interval` between
    /// consecutive fetches. The first failed fetch aborts the whole series.
    pub fn sample(
        &self,
        url: &str,
        interval: Duration,
        count: usize,
    ) -> Result<Vec<Value>, CheckError> {
        sample_with(interval, count, || self.fetch(url))
    }
}

/// The sampling loop, generic over the fetch so that failure propagation
/// can be exercised without a live cluster.
///
/// No sleep happens before the first fetch or after the last one, so
/// `count == 1` never sleeps and total wall-clock time is roughly
/// `(count - 1) * interval` plus request latencies.
pub fn sample_with<F>(interval: Duration, count: usize, mut fetch: F) -> Result<Vec<Value>, CheckError>
where
    F: FnMut() -> Result<Value, CheckError>,
{
    if count == 0 {
        return Err(CheckError::Config(
            "sample count must be at least 1".to_owned(),
        ));
    }
    let mut series = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 && interval > Duration::from_secs(0) {
            sleep(interval);
        }
        series.push(fetch()?);
    }
    Ok(series)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn target(node: Option<&str>) -> ConnectionTarget {
        ConnectionTarget::new("http", "es01.example.com", 9200, node)
    }

    #[test]
    fn cluster_stats_url_from_target() {
        assert_eq!(
            target(None).cluster_stats_url(),
            "http://es01.example.com:9200/_cluster/stats"
        );
    }

    #[test]
    fn node_stats_url_defaults_to_all_nodes() {
        assert_eq!(
            target(None).node_stats_url(),
            "http://es01.example.com:9200/_nodes/_all/stats"
        );
    }

    #[test]
    fn node_stats_url_uses_the_node_id() {
        assert_eq!(
            target(Some("data-3")).node_stats_url(),
            "http://es01.example.com:9200/_nodes/data-3/stats"
        );
    }

    #[test]
    fn missing_node_id_is_a_config_error() {
        match target(None).require_node() {
            Err(CheckError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
        match target(Some("")).require_node() {
            Err(CheckError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
        assert_eq!(target(Some("data-3")).require_node().unwrap(), "data-3");
    }

    #[test]
    fn single_sample_series_is_legal() {
        let series = sample_with(Duration::from_secs(0), 1, || Ok(json!({"n": 1}))).unwrap();
        assert_eq!(series, vec![json!({"n": 1})]);
    }

    #[test]
    fn samples_are_ordered_oldest_first() {
        let mut n = 0;
        let series = sample_with(Duration::from_secs(0), 3, || {
            n += 1;
            Ok(json!(n))
        })
        .unwrap();
        assert_eq!(series, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn failed_fetch_aborts_the_series() {
        let mut calls = 0;
        let result = sample_with(Duration::from_secs(0), 5, || {
            calls += 1;
            if calls == 3 {
                Err(CheckError::Config("boom".to_owned()))
            } else {
                Ok(json!(calls))
            }
        });
        match result {
            Err(CheckError::Config(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected the fetch error, got {:?}", other),
        }
        assert_eq!(calls, 3, "no fetch should happen after the failure");
    }

    #[test]
    fn zero_samples_is_a_config_error() {
        match sample_with(Duration::from_secs(0), 0, || Ok(json!(null))) {
            Err(CheckError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}
