//! Project metrics out of stats snapshots
//!
//! Each check cares about exactly one metric, so the key paths are fixed
//! per function instead of going through a schema-mapping layer. A missing
//! key or a wrong type anywhere along a path is a
//! [`CheckError::Schema`](../errors/enum.CheckError.html) naming the dotted
//! path that failed.

use serde_json::Value;

use crate::errors::CheckError;

/// Divisor the disk-io check applies to the raw operation counter before
/// comparing against thresholds.
///
/// Carried over verbatim from the previous generation of this check, which
/// never documented how it arrived at the value.
pub const DISK_IO_OP_SCALE: f64 = 8_388_608.0;

fn lookup<'a>(stats: &'a Value, path: &[&str]) -> Result<&'a Value, CheckError> {
    let mut current = stats;
    let mut walked: Vec<&str> = Vec::with_capacity(path.len());
    for key in path {
        walked.push(*key);
        current = current.get(key).ok_or_else(|| CheckError::Schema {
            path: walked.join("."),
            detail: "key not found".to_owned(),
        })?;
    }
    Ok(current)
}

fn lookup_i64(stats: &Value, path: &[&str]) -> Result<i64, CheckError> {
    let value = lookup(stats, path)?;
    value.as_i64().ok_or_else(|| CheckError::Schema {
        path: path.join("."),
        detail: format!("expected an integer, got {}", value),
    })
}

fn lookup_f64(stats: &Value, path: &[&str]) -> Result<f64, CheckError> {
    let value = lookup(stats, path)?;
    value.as_f64().ok_or_else(|| CheckError::Schema {
        path: path.join("."),
        detail: format!("expected a number, got {}", value),
    })
}

fn lookup_str<'a>(stats: &'a Value, path: &[&str]) -> Result<&'a str, CheckError> {
    let value = lookup(stats, path)?;
    value.as_str().ok_or_else(|| CheckError::Schema {
        path: path.join("."),
        detail: format!("expected a string, got {}", value),
    })
}

/// The single node entry of a node-stats response.
///
/// Node stats bodies nest per-node data under `nodes.{id}`; the checks that
/// use this query exactly one node, so the sole entry is the one they asked
/// about.
fn sole_node(stats: &Value) -> Result<&Value, CheckError> {
    let nodes = lookup(stats, &["nodes"])?;
    let map = nodes.as_object().ok_or_else(|| CheckError::Schema {
        path: "nodes".to_owned(),
        detail: format!("expected an object, got {}", nodes),
    })?;
    map.values().next().ok_or_else(|| CheckError::Schema {
        path: "nodes".to_owned(),
        detail: "no node entries in response".to_owned(),
    })
}

/// Number of documents indexed cluster-wide: `indices.docs.count` of a
/// cluster-stats snapshot.
pub fn indexed_doc_count(stats: &Value) -> Result<i64, CheckError> {
    lookup_i64(stats, &["indices", "docs", "count"])
}

/// The node's JVM heap usage percentage: `jvm.mem.heap_used_percent` of the
/// node entry in a node-stats snapshot.
pub fn heap_used_percent(stats: &Value) -> Result<f64, CheckError> {
    let node = sole_node(stats)?;
    lookup_f64(node, &["jvm", "mem", "heap_used_percent"])
}

/// The node's cumulative disk I/O operation counter: `fs.total.disk_io_op`
/// of the node entry in a node-stats snapshot.
pub fn disk_io_op(stats: &Value) -> Result<f64, CheckError> {
    let node = sole_node(stats)?;
    lookup_f64(node, &["fs", "total", "disk_io_op"])
}

/// Cluster health color from a cluster-stats snapshot: `status`, one of
/// "green", "yellow", or "red".
pub fn cluster_status(stats: &Value) -> Result<String, CheckError> {
    lookup_str(stats, &["status"]).map(|s| s.to_owned())
}

/// Apply one extractor to every snapshot of a series, oldest first.
///
/// The first extractor failure wins; no partial projection is returned.
pub fn project_series<T, F>(series: &[Value], extract: F) -> Result<Vec<T>, CheckError>
where
    F: Fn(&Value) -> Result<T, CheckError>,
{
    series.iter().map(extract).collect()
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn node_stats(node: Value) -> Value {
        json!({ "nodes": { "pQ7mG1VhTzqQ0tA": node } })
    }

    #[test]
    fn indexed_doc_count_reads_the_exact_count() {
        let stats = json!({"indices": {"docs": {"count": 8_589_934_592_i64}}});
        assert_eq!(indexed_doc_count(&stats).unwrap(), 8_589_934_592);
    }

    #[test]
    fn missing_key_names_the_dotted_path() {
        let stats = json!({"indices": {"shards": {}}});
        match indexed_doc_count(&stats) {
            Err(CheckError::Schema { path, .. }) => assert_eq!(path, "indices.docs"),
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_type_names_the_dotted_path() {
        let stats = json!({"indices": {"docs": {"count": "lots"}}});
        match indexed_doc_count(&stats) {
            Err(CheckError::Schema { path, detail }) => {
                assert_eq!(path, "indices.docs.count");
                assert!(detail.contains("expected an integer"), "detail: {}", detail);
            }
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn heap_used_percent_reads_the_node_entry() {
        let stats = node_stats(json!({"jvm": {"mem": {"heap_used_percent": 42}}}));
        assert_eq!(heap_used_percent(&stats).unwrap(), 42.0);
    }

    #[test]
    fn disk_io_op_reads_the_node_entry() {
        let stats = node_stats(json!({"fs": {"total": {"disk_io_op": 16_777_216}}}));
        assert_eq!(disk_io_op(&stats).unwrap(), 16_777_216.0);
    }

    #[test]
    fn empty_nodes_map_is_a_schema_error() {
        let stats = json!({"nodes": {}});
        match heap_used_percent(&stats) {
            Err(CheckError::Schema { path, .. }) => assert_eq!(path, "nodes"),
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn cluster_status_reads_the_color() {
        let stats = json!({"status": "yellow"});
        assert_eq!(cluster_status(&stats).unwrap(), "yellow");
    }

    #[test]
    fn project_series_preserves_order() {
        let series = vec![
            json!({"indices": {"docs": {"count": 100}}}),
            json!({"indices": {"docs": {"count": 150}}}),
            json!({"indices": {"docs": {"count": 225}}}),
        ];
        let counts = project_series(&series, indexed_doc_count).unwrap();
        assert_eq!(counts, vec![100, 150, 225]);
    }

    #[test]
    fn project_series_propagates_the_first_failure() {
        let series = vec![
            json!({"indices": {"docs": {"count": 100}}}),
            json!({"indices": {}}),
        ];
        match project_series(&series, indexed_doc_count) {
            Err(CheckError::Schema { path, .. }) => assert_eq!(path, "indices.docs"),
            other => panic!("expected Schema error, got {:?}", other),
        }
    }
}
