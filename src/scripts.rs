//! Documentation about the check binaries contained herein
//!
//! - [check-es-cluster-status](#check-es-cluster-status)
//! - [check-es-indexed-docs](#check-es-indexed-docs)
//! - [check-es-heap](#check-es-heap)
//! - [check-es-disk-io](#check-es-disk-io)
//!
//! All four checks speak to the cluster over plain HTTP GETs, print a
//! single standard plugin line on stdout, and exit 0/1/2/3 for
//! OK/Warning/Critical/Unknown. Any error (network, HTTP, JSON, schema,
//! missing configuration) prints `Error: {message}` and exits 2.
//!
//! Common options:
//!
//! ```plain
//!     -H, --hostname <HOST>      Hostname to connect to
//!     -p, --port <PORT>          Elasticsearch HTTP port [default: 9200]
//!     -s, --http-scheme <SCHEME> HTTP scheme to connect with [default: http]
//!         --debug                Print the queried URIs, raw stats, and
//!                                computed values
//! ```
//!
//! # check-es-cluster-status
//!
//! Queries `/_cluster/stats` and goes Critical unless the cluster health
//! color is `green`.
//!
//! ```plain
//! $ check-es-cluster-status -H es01
//! OK: cluster status is green, super green
//! ```
//!
//! # check-es-indexed-docs
//!
//! Samples `/_cluster/stats` several times and alerts when the number of
//! newly indexed documents over the window is *at or below* the thresholds,
//! i.e. when the cluster has stopped ingesting.
//!
//! ```plain
//!     -w, --warn <COUNT>            Docs indexed over the window to warn at
//!                                   [default: 5000]
//!     -c, --crit <COUNT>            Docs indexed over the window to go
//!                                   critical at [default: 2000]
//!         --sample-interval <SECS>  Seconds between two samples [default: 1]
//!         --max-sample <COUNT>      Number of samples to take [default: 5]
//! ```
//!
//! # check-es-heap
//!
//! Queries `/_nodes/{node}/stats` for one node and alerts when the JVM
//! heap-used percentage is at or above the thresholds.
//!
//! ```plain
//!         --node-id <NODE>  Check this specific node (required)
//!     -w, --warn <PERCENT>  Percent of heap used to warn at [default: 80]
//!     -c, --crit <PERCENT>  Percent of heap used to go critical at
//!                           [default: 90]
//! ```
//!
//! # check-es-disk-io
//!
//! Queries `/_nodes/{node}/stats` for one node, scales the cumulative disk
//! I/O operation counter by a fixed divisor (8388608, inherited from the
//! previous generation of this check), and alerts when the scaled value is
//! at or above the thresholds.
//!
//! ```plain
//!         --node-id <NODE>  Check this specific node (required)
//!     -w, --warn <IOPS>     Scaled IOps to warn at [default: 80]
//!     -c, --crit <IOPS>     Scaled IOps to go critical at [default: 90]
//! ```
