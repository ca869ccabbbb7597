//! Check the document indexing rate of an Elasticsearch cluster

use std::cmp::max;
use std::time::Duration;

use clap::{crate_version, value_t, App, Arg};

use esmon_plugins::elasticsearch::{ConnectionTarget, StatsClient};
use esmon_plugins::errors::CheckError;
use esmon_plugins::metrics::{indexed_doc_count, project_series};
use esmon_plugins::output::perf_data_string;
use esmon_plugins::{CheckResult, Status};

struct Args {
    target: ConnectionTarget,
    warn: i64,
    crit: i64,
    interval: u64,
    samples: usize,
    debug: bool,
}

fn parse_args() -> Args {
    let matches = App::new("check-es-indexed-docs")
        .version(crate_version!())
        .about(
            "Check how many documents an Elasticsearch cluster indexes over a \
             sampling window. Alerts when the count is at or below the \
             thresholds, i.e. when the cluster has stopped ingesting.",
        )
        .arg(
            Arg::with_name("hostname")
                .short("H")
                .long("hostname")
                .takes_value(true)
                .required(true)
                .help("Hostname to connect to"),
        )
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .takes_value(true)
                .help("Elasticsearch HTTP port to connect to [default: 9200]"),
        )
        .arg(
            Arg::with_name("scheme")
                .short("s")
                .long("http-scheme")
                .takes_value(true)
                .help("HTTP scheme to connect with [default: http]"),
        )
        .arg(
            Arg::with_name("warn")
                .short("w")
                .long("warn")
                .takes_value(true)
                .help("Docs indexed over the window to warn at [default: 5000]"),
        )
        .arg(
            Arg::with_name("crit")
                .short("c")
                .long("crit")
                .takes_value(true)
                .help("Docs indexed over the window to go critical at [default: 2000]"),
        )
        .arg(
            Arg::with_name("sample-interval")
                .long("sample-interval")
                .takes_value(true)
                .help("Seconds to sleep between two samples [default: 1]"),
        )
        .arg(
            Arg::with_name("max-sample")
                .long("max-sample")
                .takes_value(true)
                .help("Number of samples to take [default: 5]"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Print the queried URI, raw stats, and computed values"),
        )
        .get_matches();

    Args {
        target: ConnectionTarget::new(
            matches.value_of("scheme").unwrap_or("http"),
            matches.value_of("hostname").unwrap(),
            value_t!(matches.value_of("port"), u16).unwrap_or(9200),
            None,
        ),
        warn: value_t!(matches.value_of("warn"), i64).unwrap_or(5000),
        crit: value_t!(matches.value_of("crit"), i64).unwrap_or(2000),
        interval: value_t!(matches.value_of("sample-interval"), u64).unwrap_or(1),
        samples: value_t!(matches.value_of("max-sample"), usize).unwrap_or(5),
        debug: matches.is_present("debug"),
    }
}

/// A *low* delta is the alert condition: the cluster is supposed to be
/// ingesting documents continuously.
fn evaluate(delta: i64, warn: i64, crit: i64) -> Status {
    let mut status = Status::Ok;
    if delta <= warn {
        status = max(status, Status::Warning);
    }
    if delta <= crit {
        status = max(status, Status::Critical);
    }
    status
}

fn run(args: &Args) -> Result<CheckResult, CheckError> {
    let client = StatsClient::new(args.debug)?;
    let series = client.sample(
        &args.target.cluster_stats_url(),
        Duration::from_secs(args.interval),
        args.samples,
    )?;
    let counts = project_series(&series, indexed_doc_count)?;
    if args.debug {
        println!("INFO: sampled doc counts: {:?}", counts);
    }

    // sample() guarantees at least one element; a single sample means a
    // zero delta.
    let delta = match (counts.first(), counts.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0,
    };
    let window = args.samples as u64 * args.interval;
    let status = evaluate(delta, args.warn, args.crit);

    let perf = perf_data_string(
        &format!("{}s_indexed_doc", window),
        delta,
        args.warn,
        args.crit,
        "",
        None::<i64>,
        None::<i64>,
    );
    Ok(CheckResult::new(
        status,
        format!("{} docs indexed in {}s ", delta, window),
        Some(vec![perf]),
    ))
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = parse_args();
    match run(&args) {
        Ok(result) => result.print_and_exit(),
        Err(e) => {
            println!("Error: {}", e);
            Status::Critical.exit();
        }
    }
}
