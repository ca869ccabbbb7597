//! Check the JVM heap usage of an Elasticsearch node

use std::cmp::max;

use clap::{crate_version, value_t, App, Arg};

use esmon_plugins::elasticsearch::{ConnectionTarget, StatsClient};
use esmon_plugins::errors::CheckError;
use esmon_plugins::metrics::heap_used_percent;
use esmon_plugins::output::perf_data_string;
use esmon_plugins::{CheckResult, Status};

struct Args {
    target: ConnectionTarget,
    warn: f64,
    crit: f64,
    debug: bool,
}

fn parse_args() -> Args {
    let matches = App::new("check-es-heap")
        .version(crate_version!())
        .about("Check the JVM heap-used percentage of an Elasticsearch node")
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
            Arg::with_name("node-id")
                .long("node-id")
                .takes_value(true)
                .help("Check this specific node"),
        )
        .arg(
            Arg::with_name("warn")
                .short("w")
                .long("warn")
                .takes_value(true)
                .help("Percent of heap used to warn at [default: 80]"),
        )
        .arg(
            Arg::with_name("crit")
                .short("c")
                .long("crit")
                .takes_value(true)
                .help("Percent of heap used to go critical at [default: 90]"),
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
            matches.value_of("node-id"),
        ),
        warn: value_t!(matches.value_of("warn"), f64).unwrap_or(80.0),
        crit: value_t!(matches.value_of("crit"), f64).unwrap_or(90.0),
        debug: matches.is_present("debug"),
    }
}

fn evaluate(heap: f64, warn: f64, crit: f64) -> (Status, &'static str) {
    let mut status = Status::Ok;
    let mut comment = "within the limits";
    if heap >= warn {
        status = max(status, Status::Warning);
        comment = "too high";
    }
    if heap >= crit {
        status = max(status, Status::Critical);
        comment = "too high";
    }
    (status, comment)
}

fn run(args: &Args) -> Result<CheckResult, CheckError> {
    args.target.require_node()?;
    let client = StatsClient::new(args.debug)?;
    let stats = client.fetch(&args.target.node_stats_url())?;
    let heap = heap_used_percent(&stats)?;
    if args.debug {
        println!("INFO: heap used: {}%", heap);
    }

    let (status, comment) = evaluate(heap, args.warn, args.crit);
    let perf = perf_data_string("heap_used", heap, args.warn, args.crit, "%", Some(0), Some(100));
    Ok(CheckResult::new(
        status,
        format!("Heap usage is {} {}%", comment, heap),
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
