//! Check the health color of an Elasticsearch cluster

use clap::{crate_version, value_t, App, Arg};

use esmon_plugins::elasticsearch::{ConnectionTarget, StatsClient};
use esmon_plugins::errors::CheckError;
use esmon_plugins::metrics::cluster_status;
use esmon_plugins::{CheckResult, Status};

struct Args {
    target: ConnectionTarget,
    debug: bool,
}

fn parse_args() -> Args {
    let matches = App::new("check-es-cluster-status")
        .version(crate_version!())
        .about("Check that an Elasticsearch cluster's health status is green")
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
            Arg::with_name("debug")
                .long("debug")
                .help("Print the queried URI and the raw stats"),
        )
        .get_matches();

    Args {
        target: ConnectionTarget::new(
            matches.value_of("scheme").unwrap_or("http"),
            matches.value_of("hostname").unwrap(),
            value_t!(matches.value_of("port"), u16).unwrap_or(9200),
            None,
        ),
        debug: matches.is_present("debug"),
    }
}

/// Anything but green is Critical; there is no Warning color.
fn evaluate(color: &str) -> (Status, &'static str) {
    if color == "green" {
        (Status::Ok, "green, super green")
    } else {
        (Status::Critical, "not green")
    }
}

fn run(args: &Args) -> Result<CheckResult, CheckError> {
    let client = StatsClient::new(args.debug)?;
    let stats = client.fetch(&args.target.cluster_stats_url())?;
    let color = cluster_status(&stats)?;
    if args.debug {
        println!("INFO: cluster status: {}", color);
    }
    let (status, comment) = evaluate(&color);
    Ok(CheckResult::new(
        status,
        format!("cluster status is {} ", comment),
        None,
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
