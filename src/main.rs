use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prodsched::loader;
use prodsched::scheduler::{self, ScheduleStatus, SolveConfig};

/// Minimal-makespan production scheduling on a single shared resource.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON data file with setups, order_list, and unit_list.
    data_file: PathBuf,

    /// Search time limit in milliseconds.
    #[arg(short = 't', long = "time-limit", default_value_t = 30_000)]
    time_limit: u64,

    /// Probe feasibility of `makespan >= BOUND` instead of optimizing.
    #[arg(long = "lower-bound")]
    lower_bound: Option<i64>,

    /// Probe feasibility of `makespan <= BOUND` instead of optimizing.
    #[arg(long = "upper-bound")]
    upper_bound: Option<i64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let instance = loader::load_path(&args.data_file)?;
    tracing::info!(
        units = instance.unit_count(),
        orders = instance.orders().len(),
        changeover_rules = instance.changeovers().len(),
        horizon = instance.horizon(),
        "instance loaded"
    );

    let mut config = SolveConfig::new().with_time_limit_ms(args.time_limit);
    config.lower_bound = args.lower_bound;
    config.upper_bound = args.upper_bound;

    let outcome = scheduler::solve(&instance, &config)?;

    match &outcome.schedule {
        Some(schedule) => {
            for unit_id in schedule.production_order() {
                let unit = &instance.units()[unit_id.index()];
                println!(
                    "t={:>3}  {}  [{}]",
                    schedule.start_of(unit_id),
                    unit_id,
                    unit.product_type
                );
            }
            println!("makespan: {}", schedule.makespan());
        }
        None => match outcome.status {
            ScheduleStatus::Infeasible => println!("no feasible schedule exists"),
            _ => println!("no schedule found within the time limit"),
        },
    }

    println!("status: {}", outcome.status);
    println!("branches: {}", outcome.stats.branches);
    println!("time: {} ms", outcome.stats.wall_time_ms);
    if outcome.stats.time_limit_exceeded {
        println!("time limit exceeded");
    }

    Ok(())
}
