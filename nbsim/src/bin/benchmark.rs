use nbsim::{bench_variants, print_csv};

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Time one leapfrog step for every layout and cube form")]
struct Args {
    /// Comma-separated system sizes
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![100, 200, 400, 800, 1600])]
    sizes: Vec<usize>,

    /// Timed steps per variant, after one warm-up step
    #[arg(long, default_value_t = 5)]
    steps: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rows = bench_variants(&args.sizes, args.steps)?;
    print_csv(&rows);

    Ok(())
}
