use std::path::PathBuf;

use clap::Parser;
use efp::report::{format_sensitivity, format_statistics};
use efp::{Overrides, init_logging, load_config, run};

#[derive(Parser, Debug)]
#[command(name = "efp")]
#[command(about = "Impact dispersion and sensitivity analysis for an explosively formed projectile")]
struct Args {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed of the direct simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Number of direct Monte Carlo trials
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Sobol base sample count N
    #[arg(long)]
    base_samples: Option<usize>,

    /// Directory the sensitivity CSV tables and the charts are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Only run the direct simulation
    #[arg(long)]
    skip_sensitivity: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let overrides = Overrides {
        seed: args.seed,
        num_simulations: args.simulations,
        base_samples: args.base_samples,
    };
    let config = load_config(args.config.as_deref(), &overrides)?;

    let output = run(&config, args.skip_sensitivity, Some(&args.output_dir))?;

    print!("{}", format_statistics(&output.statistics));
    if let Some(report) = &output.sensitivity {
        println!();
        print!("{}", format_sensitivity(report));
    }
    for path in &output.exported {
        println!("Wrote {}", path.display());
    }

    tracing::info!("run complete");
    Ok(())
}
