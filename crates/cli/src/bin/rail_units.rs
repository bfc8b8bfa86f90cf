use anyhow::anyhow;
use clap::{Parser, Subcommand};
use rail_charts::dataset;
use rail_charts::export::{intervals as export_intervals, writer_for_path};
use rail_charts::intervals::distributed_intervals_from_values;
use rail_charts::time::{duration_in_seconds, sec_to_time, time_to_sec};
use rail_charts::units::{joule_to_kwh, km_or_m, kmh_to_ms, mm_to_m, ms_to_kmh};
use rail_charts::format;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Unit conversions and dataset classification for simulation results.
#[derive(Parser, Debug)]
#[command(author, version, about = "Railway unit helpers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display a distance in metres or kilometres
    Distance {
        /// Distance in metres (or millimetres with --mm)
        value: f64,
        #[arg(long, default_value_t = false)]
        mm: bool,
    },
    /// Convert an energy in joules to kWh
    Energy {
        joules: f64,
        /// Round up to the next whole kWh
        #[arg(long, default_value_t = false)]
        round_up: bool,
    },
    /// Convert a speed between km/h and m/s
    Speed {
        value: f64,
        /// Treat the input as m/s and print km/h
        #[arg(long, default_value_t = false)]
        from_ms: bool,
    },
    /// Duration between two times of day (HH:MM[:SS]), crossing midnight if needed
    Time { start: String, end: String },
    /// Format a budget in euros
    Budget { amount: f64 },
    /// Split a CSV column into thirds and classify every value
    Classify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        column: String,
        /// Output CSV file (use '-' for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Distance { value, mm } => {
            let metres = if mm { mm_to_m(value) } else { value };
            let distance = km_or_m(metres).ok_or_else(|| anyhow!("Invalid distance: {value}"))?;
            println!("{distance}");
        }
        Command::Energy { joules, round_up } => {
            println!("{} kWh", joule_to_kwh(joules, round_up));
        }
        Command::Speed { value, from_ms } => {
            if from_ms {
                println!("{:.2} km/h", ms_to_kmh(value));
            } else {
                println!("{:.2} m/s", kmh_to_ms(value));
            }
        }
        Command::Time { start, end } => {
            let seconds = duration_in_seconds(time_to_sec(&start)?, time_to_sec(&end)?);
            let formatted = sec_to_time(seconds).ok_or_else(|| anyhow!("Invalid duration"))?;
            println!("{formatted} ({seconds} s)");
        }
        Command::Budget { amount } => {
            let formatted = format::budget(amount).ok_or_else(|| anyhow!("Invalid amount: {amount}"))?;
            println!("{formatted}");
        }
        Command::Classify {
            input,
            column,
            output,
        } => {
            let records = dataset::load_records(&input)?;
            let values = dataset::column(&records, &column);
            let bounds = distributed_intervals_from_values(&values)
                .ok_or_else(|| anyhow!("Column '{column}' has no values in {}", input.display()))?;
            tracing::info!(column = %column, values = values.len(), bounds = ?bounds.0, "classified");
            let mut writer = writer_for_path(&output)?;
            export_intervals::write_csv(&mut *writer, &bounds, &values)?;
            writer.flush()?;
        }
    }
    Ok(())
}
