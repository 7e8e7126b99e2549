use anyhow::Context;
use clap::{Parser, Subcommand};
use late_fees::utils::{dates, logger};

#[derive(Parser)]
#[command(name = "date-tools")]
#[command(about = "Small date helpers: reformat ISO dates and list consecutive days")]
struct Args {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each YYYY-MM-DD date as "DD Mon YYYY"
    Reformat {
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Print consecutive days starting at a date
    Range {
        /// First day, YYYY-MM-DD
        #[arg(long, required_unless_present = "request")]
        start: Option<String>,

        /// Number of days to print
        #[arg(long, required_unless_present = "request")]
        count: Option<usize>,

        /// JSON request such as {"start": "2030-01-01", "n": 5}
        #[arg(long, conflicts_with_all = ["start", "count"])]
        request: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match args.command {
        Command::Reformat { dates: inputs } => {
            let formatted = dates::reformat_dates(&inputs).context("Failed to reformat dates")?;
            for line in formatted {
                println!("{}", line);
            }
        }
        Command::Range {
            start,
            count,
            request,
        } => {
            let days = match (request, start, count) {
                (Some(request), _, _) => dates::date_range_from_json(&request)
                    .context("Invalid date range request")?,
                (None, Some(start), Some(count)) => dates::date_range(&start, count)
                    .with_context(|| format!("Failed to build {} days from {}", count, start))?,
                _ => anyhow::bail!("Either --request or both --start and --count are required"),
            };

            tracing::debug!("Generated {} days", days.len());
            for day in days {
                println!("{}", day.format(dates::ISO_DATE_FORMAT));
            }
        }
    }

    Ok(())
}
