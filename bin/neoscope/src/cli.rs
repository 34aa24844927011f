use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clickhouse::{ApproachFilter, HazardFilter, Range};
use config::ClickhouseOpts;

/// Query the NEO catalogue and close approach tables from the terminal
#[derive(Parser, Debug)]
#[command(name = "neoscope", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the predefined catalogue queries
    Queries,
    /// Run one catalogue query (e.g. `q4`, `Q4` or `4`)
    Run {
        /// Catalogue id
        id: String,
        #[command(flatten)]
        clickhouse: ClickhouseOpts,
    },
    /// Filter close approaches by date, distance, velocity, size and hazard
    Filter {
        #[command(flatten)]
        args: FilterArgs,
        #[command(flatten)]
        clickhouse: ClickhouseOpts,
    },
}

/// Filter bounds; anything omitted keeps the dashboard default.
#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// First approach date, YYYY-MM-DD [default: 2000-01-01]
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// Last approach date, YYYY-MM-DD [default: today]
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    /// Minimum miss distance in AU [default: 0]
    #[arg(long)]
    pub au_min: Option<f64>,
    /// Maximum miss distance in AU [default: 1]
    #[arg(long)]
    pub au_max: Option<f64>,
    /// Minimum miss distance in lunar distances [default: 0]
    #[arg(long)]
    pub ld_min: Option<f64>,
    /// Maximum miss distance in lunar distances [default: 10]
    #[arg(long)]
    pub ld_max: Option<f64>,
    /// Minimum relative velocity in km/h [default: 0]
    #[arg(long)]
    pub velocity_min: Option<f64>,
    /// Maximum relative velocity in km/h [default: 100000]
    #[arg(long)]
    pub velocity_max: Option<f64>,
    /// Minimum of the maximum estimated diameter in km [default: 0]
    #[arg(long)]
    pub diameter_min: Option<f64>,
    /// Maximum of the maximum estimated diameter in km [default: 50]
    #[arg(long)]
    pub diameter_max: Option<f64>,
    /// Hazard selector: all, yes or no
    #[arg(long, default_value_t = HazardFilter::All)]
    pub hazardous: HazardFilter,
}

fn merge(base: Range, min: Option<f64>, max: Option<f64>) -> Range {
    Range::new(min.unwrap_or(base.min), max.unwrap_or(base.max))
}

impl FilterArgs {
    /// Combine the given bounds with the defaults. Validation happens in the reader.
    pub fn to_filter(&self) -> ApproachFilter {
        let defaults = ApproachFilter::default();
        ApproachFilter {
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            astronomical: merge(defaults.astronomical, self.au_min, self.au_max),
            lunar: merge(defaults.lunar, self.ld_min, self.ld_max),
            velocity: merge(defaults.velocity, self.velocity_min, self.velocity_max),
            diameter: merge(defaults.diameter, self.diameter_min, self.diameter_max),
            hazardous: self.hazardous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const CONN: &[&str] = &[
        "--clickhouse-url",
        "http://localhost:8123",
        "--clickhouse-db",
        "neo",
        "--clickhouse-username",
        "default",
        "--clickhouse-password",
        "",
    ];

    fn parse(args: &[&str]) -> Cli {
        let argv =
            std::iter::once("neoscope").chain(args.iter().copied()).chain(CONN.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn queries_needs_no_connection() {
        let cli = Cli::try_parse_from(["neoscope", "queries"]).unwrap();
        assert!(matches!(cli.command, Command::Queries));
    }

    #[test]
    fn run_takes_an_id() {
        let cli = parse(&["run", "q7"]);
        let Command::Run { id, clickhouse } = cli.command else { panic!("expected run") };
        assert_eq!(id, "q7");
        assert_eq!(clickhouse.db, "neo");
    }

    #[test]
    fn filter_defaults_match_dashboard() {
        let cli = parse(&["filter"]);
        let Command::Filter { args, .. } = cli.command else { panic!("expected filter") };
        let filter = args.to_filter();
        let defaults = ApproachFilter::default();
        assert_eq!(filter, defaults);
    }

    #[test]
    fn filter_flags_override_defaults() {
        let cli = parse(&[
            "filter",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-06-30",
            "--ld-max",
            "25",
            "--velocity-min",
            "50000",
            "--hazardous",
            "yes",
        ]);
        let Command::Filter { args, .. } = cli.command else { panic!("expected filter") };
        let filter = args.to_filter();
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(filter.lunar, Range::new(0.0, 25.0));
        assert_eq!(filter.velocity, Range::new(50_000.0, 100_000.0));
        assert_eq!(filter.astronomical, ApproachFilter::DEFAULT_ASTRONOMICAL);
        assert_eq!(filter.hazardous, HazardFilter::Yes);
    }

    #[test]
    fn rejects_bad_hazard_and_date() {
        let bad_hazard = Cli::try_parse_from(
            ["neoscope", "filter", "--hazardous", "maybe"].into_iter().chain(CONN.iter().copied()),
        );
        assert!(bad_hazard.is_err());

        let bad_date = Cli::try_parse_from(
            ["neoscope", "filter", "--start-date", "2024-02-30"]
                .into_iter()
                .chain(CONN.iter().copied()),
        );
        assert!(bad_date.is_err());
    }
}
