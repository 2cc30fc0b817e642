use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tickets::engine::{BirthdayWindow, MarketingEngine, DEFAULT_DAYS_FAR, DEFAULT_MAX_CITIES};
use tickets::model::{sample_customer, sample_events, Customer};
use tickets::{logger, ConsoleSink, MarketingError};

/// Ticket marketing demo: notify a customer about events and list events.
///
/// Runs against the built-in sample events and customer (John, New York).
/// Without a subcommand, lists the events sorted by date.
///
/// Examples:
///   tickets
///   tickets sort --field name --desc
///   tickets closest --max-cities 3
///   tickets birthday --today 2023-01-15 --symmetric
///   tickets --customer-city boston same-city
#[derive(Parser)]
#[command(name = "tickets", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Override the sample customer's city.
    #[arg(long, global = true)]
    customer_city: Option<String>,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List events ordered by a field (Id, Name, City, Date).
    Sort {
        #[arg(long, short = 'f', default_value = "Date")]
        field: String,

        /// Descending order.
        #[arg(long)]
        desc: bool,

        /// Print the sorted events as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Notify about events in the customer's city.
    SameCity,
    /// Notify about events in the cities nearest to the customer.
    Closest {
        #[arg(long, default_value_t = DEFAULT_MAX_CITIES)]
        max_cities: usize,
    },
    /// Notify about events close to the customer's next birthday.
    Birthday {
        #[arg(long, default_value_t = DEFAULT_DAYS_FAR)]
        days_far: i64,

        /// Also exclude events long before the birthday.
        #[arg(long)]
        symmetric: bool,

        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
    /// Run every selection, then list events by date.
    All,
}

fn parse_date(s: &str) -> Result<NaiveDate, MarketingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MarketingError::InvalidDate(s.to_string()))
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> tickets::Result<()> {
    let mut customer = sample_customer();
    if let Some(city) = cli.customer_city {
        customer.city = city;
    }

    let mut engine = MarketingEngine::new(sample_events(), ConsoleSink);
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Sort {
        field: "Date".into(),
        desc: false,
        json: false,
    }) {
        Command::Sort { field, desc, json } => print_sorted(&engine, &field, !desc, json)?,
        Command::SameCity => {
            engine.notify_same_city(&customer);
        }
        Command::Closest { max_cities } => {
            engine.notify_closest_cities(&customer, max_cities)?;
        }
        Command::Birthday { days_far, symmetric, today: reference } => {
            let window = if symmetric { BirthdayWindow::Symmetric } else { BirthdayWindow::Trailing };
            engine.notify_near_birthday(&customer, days_far, window, reference.unwrap_or(today));
        }
        Command::All => run_all(&mut engine, &customer, today)?,
    }

    Ok(())
}

fn run_all(engine: &mut MarketingEngine<ConsoleSink>, customer: &Customer, today: NaiveDate) -> tickets::Result<()> {
    println!("-- same city");
    engine.notify_same_city(customer);
    println!("-- closest cities");
    engine.notify_closest_cities(customer, DEFAULT_MAX_CITIES)?;
    println!("-- near birthday");
    engine.notify_near_birthday(customer, DEFAULT_DAYS_FAR, BirthdayWindow::Trailing, today);
    println!("-- by date");
    print_sorted(engine, "Date", true, false)
}

fn print_sorted(engine: &MarketingEngine<ConsoleSink>, field: &str, ascending: bool, json: bool) -> tickets::Result<()> {
    let sorted = engine.sort_events_by_field(field, ascending)?;

    if json {
        match serde_json::to_string_pretty(&sorted) {
            Ok(out) => println!("{}", out),
            Err(e) => tracing::error!("cannot serialize events: {}", e),
        }
        return Ok(());
    }

    for e in sorted {
        println!("{}", e.listing_line());
    }
    Ok(())
}
