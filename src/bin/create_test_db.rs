use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use serde::Deserialize;
use time::{
    Date, Month, PrimitiveDateTime, Time, format_description::BorrowedFormatItem,
    macros::format_description,
};

use fraud_desk::{RiskLevel, Transaction, TransactionBuilder, create_transaction, initialize_db};

const OCCURRED_AT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const CARD_TYPES: [&str; 3] = ["VISA", "MASTERCARD", "AMEX"];
const CITIES: [&str; 5] = ["Quito", "Guayaquil", "Cuenca", "Loja", "Manta"];

/// A utility for creating a test database for the Fraud Desk server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// A CSV file with the columns `id,occurred_at,amount,card_type,city,risk_level,comment`
    /// to seed the database with. `occurred_at` is formatted as `YYYY-MM-DD HH:MM:SS`.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// How many generated transactions to seed the database with when no CSV file is given.
    #[arg(long, default_value_t = 200)]
    count: i64,
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    id: i64,
    occurred_at: String,
    amount: f64,
    card_type: String,
    city: String,
    risk_level: Option<String>,
    comment: Option<String>,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let transactions = match &args.csv {
        Some(csv_path) => {
            println!("Reading transactions from {csv_path:#?}...");
            read_csv(csv_path)?
        }
        None => {
            println!("Generating {} transactions...", args.count);
            generate_transactions(args.count)?
        }
    };

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let transaction_count = transactions.len();
    for transaction in transactions {
        create_transaction(transaction, &conn)?;
    }

    println!("Inserted {transaction_count} transactions.");
    println!("Success!");

    Ok(())
}

fn read_csv(path: &Path) -> Result<Vec<TransactionBuilder>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut transactions = Vec::new();

    for record in reader.deserialize() {
        let record: CsvRecord = record?;
        let occurred_at = PrimitiveDateTime::parse(record.occurred_at.trim(), OCCURRED_AT_FORMAT)
            .map_err(|error| {
                format!(
                    "Invalid occurred_at \"{}\" for transaction {}: {error}",
                    record.occurred_at, record.id
                )
            })?;
        let risk_level = match record.risk_level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(risk_level) => Some(risk_level.parse::<RiskLevel>()?),
        };

        transactions.push(
            Transaction::build(record.id, occurred_at, record.amount)
                .card_type(&record.card_type)
                .city(&record.city)
                .risk_level(risk_level)
                .comment(record.comment.as_deref().filter(|comment| !comment.trim().is_empty())),
        );
    }

    Ok(transactions)
}

/// Deterministic transactions spread over the cities, card types, risk
/// levels and hours of a month.
fn generate_transactions(count: i64) -> Result<Vec<TransactionBuilder>, Box<dyn Error>> {
    let start = PrimitiveDateTime::new(Date::from_calendar_date(2024, Month::May, 1)?, Time::MIDNIGHT);

    let transactions = (1..=count)
        .map(|id| {
            let index = id as usize;
            let occurred_at = start
                + time::Duration::days(id % 30)
                + time::Duration::hours((id * 7) % 24)
                + time::Duration::minutes((id * 13) % 60);
            let amount = ((id * 3_797) % 150_000) as f64 / 100.0 + 1.0;
            let risk_level = match id % 7 {
                0 => Some(RiskLevel::High),
                1 | 4 => Some(RiskLevel::Low),
                3 => Some(RiskLevel::Medium),
                _ => None,
            };
            let comment = (risk_level == Some(RiskLevel::High)).then_some("Flagged by rule engine");

            Transaction::build(id, occurred_at, amount)
                .card_type(CARD_TYPES[index % CARD_TYPES.len()])
                .city(CITIES[(index / 2) % CITIES.len()])
                .risk_level(risk_level)
                .comment(comment)
        })
        .collect();

    Ok(transactions)
}
