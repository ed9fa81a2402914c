use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Month};

use finance_tracker::{
    BudgetAlertData, CategoryName, TagName, Transaction, TransactionType, create_budget_alert,
    create_category, create_transaction, initialize_db,
};

/// A utility for creating a test database for the finance tracker API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
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

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let wages = create_category(CategoryName::new("Wages")?, &conn)?;
    let groceries = create_category(CategoryName::new("Groceries")?, &conn)?;
    let rent = create_category(CategoryName::new("Rent")?, &conn)?;

    println!("Creating transactions...");
    for month in [Month::January, Month::February, Month::March] {
        let payday = Date::from_calendar_date(2024, month, 1)?;
        let shopping_day = Date::from_calendar_date(2024, month, 12)?;

        create_transaction(
            Transaction::build(
                "Salary",
                Decimal::new(2000, 0),
                payday,
                TransactionType::Income,
            )
            .category_id(Some(wages.id)),
            &conn,
        )?;
        create_transaction(
            Transaction::build("Rent", Decimal::new(900, 0), payday, TransactionType::Expense)
                .category_id(Some(rent.id)),
            &conn,
        )?;
        create_transaction(
            Transaction::build(
                "Weekly groceries",
                Decimal::new(8540, 2),
                shopping_day,
                TransactionType::Expense,
            )
            .category_id(Some(groceries.id))
            .tags(vec![TagName::new("food")?]),
            &conn,
        )?;
        create_transaction(
            Transaction::build(
                "Coffee, with friends",
                Decimal::new(1250, 2),
                shopping_day,
                TransactionType::Expense,
            )
            .tags(vec![TagName::new("fun")?, TagName::new("food")?]),
            &conn,
        )?;
    }

    println!("Creating budget alert...");
    create_budget_alert(
        BudgetAlertData {
            category_id: groceries.id,
            threshold: Decimal::new(250, 0),
            message: "Groceries are over budget".to_owned(),
        },
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
