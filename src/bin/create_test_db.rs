use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use receipt_tracker::{Category, LineItem, NewReceipt, create_receipt, initialize_db};

/// A utility for creating a test database for the REST API server of receipt_tracker.
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

    println!("Creating test receipts...");

    let receipts = [
        ("Countdown", "01/03/2021", "84.20", Category::Home),
        ("Burger Fuel", "08/03/2021", "23.50", Category::Food),
        ("The Warehouse", "10/03/2021", "45.00", Category::Personal),
        ("Countdown", "14/03/2021", "53.95", Category::Food),
        ("Sushi Train", "15/03/2021", "10.00", Category::Food),
        ("Mitre 10", "15/03/2021", "76.23", Category::Home),
        ("Rebel Sport", "02/04/2021", "129.99", Category::Personal),
        ("Pak'nSave", "28/12/2020", "212.40", Category::Home),
    ];

    for (store_name, date, total, category) in receipts {
        create_receipt(
            NewReceipt::new(store_name, date, total).category(category),
            &conn,
        )?;
    }

    let mut itemised = NewReceipt::new("New World", "16/03/2021", "0").category(Category::Food);
    itemised.total = None;
    itemised.gst_percentage = Some(15.into());
    itemised.line_items = vec![
        LineItem {
            item_name: "Milk".to_owned(),
            item_value: "$3.50".to_owned(),
            item_quantity: 2,
        },
        LineItem {
            item_name: "Bread".to_owned(),
            item_value: "$4.20".to_owned(),
            item_quantity: 1,
        },
    ];
    create_receipt(itemised, &conn)?;

    println!("Adding a receipt with an invalid date...");

    // The API rejects invalid dates, so insert this one directly.
    conn.execute(
        "INSERT INTO receipt (store_name, date, category, total) VALUES (?1, ?2, ?3, ?4)",
        ("Corrupt Receipt", "31/02/2021", "Food", "99.99"),
    )?;

    println!("Success!");

    Ok(())
}
