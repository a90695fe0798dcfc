use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use storefront_rs::{
    NewCategory, NewCurrency, NewProduct, NewTransaction, SimulatedGateway, create_category,
    create_currency, create_product, create_transaction, initialize_db,
};

/// A utility for creating a test database for the REST API server of storefront_rs.
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

    println!("Creating currencies...");
    for (name, code, symbol) in [
        ("New Zealand dollar", "NZD", "$"),
        ("Euro", "EUR", "€"),
        ("Japanese yen", "JPY", "¥"),
    ] {
        create_currency(
            NewCurrency {
                name: name.to_owned(),
                code: code.to_owned(),
                symbol: symbol.to_owned(),
            },
            &conn,
        )?;
    }

    println!("Creating categories and products...");
    let books = create_category(
        NewCategory {
            name: "Books".to_owned(),
            slug: "books".to_owned(),
        },
        &conn,
    )?;
    let games = create_category(
        NewCategory {
            name: "Games".to_owned(),
            slug: "games".to_owned(),
        },
        &conn,
    )?;

    for (category, title, slug, regular_price, discount_price) in [
        (books.id, "The Rust Programming Language", "the-rust-book", 59.95, 49.95),
        (books.id, "Designing Data-Intensive Applications", "ddia", 64.0, 64.0),
        (games.id, "Factorio", "factorio", 35.0, 28.0),
    ] {
        create_product(
            NewProduct {
                category,
                title: title.to_owned(),
                description: String::new(),
                slug: slug.to_owned(),
                regular_price,
                discount_price,
            },
            &conn,
        )?;
    }

    println!("Creating transactions...");
    for (currency, name, email) in [
        ("NZD", "Ada Lovelace", "ada@example.com"),
        ("EUR", "Grace Hopper", "grace@example.com"),
    ] {
        let transaction = create_transaction(
            NewTransaction {
                currency: currency.to_owned(),
                name: name.to_owned(),
                email: email.to_owned(),
                message: None,
            },
            &SimulatedGateway,
            &conn,
        )?;

        println!(
            "Transaction {} has payment intent {:?}",
            transaction.id, transaction.payment_intent_id
        );
    }

    println!("Success!");

    Ok(())
}
