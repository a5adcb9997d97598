use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use alphafit::{PasswordHash, ValidatedPassword, initialize_db};

/// A utility for creating a test database for the Alpha Fitness dashboard.
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

    println!("Creating test owner account (test@test.com / test)...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    conn.execute(
        "INSERT INTO user (email, password) VALUES (?1, ?2)",
        ("test@test.com", password_hash.to_string()),
    )?;

    println!("Creating sample memberships and walk-ins...");

    let today = OffsetDateTime::now_utc().date();

    let memberships = [
        ("Juan Dela Cruz", "VIP", 1500.0, "Paid", "Active", 0i64),
        ("Maria Santos", "Non-VIP", 1000.0, "Paid", "Active", 2),
        ("Jose Rizal", "VIP", 1500.0, "Pending", "Active", 7),
        ("Andres Bonifacio", "Non-VIP", 1000.0, "Paid", "Expired", 40),
        ("Gabriela Silang", "VIP", 1500.0, "Paid", "Active", 100),
        ("Emilio Aguinaldo", "Non-VIP", 1000.0, "Paid", "Active", 400),
    ];

    for (name, plan, price, payment_status, status, days_ago) in memberships {
        let created_at = (today - Duration::days(days_ago)).to_string();
        conn.execute(
            "INSERT INTO membership
                (full_name, gym_plan, price, paymentstatus, status, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (name, plan, price, payment_status, status, created_at),
        )?;
    }

    let walk_ins = [
        ("Pedro Penduko", 150.0, "Paid", 0i64),
        ("Darna Custodio", 150.0, "Paid", 1),
        ("Crisostomo Ibarra", 150.0, "Pending", 3),
        ("Basilio Dimasalang", 150.0, "Paid", 30),
    ];

    for (name, payment, status, days_ago) in walk_ins {
        let created_at = (today - Duration::days(days_ago)).to_string();
        conn.execute(
            "INSERT INTO walk_in (customer_name, walkinpayment, createdat, paymentstatus)
                VALUES (?1, ?2, ?3, ?4)",
            (name, payment, created_at, status),
        )?;
    }

    println!("Success!");

    Ok(())
}
