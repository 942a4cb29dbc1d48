// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line manager for the Rifas Sucre raffle store.
//!
//! Covers the maintenance surface: inspecting the store, administering
//! access codes, and taking or restoring full backups. Day-to-day selling
//! goes through the application UI; this binary talks to the same store
//! files.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing::info;

use rifas_core::BackupDocument;
use rifas_persistence::{
    Repository, generate_code, prune_expired_codes, verify_code,
};

/// Rifas Sucre - raffle store manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file.
    #[arg(short, long, default_value = "rifas.db")]
    database: PathBuf,

    /// Path to the flat-storage JSON file.
    #[arg(short, long, default_value = "rifas-flat.json")]
    flat: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show what the store currently holds.
    Status,
    /// Generate a fresh access code.
    GenerateCode {
        /// Days until the code expires.
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Check whether an access code is currently valid.
    VerifyCode {
        /// The code to check.
        code: String,
    },
    /// Delete every expired access code.
    PruneCodes,
    /// Write a full backup document to a file.
    Backup {
        /// Output path for the backup JSON.
        output: PathBuf,
    },
    /// Replace the store contents with a backup document.
    Restore {
        /// Path of the backup JSON to restore.
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut repo = Repository::open(&args.database, &args.flat)?;
    let now = OffsetDateTime::now_utc();

    match args.command {
        Command::Status => {
            let state = repo.load_all()?;
            let codes = repo.all_codes()?;
            println!(
                "Backend: {}",
                if repo.has_structured_store() {
                    "structured store + flat mirror"
                } else {
                    "flat storage only"
                }
            );
            println!("Raffles: {}", state.raffles.len());
            for raffle in &state.raffles {
                let sold: usize = state
                    .clients_of(&raffle.id)
                    .map(|client| client.numbers.len())
                    .sum();
                let marker = if state.active_raffle.as_deref() == Some(raffle.id.as_str()) {
                    " (active)"
                } else {
                    ""
                };
                println!(
                    "  {} - {}/{} numbers taken{marker}",
                    raffle.name, sold, raffle.total_numbers
                );
            }
            println!("Clients: {}", state.clients.len());
            println!(
                "Access codes: {} ({} valid now)",
                codes.len(),
                codes.iter().filter(|code| code.is_valid_at(now)).count()
            );
        }
        Command::GenerateCode { days } => {
            let code = generate_code(&mut repo, days, now)?;
            println!("{}", code.code);
            println!("Expires: {}", code.expires_at);
        }
        Command::VerifyCode { code } => {
            if verify_code(&mut repo, &code, now)? {
                println!("Valid");
            } else {
                println!("Invalid or expired");
                std::process::exit(1);
            }
        }
        Command::PruneCodes => {
            let removed = prune_expired_codes(&mut repo, now)?;
            println!("Removed {removed} expired codes");
        }
        Command::Backup { output } => {
            let state = repo.load_all()?;
            let codes = repo.all_codes()?;
            let document = BackupDocument::from_state(&state, codes, now);
            fs::write(&output, document.to_json()?)?;
            info!(path = %output.display(), "Backup written");
            println!(
                "Backed up {} raffles and {} clients to {}",
                document.raffles.len(),
                document.clients.len(),
                output.display()
            );
        }
        Command::Restore { input } => {
            let text = fs::read_to_string(&input)?;
            let document = BackupDocument::from_json(&text)?;
            let (state, codes) = document.into_state();
            repo.save_all(&state)?;
            for code in &codes {
                repo.put_code(code)?;
            }
            println!(
                "Restored {} raffles, {} clients, {} codes",
                state.raffles.len(),
                state.clients.len(),
                codes.len()
            );
        }
    }

    Ok(())
}
