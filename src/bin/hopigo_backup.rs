//! Writes a JSON backup of every table to the path given on the command line.
//!
//! Usage: `hopigo-backup <output.json>`

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use dotenvy::dotenv;
use hopigo::db::establish_connection_pool;
use hopigo::models::config::ServerConfig;
use hopigo::repository::{AdminReader, DieselRepository};

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(output) = env::args().nth(1) else {
        eprintln!("Usage: hopigo-backup <output.json>");
        return ExitCode::FAILURE;
    };

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = DieselRepository::new(pool);

    let snapshot = match repo.backup() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("Failed to export backup: {err}");
            return ExitCode::FAILURE;
        }
    };

    let written = File::create(&output)
        .map(BufWriter::new)
        .map_err(|e| e.to_string())
        .and_then(|writer| {
            serde_json::to_writer_pretty(writer, &snapshot).map_err(|e| e.to_string())
        });
    if let Err(err) = written {
        log::error!("Failed to write backup to {output}: {err}");
        return ExitCode::FAILURE;
    }

    for (table, rows) in snapshot.row_counts() {
        log::info!("{table}: {rows} row(s)");
    }
    log::info!("Backup written to {output}");
    ExitCode::SUCCESS
}
