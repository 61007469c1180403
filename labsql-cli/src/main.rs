//! labsql CLI
//!
//! Loads exam room and student CSV files into SQLite through the column
//! metadata declared by each record type, and queries them back.

mod cli_types;
mod commands;
mod error;
mod logger;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
pub(crate) use logger::{log_blank, log_ok};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Import {
            rooms,
            students,
            csv,
        } => {
            let db_path = settings::resolve_database_path(cli.database);
            commands::import::run_import(&db_path, rooms, students, csv)
        }
        Commands::Query { table } => {
            let db_path = settings::resolve_database_path(cli.database);
            commands::query::run_query(&db_path, table)
        }
        Commands::Schema => commands::schema::run_schema(),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(cli.database);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDatabase { path } => commands::config::run_config_set_database(path),
            ConfigAction::ClearDatabase => commands::config::run_config_clear_database(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}
