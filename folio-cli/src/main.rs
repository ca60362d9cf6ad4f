//! folio CLI
//!
//! Command-line interface for a book catalog that keeps each author's book
//! count in step with the books linked to them.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{AuthorAction, BookAction, Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
pub(crate) use logging::log_blank;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        println!("{:#}", e.to_json());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let deadlines = settings.deadlines.to_deadlines();
    let (db_path, db_source) =
        settings::resolve_db_path(cli.db, settings::db_path_from_env(), &settings);
    log::debug!("Using database {} ({})", db_path.display(), db_source);

    match cli.command {
        Commands::Book { action } => match action {
            BookAction::Add { file } => commands::book::run_book_add(&db_path, deadlines, file),
            BookAction::Show { id } => commands::book::run_book_show(&db_path, deadlines, id),
            BookAction::Update { id, file } => {
                commands::book::run_book_update(&db_path, deadlines, id, file)
            }
            BookAction::Delete { id } => commands::book::run_book_delete(&db_path, deadlines, id),
        },
        Commands::Author { action } => match action {
            AuthorAction::Show { id } => commands::author::run_author_show(&db_path, deadlines, id),
        },
        Commands::Stats => commands::stats::run_stats(&db_path),
        Commands::Audit => commands::stats::run_audit(&db_path),
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::run_config_show(&settings, &db_path, db_source),
                ConfigAction::Path => commands::config::run_config_path(),
            }
            Ok(())
        }
    }
}
