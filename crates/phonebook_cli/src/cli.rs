//! Command-line surface for the `phonebook` binary.

use clap::{Parser, Subcommand};
use phonebook_core::PhonebookConfig;
use std::path::PathBuf;

/// phonebook - keep a small list of names and phone numbers
#[derive(Debug, Parser)]
#[command(name = "phonebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides PHONEBOOK_DB_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides PHONEBOOK_LOG_LEVEL)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute log directory; logging is off unless set here or in PHONEBOOK_LOG_DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: String,
    },
    /// Delete a contact by id
    Delete { id: String },
    /// List contacts, newest first
    List {
        /// Case-insensitive substring of name or number
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Print the core version
    Version,
}

impl Cli {
    /// Applies flag overrides on top of `base`.
    pub fn resolve_config(&self, base: PhonebookConfig) -> PhonebookConfig {
        PhonebookConfig {
            db_path: self.db.clone().unwrap_or(base.db_path),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_dir: self.log_dir.clone().or(base.log_dir),
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use phonebook_core::PhonebookConfig;
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_global_db_flag() {
        let cli = Cli::parse_from([
            "phonebook",
            "add",
            "--name",
            "Homer Simpson",
            "--number",
            "742-98-74",
            "--db",
            "/tmp/book.sqlite3",
        ]);
        assert!(matches!(
            &cli.command,
            Command::Add { name, number } if name == "Homer Simpson" && number == "742-98-74"
        ));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/book.sqlite3")));
    }

    #[test]
    fn flags_override_environment_config() {
        let cli = Cli::parse_from(["phonebook", "--log-level", "warn", "list"]);
        let base = PhonebookConfig {
            log_dir: Some(PathBuf::from("/var/log/phonebook")),
            ..PhonebookConfig::default()
        };

        let config = cli.resolve_config(base.clone());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.db_path, base.db_path);
        assert_eq!(config.log_dir, base.log_dir);
        assert!(matches!(cli.command, Command::List { ref filter } if filter.is_empty()));
    }
}
