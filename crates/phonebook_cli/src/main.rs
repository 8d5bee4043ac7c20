//! `phonebook` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `phonebook_core` store and form operations.
//! - Keep output line-oriented for scripting.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use log::info;
use phonebook_core::{
    init_logging, open_contact_store, ContactField, ContactForm, ContactId, ContactListView,
    ContactStore, FormError, IdGenerator, KeyValueStore, PhonebookConfig, StoreError,
};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config(PhonebookConfig::from_env());

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let mut stdout = std::io::stdout().lock();
    let mut store = open_contact_store(&config)?;
    info!("event=cli_command module=cli status=start");
    run(cli.command, &mut store, &mut stdout)
}

fn run<S: KeyValueStore, G: IdGenerator>(
    command: Command,
    store: &mut ContactStore<S, G>,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add { name, number } => handle_add(store, name, number, out),
        Command::Delete { id } => handle_delete(store, &id, out),
        Command::List { filter } => {
            store.set_filter(filter);
            render_list(&ContactListView::build(store), out)
        }
        Command::Version => {
            writeln!(out, "phonebook_core version={}", phonebook_core::core_version())?;
            Ok(())
        }
    }
}

fn handle_add<S: KeyValueStore, G: IdGenerator>(
    store: &mut ContactStore<S, G>,
    name: String,
    number: String,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut form = ContactForm::new();
    form.update_field(ContactField::Name, name);
    form.update_field(ContactField::Number, number);

    match form.submit(store) {
        Ok(contact) => writeln!(out, "added {}", contact.id)?,
        // Duplicates are a notice, not a failure.
        Err(FormError::Store(err @ StoreError::DuplicateContact { .. })) => {
            writeln!(out, "{err}")?
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn handle_delete<S: KeyValueStore, G: IdGenerator>(
    store: &mut ContactStore<S, G>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let removed = ContactId::new(id)
        .ok()
        .and_then(|contact_id| store.delete(&contact_id));
    match removed {
        Some(contact) => writeln!(out, "deleted {}", contact.id)?,
        None => writeln!(out, "no contact with id {id}")?,
    }
    Ok(())
}

fn render_list(view: &ContactListView, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", view.section_title)?;
    if let Some(message) = view.empty_message {
        writeln!(out, "{message}")?;
        return Ok(());
    }
    for contact in &view.items {
        writeln!(out, "{}\t{}: {}", contact.id, contact.name, contact.number)?;
    }
    Ok(())
}
