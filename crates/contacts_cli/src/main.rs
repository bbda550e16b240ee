//! Terminal client for the contact manager core.
//!
//! # Responsibility
//! - Drive the same add/edit/list controllers the mobile shell uses.
//! - Render prompts on stdin/stderr so flows can be checked without a device.

use clap::{Args, Parser, Subcommand};
use contacts_core::{
    default_log_level, init_logging, AddContactController, Confirmation, ContactDraft, ContactId,
    ContactListController, ContactRepository, EditContactController, Prompter, ScreenOutcome,
    SqliteContactRepository,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "Manage local contacts")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "CONTACTS_DB_PATH", default_value = "Contacts.db")]
    db: PathBuf,

    /// Answer yes to every confirmation.
    #[arg(short, long)]
    yes: bool,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "CONTACTS_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List contacts, favorites first.
    List {
        /// Case-insensitive name filter.
        #[arg(short, long, default_value = "")]
        search: String,
        /// Sort names Z to A.
        #[arg(long)]
        desc: bool,
    },
    /// Add a contact.
    Add(ContactFields),
    /// Change fields of an existing contact.
    Edit {
        id: ContactId,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Flip the favorite flag.
    Favorite { id: ContactId },
    /// Delete a contact.
    Delete { id: ContactId },
}

#[derive(Debug, Args)]
struct ContactFields {
    #[arg(long)]
    first: Option<String>,
    #[arg(long)]
    middle: Option<String>,
    #[arg(long)]
    last: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

struct TerminalPrompter {
    assume_yes: bool,
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, confirmation: &Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!(
            "{}: {} [{}/N] ",
            confirmation.title, confirmation.message, confirmation.confirm_label
        );
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        let answer = answer.trim().to_ascii_lowercase();
        answer == "y" || answer == "yes" || answer == confirmation.confirm_label.to_lowercase()
    }

    fn alert(&mut self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let repo = SqliteContactRepository::at_path(&cli.db);
    if let Err(err) = repo.initialize() {
        eprintln!("failed to open {}: {err}", cli.db.display());
        return ExitCode::FAILURE;
    }
    let mut prompter = TerminalPrompter {
        assume_yes: cli.yes,
    };

    match cli.command {
        Command::List { search, desc } => list(&repo, search, desc),
        Command::Add(fields) => add(&repo, fields, &mut prompter),
        Command::Edit { id, fields } => edit(&repo, id, fields, &mut prompter),
        Command::Favorite { id } => favorite(&repo, id, &mut prompter),
        Command::Delete { id } => delete(&repo, id, &mut prompter),
    }
}

fn list(repo: &SqliteContactRepository, search: String, desc: bool) -> ExitCode {
    let mut screen = ContactListController::new(repo);
    if let Err(err) = screen.on_focus() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    screen.set_search(search);
    if desc {
        screen.toggle_sort();
    }

    for contact in screen.visible() {
        let star = if contact.favorite { '*' } else { ' ' };
        println!(
            "{star} {:>4}  {}  {}",
            contact.id,
            contact.display_name(),
            contact.telephone
        );
    }
    ExitCode::SUCCESS
}

fn add(
    repo: &SqliteContactRepository,
    fields: ContactFields,
    prompter: &mut TerminalPrompter,
) -> ExitCode {
    let mut screen = AddContactController::new(repo, None);
    apply_fields(screen.form_mut(), fields);

    match screen.submit(prompter) {
        ScreenOutcome::ReturnToList => {
            if let Some(id) = screen.created_id() {
                println!("added {id}");
            }
            ExitCode::SUCCESS
        }
        ScreenOutcome::Stay => ExitCode::FAILURE,
    }
}

fn edit(
    repo: &SqliteContactRepository,
    id: ContactId,
    fields: ContactFields,
    prompter: &mut TerminalPrompter,
) -> ExitCode {
    let Some(mut screen) = open_edit_screen(repo, id) else {
        return ExitCode::FAILURE;
    };
    screen.enter_edit_mode();
    apply_fields(screen.form_mut(), fields);
    outcome_code(screen.save(prompter))
}

fn delete(
    repo: &SqliteContactRepository,
    id: ContactId,
    prompter: &mut TerminalPrompter,
) -> ExitCode {
    let Some(mut screen) = open_edit_screen(repo, id) else {
        return ExitCode::FAILURE;
    };
    outcome_code(screen.delete(prompter))
}

fn favorite(
    repo: &SqliteContactRepository,
    id: ContactId,
    prompter: &mut TerminalPrompter,
) -> ExitCode {
    match toggle_listed_favorite(repo, id, prompter) {
        Ok(message) => {
            if let Some(message) = message {
                println!("{message}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn toggle_listed_favorite(
    repo: &SqliteContactRepository,
    id: ContactId,
    prompter: &mut impl Prompter,
) -> Result<Option<&'static str>, String> {
    let mut screen = ContactListController::new(repo);
    screen.on_focus().map_err(|err| format!("Error: {err}"))?;
    if !screen.contacts().iter().any(|contact| contact.id == id) {
        return Err(format!("contact {id} not found"));
    }

    let now = Instant::now();
    // The controller has already alerted on failure.
    screen
        .toggle_favorite(id, now, prompter)
        .map_err(|err| format!("Error: {err}"))?;
    Ok(screen.feedback_for(id, now))
}

fn open_edit_screen(
    repo: &SqliteContactRepository,
    id: ContactId,
) -> Option<EditContactController<&SqliteContactRepository>> {
    let contacts = match repo.list() {
        Ok(contacts) => contacts,
        Err(err) => {
            eprintln!("Error: {err}");
            return None;
        }
    };
    match contacts.into_iter().find(|contact| contact.id == id) {
        Some(contact) => Some(EditContactController::new(repo, contact, None)),
        None => {
            eprintln!("contact {id} not found");
            None
        }
    }
}

fn apply_fields(form: &mut ContactDraft, fields: ContactFields) {
    if let Some(first) = fields.first {
        form.first_name = first;
    }
    if let Some(middle) = fields.middle {
        form.middle_name_or_initial = middle;
    }
    if let Some(last) = fields.last {
        form.last_name = last;
    }
    if let Some(phone) = fields.phone {
        form.telephone = phone;
    }
}

fn outcome_code(outcome: ScreenOutcome) -> ExitCode {
    match outcome {
        ScreenOutcome::ReturnToList => ExitCode::SUCCESS,
        ScreenOutcome::Stay => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::{toggle_listed_favorite, TerminalPrompter};
    use contacts_core::{ContactDraft, ContactRepository, SqliteContactRepository, StoreLocation};

    fn ready_repo() -> SqliteContactRepository {
        let repo = SqliteContactRepository::new(StoreLocation::Memory);
        repo.initialize().unwrap();
        repo
    }

    #[test]
    fn favorite_of_unknown_id_reports_not_found() {
        let repo = ready_repo();
        let mut prompter = TerminalPrompter { assume_yes: true };

        let result = toggle_listed_favorite(&repo, 99, &mut prompter);

        assert_eq!(result, Err("contact 99 not found".to_string()));
    }

    #[test]
    fn favorite_of_listed_id_flips_flag_and_reports_feedback() {
        let repo = ready_repo();
        let id = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();
        let mut prompter = TerminalPrompter { assume_yes: true };

        let marked = toggle_listed_favorite(&repo, id, &mut prompter);
        assert_eq!(marked, Ok(Some("Marked as Favorite")));
        assert!(repo.list().unwrap()[0].favorite);

        let removed = toggle_listed_favorite(&repo, id, &mut prompter);
        assert_eq!(removed, Ok(Some("Removed from Favorites")));
        assert!(!repo.list().unwrap()[0].favorite);
    }
}
