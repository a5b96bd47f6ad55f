use chrono::Local;
use std::io::{self, Write};

use crate::config::Config;
use crate::error::ContactsError;
use crate::model::Contact;
use crate::queries::contact_queries::{self, Resolution};
use crate::storage::SqliteStore;
use crate::ContactBook;

pub struct CLIContext {
    pub book: ContactBook<SqliteStore>,
    pub config: Config,
}

impl CLIContext {
    pub fn new(book: ContactBook<SqliteStore>, config: Config) -> Self {
        Self { book, config }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Prompt showing the current value; an empty answer keeps it.
    pub fn prompt_with_default(&self, label: &str, current: &str) -> Option<Option<String>> {
        let answer = self.prompt(&format!("{} [{}]: ", label, current))?;
        Some(if answer.is_empty() { None } else { Some(answer) })
    }

    /// Find a contact by `#id`, id or name query. Prints an error if not
    /// found or ambiguous.
    pub fn find_contact(&self, args: &str) -> Option<Contact> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let contacts = match self.book.contacts() {
            Ok(c) => c,
            Err(e) => {
                self.print_error(&e);
                return None;
            }
        };

        match contact_queries::resolve(contacts, query) {
            Resolution::Found(contact) => Some(contact.clone()),
            Resolution::NotFound => {
                println!("No contact found matching '{}'", query);
                None
            }
            Resolution::Ambiguous(matches) => {
                println!("Multiple matches found:");
                for c in &matches {
                    println!("  #{}  {} ({})", c.id, c.name, c.phone);
                }
                println!("Please be more specific, or use #<id>.");
                None
            }
        }
    }

    pub fn today() -> chrono::NaiveDate {
        Local::now().date_naive()
    }

    pub fn print_contact_line(contact: &Contact) {
        let star = if contact.is_favorite { "*" } else { " " };
        let email = if contact.has_email() {
            format!(" <{}>", contact.email)
        } else {
            String::new()
        };
        println!(
            "  {} [{}] {} - {}{} ({})",
            star,
            contact.initials(),
            contact.name,
            contact.phone,
            email,
            contact.group
        );
    }

    /// Print an error.
    pub fn print_error(&self, e: &ContactsError) {
        println!("Error: {}", e);
    }
}
