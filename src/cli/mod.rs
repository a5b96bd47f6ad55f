pub mod context;
pub mod auth_commands;
pub mod contact_commands;
pub mod transfer_commands;

use crate::config::Config;
use crate::storage::SqliteStore;
use crate::ContactBook;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(book: ContactBook<SqliteStore>, config: Config) {
    println!("Contacts");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let mut ctx = CLIContext::new(book, config);
    match ctx.book.current_user() {
        Some(user) => println!("Logged in as {} <{}>", user.name, user.email),
        None => println!("Not logged in. Use 'login' or 'register'."),
    }

    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Account
            "register" => auth_commands::register(ctx),
            "login" => auth_commands::login(ctx, args),
            "logout" => auth_commands::logout(ctx),
            "whoami" => auth_commands::whoami(ctx),

            // Contacts
            "list" | "ls" => contact_commands::list(ctx, args),
            "find" | "search" => contact_commands::find(ctx, args),
            "groups" => contact_commands::groups(ctx),
            "show" | "view" => contact_commands::show(ctx, args),
            "add" => contact_commands::add(ctx, args),
            "edit" => contact_commands::edit(ctx, args),
            "delete" | "rm" => contact_commands::delete(ctx, args),
            "fav" | "favorite" => contact_commands::favorite(ctx, args),

            // Backup
            "export" => transfer_commands::export(ctx, args),
            "import" => transfer_commands::import(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find([' ', '\t']) {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Account:
    register                 Create an account (interactive)
    login [email]            Log in
    logout                   Log out
    whoami                   Show the logged-in user

  Contacts:
    list [category]          List contacts; category is all, favorites or a group
    find <query> [in <cat>]  Search name, email and phone
    groups                   Show counts per category
    show <name|#id>          Show contact details
    add [name]               Add a contact (interactive)
    edit <name|#id>          Edit a contact
    delete <name|#id>        Delete a contact
    fav <name|#id>           Toggle favorite

  Backup:
    export [dir]             Write contacts-backup-<date>.json
    import <path>            Replace all contacts with a backup file

  Other:
    help                     Show this help
    exit / quit / q          Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - When several contacts share a name, pick one by its id: show #<id>
  - find splits at the last " in "; to search for text containing " in ",
    end with " in all" (find rock in roll in all)
  - Groups: Работа, Друзья, Семья, Учеба, or any other text"#);
}

#[cfg(test)]
mod tests {
    use super::parse_command;

    #[test]
    fn parse_command_splits_on_first_space() {
        assert_eq!(parse_command("find anna in Работа"), ("find", "anna in Работа"));
        assert_eq!(parse_command("  list  "), ("list", ""));
        assert_eq!(parse_command("show\tАнна"), ("show", "Анна"));
    }
}
