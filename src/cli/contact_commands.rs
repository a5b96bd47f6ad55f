use crate::cli::context::CLIContext;
use crate::model::{ContactDraft, ContactPatch, Group};
use crate::queries::{contact_queries, Category};

/// `list [category]`
pub fn list(ctx: &CLIContext, args: &str) {
    show_filtered(ctx, "", args);
}

/// `find <query> [in <category>]`
pub fn find(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: find <query> [in <category>]");
        return;
    }
    let (query, category) = split_find_args(args);
    show_filtered(ctx, query, category);
}

/// Splits `find` arguments at the last ` in `. The query itself may contain
/// ` in ` as long as a category follows.
fn split_find_args(args: &str) -> (&str, &str) {
    match args.rsplit_once(" in ") {
        Some((q, c)) => (q.trim(), c.trim()),
        None => (args.trim(), ""),
    }
}

fn show_filtered(ctx: &CLIContext, query: &str, category: &str) {
    let category = if category.is_empty() {
        Category::All
    } else {
        Category::parse(category)
    };

    let found = match ctx.book.filter(query, &category) {
        Ok(found) => found,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if found.is_empty() {
        println!("No contacts found.");
        return;
    }

    println!("Contacts ({}, {}):", category, found.len());
    for contact in found {
        CLIContext::print_contact_line(contact);
    }
}

pub fn groups(ctx: &CLIContext) {
    let contacts = match ctx.book.contacts() {
        Ok(c) => c,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    for (category, count) in contact_queries::category_counts(contacts) {
        println!("  {:<12} {}", category.to_string(), count);
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show <name|#id>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    println!();
    println!("Name: {}", contact.name);
    println!("Phone: {}", contact.phone);
    println!("Email: {}", if contact.has_email() { contact.email.as_str() } else { "(none)" });
    println!("Group: {}", contact.group);
    println!("Favorite: {}", if contact.is_favorite { "yes" } else { "no" });
    println!("Avatar: {}", contact.avatar.as_deref().unwrap_or("(none)"));
    println!("Id: {}", contact.id);
}

fn prompt_group(ctx: &CLIContext, current: &Group) -> Option<Option<Group>> {
    let presets: Vec<String> = Group::presets().iter().map(|g| g.to_string()).collect();
    println!("Groups: {}", presets.join(", "));
    let answer = ctx.prompt_with_default("Group", current.as_str())?;
    Some(answer.map(Group::new))
}

pub fn add(ctx: &mut CLIContext, args: &str) {
    println!("New contact (name and phone are required)");

    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) => s,
            None => return,
        }
    };
    let Some(phone) = ctx.prompt("Phone: ") else { return };
    let Some(email) = ctx.prompt("Email: ") else { return };
    let Some(group) = prompt_group(ctx, &Group::default()) else { return };

    let mut draft = ContactDraft::new(name, phone).email(email);
    if let Some(group) = group {
        draft.group = group;
    }

    match ctx.book.add(draft) {
        Ok(contact) => println!("Contact added: {}", contact.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit <name|#id>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    println!("Editing {} (press Enter to keep a value, '-' clears email/avatar)", contact.name);
    let Some(name) = ctx.prompt_with_default("Name", &contact.name) else { return };
    let Some(phone) = ctx.prompt_with_default("Phone", &contact.phone) else { return };
    let Some(email) = ctx.prompt_with_default("Email", &contact.email) else { return };
    let Some(avatar) =
        ctx.prompt_with_default("Avatar URL", contact.avatar.as_deref().unwrap_or(""))
    else {
        return;
    };
    let Some(group) = prompt_group(ctx, &contact.group) else { return };

    let patch = ContactPatch {
        name,
        phone,
        email: email.map(|e| if e == "-" { String::new() } else { e }),
        avatar: avatar.map(|a| if a == "-" { None } else { Some(a) }),
        group,
    };
    if patch.is_empty() {
        println!("Nothing changed.");
        return;
    }

    match ctx.book.update(&contact.id, patch) {
        Ok(updated) => println!("Contact updated: {}", updated.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete <name|#id>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    match ctx.book.remove(&contact.id) {
        Ok(Some(removed)) => println!("Contact deleted: {}", removed.name),
        Ok(None) => println!("Contact was already deleted."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn favorite(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: fav <name|#id>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    match ctx.book.toggle_favorite(&contact.id) {
        Ok(c) if c.is_favorite => println!("{} added to favorites", c.name),
        Ok(c) => println!("{} removed from favorites", c.name),
        Err(e) => ctx.print_error(&e),
    }
}
