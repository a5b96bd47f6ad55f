use crate::cli::context::CLIContext;
use crate::validation;

pub fn register(ctx: &mut CLIContext) {
    let Some(name) = ctx.prompt("Name: ") else { return };
    let Some(email) = ctx.prompt("Email: ") else { return };
    let Some(password) = ctx.read_line("Password (min 6 characters): ") else { return };
    let Some(confirmation) = ctx.read_line("Confirm password: ") else { return };

    if let Err(e) = validation::passwords_match(&password, &confirmation) {
        ctx.print_error(&e);
        return;
    }

    match ctx.book.register(&email, &password, &name) {
        Ok(user) => println!("Registration successful. Welcome, {}!", user.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn login(ctx: &mut CLIContext, args: &str) {
    let email = if args.is_empty() {
        match ctx.prompt("Email: ") {
            Some(s) => s,
            None => return,
        }
    } else {
        args.to_string()
    };
    let Some(password) = ctx.read_line("Password: ") else { return };

    match ctx.book.login(&email, &password) {
        Ok(user) => println!("Welcome, {}!", user.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn logout(ctx: &mut CLIContext) {
    match ctx.book.logout() {
        Ok(()) => println!("Logged out."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn whoami(ctx: &CLIContext) {
    match ctx.book.current_user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in."),
    }
}
