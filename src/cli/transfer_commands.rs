use std::path::PathBuf;

use crate::cli::context::CLIContext;

pub fn export(ctx: &CLIContext, args: &str) {
    let dir = if args.is_empty() {
        ctx.config.export_dir.clone()
    } else {
        PathBuf::from(args)
    };

    match ctx.book.export_to_dir(&dir, CLIContext::today()) {
        Ok(path) => println!("Contacts exported to {}", path.display()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn import(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: import <path.json>");
        return;
    }

    let path = PathBuf::from(args);
    match ctx.book.import_file(&path) {
        Ok(report) => {
            println!("Imported {} contacts.", report.imported);
            if report.reassigned_ids > 0 {
                println!("  {} of them were given new ids.", report.reassigned_ids);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
