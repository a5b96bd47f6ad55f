use contacts::config::{self, Config, Invocation};
use contacts::storage::SqliteStore;
use contacts::ContactBook;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::from_process() {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            println!("{}", config::usage());
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Some(dir) = config.store_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: cannot create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    let store = match SqliteStore::open(&config.store_path) {
        Ok(store) => store.with_quota(config.quota),
        Err(e) => {
            eprintln!("Error opening store: {}", e);
            std::process::exit(1);
        }
    };

    let book = match ContactBook::open(store) {
        Ok(book) => book,
        Err(e) => {
            eprintln!("Error loading session: {}", e);
            std::process::exit(1);
        }
    };

    contacts::cli::run(book, config);
}
