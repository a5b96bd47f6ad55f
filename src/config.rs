use std::path::PathBuf;

pub const DEFAULT_STORE: &str = ".data/contacts.db";

/// Runtime settings. Flags win over environment variables, which win over
/// the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub export_dir: PathBuf,
    /// Byte limit for stored data, `None` for unlimited.
    pub quota: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Config),
    Help,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            export_dir: PathBuf::from("."),
            quota: None,
        }
    }
}

impl Config {
    /// Reads `CONTACTS_FILE`, `CONTACTS_EXPORT_DIR` and `CONTACTS_QUOTA`
    /// through `env`.
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Config::default();
        if let Some(path) = env("CONTACTS_FILE") {
            config.store_path = PathBuf::from(path);
        }
        if let Some(dir) = env("CONTACTS_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Some(quota) = env("CONTACTS_QUOTA") {
            config.quota = Some(parse_quota(&quota)?);
        }
        Ok(config)
    }

    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Invocation, String> {
        let mut config = Config::from_env(env)?;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    let path = args.next().ok_or("--file requires a path argument")?;
                    config.store_path = PathBuf::from(path);
                }
                "--export-dir" => {
                    let dir = args.next().ok_or("--export-dir requires a directory argument")?;
                    config.export_dir = PathBuf::from(dir);
                }
                "--quota" => {
                    let quota = args.next().ok_or("--quota requires a byte count")?;
                    config.quota = Some(parse_quota(&quota)?);
                }
                "--help" | "-h" => return Ok(Invocation::Help),
                other => return Err(format!("Unknown argument: {}", other)),
            }
        }

        Ok(Invocation::Run(config))
    }

    pub fn from_process() -> Result<Invocation, String> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }
}

fn parse_quota(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("quota must be a positive byte count, got '{}'", s)),
    }
}

pub fn usage() -> &'static str {
    "Contacts - personal address book

Usage: contacts [OPTIONS]

Options:
  -f, --file <PATH>       Store file path (default: .data/contacts.db, env CONTACTS_FILE)
  --export-dir <DIR>      Where backups are written (default: ., env CONTACTS_EXPORT_DIR)
  --quota <BYTES>         Storage limit in bytes (env CONTACTS_QUOTA)
  -h, --help              Show this help

Logging is controlled with RUST_LOG, e.g. RUST_LOG=contacts=debug."
}
