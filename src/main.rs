use std::process;

use clap::Parser;

use pubdesk::cli::{self, Cli, Context};
use pubdesk::config::Config;
use pubdesk::logging;
use pubdesk::storage::Storage;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let home = Config::home().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let config = match Config::load(&home) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let storage = match Storage::new(&home) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    let ctx = Context {
        config: &config,
        storage: &storage,
        covers_dir: home.join("covers"),
    };

    if let Err(e) = cli::run(cli, &ctx) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
