//! Checks a tabletime venue file and prints what the service would run with.
//!
//! Usage: `validate-config [config-file]`. Without an argument the default
//! config location is checked.

use std::path::PathBuf;
use std::process::ExitCode;
use tabletime_util::{default_config_path, format_money};

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match tabletime_config::load_config(&path) {
        Ok(policy) => {
            println!("{}: ok", path.display());
            println!(
                "  venue {:?}, {} tables at {} per minute",
                policy.name,
                policy.table_count,
                format_money(policy.price_per_minute)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}
