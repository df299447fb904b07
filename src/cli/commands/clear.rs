use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::errors::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::settings::SettingsStore;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear {
        date: date_arg,
        yes,
    } = cmd
    {
        let d = date::resolve_date(date_arg.as_deref())
            .ok_or_else(|| AppError::InvalidDate(date_arg.clone().unwrap_or_default()))?;

        let ledger = Ledger::new(cfg.logs_path());
        if !ledger.exists(d) {
            info(format!("No ledger for {d}, nothing to clear."));
            return Ok(());
        }

        let prompt = format!("Delete ALL attendance entries for {d}? This action is irreversible.");
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let settings = SettingsStore::new(cfg.settings_path());
        AdminLogic::new(&settings, &ledger).clear(d)?;
        success(format!("Ledger for {d} has been deleted."));
    }
    Ok(())
}
