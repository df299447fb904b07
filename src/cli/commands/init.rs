use crate::cli::parser::Cli;
use crate::config::Config;
use crate::config_path;
use crate::errors::AppResult;
use crate::settings::SettingsStore;
use crate::ui::messages::{field, info, success};
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (kept if already present)
///  - the logs directory
///  - the settings document, with every key populated
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = config_path(cli);

    //
    // 1️⃣ CONFIGURAZIONE
    //
    if path.exists() {
        info(format!("Config file already present: {}", path.display()));
    } else {
        cfg.save_to(&path)?;
        success(format!("Config file created: {}", path.display()));
    }

    //
    // 2️⃣ DIRECTORY DEI REGISTRI
    //
    let logs = cfg.logs_path();
    fs::create_dir_all(&logs)?;

    //
    // 3️⃣ SETTINGS DEL FORM
    //
    let store = SettingsStore::new(cfg.settings_path());
    if store.init_defaults()? {
        success(format!("Default settings written: {}", store.path().display()));
    } else {
        info(format!("Settings already present: {}", store.path().display()));
    }

    field("Config file", path.display(), 12);
    field("Logs dir", logs.display(), 12);
    field("Settings", store.path().display(), 12);

    success("rcheckin initialization completed!");
    Ok(())
}
