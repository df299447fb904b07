use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::settings::{Settings, SettingsStore};
use crate::ui::messages::{header, info, success};

/// Handle the `settings` subcommand
///
/// Edits are applied on top of the current document and saved wholesale,
/// the same way the admin page does.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        print,
        set,
        enable,
        disable,
    } = cmd
    {
        let store = SettingsStore::new(cfg.settings_path());
        let mut settings = store.load()?;

        let edits: Vec<(String, String)> = set
            .iter()
            .map(|kv| {
                kv.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                    .ok_or_else(|| AppError::Config(format!("expected KEY=VALUE, got '{kv}'")))
            })
            .chain(enable.iter().map(|k| Ok((k.clone(), "true".to_string()))))
            .chain(disable.iter().map(|k| Ok((k.clone(), "false".to_string()))))
            .collect::<AppResult<_>>()?;

        for (key, value) in &edits {
            match settings.set_field(key, value) {
                Ok(true) => {}
                Ok(false) => return Err(AppError::Config(format!("unknown settings key '{key}'"))),
                Err(msg) => return Err(AppError::Config(format!("{key}: {msg}"))),
            }
        }

        if !edits.is_empty() {
            store.save(&settings)?;
            success(format!(
                "Settings saved ({} change(s)): {}",
                edits.len(),
                store.path().display()
            ));
        }

        if *print || edits.is_empty() {
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    header("Settings");
    match serde_json::to_string_pretty(settings) {
        Ok(json) => println!("{json}"),
        Err(e) => info(format!("cannot render settings: {e}")),
    }
}
