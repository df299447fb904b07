use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::{SubmitForm, SubmitLogic, SubmitOutcome};
use crate::core::visitor::VisitorState;
use crate::errors::AppResult;
use crate::ledger::{LAST_NAME, Ledger, NAME};
use crate::settings::SettingsStore;
use crate::ui::messages::{field, success, warning};

/// Check in from the terminal. A duplicate is reported, not treated as an error.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        name,
        lastname,
        question1,
        question2,
    } = cmd
    {
        let settings = SettingsStore::new(cfg.settings_path());
        let ledger = Ledger::new(cfg.logs_path());

        let form = SubmitForm {
            name: name.clone(),
            lastname: lastname.clone(),
            question1: question1.clone(),
            question2: question2.clone(),
        };
        let mut visitor = VisitorState::default();

        match SubmitLogic::new(&settings, &ledger).submit(&form, &mut visitor)? {
            SubmitOutcome::Accepted(row) => {
                success(format!("Attendance recorded for {}", visitor.full_name()));
                for (col, value) in row.cells() {
                    if col != NAME && col != LAST_NAME {
                        field(col, value, 12);
                    }
                }
            }
            SubmitOutcome::Duplicate => {
                warning(format!(
                    "Ya te has registrado hoy. ({})",
                    visitor.full_name()
                ));
            }
        }
    }
    Ok(())
}
