use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::ledger::Ledger;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date: date_arg,
        force,
    } = cmd
    {
        let d = date::resolve_date(date_arg.as_deref())
            .ok_or_else(|| AppError::InvalidDate(date_arg.clone().unwrap_or_default()))?;

        let ledger = Ledger::new(cfg.logs_path());
        ExportLogic::export(&ledger, d, *format, file, *force)?;
    }
    Ok(())
}
