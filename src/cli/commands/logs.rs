use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::ui::messages::{header, info, use_color};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logs { date: date_arg } = cmd {
        let d = date::resolve_date(date_arg.as_deref())
            .ok_or_else(|| AppError::InvalidDate(date_arg.clone().unwrap_or_default()))?;

        let ledger = Ledger::new(cfg.logs_path());
        let table = ledger.load_or_empty(d)?;

        header(format!("Attendance {d}"));

        if table.is_empty() {
            info(format!("No entries for {d}"));
            return Ok(());
        }

        let mut out = Table::new(table.headers().to_vec());
        for row in table.rows() {
            out.add_row(table.aligned(row));
        }
        print!("{}", out.render(use_color()));
        println!("\nTotal: {}", table.len());
    }
    Ok(())
}
