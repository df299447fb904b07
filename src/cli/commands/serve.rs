use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::web::{self, AppState};

/// Handle the `serve` command: build a runtime and block on the server.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = cmd {
        let bind = bind.clone().unwrap_or_else(|| cfg.bind.clone());
        let state = AppState::from_config(cfg);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(web::serve(state, &bind))?;
    }
    Ok(())
}
