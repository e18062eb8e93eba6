use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::server;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { host, port } = cmd {
        let host = host.clone().unwrap_or_else(|| cfg.host.clone());
        let port = port.unwrap_or(cfg.port);

        let pool = DbPool::open(&cfg.database)?;
        server::run(pool, cfg, &host, port)?;
    }

    Ok(())
}
