use super::{open_store, parse_status_opt};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        status,
        force,
    } = cmd
    {
        let status = parse_status_opt(status)?;
        let store = open_store(cfg)?;
        ExportLogic::export(&store, *format, file, status, *force)?;
    }
    Ok(())
}
