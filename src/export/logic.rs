// src/export/logic.rs

use crate::db::claim_store::SqliteClaimStore;
use crate::db::log::audit_or_warn;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ClaimExport;
use crate::models::claim_status::ClaimStatus;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export claims, newest first, optionally only one status.
    /// Returns the number of exported claims.
    pub fn export(
        store: &SqliteClaimStore,
        format: ExportFormat,
        file: &str,
        status: Option<ClaimStatus>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        let rows: Vec<ClaimExport> = store.list(status)?.iter().map(ClaimExport::from).collect();

        if rows.is_empty() {
            warning("No claims found for the selected filter.");
            return Ok(0);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit_or_warn(
            &store.pool().conn,
            "export",
            file,
            &format!("Exported {} claim(s) as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
