//! `verify`: bundle server diagnostics into one ZIP file

use std::io::{Cursor, Read, Write};

use chrono::{DateTime, Local};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::app::context::AppContext;
use crate::errors::CliError;
use crate::filesys::file::File;
use crate::http::gateway::Gateway;

pub const GENERAL_INFO_ENTRY: &str = "general-info.txt";
pub const PROPERTIES_ENTRY: &str = "rapiddeploy.properties";

pub async fn handle_verify(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let gateway = Gateway::new(&ctx.http, &session);

    let general_info = gateway.system_general_info().await?;
    let properties = gateway.system_configuration().await?;
    let logs = gateway.system_application_logs().await?;

    let bundle = build_bundle(&general_info, &properties, &logs)?;
    let path = ctx.work_path(bundle_name(Local::now()));
    File::new(&path).write_bytes(&bundle).await?;

    writeln!(out)?;
    writeln!(out, "RapidDeploy information file: {}", path.display())?;
    writeln!(out)?;
    Ok(())
}

/// `rd-info-<timestamp>.zip`
pub fn bundle_name(now: DateTime<Local>) -> String {
    format!("rd-info-{}.zip", now.format("%Y%m%d%H%M%S"))
}

/// Deflated archive with the general info, the properties and every entry
/// of the server logs archive
pub fn build_bundle(
    general_info: &[u8],
    properties: &[u8],
    logs: &[u8],
) -> Result<Vec<u8>, CliError> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    writer.start_file(GENERAL_INFO_ENTRY, options)?;
    writer.write_all(general_info)?;
    writer.start_file(PROPERTIES_ENTRY, options)?;
    writer.write_all(properties)?;

    let mut logs = ZipArchive::new(Cursor::new(logs))?;
    for index in 0..logs.len() {
        let mut entry = logs.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        debug!("Including log entry {}", entry.name());
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        writer.start_file(entry.name(), options)?;
        writer.write_all(&contents)?;
    }

    Ok(writer.finish()?.into_inner())
}
