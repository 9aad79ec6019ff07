//! `export` and `import` of project archives

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::app::context::AppContext;
use crate::errors::CliError;
use crate::filesys::file::File;
use crate::http::gateway::Gateway;
use crate::http::projects::ImportOutcome;

pub async fn handle_export(
    ctx: &AppContext,
    project: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let archive = Gateway::new(&ctx.http, &session).export_project(project).await?;

    let file_name = format!("{}.zip", project);
    File::new(ctx.work_path(&file_name)).write_bytes(&archive).await?;

    writeln!(out)?;
    writeln!(out, "Project export file: {}", file_name)?;
    writeln!(out)?;
    Ok(())
}

pub async fn handle_import(
    ctx: &AppContext,
    path: &Path,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    debug!("Importing project file: {}", path.display());
    let archive = File::new(path).read_bytes().await?;

    match Gateway::new(&ctx.http, &session).import_project(archive).await? {
        ImportOutcome::Imported => {
            writeln!(out, "File '{}' imported successfully.", path.display())?;
            writeln!(out)?;
            Ok(())
        }
        ImportOutcome::Rejected(report) => {
            for message in report.messages() {
                writeln!(out, "{}", message.value)?;
            }
            writeln!(out)?;
            Err(CliError::ImportRejected(path.to_path_buf()))
        }
    }
}
