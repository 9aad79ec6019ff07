//! `deploy` and `start-job-plan`

use std::io::Write;

use tracing::debug;

use crate::app::context::AppContext;
use crate::cli::DeployArgs;
use crate::deploy::poller::{poll_until_finished, PollOptions, JOB_ID_LABEL};
use crate::deploy::request::DeployRequest;
use crate::errors::CliError;
use crate::http::gateway::Gateway;
use crate::output::render_messages;

const JOB_LABEL_PREFIX: &str = "Deployment Job ";
const UNKNOWN_TARGET_MARKER: &str = "No entity found";
const JOB_PLAN_CLASS_PREFIX: &str = "com.midvision.rapiddeploy.domain.jobplan.";

pub async fn handle_deploy(
    ctx: &AppContext,
    args: DeployArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let request = DeployRequest::from_args(&args.args)?;
    debug!(
        "Deploying '{}' to '{}' with package '{}'...",
        request.project, request.target, request.package
    );

    let session = ctx.load_session().await?;
    let gateway = Gateway::new(&ctx.http, &session);
    let report = gateway.trigger_deployment(&request).await?;

    if report.any_value_contains(UNKNOWN_TARGET_MARKER) {
        return Err(CliError::UnknownTarget(request.target.to_string()));
    }
    render_messages(out, &report, |label, value| {
        (format!("{}:", label).replace(JOB_LABEL_PREFIX, ""), value.to_string())
    })?;

    if args.sync {
        writeln!(out, "Deploying project in synchronous mode...")?;
        let job_id = report.find(JOB_ID_LABEL).ok_or(CliError::MissingField(JOB_ID_LABEL))?;
        let options = PollOptions {
            fetch_log: args.logfile,
            log_dir: ctx.work_dir.clone(),
        };
        let sleep = tokio::time::sleep;
        poll_until_finished(&gateway, job_id, &request.project, &options, out, sleep).await?;
        writeln!(out)?;
    }
    Ok(())
}

pub async fn handle_start_job_plan(
    ctx: &AppContext,
    id: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let plan_id: u64 = id
        .parse()
        .map_err(|_| CliError::InvalidJobPlanId(id.to_string()))?;

    let session = ctx.load_session().await?;
    let report = Gateway::new(&ctx.http, &session).run_job_plan(plan_id).await?;
    render_messages(out, &report, |label, value| {
        (label.to_string(), value.replace(JOB_PLAN_CLASS_PREFIX, ""))
    })?;
    Ok(())
}
