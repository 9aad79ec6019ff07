//! Listing commands

use std::io::Write;

use crate::app::context::AppContext;
use crate::errors::CliError;
use crate::http::gateway::Gateway;
use crate::output::{render_listing, Table};

pub async fn handle_list_projects(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let projects = Gateway::new(&ctx.http, &session).list_projects().await?;

    render_listing(out, ctx.output, &projects, "No projects available to show", |projects| {
        let mut table = Table::with_headers(["Name", "Description"]);
        for project in projects {
            table.push_row([project.name.as_str(), project.description.as_str()]);
        }
        table
    })
}

pub async fn handle_list_servers(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let servers = Gateway::new(&ctx.http, &session).list_servers().await?;

    render_listing(out, ctx.output, &servers, "No servers available to show", |servers| {
        let mut table =
            Table::with_headers(["Display name", "Hostnames", "OS type & Version", "Enabled?"]);
        for server in servers {
            table.push_row([
                server.display_name.clone(),
                server.hostnames.join("\n"),
                server.platform(),
                server.enabled.to_string(),
            ]);
        }
        table
    })
}

pub async fn handle_list_installations(
    ctx: &AppContext,
    server: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let installations = Gateway::new(&ctx.http, &session).list_installations(server).await?;

    let empty = format!("No installations available to show for server '{}'", server);
    render_listing(out, ctx.output, &installations, &empty, |installations| {
        let mut table =
            Table::with_headers(["Name", "Environment", "Live?", "Approval group", "Enabled?"]);
        for installation in installations {
            table.push_row([
                installation.name.clone(),
                installation.environment.clone(),
                installation.live.clone(),
                installation.approval_group.clone(),
                installation.enabled.to_string(),
            ]);
        }
        table
    })
}

/// Targets come back as a message list, one target per value
pub async fn handle_list_targets(
    ctx: &AppContext,
    project: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let document = Gateway::new(&ctx.http, &session).list_targets(project).await?;
    let targets: Vec<&str> = document.messages().iter().map(|m| m.value.as_str()).collect();

    let empty = format!("No targets available to show for project '{}'", project);
    render_listing(out, ctx.output, &targets, &empty, |targets| {
        let mut table = Table::with_headers(["Targets"]);
        for target in targets {
            table.push_row([*target]);
        }
        table
    })
}

pub async fn handle_list_job_plans(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let plans = Gateway::new(&ctx.http, &session).list_job_plans().await?;

    render_listing(out, ctx.output, &plans, "No job plans available to show", |plans| {
        let mut table = Table::with_headers(["ID", "Name", "Owner"]);
        for plan in plans {
            table.push_row([plan.id.as_str(), plan.name.as_str(), plan.owner.as_str()]);
        }
        table
    })
}
