//! Command line definition and dispatch

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::app::context::AppContext;
use crate::app::options::AppOptions;
use crate::authn::credentials::DEFAULT_USERNAME;
use crate::commands::{deploy, inventory, projects, session, verify};
use crate::errors::CliError;
use crate::logs::{init_logging, LogLevel, LogOptions};
use crate::output::OutputFormat;
use crate::utils::{version_info, LONG_VERSION};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:9090/MidVision";

/// Command line client for the RapidDeploy deployment automation server
#[derive(Parser, Debug)]
#[command(name = "rd", version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Mirror request and response details on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress command output, errors are still reported
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Diagnostic log level when RUST_LOG is unset
    #[arg(long, global = true, env = "RD_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Emit diagnostics as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Login session file
    #[arg(long, global = true, env = "RD_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Timeout of server calls, in seconds
    #[arg(long, global = true, env = "RD_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Output format of listing commands
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to a RapidDeploy server and keep the session
    Login(LoginArgs),
    /// Finish the session with the RapidDeploy server
    Logout,
    /// Check that the stored session still works
    Status,
    /// List the projects
    #[command(alias = "listProjects")]
    ListProjects,
    /// List the servers
    #[command(alias = "listServers")]
    ListServers,
    /// List the installations of a server
    #[command(alias = "listInstallations")]
    ListInstallations {
        /// Server name
        server: String,
    },
    /// List the deployment targets of a project
    #[command(alias = "listTargets")]
    ListTargets {
        /// Project name
        project: String,
    },
    /// List the job plans
    #[command(alias = "listJobPlans")]
    ListJobPlans,
    /// Deploy a project to a target
    Deploy(DeployArgs),
    /// Run a job plan
    #[command(alias = "startJobPlan")]
    StartJobPlan {
        /// Numeric job plan ID, see list-job-plans
        id: String,
    },
    /// Download a project as a ZIP file into the current directory
    Export {
        /// Project name
        project: String,
    },
    /// Import a project ZIP file
    Import {
        /// Path to the project ZIP file
        file: PathBuf,
    },
    /// Collect server information into a ZIP file for support
    Verify,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// URL of the RapidDeploy server
    #[arg(long, env = "RD_URL", default_value = DEFAULT_SERVER_URL)]
    pub url: String,

    /// Username
    #[arg(long, default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Password
    #[arg(long, env = "RD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// PROJECT [PACKAGE] SERVER.INSTALLATION.CONFIGURATION [@@KEY@@=VALUE ...]
    #[arg(required = true, num_args = 2.., value_name = "ARGS")]
    pub args: Vec<String>,

    /// Wait for the deployment to finish
    #[arg(short, long)]
    pub sync: bool,

    /// Download the deployment log, needs --sync
    #[arg(short, long, requires = "sync")]
    pub logfile: bool,
}

/// Parse the command line, run the command and return the exit code
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let log_options = LogOptions::from_flags(cli.debug, cli.log_level.clone(), cli.log_json);
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("rd {:?}", version_info());

    let mut stdout = io::stdout();
    let mut sink = io::sink();
    let out: &mut dyn Write = if cli.quiet { &mut sink } else { &mut stdout };

    match execute(cli, out).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("\n{}\n", err.to_string().red());
            err.exit_code()
        }
    }
}

/// Run a parsed command line against the given output
pub async fn execute(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let options = AppOptions {
        session_file: cli.session_file,
        timeout: Duration::from_secs(cli.timeout),
        output: cli.output,
        ..Default::default()
    };
    let ctx = AppContext::from_options(options)?;
    debug!("Session file: {:?}", ctx.store.file().path());

    match cli.command {
        Command::Login(args) => session::handle_login(&ctx, args, out).await,
        Command::Logout => session::handle_logout(&ctx, out).await,
        Command::Status => session::handle_status(&ctx, out).await,
        Command::ListProjects => inventory::handle_list_projects(&ctx, out).await,
        Command::ListServers => inventory::handle_list_servers(&ctx, out).await,
        Command::ListInstallations { server } => {
            inventory::handle_list_installations(&ctx, &server, out).await
        }
        Command::ListTargets { project } => {
            inventory::handle_list_targets(&ctx, &project, out).await
        }
        Command::ListJobPlans => inventory::handle_list_job_plans(&ctx, out).await,
        Command::Deploy(args) => deploy::handle_deploy(&ctx, args, out).await,
        Command::StartJobPlan { id } => deploy::handle_start_job_plan(&ctx, &id, out).await,
        Command::Export { project } => projects::handle_export(&ctx, &project, out).await,
        Command::Import { file } => projects::handle_import(&ctx, &file, out).await,
        Command::Verify => verify::handle_verify(&ctx, out).await,
    }?;
    out.flush()?;
    Ok(())
}
