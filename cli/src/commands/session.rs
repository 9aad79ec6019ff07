//! `login`, `logout` and `status`

use std::io::Write;

use tracing::info;

use crate::app::context::AppContext;
use crate::authn::credentials::{CredentialChain, HostSecrets, SecretProvider};
use crate::authn::login::{establish_session, LoginOutcome, ServerValidator, SessionValidator};
use crate::cli::LoginArgs;
use crate::errors::CliError;
use crate::http::client::{HttpClient, BOOTSTRAP_TIMEOUT};
use crate::http::gateway::{Gateway, TEXT_PLAIN};
use crate::output::banner;
use crate::storage::session::RemoveOutcome;

pub async fn handle_login(
    ctx: &AppContext,
    args: LoginArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let secrets = HostSecrets::system()?;
    let validator = ServerValidator::new(HttpClient::new(BOOTSTRAP_TIMEOUT)?);
    login_with(ctx, args, &secrets, &validator, out).await?;
    Ok(())
}

/// Log in with the given secret source and validator, then persist the session
pub async fn login_with<P, V>(
    ctx: &AppContext,
    args: LoginArgs,
    secrets: &P,
    validator: &V,
    out: &mut dyn Write,
) -> Result<LoginOutcome, CliError>
where
    P: SecretProvider + ?Sized,
    V: SessionValidator + ?Sized,
{
    let chain = CredentialChain::new(args.username, args.password);
    let outcome = establish_session(&args.url, chain, secrets, validator).await?;
    ctx.store.save(&outcome.session).await?;
    info!(
        "Session for '{}' saved after {} attempt(s)",
        args.url, outcome.attempts
    );

    banner(out, &format!("Successfully logged in to '{}'", args.url))?;
    Ok(outcome)
}

pub async fn handle_logout(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let message = match ctx.store.remove().await? {
        RemoveOutcome::Removed => "Successfully logged out from RapidDeploy.",
        RemoveOutcome::NotFound => {
            "WARNING: No login session found. Please, perform a login before requesting any action."
        }
    };
    banner(out, message)?;
    Ok(())
}

pub async fn handle_status(ctx: &AppContext, out: &mut dyn Write) -> Result<(), CliError> {
    let session = ctx.load_session().await?;
    let gateway = Gateway::new(&ctx.http, &session);
    gateway.probe(TEXT_PLAIN).await?;

    let (base_url, _) = session.credentials()?;
    banner(out, &format!("Successfully logged in to '{}'", base_url))?;
    Ok(())
}
