//! Install-url command - prints the OAuth authorization URL.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the install-url command.
#[derive(Args, Debug)]
pub struct InstallUrlArgs {
    /// Path to config file (overrides default discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the install-url command.
pub async fn run(args: InstallUrlArgs, ctx: &Context) -> Result<()> {
    let loaded = super::load(args.config.as_deref(), ctx)?;
    let section = loaded.config.oauth()?;
    let oauth = super::oauth_config(&section);

    println!("{}", sitedeck_oauth::build_authorization_url(&oauth));
    Ok(())
}
