//! Config command - configuration management.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved configuration
    Show,

    /// Show which config files are loaded and their precedence
    Which,

    /// Initialize a config file with defaults
    Init {
        /// Create project-local config (./sitedeck.toml) instead of user config
        #[arg(long)]
        local: bool,
    },

    /// Show configuration file path
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx).await,
        ConfigCommand::Which => cmd_which(ctx).await,
        ConfigCommand::Init { local } => cmd_init(local).await,
        ConfigCommand::Path => cmd_path().await,
    }
}

async fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = sitedeck_config::load_config(None)?;
    let config = &loaded.config;

    println!("# sitedeck Configuration\n");

    let sources = loaded.loaded_from();
    if sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &sources {
            println!("  {}", source.display());
        }
        println!();
    }

    let server = config.server();
    println!("Server:");
    println!("  bind: {}", server.bind);
    println!("  request_logging: {}", server.request_logging);
    println!();

    let gateway = config.gateway();
    println!("Gateway:");
    println!("  cookie: {}", gateway.cookie_name);
    println!("  login: {}", gateway.login_path);
    println!("  landing: {}", gateway.landing_path);
    println!("  callback: {}", gateway.callback_path);
    println!("  site default section: {}", gateway.site_default_section);
    println!("  excluded: {}", gateway.exclude.join(", "));
    println!();

    println!("OAuth:");
    match config.oauth() {
        Ok(oauth) => {
            println!("  client_id: {}", oauth.client_id.unwrap_or_default());
            println!("  client_secret: ✓ set");
            println!("  redirect_uri: {}", oauth.redirect_uri);
        }
        Err(e) => println!("  ✗ {}", e),
    }
    println!();

    println!("Site API:");
    println!("  base_url: {}", config.api().base_url);
    println!();

    if !loaded.warnings.is_empty() {
        println!("Warnings:");
        for w in &loaded.warnings {
            println!("  ⚠ {}", w);
        }
        println!();
    }

    if ctx.verbose {
        println!("---\nRaw config:\n");
        if let Ok(toml_str) = config.to_toml() {
            println!("{}", toml_str);
        }
    }

    Ok(())
}

async fn cmd_which(_ctx: &Context) -> Result<()> {
    let loaded = sitedeck_config::load_config(None)?;

    println!("Config file search order (later overrides earlier):\n");

    for source in &loaded.sources {
        let status = if source.loaded {
            "✓ loaded"
        } else {
            "· not found"
        };
        println!("  {} {}", status, source.path.display());
    }

    println!();
    let loaded_count = loaded.loaded_from().len();
    if loaded_count == 0 {
        println!("No config files found. Run 'sitedeck config init' to create one.");
    } else {
        println!("{} config file(s) loaded.", loaded_count);
    }

    Ok(())
}

async fn cmd_init(local: bool) -> Result<()> {
    let path = if local {
        std::path::PathBuf::from(sitedeck_config::discovery::PROJECT_CONFIG_FILE)
    } else {
        let dir = sitedeck_config::xdg_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        std::fs::create_dir_all(&dir)?;
        dir.join(sitedeck_config::discovery::USER_CONFIG_FILE)
    };

    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    let template = r#"# sitedeck Configuration

[server]
bind = "127.0.0.1:3000"

# [gateway]
# cookie_name = "session_token"
# login_path = "/login"
# landing_path = "/auth-info"
# callback_path = "/oauth/callback"
# site_default_section = "pages"

[oauth]
# Prefer SITEDECK_CLIENT_ID / SITEDECK_CLIENT_SECRET over storing these here.
# client_id = ""
redirect_uri = "http://localhost:3000/oauth/callback"

# [api]
# base_url = "https://api.webflow.com/v2/"
"#;

    std::fs::write(&path, template)?;
    println!("✓ Created config file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  export SITEDECK_CLIENT_ID=...      # OAuth client id");
    println!("  export SITEDECK_CLIENT_SECRET=...  # OAuth client secret");
    println!("  sitedeck config show               # verify configuration");

    Ok(())
}

async fn cmd_path() -> Result<()> {
    if let Some(path) = sitedeck_config::xdg_config_path() {
        println!("{}", path.display());
    } else {
        eprintln!("Could not determine config directory");
    }
    Ok(())
}
