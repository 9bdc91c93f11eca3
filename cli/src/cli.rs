use std::path::PathBuf;

use clap::Parser;
use mcpanel_protocol::models::InstanceType;

/// Command-line client for the mcpanel server manager.
#[derive(Debug, Parser)]
#[clap(author, version, bin_name = "mcpanel")]
pub struct Cli {
    /// Backend address. Overrides `base_url` from config.toml and
    /// `MCPANEL_BASE_URL`.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Read settings from this file instead of `$MCPANEL_HOME/config.toml`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Route the command is issued from; used to build the `next` parameter
    /// when the session has expired.
    #[arg(long, global = true, default_value = "/")]
    pub route: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Check that the backend is reachable.
    Ping,

    /// Show host statistics of the machine running the backend.
    Info,

    /// Open a session.
    Login(LoginArgs),

    /// Close the current session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Manage server instances.
    #[command(subcommand)]
    Instance(InstanceCommand),
}

#[derive(Debug, clap::Parser)]
pub struct LoginArgs {
    #[arg(long, short = 'u')]
    pub username: String,

    #[arg(long, short = 'p', env = "MCPANEL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, clap::Subcommand)]
pub enum InstanceCommand {
    /// List instance names.
    List,

    /// Show the configuration of one instance.
    Show { name: String },

    /// Create a new instance.
    Create(CreateArgs),

    /// Delete an instance.
    Delete { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ServerKind {
    Vanilla,
    Purpur,
    Forge,
}

#[derive(Debug, clap::Parser)]
pub struct CreateArgs {
    pub name: String,

    /// Minecraft version, e.g. 1.20.1.
    #[arg(long = "mc-version", value_name = "VERSION")]
    pub mc_version: String,

    #[arg(long = "type", value_enum, default_value_t = ServerKind::Vanilla)]
    pub kind: ServerKind,

    /// Forge build; required with `--type forge`.
    #[arg(long, value_name = "VERSION", required_if_eq("kind", "forge"))]
    pub forge: Option<String>,
}

impl CreateArgs {
    pub fn instance_type(&self) -> InstanceType {
        match self.kind {
            ServerKind::Vanilla => InstanceType::Vanilla,
            ServerKind::Purpur => InstanceType::Purpur,
            ServerKind::Forge => InstanceType::Forge(self.forge.clone().unwrap_or_default()),
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mcpanel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["ping", "--base-url", "http://panel:8181", "--route", "/dashboard"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://panel:8181"));
        assert_eq!(cli.route, "/dashboard");
        assert!(matches!(cli.command, Command::Ping));
    }

    #[test]
    fn forge_create_carries_build() {
        let cli = parse(&[
            "instance",
            "create",
            "lobby",
            "--mc-version",
            "1.20.1",
            "--type",
            "forge",
            "--forge",
            "47.2.0",
        ]);
        let Command::Instance(InstanceCommand::Create(args)) = cli.command else {
            panic!("expected instance create");
        };
        assert_eq!(args.instance_type(), InstanceType::Forge("47.2.0".to_string()));
    }

    #[test]
    fn forge_create_requires_build() {
        let result = Cli::try_parse_from([
            "mcpanel",
            "instance",
            "create",
            "lobby",
            "--mc-version",
            "1.20.1",
            "--type",
            "forge",
        ]);
        assert!(result.is_err());
    }
}
