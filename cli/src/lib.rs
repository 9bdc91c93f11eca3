#![deny(clippy::unwrap_used, clippy::expect_used)]

mod cli;
mod config;
mod lang;
mod render;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;
use mcpanel_backend_client::ApiError;
use mcpanel_backend_client::BackendClient;
use mcpanel_backend_client::LoginOutcome;
use mcpanel_backend_client::MemoryNavigator;
use mcpanel_backend_client::ReqwestTransport;
use mcpanel_backend_client::ResponseInterceptor;
use mcpanel_backend_client::SessionExpiryPolicy;
use mcpanel_backend_client::TransportOptions;
use mcpanel_notify::NotificationCenter;
use mcpanel_notify::NotificationMessage;
use mcpanel_notify::NotifierHandle;
use mcpanel_notify::Severity;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use cli::Cli;
pub use cli::Command;
pub use cli::InstanceCommand;
pub use config::PanelConfig;
pub use config::find_mcpanel_home;
pub use lang::translate;
pub use render::memory_unit_from_kib;

/// Ran successfully but the backend refused what was asked.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Refused(String);

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let default_level = "error";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();

    let mut config = PanelConfig::load(cli.config.as_deref()).context("failed to load config")?;
    config.apply_overrides(std::env::var("MCPANEL_BASE_URL").ok(), cli.base_url.clone());
    info!("using backend at {}", config.base_url);

    let center = NotificationCenter::spawn();
    let notifier = center.handle();
    let navigator = Arc::new(MemoryNavigator::new(cli.route.clone()));

    let transport = ReqwestTransport::new(TransportOptions {
        user_agent: config.user_agent.clone(),
        timeout: config.request_timeout(),
    })?;
    let interceptor = ResponseInterceptor::new(Arc::new(transport))
        .with_session_policy(
            SessionExpiryPolicy::new(navigator.clone()).with_login_route(&config.login_route),
        )
        .with_notifier(notifier.clone());
    let client = BackendClient::new(&config.base_url, interceptor);

    let result = run_command(&client, &notifier, cli.command).await;
    if let Err(err) = &result
        && let Some(api_err) = err.downcast_ref::<ApiError>()
    {
        notifier.push(
            NotificationMessage::notify(api_err.notification_key()).with_severity(Severity::Danger),
        );
    }

    for route in navigator.replaced_routes() {
        eprintln!("redirect: {route}");
    }
    let color = render::stderr_supports_color();
    for line in render::notification_lines(&notifier.snapshot(), color) {
        eprintln!("{line}");
    }
    center.shutdown();

    result
}

async fn run_command(
    client: &BackendClient,
    notifier: &NotifierHandle,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Ping => {
            if !client.ping().await {
                anyhow::bail!("{} is not reachable", client.base_url());
            }
            println!("{} is up", client.base_url());
        }
        Command::Info => {
            let info = client.system_info().await?;
            for line in render::system_info_lines(&info) {
                println!("{line}");
            }
        }
        Command::Login(args) => match client.login(&args.username, &args.password).await? {
            LoginOutcome::Success => notifier.notify_fast("auth.success"),
            LoginOutcome::Rejected(key) => {
                let message = lang::translate(&key).to_string();
                notifier.push(NotificationMessage::notify(key).with_severity(Severity::Danger));
                return Err(Refused(message).into());
            }
        },
        Command::Logout => client.logout().await?,
        Command::Whoami => {
            let user = client.current_user().await?;
            println!("{}", render::user_summary(&user));
        }
        Command::Instance(InstanceCommand::List) => {
            for name in client.list_instances().await? {
                println!("{name}");
            }
        }
        Command::Instance(InstanceCommand::Show { name }) => {
            let instance = client.instance(&name).await?;
            for line in render::instance_details(&instance) {
                println!("{line}");
            }
        }
        Command::Instance(InstanceCommand::Create(args)) => {
            let instance = client
                .create_instance(&args.name, args.instance_type(), &args.mc_version)
                .await?;
            println!("created {}", instance.name);
        }
        Command::Instance(InstanceCommand::Delete { name }) => {
            client.delete_instance(&name).await?;
            println!("deleted {name}");
        }
    }
    Ok(())
}
