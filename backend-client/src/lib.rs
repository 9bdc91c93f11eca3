#![deny(clippy::unwrap_used, clippy::expect_used)]

mod client;
mod error;
mod interceptor;
mod navigator;
pub mod remote_fs;
mod transport;

pub use client::BackendClient;
pub use client::LoginOutcome;
pub use error::ApiError;
pub use error::TransportError;
pub use interceptor::ResponseInterceptor;
pub use interceptor::SERVER_UNREACHABLE;
pub use navigator::MemoryNavigator;
pub use navigator::Navigator;
pub use navigator::SessionExpiryPolicy;
pub use transport::ApiRequest;
pub use transport::Method;
pub use transport::RawResponse;
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use transport::TransportOptions;

pub use mcpanel_protocol::envelope::Envelope;
pub use mcpanel_protocol::models::Instance;
pub use mcpanel_protocol::models::InstanceConfig;
pub use mcpanel_protocol::models::InstanceType;
pub use mcpanel_protocol::models::SystemInfo;
pub use mcpanel_protocol::models::User;
