pub mod cli;
pub mod core;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing::error;

pub use crate::core::config::{ConfigDocument, ConfigFetcher};
pub use crate::core::error::{ErrorPayload, RemoteError};
pub use crate::core::http::{HttpFetch, HttpRequest, HttpResponse, ReqwestFetcher};
pub use crate::core::identity::Identity;
pub use crate::core::instances::{Instance, InstanceListResolver, ResolvedInstances};
pub use crate::core::news::{News, NewsAggregator, NewsItem};
pub use crate::core::settings::{Endpoints, Settings};
pub use crate::core::LauncherRemote;

use cli::{Cli, Command};

pub async fn execute(command: Command, remote: &LauncherRemote) -> Result<Value, RemoteError> {
    Ok(match command {
        Command::Config => remote.config().get_config().await?.into_value(),
        Command::Instances => serde_json::to_value(remote.instances().get_instance_list().await)?,
        Command::News => serde_json::to_value(remote.news().get_news().await?)?,
    })
}

fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

fn report_failure(error: &RemoteError) -> ExitCode {
    error!(code = %error.code(), %error, "request failed");
    match serde_json::to_value(error.to_payload()) {
        Ok(payload) => print_json(&payload),
        Err(_) => eprintln!("{error}"),
    }
    ExitCode::FAILURE
}

pub fn run() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    telemetry::init();

    let cli = Cli::parse();
    let settings = cli.apply(Settings::from_env());
    let remote = match LauncherRemote::from_settings(&settings) {
        Ok(remote) => remote,
        Err(error) => return report_failure(&RemoteError::from(error)),
    };
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to start async runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli.command, &remote)) {
        Ok(value) => {
            print_json(&value);
            ExitCode::SUCCESS
        }
        Err(error) => report_failure(&error),
    }
}
