//! publisher-client entry point.
//!
//! Builds the service facade from the environment and runs one command or
//! view against the publisher backend.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use publisher_client::api::dto::{BrokerConfig, PublishConfig};
use publisher_client::api::dto::broker_dto::DEFAULT_MQTT_PORT;
use publisher_client::api::dto::publish_dto::DEFAULT_INTERVAL_SECS;
use publisher_client::app_state::AppState;
use publisher_client::config::ClientConfig;
use publisher_client::nav::{Loading, RouteTable};
use publisher_client::service::PublisherService;

/// Client for the sensor publisher backend.
#[derive(Parser, Debug)]
#[command(name = "publisher-client")]
#[command(version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Backend base URL (overrides `PUBLISHER_API_URL`).
    #[arg(long, global = true)]
    api_url: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the backend to connect to an MQTT broker.
    Connect {
        /// Broker host.
        #[arg(long, default_value = "localhost")]
        broker: String,
        /// Broker port.
        #[arg(short, long, default_value_t = DEFAULT_MQTT_PORT)]
        port: u16,
        /// Broker username.
        #[arg(long, requires = "password")]
        username: Option<String>,
        /// Broker password.
        #[arg(long, requires = "username")]
        password: Option<String>,
    },
    /// Ask the backend to drop its broker connection.
    Disconnect,
    /// Show the sensor data descriptor.
    Info,
    /// Start or resume the replay.
    Start {
        /// First day to replay (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Last day to replay (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Seconds between records.
        #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS)]
        interval: f64,
        /// Sensor identifier.
        #[arg(long)]
        sensor_id: Option<String>,
        /// Sensor location.
        #[arg(long)]
        location: Option<String>,
        /// Extra annotation.
        #[arg(long)]
        extra: Option<String>,
    },
    /// Stop the running replay.
    Stop,
    /// Rewind replay progress to the first record.
    Reset,
    /// Show the replay status.
    Status,
    /// Navigate to a view (`/`, `/subscriber`, `/monitor`).
    Open {
        /// Route path.
        #[arg(default_value = "/")]
        path: String,
    },
    /// List the navigable routes.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url.as_deref() {
        config = config.with_api_url(api_url)?;
    }
    tracing::debug!(
        api_url = %config.api_url,
        ws_url = %config.status_socket_url,
        "configuration loaded"
    );

    // Build the facade and application state
    let service = Arc::new(PublisherService::new(&config)?);
    let state = AppState::new(service);
    let routes = RouteTable::standard();

    match args.command {
        Command::Connect {
            broker,
            port,
            username,
            password,
        } => {
            let mut broker = BrokerConfig::new(broker, port);
            if let (Some(username), Some(password)) = (username, password) {
                broker = broker.with_credentials(username, password);
            }
            print_json(&state.service.connect_with(&broker).await?)?;
        }
        Command::Disconnect => print_json(&state.service.disconnect_broker().await?)?,
        Command::Info => print_json(&state.service.get_data_info().await?)?,
        Command::Start {
            start_date,
            end_date,
            interval,
            sensor_id,
            location,
            extra,
        } => {
            let config = PublishConfig {
                sensor_id,
                location,
                extra,
                ..PublishConfig::default()
            }
            .with_date_range(start_date, end_date)
            .with_interval(interval);
            print_json(&state.service.start_publish(&config).await?)?;
        }
        Command::Stop => print_json(&state.service.stop_publish().await?)?,
        Command::Reset => print_json(&state.service.reset_publish().await?)?,
        Command::Status => print_json(&state.service.publish_status().await?)?,
        Command::Open { path } => {
            let route = routes
                .resolve(&path)
                .with_context(|| format!("no view for path {path}"))?;
            tracing::info!(path = route.path(), view = route.name(), "opening view");
            println!("== {} ==", route.title());
            route.view().render(&state).await?;
        }
        Command::Routes => {
            for route in routes.routes() {
                let loading = match route.loading() {
                    Loading::Eager => "eager",
                    Loading::Deferred => "deferred",
                };
                println!(
                    "{:<12} {:<10} {:<22} {loading}",
                    route.path(),
                    route.name(),
                    route.title()
                );
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
