mod cli_arguments;

use std::{process::ExitCode, sync::Arc, time::Duration};

use clap::Parser;
use http_repository::{
    Envelope, HttpRepository, Payload, Query, ResourceId, ResourceRef,
    api_client::{rest_api_client::RestApiClient, rest_api_client_config::RestApiClientConfig},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli_arguments::{CliArguments, Verb};

fn parse_id(raw: String) -> ResourceId {
    if let Ok(signed) = raw.parse::<i64>() {
        ResourceId::Number(signed)
    } else if let Ok(unsigned) = raw.parse::<u64>() {
        ResourceId::Unsigned(unsigned)
    } else {
        ResourceId::Text(raw)
    }
}

fn report<T: Serialize>(verb: &str, envelope: Envelope<T>) -> ExitCode {
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to render the {verb} result: {e}");
            return ExitCode::FAILURE;
        }
    }

    match envelope {
        Envelope::Data(_) => {
            info!("{verb} succeeded");
            ExitCode::SUCCESS
        }
        Envelope::Error(_) => ExitCode::FAILURE,
    }
}

async fn run(repository: HttpRepository, verb: Verb) -> ExitCode {
    match verb {
        Verb::Query { url, cursor } => {
            let query = Query { url, cursor };
            report("query", repository.query::<Value>(query).await)
        }
        Verb::Read { url, id } => {
            let reference = ResourceRef {
                url,
                id: id.map(parse_id),
            };
            report("read", repository.read_resource::<Value>(reference).await)
        }
        Verb::Write { url, data } => report(
            "write",
            repository
                .write_resource::<Value, Value>(Payload::new(url, data))
                .await,
        ),
        Verb::Destroy { url, data } => report(
            "destroy",
            repository.destroy_resource(Payload::new(url, data)).await,
        ),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: CliArguments = CliArguments::parse();

    let config = RestApiClientConfig::new(&args.base_url)
        .with_cursor_param(&args.cursor_param)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    let client = match RestApiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build the HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Using API at {}", client.config().base_url);

    run(HttpRepository::new(Arc::new(client)), args.verb).await
}
