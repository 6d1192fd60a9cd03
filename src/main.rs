use crate::config::Config;
use crate::dynhost::{DynHostAPI, UpdateOutcome};
use crate::ip_source::{http::IPSourceHttp, ip_source::IPSource, static_ip::IPSourceStatic};
use clap::Parser;
use config::ConfigError;
use opts::Opts;
use reqwest::{Client, ClientBuilder};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
mod config;
mod dynhost;
mod ip_source;
mod logging;
mod opts;
use thiserror::Error;

pub(crate) const DEFAULT_PUBLIC_IP_API_URL: &str = "https://api.ipify.org";
const OVH_API_BASE_URL: &str = "https://www.ovh.com";
/// Applied to both network calls so the process terminates even if an
/// endpoint hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Error occured while reading config: {0}")]
    Config(#[from] ConfigError),
    #[error("Error while sending request: {0}")]
    Request(#[from] reqwest::Error),
}

fn http_client() -> Result<Client, ClientError> {
    let client = ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?;
    Ok(client)
}

/// Picks where the reported IP comes from: the `--ip` override if given,
/// otherwise one GET against the configured discovery endpoint.
fn ip_source_for(opts: &Opts, client: &Client) -> Box<dyn IPSource> {
    match &opts.ip {
        Some(ip) => Box::new(IPSourceStatic(ip.clone())),
        None => {
            let url = opts
                .pub_ip_source
                .clone()
                .unwrap_or_else(|| DEFAULT_PUBLIC_IP_API_URL.to_string());
            tracing::debug!("Retrieving public IP from {}", url);
            Box::new(IPSourceHttp::new(client.clone(), url))
        }
    }
}

async fn run(
    base_url: &str,
    ip_source: &Box<dyn IPSource>,
    client: &Client,
    conf: &Config,
) -> Result<UpdateOutcome, ClientError> {
    let ip = ip_source.public_ip().await?;
    tracing::info!("Public IP: {}", ip);

    let api = DynHostAPI { base_url };
    dynhost::send_update(client, &api, conf, &ip).await
}

async fn update(opts: &Opts) -> Result<UpdateOutcome, ClientError> {
    let conf = config::load_config(opts)?;
    tracing::debug!(
        "Updating hostname {} as user {}",
        conf.hostname,
        conf.username
    );

    let client = http_client()?;
    let ip_source = ip_source_for(opts, &client);
    run(OVH_API_BASE_URL, &ip_source, &client, &conf).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    if let Err(error) = logging::init(opts.debug, opts.log_file.as_deref().map(Path::new)) {
        eprintln!("Failed to set up logging: {}", error);
        return ExitCode::from(dynhost::GENERAL_ERROR);
    }

    match update(&opts).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(error) => {
            tracing::error!("{}", error);
            ExitCode::from(dynhost::GENERAL_ERROR)
        }
    }
}
