use reqwest::{header, Client};

use crate::config::Config;
use crate::ClientError;

/// Fixed protocol parameter expected by the DynHost update endpoint.
const SYSTEM: &str = "dyndns";

pub(crate) const USER_AGENT: &str = concat!("ovh-dynhost/", env!("CARGO_PKG_VERSION"));

/// Exit code when the provider reports the IP already matches.
pub(crate) const SAME_IP_ERROR: u8 = 75;
pub(crate) const GENERAL_ERROR: u8 = 1;

pub(crate) struct DynHostAPI<'t> {
    pub(crate) base_url: &'t str,
}

impl<'t> DynHostAPI<'t> {
    pub(crate) fn url(&self) -> String {
        format!("{}/nic/update", self.base_url)
    }
}

/// The three terminal outcomes of an update run.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Success,
    Unchanged,
    Failure(String),
}

impl UpdateOutcome {
    /// Classifies the raw response body. The provider contract is textual:
    /// a body containing `good` means updated, `nochg` means the IP already
    /// matched, anything else is an error. `good` is checked first so a body
    /// that somehow carries both tokens still counts as a success.
    pub fn classify(body: &str) -> UpdateOutcome {
        let folded = body.to_lowercase();
        if folded.contains("good") {
            UpdateOutcome::Success
        } else if folded.contains("nochg") {
            UpdateOutcome::Unchanged
        } else {
            UpdateOutcome::Failure(body.to_string())
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            UpdateOutcome::Success => 0,
            UpdateOutcome::Unchanged => SAME_IP_ERROR,
            UpdateOutcome::Failure(_) => GENERAL_ERROR,
        }
    }
}

/// Sends the single authenticated update request and classifies the reply.
/// No retries: a transport failure bubbles up as a `ClientError` instead of
/// being treated as a provider-side update failure.
pub(crate) async fn send_update(
    client: &Client,
    api: &DynHostAPI<'_>,
    conf: &Config,
    ip: &str,
) -> Result<UpdateOutcome, ClientError> {
    let response = client
        .get(api.url())
        .query(&[
            ("myip", ip),
            ("system", SYSTEM),
            ("hostname", conf.hostname.as_str()),
        ])
        .basic_auth(&conf.username, Some(&conf.password))
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await?;
    let body = response.text().await?;

    let outcome = UpdateOutcome::classify(&body);
    match &outcome {
        UpdateOutcome::Success => tracing::info!("IP successfully updated."),
        UpdateOutcome::Unchanged => tracing::debug!("Matching same IP. Not changed."),
        UpdateOutcome::Failure(detail) => {
            tracing::error!(
                "Error occurred in updating IP. Response from server: {}",
                detail
            )
        }
    }
    Ok(outcome)
}
