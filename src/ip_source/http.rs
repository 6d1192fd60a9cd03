use async_trait::async_trait;
use reqwest::Client;

use crate::ClientError;

use super::ip_source::IPSource;

/// Discovers the public IP by querying an echo service that returns it as
/// the plain text response body. Defaults to ipify, but any service with
/// the same contract works via `--pub-ip-source`.
pub(crate) struct IPSourceHttp {
    client: Client,
    url: String,
}

impl IPSourceHttp {
    pub(crate) fn new(client: Client, url: String) -> IPSourceHttp {
        IPSourceHttp { client, url }
    }
}

#[async_trait]
impl IPSource for IPSourceHttp {
    async fn public_ip(&self) -> Result<String, ClientError> {
        let response = self.client.get(&self.url).send().await?;
        // The whole body is the IP, reported as-is without trimming
        let text = response.text().await?;
        Ok(text)
    }
}
