use async_trait::async_trait;

use crate::ClientError;

use super::ip_source::IPSource;

/// Reports a fixed IP given on the command line with `--ip`. The value is
/// treated as an opaque string, no syntax check and no network call.
pub(crate) struct IPSourceStatic(pub(crate) String);

#[async_trait]
impl IPSource for IPSourceStatic {
    async fn public_ip(&self) -> Result<String, ClientError> {
        Ok(self.0.clone())
    }
}
