use async_trait::async_trait;

use crate::ClientError;

#[async_trait]
pub trait IPSource {
    async fn public_ip(&self) -> Result<String, ClientError>;
}
