use async_trait::async_trait;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion};
use aws_sdk_secretsmanager::{error::DisplayErrorContext, Client};

use crate::errors::IapError;

#[async_trait]
pub(crate) trait SecretsManagerDatasource: Send + Sync {
    /// GetSecretValue:
    /// https://docs.aws.amazon.com/secretsmanager/latest/apireference/API_GetSecretValue.html
    ///
    /// secret_id:
    ///   The ARN or name of the secret.
    ///
    /// Returns an empty string if the secret has no string value.
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, IapError>;
}

pub(crate) struct SecretsManagerDatasourceImpl;

#[async_trait]
impl SecretsManagerDatasource for SecretsManagerDatasourceImpl {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, IapError> {
        // Loaded per call; nothing is cached between invocations.
        let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;
        let output = Client::new(&aws_config)
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| IapError::SecretLookup {
                reference: secret_id.to_string(),
                details: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(output.secret_string().unwrap_or_default().to_string())
    }
}

impl SecretsManagerDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}
