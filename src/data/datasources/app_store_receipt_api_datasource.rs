use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    data::models::app_store_receipt_api::{
        common::ReceiptStatus, verify_receipt_request_model::VerifyReceiptRequestModel,
        verify_receipt_response_model::VerifyReceiptResponseModel,
    },
    errors::IapError,
};

const API_NAME: &str = "App Store";

#[async_trait]
pub(crate) trait AppStoreReceiptApiDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receipt_data:
    ///   The Base64-encoded receipt data, as read from the device.
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponseModel, IapError>;
}

pub(crate) struct AppStoreReceiptApiDatasourceImpl {
    client: reqwest::Client,
    production_url: String,
    sandbox_url: String,
    shared_secret: Option<String>,
}

#[async_trait]
impl AppStoreReceiptApiDatasource for AppStoreReceiptApiDatasourceImpl {
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponseModel, IapError> {
        let body = VerifyReceiptRequestModel {
            receipt_data,
            password: self.shared_secret.as_deref(),
            exclude_old_transactions: false,
        };

        // As per Apple's documentation, always verify against production
        // first, and only go to the sandbox when production reports a sandbox
        // receipt.
        let response: VerifyReceiptResponseModel = self
            .callout(&self.production_url, &body, "verifyReceipt")
            .await?;
        if response.status != ReceiptStatus::SANDBOX_RECEIPT_SENT_TO_PRODUCTION {
            return Ok(response);
        }
        debug!("production verifyReceipt reported a sandbox receipt; retrying against sandbox");
        self.callout(&self.sandbox_url, &body, "verifyReceipt (sandbox)")
            .await
    }
}

impl AppStoreReceiptApiDatasourceImpl {
    pub(crate) fn new(
        production_url: String,
        sandbox_url: String,
        shared_secret: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            production_url,
            sandbox_url,
            shared_secret,
        }
    }

    async fn callout<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        function_name: &str,
    ) -> Result<T, IapError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                IapError::callout(API_NAME, function_name, format!("callout failed to send; {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(IapError::callout(
                API_NAME,
                function_name,
                format!(
                    "callout returned with {} status code; {}",
                    status,
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response.json().await.map_err(|e| {
            IapError::callout(
                API_NAME,
                function_name,
                format!("failed to parse callout response; {e}"),
            )
        })
    }
}
