use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use yup_oauth2::{parse_service_account_key, ServiceAccountAuthenticator};

use crate::{
    constants::GOOGLE_PLAY_DEVELOPER_API_SCOPE,
    data::models::google_play_developer_api::{
        product_purchase_model::ProductPurchaseModel,
        voided_purchases_list_response_model::VoidedPurchasesListResponseModel,
    },
    errors::IapError,
};

const API_NAME: &str = "Google Play Developer API";

/// Query parameters for purchases.voidedpurchases.list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VoidedPurchasesListParams {
    pub(crate) start_time: i64,
    pub(crate) end_time: i64,
    pub(crate) max_results: i64,
    pub(crate) token: Option<String>,
    pub(crate) purchase_type: i64,
}

#[async_trait]
pub(crate) trait GooglePlayDeveloperApiDatasource: Send + Sync {
    /// purchases.products.get:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/get
    ///
    /// packageName:
    ///   The package name of the application the inapp product was sold in (for
    ///   example, 'com.some.thing').
    /// productId:
    ///   The inapp product SKU (for example, 'com.some.thing.inapp1').
    /// token:
    ///   The token provided to the user's device when the inapp product was
    ///   purchased.
    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<ProductPurchaseModel, IapError>;

    /// purchases.products.consume:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/consume
    ///
    /// Same parameters as purchases.products.get.
    async fn consume_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<(), IapError>;

    /// purchases.voidedpurchases.list:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases/list
    ///
    /// packageName:
    ///   The package name of the application for which voided purchases need to
    ///   be returned (for example, 'com.some.thing').
    async fn list_voided_purchases(
        &self,
        package_name: &str,
        params: &VoidedPurchasesListParams,
    ) -> Result<VoidedPurchasesListResponseModel, IapError>;
}

/// Builds an authenticated Play Developer API client from service-account
/// credentials.
#[async_trait]
pub(crate) trait GooglePlayDeveloperApiConnector: Send + Sync {
    type Datasource: GooglePlayDeveloperApiDatasource;

    async fn connect(&self, service_account_json: &str) -> Result<Self::Datasource, IapError>;
}

pub(crate) struct GooglePlayDeveloperApiConnectorImpl {
    base_url: String,
}

#[async_trait]
impl GooglePlayDeveloperApiConnector for GooglePlayDeveloperApiConnectorImpl {
    type Datasource = GooglePlayDeveloperApiDatasourceImpl;

    async fn connect(&self, service_account_json: &str) -> Result<Self::Datasource, IapError> {
        GooglePlayDeveloperApiDatasourceImpl::new(service_account_json, self.base_url.clone())
            .await
    }
}

impl GooglePlayDeveloperApiConnectorImpl {
    pub(crate) fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

pub(crate) struct GooglePlayDeveloperApiDatasourceImpl {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

#[async_trait]
impl GooglePlayDeveloperApiDatasource for GooglePlayDeveloperApiDatasourceImpl {
    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<ProductPurchaseModel, IapError> {
        let url = format!(
            "{}/applications/{package_name}/purchases/products/{product_id}/tokens/{token}",
            self.base_url
        );
        let response = self
            .send(self.client.get(&url), "purchases.products.get")
            .await?;
        Self::parse(response, "purchases.products.get").await
    }

    async fn consume_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<(), IapError> {
        let url = format!(
            "{}/applications/{package_name}/purchases/products/{product_id}/tokens/{token}:consume",
            self.base_url
        );
        // Success is an empty body.
        self.send(self.client.post(&url), "purchases.products.consume")
            .await
            .map(|_| ())
    }

    async fn list_voided_purchases(
        &self,
        package_name: &str,
        params: &VoidedPurchasesListParams,
    ) -> Result<VoidedPurchasesListResponseModel, IapError> {
        let url = format!(
            "{}/applications/{package_name}/purchases/voidedpurchases",
            self.base_url
        );
        let mut query = vec![
            ("startTime", params.start_time.to_string()),
            ("endTime", params.end_time.to_string()),
            ("maxResults", params.max_results.to_string()),
            ("type", params.purchase_type.to_string()),
        ];
        if let Some(token) = params.token.as_ref().filter(|t| !t.is_empty()) {
            query.push(("token", token.clone()));
        }
        let response = self
            .send(
                self.client.get(&url).query(&query),
                "purchases.voidedpurchases.list",
            )
            .await?;
        Self::parse(response, "purchases.voidedpurchases.list").await
    }
}

impl GooglePlayDeveloperApiDatasourceImpl {
    pub(crate) async fn new(api_key: &str, base_url: String) -> Result<Self, IapError> {
        Ok(Self::with_access_token(
            Self::build_access_token(api_key).await?,
            base_url,
        ))
    }

    pub(crate) fn with_access_token(access_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            base_url,
        }
    }

    async fn build_access_token(api_key: &str) -> Result<String, IapError> {
        let key = parse_service_account_key(api_key).map_err(|e| {
            IapError::ClientConstruction(format!(
                "Google Play API key could not be parsed; {e}"
            ))
        })?;
        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| {
                IapError::ClientConstruction(format!(
                    "Google Play API service account authenticator could not be built; {e}"
                ))
            })?;

        let scopes = &[GOOGLE_PLAY_DEVELOPER_API_SCOPE];
        Ok(authenticator
            .token(scopes)
            .await
            .map_err(|e| {
                IapError::ClientConstruction(format!(
                    "Google Play API service account token could not be built; {e}"
                ))
            })?
            .token()
            .ok_or_else(|| {
                IapError::ClientConstruction(
                    "Google Play API service account token is empty".to_string(),
                )
            })?
            .to_string())
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        function_name: &str,
    ) -> Result<reqwest::Response, IapError> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
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
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(
        response: reqwest::Response,
        function_name: &str,
    ) -> Result<T, IapError> {
        response.json().await.map_err(|e| {
            IapError::callout(
                API_NAME,
                function_name,
                format!("failed to parse callout response; {e}"),
            )
        })
    }
}
