use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::{
    config::{EnvSource, PostVerificationAction, ProcessEnv, VerifierConfig},
    constants::{VOIDED_PURCHASES_PAGE_SIZE, VOIDED_PURCHASES_TYPE},
    data::{
        datasources::{
            app_store_receipt_api_datasource::{
                AppStoreReceiptApiDatasource, AppStoreReceiptApiDatasourceImpl,
            },
            google_play_developer_api_datasource::{
                GooglePlayDeveloperApiConnector, GooglePlayDeveloperApiConnectorImpl,
                GooglePlayDeveloperApiDatasource, VoidedPurchasesListParams,
            },
            secrets_manager_datasource::{SecretsManagerDatasource, SecretsManagerDatasourceImpl},
        },
        models::{
            app_store_receipt_api::common::{Environment, ReceiptStatus},
            google_play_developer_api::{
                product_purchase_model as gp, voided_purchases_list_response_model as gv,
            },
        },
    },
    domain::{
        entities::{
            verification::{VerificationRequest, VerificationResult},
            voided_purchase::{VoidedPurchaseItem, VoidedPurchaseQuery, VoidedPurchaseResult},
        },
        repositories::iap_repository::IapRepository,
    },
    errors::IapError,
    secrets::PlayStoreCredentialResolver,
};

pub(crate) struct IapRepositoryImpl<
    A: AppStoreReceiptApiDatasource,
    G: GooglePlayDeveloperApiConnector,
    S: SecretsManagerDatasource,
    E: EnvSource,
> {
    app_store_receipt_api_datasource: A,
    google_play_developer_api_connector: G,
    play_store_credentials: PlayStoreCredentialResolver<S, E>,
    post_verification: PostVerificationAction,
}

#[async_trait]
impl<
        A: AppStoreReceiptApiDatasource,
        G: GooglePlayDeveloperApiConnector,
        S: SecretsManagerDatasource,
        E: EnvSource,
    > IapRepository for IapRepositoryImpl<A, G, S, E>
{
    async fn verify_app_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError> {
        let response = self
            .app_store_receipt_api_datasource
            .verify_receipt(&request.verification_string)
            .await
            .map_err(|e| IapError::Verification(Box::new(e)))?;

        if response.environment == Some(Environment::Sandbox) {
            info!(
                application_id = %request.application_id,
                product_id = %request.product_id,
                "sandbox receipt received"
            );
        }

        if response.status != ReceiptStatus::VALID {
            return Err(IapError::StoreRejected {
                status: response.status.0,
            });
        }

        let receipt = match response.receipt {
            Some(receipt) if receipt.bundle_id == request.application_id => receipt,
            other => {
                return Err(IapError::BundleMismatch {
                    expected: request.application_id.clone(),
                    actual: other.map(|r| r.bundle_id).unwrap_or_default(),
                })
            }
        };

        // Only the first line item for the product decides the outcome, even
        // if the receipt holds several purchases of it.
        let item = receipt
            .in_app
            .iter()
            .find(|item| item.product_id == request.product_id)
            .ok_or_else(|| IapError::ProductNotFound {
                product_id: request.product_id.clone(),
            })?;
        if item.parsed_quantity() == 0 {
            return Err(IapError::ZeroQuantity {
                product_id: request.product_id.clone(),
                quantity: item.quantity.clone(),
            });
        }

        Ok(VerificationResult::for_request(
            request,
            item.transaction_id.clone(),
        ))
    }

    async fn verify_play_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError> {
        let credentials = self
            .play_store_credentials
            .resolve(&request.organization_id)
            .await?;
        let api = self
            .google_play_developer_api_connector
            .connect(&credentials)
            .await?;

        let purchase = api
            .get_product_purchase(
                &request.application_id,
                &request.product_id,
                &request.verification_string,
            )
            .await
            .map_err(|e| IapError::Verification(Box::new(e)))?;

        if purchase.purchase_state != gp::PurchaseState::PURCHASED {
            return Err(IapError::InvalidPurchaseState {
                expected: gp::PurchaseState::PURCHASED.0,
                actual: purchase.purchase_state.0,
            });
        }
        if purchase.consumption_state != gp::ConsumptionState::YET_TO_BE_CONSUMED {
            return Err(IapError::InvalidConsumptionState {
                expected: gp::ConsumptionState::YET_TO_BE_CONSUMED.0,
                actual: purchase.consumption_state.0,
            });
        }

        match self.post_verification {
            PostVerificationAction::RequireAcknowledgement => {
                if purchase.purchase_token.as_deref() != Some(request.verification_string.as_str())
                {
                    return Err(IapError::TokenMismatch {
                        expected: request.verification_string.clone(),
                        actual: purchase.purchase_token.unwrap_or_default(),
                    });
                }
                if purchase.acknowledgement_state != gp::AcknowledgementState::ACKNOWLEDGED {
                    return Err(IapError::NotAcknowledged {
                        expected: gp::AcknowledgementState::ACKNOWLEDGED.0,
                        actual: purchase.acknowledgement_state.0,
                    });
                }
            }
            PostVerificationAction::Consume => {
                api.consume_product_purchase(
                    &request.application_id,
                    &request.product_id,
                    &request.verification_string,
                )
                .await
                .map_err(|e| IapError::Consume(Box::new(e)))?;
                info!(
                    application_id = %request.application_id,
                    product_id = %request.product_id,
                    "play store purchase consumed"
                );
            }
        }

        Ok(VerificationResult::for_request(
            request,
            request.verification_string.clone(),
        ))
    }

    async fn list_play_store_voided_purchases(
        &self,
        query: &VoidedPurchaseQuery,
    ) -> Result<VoidedPurchaseResult, IapError> {
        let wrap = |e: IapError| match e {
            IapError::UnknownOrganization(_) => e,
            other => IapError::VoidedPurchaseQuery(Box::new(other)),
        };

        let credentials = self
            .play_store_credentials
            .resolve(&query.organization_id)
            .await
            .map_err(wrap)?;
        let api = self
            .google_play_developer_api_connector
            .connect(&credentials)
            .await
            .map_err(wrap)?;

        let (start_time, end_time) = query.window_at(Utc::now());
        debug!(
            application_id = %query.application_id,
            start_time,
            end_time,
            "listing voided purchases"
        );
        let params = VoidedPurchasesListParams {
            start_time,
            end_time,
            max_results: VOIDED_PURCHASES_PAGE_SIZE,
            token: Some(query.token.clone()).filter(|t| !t.is_empty()),
            purchase_type: VOIDED_PURCHASES_TYPE,
        };
        let response = api
            .list_voided_purchases(&query.application_id, &params)
            .await
            .map_err(wrap)?;

        Ok(VoidedPurchaseResult::from_google_voided_purchases_list(
            response,
        ))
    }
}

impl
    IapRepositoryImpl<
        AppStoreReceiptApiDatasourceImpl,
        GooglePlayDeveloperApiConnectorImpl,
        SecretsManagerDatasourceImpl,
        ProcessEnv,
    >
{
    pub(crate) fn new(config: VerifierConfig) -> Self {
        Self::with_datasources(
            AppStoreReceiptApiDatasourceImpl::new(
                config.app_store_production_url.clone(),
                config.app_store_sandbox_url.clone(),
                config.apple_shared_secret.clone(),
            ),
            GooglePlayDeveloperApiConnectorImpl::new(config.google_play_base_url.clone()),
            SecretsManagerDatasourceImpl::new(),
            ProcessEnv,
            config,
        )
    }
}

impl<
        A: AppStoreReceiptApiDatasource,
        G: GooglePlayDeveloperApiConnector,
        S: SecretsManagerDatasource,
        E: EnvSource,
    > IapRepositoryImpl<A, G, S, E>
{
    pub(crate) fn with_datasources(
        app_store_receipt_api_datasource: A,
        google_play_developer_api_connector: G,
        secrets_manager_datasource: S,
        env: E,
        config: VerifierConfig,
    ) -> Self {
        Self {
            app_store_receipt_api_datasource,
            google_play_developer_api_connector,
            play_store_credentials: PlayStoreCredentialResolver::new(
                secrets_manager_datasource,
                env,
                config.policy.credential_mode,
                config.organizations,
            ),
            post_verification: config.policy.post_verification,
        }
    }
}

impl VoidedPurchaseResult {
    fn from_google_voided_purchases_list(m: gv::VoidedPurchasesListResponseModel) -> Self {
        Self {
            next_page_token: m
                .token_pagination
                .and_then(|p| p.next_page_token)
                .unwrap_or_default(),
            voided_purchases: m
                .voided_purchases
                .into_iter()
                .map(VoidedPurchaseItem::from_google_voided_purchase)
                .collect(),
        }
    }
}

impl VoidedPurchaseItem {
    fn from_google_voided_purchase(m: gv::VoidedPurchaseModel) -> Self {
        Self {
            kind: m.kind,
            purchase_token: m.purchase_token,
            purchase_time_millis: m.purchase_time_millis,
            voided_time_millis: m.voided_time_millis,
            order_id: m.order_id,
            voided_source: m.voided_source,
            voided_reason: m.voided_reason,
        }
    }
}
