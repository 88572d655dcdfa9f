use async_trait::async_trait;

use crate::{
    domain::entities::{
        verification::{VerificationRequest, VerificationResult},
        voided_purchase::{VoidedPurchaseQuery, VoidedPurchaseResult},
    },
    errors::IapError,
};

#[async_trait]
pub trait IapRepository: Send + Sync {
    /// Verifies an App Store receipt contains a valid purchase of the
    /// requested product for the requested bundle.
    async fn verify_app_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError>;

    /// Verifies a Play Store purchase token, then applies the configured
    /// post-verification action (consume, or require acknowledgement).
    async fn verify_play_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError>;

    /// Fetches one page of voided Play Store purchases.
    async fn list_play_store_voided_purchases(
        &self,
        query: &VoidedPurchaseQuery,
    ) -> Result<VoidedPurchaseResult, IapError>;
}

#[async_trait]
impl<T: IapRepository + ?Sized> IapRepository for Box<T> {
    async fn verify_app_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError> {
        (**self).verify_app_store_purchase(request).await
    }

    async fn verify_play_store_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError> {
        (**self).verify_play_store_purchase(request).await
    }

    async fn list_play_store_voided_purchases(
        &self,
        query: &VoidedPurchaseQuery,
    ) -> Result<VoidedPurchaseResult, IapError> {
        (**self).list_play_store_voided_purchases(query).await
    }
}
