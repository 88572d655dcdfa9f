use tracing::{debug, warn};

use crate::{
    config::{ProcessEnv, TaskRouting, VerifierConfig},
    data::repositories::iap_repository_impl::IapRepositoryImpl,
    domain::{
        entities::{
            invocation::{parse_task_data, InvocationInput, InvocationOutput, TaskName},
            platform::Platform,
            verification::{VerificationRequest, VerificationResult},
            voided_purchase::{VoidedPurchaseQuery, VoidedPurchaseResult},
        },
        repositories::iap_repository::IapRepository,
    },
    errors::IapError,
};

pub struct IapUtil<R: IapRepository> {
    iap_repository: R,
    task_routing: TaskRouting,
}

impl<R: IapRepository> IapUtil<R> {
    pub fn with_repository(iap_repository: R, task_routing: TaskRouting) -> Self {
        Self {
            iap_repository,
            task_routing,
        }
    }

    /// Decodes the invocation's task data and runs the task it names.
    ///
    /// With [`TaskRouting::VerificationOnly`] the task name is ignored and the
    /// data is always treated as a [`VerificationRequest`].
    pub async fn handle_invocation(
        &self,
        input: &InvocationInput,
    ) -> Result<InvocationOutput, IapError> {
        let result = self.dispatch(input).await;
        if let Err(e) = &result {
            warn!(task_name = %input.task_name, error = %e, "invocation failed");
        }
        result
    }

    async fn dispatch(&self, input: &InvocationInput) -> Result<InvocationOutput, IapError> {
        let json = input.decode_task_data()?;
        let task = match self.task_routing {
            TaskRouting::Dispatch => TaskName::parse(&input.task_name)?,
            TaskRouting::VerificationOnly => TaskName::VerifyInAppPurchase,
        };
        debug!(task = task.as_str(), "dispatching task");
        match task {
            TaskName::VerifyInAppPurchase => {
                let request: VerificationRequest = parse_task_data("VerificationRequest", &json)?;
                Ok(InvocationOutput::Verification(
                    self.verify_purchase(&request).await?,
                ))
            }
            TaskName::PlayStoreVoidedPurchasesCheck => {
                let query: VoidedPurchaseQuery = parse_task_data("VoidedPurchaseQuery", &json)?;
                Ok(InvocationOutput::VoidedPurchases(
                    self.check_voided_purchases(&query).await?,
                ))
            }
        }
    }

    /// Routes the request to the store named by its platform.
    pub async fn verify_purchase(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IapError> {
        debug!(
            platform = %request.platform,
            organization_id = %request.organization_id,
            product_id = %request.product_id,
            "verifying purchase"
        );
        match &request.platform {
            Platform::Ios => self.iap_repository.verify_app_store_purchase(request).await,
            Platform::Android => self.iap_repository.verify_play_store_purchase(request).await,
            Platform::Unknown(name) => Err(IapError::InvalidPlatform(name.clone())),
        }
    }

    pub async fn check_voided_purchases(
        &self,
        query: &VoidedPurchaseQuery,
    ) -> Result<VoidedPurchaseResult, IapError> {
        self.iap_repository
            .list_play_store_voided_purchases(query)
            .await
    }
}

impl IapUtil<Box<dyn IapRepository>> {
    /// Builds a verifier backed by the live App Store, Play Store and Secrets
    /// Manager clients.
    pub fn new(config: VerifierConfig) -> Self {
        let task_routing = config.policy.task_routing;
        Self {
            iap_repository: Box::new(IapRepositoryImpl::new(config)),
            task_routing,
        }
    }

    /// Builds a verifier configured from the process environment.
    pub fn from_env() -> Result<Self, IapError> {
        Ok(Self::new(VerifierConfig::from_env(&ProcessEnv)?))
    }
}
