use base64::{prelude::BASE64_STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    constants::{TASK_NAME_PLAYSTORE_VOIDED_PURCHASES_CHECK, TASK_NAME_VERIFY_IN_APP_PURCHASE},
    errors::IapError,
};

use super::{
    verification::VerificationResult, voided_purchase::VoidedPurchaseResult,
};

/// Raw task descriptor handed to the function by the invocation runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationInput {
    #[serde(rename = "taskName")]
    pub task_name: String,
    /// Base64-encoded JSON body. Its shape depends on the task.
    #[serde(rename = "taskData")]
    pub task_data: String,
}

impl InvocationInput {
    /// Builds an invocation by serializing `payload` to JSON and
    /// base64-encoding it.
    pub fn encode<T: Serialize>(
        task_name: impl Into<String>,
        payload: &T,
    ) -> Result<Self, IapError> {
        let json = serde_json::to_vec(payload).map_err(|source| IapError::Encode {
            shape: std::any::type_name::<T>(),
            source,
        })?;
        Ok(Self {
            task_name: task_name.into(),
            task_data: BASE64_STANDARD.encode(json),
        })
    }

    pub(crate) fn decode_task_data(&self) -> Result<Vec<u8>, IapError> {
        Ok(BASE64_STANDARD.decode(self.task_data.trim())?)
    }
}

pub(crate) fn parse_task_data<T: DeserializeOwned>(
    shape: &'static str,
    json: &[u8],
) -> Result<T, IapError> {
    serde_json::from_slice(json).map_err(|source| IapError::Parse { shape, source })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskName {
    VerifyInAppPurchase,
    PlayStoreVoidedPurchasesCheck,
}

impl TaskName {
    pub fn parse(name: &str) -> Result<Self, IapError> {
        match name {
            TASK_NAME_VERIFY_IN_APP_PURCHASE => Ok(TaskName::VerifyInAppPurchase),
            TASK_NAME_PLAYSTORE_VOIDED_PURCHASES_CHECK => {
                Ok(TaskName::PlayStoreVoidedPurchasesCheck)
            }
            other => Err(IapError::UnsupportedTask(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::VerifyInAppPurchase => TASK_NAME_VERIFY_IN_APP_PURCHASE,
            TaskName::PlayStoreVoidedPurchasesCheck => TASK_NAME_PLAYSTORE_VOIDED_PURCHASES_CHECK,
        }
    }
}

/// Serializes to the bare result object of whichever task ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InvocationOutput {
    Verification(VerificationResult),
    VoidedPurchases(VoidedPurchaseResult),
}
