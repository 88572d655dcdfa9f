use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// A client's claim that a purchase happened, as submitted for verification.
///
/// Absent fields decode as empty. A missing platform is therefore rejected
/// by the router as an invalid (empty) platform name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationRequest {
    #[serde(rename = "organizationID")]
    pub organization_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    /// iOS bundle ID or Android package name.
    #[serde(rename = "applicationID")]
    pub application_id: String,
    pub platform: Platform,
    #[serde(rename = "productID")]
    pub product_id: String,
    /// App Store receipt data (iOS) or Play Store purchase token (Android).
    #[serde(rename = "verificationString")]
    pub verification_string: String,
}

/// Produced only when the store confirmed the purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "organizationID")]
    pub organization_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "applicationID")]
    pub application_id: String,
    pub platform: Platform,
    #[serde(rename = "productID")]
    pub product_id: String,
    /// App Store transaction ID, or the purchase token for Play Store
    /// purchases (which have no separate transaction identifier).
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
}

impl VerificationResult {
    pub(crate) fn for_request(request: &VerificationRequest, transaction_id: String) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            user_id: request.user_id.clone(),
            application_id: request.application_id.clone(),
            platform: request.platform.clone(),
            product_id: request.product_id.clone(),
            transaction_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_decode_as_empty() {
        let request: VerificationRequest = serde_json::from_str(
            r#"{"organizationID": "altersnap", "applicationID": "app1", "platform": "ios"}"#,
        )
        .unwrap();
        assert_eq!(request.user_id, "");
        assert_eq!(request.product_id, "");
        assert_eq!(request.platform, Platform::Ios);

        let request: VerificationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.platform, Platform::Unknown(String::new()));
    }

    #[test]
    fn wrongly_typed_field_is_still_an_error() {
        assert!(serde_json::from_str::<VerificationRequest>(r#"{"platform": 7}"#).is_err());
    }
}
