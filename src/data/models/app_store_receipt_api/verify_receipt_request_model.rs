use serde::Serialize;

/// Request body for verifyReceipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VerifyReceiptRequestModel<'a> {
    /// The Base64-encoded receipt data.
    pub(crate) receipt_data: &'a str,
    /// Your app's shared secret. Only needed for receipts containing
    /// auto-renewable subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
    /// Set to true to include only the latest renewal transaction for
    /// subscriptions.
    pub(crate) exclude_old_transactions: bool,
}
