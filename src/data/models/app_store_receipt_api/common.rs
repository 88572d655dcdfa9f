#![allow(dead_code)]

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) enum Environment {
    /// The receipt was generated in the sandbox environment.
    Sandbox,
    /// The receipt was generated in the production environment.
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// Status code of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct ReceiptStatus(pub(crate) i32);

impl ReceiptStatus {
    /// The receipt is valid.
    pub(crate) const VALID: ReceiptStatus = ReceiptStatus(0);
    /// The request to the App Store was not made using the HTTP POST request
    /// method.
    pub(crate) const NOT_POST: ReceiptStatus = ReceiptStatus(21000);
    /// The data in the receipt-data property was malformed or the service
    /// experienced a temporary issue.
    pub(crate) const MALFORMED_RECEIPT_DATA: ReceiptStatus = ReceiptStatus(21002);
    /// The system could not authenticate the receipt.
    pub(crate) const NOT_AUTHENTICATED: ReceiptStatus = ReceiptStatus(21003);
    /// The shared secret does not match the one on file for the account.
    pub(crate) const SHARED_SECRET_MISMATCH: ReceiptStatus = ReceiptStatus(21004);
    /// The receipt server was temporarily unable to provide the receipt.
    pub(crate) const SERVER_UNAVAILABLE: ReceiptStatus = ReceiptStatus(21005);
    /// This receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    pub(crate) const SANDBOX_RECEIPT_SENT_TO_PRODUCTION: ReceiptStatus = ReceiptStatus(21007);
    /// This receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    pub(crate) const PRODUCTION_RECEIPT_SENT_TO_SANDBOX: ReceiptStatus = ReceiptStatus(21008);
    /// Internal data access error.
    pub(crate) const INTERNAL_DATA_ACCESS_ERROR: ReceiptStatus = ReceiptStatus(21009);
    /// The system cannot find the user account or the user account has been
    /// deleted.
    pub(crate) const USER_ACCOUNT_NOT_FOUND: ReceiptStatus = ReceiptStatus(21010);
}
