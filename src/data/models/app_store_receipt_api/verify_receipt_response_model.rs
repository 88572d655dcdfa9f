#![allow(dead_code)]

use serde::Deserialize;

use super::common::{Environment, ReceiptStatus};

/// Data structure returned by verifyReceipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Only `status` is guaranteed; the remaining fields are missing on most
/// non-zero statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    pub(crate) status: ReceiptStatus,
    /// The environment for which the receipt was generated.
    pub(crate) environment: Option<Environment>,
    /// An indicator that an error occurred during the request. Only set for
    /// status codes 21100-21199.
    #[serde(rename = "is-retryable")]
    pub(crate) is_retryable: Option<bool>,
    /// The decoded receipt that was sent for verification.
    pub(crate) receipt: Option<ReceiptModel>,
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    /// The bundle identifier for the app to which the receipt belongs.
    pub(crate) bundle_id: String,
    /// The app's version number.
    pub(crate) application_version: Option<String>,
    /// The type of receipt generated (e.g. "Production", "ProductionSandbox").
    pub(crate) receipt_type: Option<String>,
    /// In-app purchase receipt fields for all in-app purchase transactions.
    #[serde(default)]
    pub(crate) in_app: Vec<InAppModel>,
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[derive(Debug, Deserialize)]
pub(crate) struct InAppModel {
    /// The unique identifier of the product purchased.
    pub(crate) product_id: String,
    /// The number of consumable products purchased, as a numeric string.
    #[serde(default)]
    pub(crate) quantity: String,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    pub(crate) transaction_id: String,
    /// The transaction identifier of the original purchase.
    pub(crate) original_transaction_id: Option<String>,
    /// The time the App Store charged the user's account, in milliseconds
    /// since the epoch, as a numeric string.
    pub(crate) purchase_date_ms: Option<String>,
    /// Set when Apple customer support cancelled the transaction.
    pub(crate) cancellation_date_ms: Option<String>,
}

impl InAppModel {
    /// Unparseable quantities count as zero.
    pub(crate) fn parsed_quantity(&self) -> i64 {
        self.quantity.trim().parse().unwrap_or(0)
    }
}
