#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

/// Data structure returned by purchases.voidedpurchases.list.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoidedPurchasesListResponseModel {
    pub(crate) page_info: Option<PageInfo>,
    /// Only present when there are more results to fetch.
    pub(crate) token_pagination: Option<TokenPagination>,
    /// Omitted entirely when the window contains no voided purchases.
    #[serde(default)]
    pub(crate) voided_purchases: Vec<VoidedPurchaseModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub(crate) total_results: Option<i32>,
    pub(crate) result_per_page: Option<i32>,
    pub(crate) start_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPagination {
    pub(crate) next_page_token: Option<String>,
    pub(crate) previous_page_token: Option<String>,
}

/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases#VoidedPurchase
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoidedPurchaseModel {
    /// This kind represents a voided purchase object in the androidpublisher
    /// service.
    #[serde(default)]
    pub(crate) kind: String,
    /// The token which uniquely identifies a one-time purchase or
    /// subscription.
    pub(crate) purchase_token: String,
    /// The time at which the purchase was made, in milliseconds since the
    /// epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub(crate) purchase_time_millis: i64,
    /// The time at which the purchase was canceled/refunded/charged-back, in
    /// milliseconds since the epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub(crate) voided_time_millis: i64,
    /// The order id which uniquely identifies a one-time purchase, subscription
    /// purchase, or subscription renewal.
    #[serde(default)]
    pub(crate) order_id: String,
    /// The initiator of voided purchase: 0 user, 1 developer, 2 Google.
    #[serde(default)]
    pub(crate) voided_source: i32,
    /// The reason why the purchase was voided.
    #[serde(default)]
    pub(crate) voided_reason: i32,
    /// The voided quantity as the result of a quantity-based partial refund.
    pub(crate) voided_quantity: Option<i32>,
}
