#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

/// A one-time product purchase as returned by purchases.products.get.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products#ProductPurchase
///
/// Only the fields the verifier reads are modelled. The state fields are kept
/// as raw integers so that values outside the documented range still reach
/// the state checks, and an absent state decodes as 0.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductPurchaseModel {
    pub(crate) kind: Option<String>,
    /// Epoch millis, sent as a string.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub(crate) purchase_time_millis: Option<i64>,
    #[serde(default)]
    pub(crate) purchase_state: PurchaseState,
    #[serde(default)]
    pub(crate) consumption_state: ConsumptionState,
    #[serde(default)]
    pub(crate) acknowledgement_state: AcknowledgementState,
    pub(crate) order_id: Option<String>,
    /// Echo of the token the purchase was looked up with. Not always present.
    pub(crate) purchase_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct PurchaseState(pub(crate) i32);

impl PurchaseState {
    pub(crate) const PURCHASED: PurchaseState = PurchaseState(0);
    pub(crate) const CANCELED: PurchaseState = PurchaseState(1);
    pub(crate) const PENDING: PurchaseState = PurchaseState(2);
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct ConsumptionState(pub(crate) i32);

impl ConsumptionState {
    pub(crate) const YET_TO_BE_CONSUMED: ConsumptionState = ConsumptionState(0);
    pub(crate) const CONSUMED: ConsumptionState = ConsumptionState(1);
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct AcknowledgementState(pub(crate) i32);

impl AcknowledgementState {
    pub(crate) const YET_TO_BE_ACKNOWLEDGED: AcknowledgementState = AcknowledgementState(0);
    pub(crate) const ACKNOWLEDGED: AcknowledgementState = AcknowledgementState(1);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn undocumented_state_values_are_kept() {
        let purchase: ProductPurchaseModel = serde_json::from_value(json!({
            "purchaseState": 4,
            "consumptionState": 9,
            "acknowledgementState": 3
        }))
        .unwrap();
        assert_eq!(purchase.purchase_state, PurchaseState(4));
        assert_eq!(purchase.consumption_state, ConsumptionState(9));
        assert_eq!(purchase.acknowledgement_state, AcknowledgementState(3));
    }

    #[test]
    fn absent_fields_decode_as_zero_or_none() {
        let purchase: ProductPurchaseModel =
            serde_json::from_value(json!({ "purchaseToken": "tok1" })).unwrap();
        assert_eq!(purchase.purchase_state, PurchaseState::PURCHASED);
        assert_eq!(purchase.consumption_state, ConsumptionState::YET_TO_BE_CONSUMED);
        assert_eq!(
            purchase.acknowledgement_state,
            AcknowledgementState::YET_TO_BE_ACKNOWLEDGED
        );
        assert_eq!(purchase.purchase_time_millis, None);
    }
}
