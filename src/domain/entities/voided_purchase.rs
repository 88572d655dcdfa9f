use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::VOIDED_PURCHASES_DEFAULT_WINDOW_DAYS;

/// One page request against the Play Store voided purchases list.
///
/// Pagination is left to the caller: feed `next_page_token` from the previous
/// result back in as `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidedPurchaseQuery {
    #[serde(rename = "organizationID")]
    pub organization_id: String,
    #[serde(rename = "applicationID")]
    pub application_id: String,
    /// Epoch millis. Zero means 29 days before now.
    #[serde(rename = "startTime", default)]
    pub start_time: i64,
    /// Epoch millis. Zero means now.
    #[serde(rename = "endTime", default)]
    pub end_time: i64,
    #[serde(default)]
    pub token: String,
}

impl VoidedPurchaseQuery {
    /// Returns the (start, end) window in epoch millis, filling in unset
    /// bounds relative to `now`.
    pub fn window_at(&self, now: DateTime<Utc>) -> (i64, i64) {
        let start_time = match self.start_time {
            0 => (now - Duration::days(VOIDED_PURCHASES_DEFAULT_WINDOW_DAYS)).timestamp_millis(),
            t => t,
        };
        let end_time = match self.end_time {
            0 => now.timestamp_millis(),
            t => t,
        };
        (start_time, end_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidedPurchaseResult {
    /// Empty when there are no further pages.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: String,
    #[serde(rename = "voidedPurchases")]
    pub voided_purchases: Vec<VoidedPurchaseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidedPurchaseItem {
    pub kind: String,
    #[serde(rename = "purchaseToken")]
    pub purchase_token: String,
    #[serde(rename = "purchaseTimeMillis")]
    pub purchase_time_millis: i64,
    #[serde(rename = "voidedTimeMillis")]
    pub voided_time_millis: i64,
    #[serde(rename = "orderID")]
    pub order_id: String,
    /// 0 = user, 1 = developer, 2 = Google.
    #[serde(rename = "voidedSource")]
    pub voided_source: i32,
    /// 0 = other, 1 = remorse, 2 = not received, 3 = defective, 4 =
    /// accidental purchase, 5 = fraud, 6 = friendly fraud, 7 = chargeback.
    #[serde(rename = "voidedReason")]
    pub voided_reason: i32,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn query(start_time: i64, end_time: i64) -> VoidedPurchaseQuery {
        VoidedPurchaseQuery {
            organization_id: "altersnap".to_string(),
            application_id: "com.example.app".to_string(),
            start_time,
            end_time,
            token: String::new(),
        }
    }

    #[test]
    fn unset_window_defaults_to_trailing_29_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap();
        let (start, end) = query(0, 0).window_at(now);
        assert_eq!(end, now.timestamp_millis());
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
    }

    #[test]
    fn explicit_bounds_are_kept() {
        let now = Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap();
        assert_eq!(query(1_000, 0).window_at(now), (1_000, now.timestamp_millis()));
        assert_eq!(query(1_000, 2_000).window_at(now), (1_000, 2_000));
    }

    #[test]
    fn missing_optional_fields_deserialize_as_unset() {
        let q: VoidedPurchaseQuery = serde_json::from_str(
            r#"{"organizationID": "altersnap", "applicationID": "com.example.app"}"#,
        )
        .unwrap();
        assert_eq!(q, query(0, 0));
    }
}
