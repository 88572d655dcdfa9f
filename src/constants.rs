// Task names.
// ----------------------------

pub const TASK_NAME_VERIFY_IN_APP_PURCHASE: &str = "verify_in_app_purchase";
pub const TASK_NAME_PLAYSTORE_VOIDED_PURCHASES_CHECK: &str = "playstore_voided_purchases_check";

// Platforms.
// ----------------------------

pub const PLATFORM_NAME_IOS: &str = "ios";
pub const PLATFORM_NAME_ANDROID: &str = "android";

// Organizations.
// ----------------------------

pub const ORGANIZATION_ID_ALTERSNAP: &str = "altersnap";

// App Store.
// ----------------------------

/// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
pub const APP_STORE_PRODUCTION_VERIFY_RECEIPT_URL: &str =
    "https://buy.itunes.apple.com/verifyReceipt";
pub const APP_STORE_SANDBOX_VERIFY_RECEIPT_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

// Google Play.
// ----------------------------

pub const GOOGLE_PLAY_DEVELOPER_API_BASE_URL: &str =
    "https://androidpublisher.googleapis.com/androidpublisher/v3";
pub const GOOGLE_PLAY_DEVELOPER_API_SCOPE: &str =
    "https://www.googleapis.com/auth/androidpublisher";

/// Largest page size accepted by purchases.voidedpurchases.list.
pub const VOIDED_PURCHASES_PAGE_SIZE: i64 = 1000;
/// Only voided in-app product purchases (0); subscriptions would be 1.
pub const VOIDED_PURCHASES_TYPE: i64 = 0;
/// The API only keeps voided purchases for the past 30 days.
pub const VOIDED_PURCHASES_DEFAULT_WINDOW_DAYS: i64 = 29;
