use thiserror::Error;

/// Every way a verification or voided-purchase invocation can fail.
///
/// None of these are retried internally. Callers must treat any error as
/// "not verified".
#[derive(Debug, Error)]
pub enum IapError {
    // Input errors.
    // ----------------------------
    #[error("could not decode task data: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("could not parse {shape} from task data: {source}")]
    Parse {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode {shape} as task data: {source}")]
    Encode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported task name: {0}")]
    UnsupportedTask(String),
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),
    #[error("invalid organization id, there are no credentials available for {0}")]
    UnknownOrganization(String),

    // Credential errors.
    // ----------------------------
    #[error("no Play Store credentials found in {env_var}")]
    MissingCredentials { env_var: String },
    #[error("could not read secret {reference}: {details}")]
    SecretLookup { reference: String, details: String },
    #[error("could not initialize Play Store client: {0}")]
    ClientConstruction(String),

    // Upstream rejection.
    // ----------------------------
    #[error("unexpected status received from the App Store: {status}")]
    StoreRejected { status: i32 },
    #[error("unexpected bundle id received from the App Store: expected {expected:?}, got {actual:?}")]
    BundleMismatch { expected: String, actual: String },
    #[error("invalid purchaseState: expected {expected}, got {actual}")]
    InvalidPurchaseState { expected: i32, actual: i32 },
    #[error("invalid consumptionState: expected {expected}, got {actual}")]
    InvalidConsumptionState { expected: i32, actual: i32 },
    #[error("invalid acknowledgementState: expected {expected}, got {actual}")]
    NotAcknowledged { expected: i32, actual: i32 },
    #[error("purchase token mismatch: submitted {expected:?}, store returned {actual:?}")]
    TokenMismatch { expected: String, actual: String },

    // Business rules.
    // ----------------------------
    #[error("unable to find transaction matching product id {product_id:?}")]
    ProductNotFound { product_id: String },
    #[error("unexpected item quantity {quantity:?} received for product id {product_id:?}")]
    ZeroQuantity { product_id: String, quantity: String },

    // Transport.
    // ----------------------------
    #[error("{api} callout {function} failed: {details}")]
    StoreCallout {
        api: &'static str,
        function: String,
        details: String,
    },
    #[error("could not verify purchase: {0}")]
    Verification(#[source] Box<IapError>),
    #[error("could not consume product: {0}")]
    Consume(#[source] Box<IapError>),
    #[error("could not get voided purchases: {0}")]
    VoidedPurchaseQuery(#[source] Box<IapError>),

    // Configuration.
    // ----------------------------
    #[error("invalid configuration value for {key}: {value:?}")]
    InvalidConfiguration { key: &'static str, value: String },
}

impl IapError {
    pub(crate) fn callout(
        api: &'static str,
        function: &str,
        details: impl std::fmt::Display,
    ) -> Self {
        IapError::StoreCallout {
            api,
            function: function.to_string(),
            details: details.to_string(),
        }
    }
}
