pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod app_store_receipt_api_datasource;
        pub(crate) mod google_play_developer_api_datasource;
        pub(crate) mod secrets_manager_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod app_store_receipt_api {
            pub(crate) mod common;
            pub(crate) mod verify_receipt_request_model;
            pub(crate) mod verify_receipt_response_model;
        }
        pub(crate) mod google_play_developer_api {
            pub(crate) mod product_purchase_model;
            pub(crate) mod voided_purchases_list_response_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod iap_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod invocation;
        pub mod platform;
        pub mod verification;
        pub mod voided_purchase;
    }
    pub mod repositories {
        pub mod iap_repository;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub(crate) mod secrets;
pub mod util;
