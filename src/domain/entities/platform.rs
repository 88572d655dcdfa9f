use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{PLATFORM_NAME_ANDROID, PLATFORM_NAME_IOS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Purchase made through the Apple App Store. The verification string is
    /// the base64-encoded app receipt.
    Ios,
    /// Purchase made through the Google Play Store. The verification string
    /// is the purchase token.
    Android,

    /// Kept verbatim so the router can report the offending value.
    #[serde(untagged)]
    Unknown(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ios => PLATFORM_NAME_IOS,
            Platform::Android => PLATFORM_NAME_ANDROID,
            Platform::Unknown(name) => name,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Unknown(String::new())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_names_deserialize_to_variants() {
        let ios: Platform = serde_json::from_str("\"ios\"").unwrap();
        let android: Platform = serde_json::from_str("\"android\"").unwrap();
        assert_eq!(ios, Platform::Ios);
        assert_eq!(android, Platform::Android);
    }

    #[test]
    fn unrecognized_name_is_kept_verbatim() {
        let platform: Platform = serde_json::from_str("\"iOS\"").unwrap();
        assert_eq!(platform, Platform::Unknown("iOS".to_string()));
        assert_eq!(serde_json::to_string(&platform).unwrap(), "\"iOS\"");
        assert_eq!(platform.to_string(), "iOS");
    }
}
