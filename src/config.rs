use std::{collections::HashMap, str::FromStr};

use crate::{
    constants::{
        APP_STORE_PRODUCTION_VERIFY_RECEIPT_URL, APP_STORE_SANDBOX_VERIFY_RECEIPT_URL,
        GOOGLE_PLAY_DEVELOPER_API_BASE_URL, ORGANIZATION_ID_ALTERSNAP,
    },
    errors::IapError,
};

pub const ENV_CREDENTIAL_MODE: &str = "IAP_CREDENTIAL_MODE";
pub const ENV_PLAY_STORE_POST_VERIFICATION: &str = "IAP_PLAY_STORE_POST_VERIFICATION";
pub const ENV_TASK_ROUTING: &str = "IAP_TASK_ROUTING";
pub const ENV_ORGANIZATION_CREDENTIALS: &str = "IAP_ORGANIZATION_CREDENTIALS";
pub const ENV_APPLE_SHARED_SECRET: &str = "APPLE_SHARED_SECRET";

/// Read access to environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

// Policy.
// ----------------------------

/// Where the Play Store service-account JSON comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    /// The organization's environment variable holds a Secrets Manager ARN,
    /// and the secret holds the JSON.
    SecretsManager,
    /// The organization's environment variable holds the JSON directly.
    Environment,
}

/// What happens after a Play Store purchase passed state validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostVerificationAction {
    /// Consume the product so it can be purchased again.
    Consume,
    /// Leave consumption to the client, but require the store to echo the
    /// submitted token and report the purchase as acknowledged.
    RequireAcknowledgement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRouting {
    /// Route on the invocation's task name.
    Dispatch,
    /// Ignore the task name; every invocation is a purchase verification.
    VerificationOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationPolicy {
    pub credential_mode: CredentialMode,
    pub post_verification: PostVerificationAction,
    pub task_routing: TaskRouting,
}

impl VerificationPolicy {
    /// Credentials behind a Secrets Manager ARN; purchases are consumed after
    /// verification.
    pub fn secrets_and_consume() -> Self {
        Self {
            credential_mode: CredentialMode::SecretsManager,
            post_verification: PostVerificationAction::Consume,
            task_routing: TaskRouting::Dispatch,
        }
    }

    /// Credentials read straight from the environment; purchases must already
    /// be acknowledged and are not consumed.
    pub fn environment_and_acknowledge() -> Self {
        Self {
            credential_mode: CredentialMode::Environment,
            post_verification: PostVerificationAction::RequireAcknowledgement,
            task_routing: TaskRouting::Dispatch,
        }
    }
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self::secrets_and_consume()
    }
}

impl FromStr for CredentialMode {
    type Err = IapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "secrets_manager" => Ok(CredentialMode::SecretsManager),
            "environment" => Ok(CredentialMode::Environment),
            other => Err(IapError::InvalidConfiguration {
                key: ENV_CREDENTIAL_MODE,
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for PostVerificationAction {
    type Err = IapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "consume" => Ok(PostVerificationAction::Consume),
            "require_acknowledgement" => Ok(PostVerificationAction::RequireAcknowledgement),
            other => Err(IapError::InvalidConfiguration {
                key: ENV_PLAY_STORE_POST_VERIFICATION,
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for TaskRouting {
    type Err = IapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dispatch" => Ok(TaskRouting::Dispatch),
            "verification_only" => Ok(TaskRouting::VerificationOnly),
            other => Err(IapError::InvalidConfiguration {
                key: ENV_TASK_ROUTING,
                value: other.to_string(),
            }),
        }
    }
}

// Organizations.
// ----------------------------

/// Maps organization IDs to the name of the environment variable holding
/// that organization's Play Store credential reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationCredentials(HashMap<String, String>);

impl OrganizationCredentials {
    pub fn built_in(mode: CredentialMode) -> Self {
        let env_var = match mode {
            CredentialMode::SecretsManager => "GOOGLE_ALTERSNAP_CREDENTIALS_JSON_SECRET_ARN",
            CredentialMode::Environment => "GOOGLE_ALTERSNAP_CREDENTIALS_JSON",
        };
        let mut organizations = Self::default();
        organizations.insert(ORGANIZATION_ID_ALTERSNAP, env_var);
        organizations
    }

    pub fn insert(&mut self, organization_id: impl Into<String>, env_var: impl Into<String>) {
        self.0.insert(organization_id.into(), env_var.into());
    }

    pub fn env_var_for(&self, organization_id: &str) -> Option<&str> {
        self.0.get(organization_id).map(String::as_str)
    }

    /// Parses `org=ENV_VAR` pairs separated by commas.
    fn extend_from_mapping(&mut self, mapping: &str) -> Result<(), IapError> {
        for pair in mapping.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (organization_id, env_var) = pair
                .split_once('=')
                .map(|(o, e)| (o.trim(), e.trim()))
                .filter(|(o, e)| !o.is_empty() && !e.is_empty())
                .ok_or_else(|| IapError::InvalidConfiguration {
                    key: ENV_ORGANIZATION_CREDENTIALS,
                    value: pair.to_string(),
                })?;
            self.insert(organization_id, env_var);
        }
        Ok(())
    }
}

// Config.
// ----------------------------

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub policy: VerificationPolicy,
    pub organizations: OrganizationCredentials,
    /// Sent as `password` with receipts containing auto-renewable
    /// subscriptions.
    pub apple_shared_secret: Option<String>,
    pub app_store_production_url: String,
    pub app_store_sandbox_url: String,
    pub google_play_base_url: String,
}

impl VerifierConfig {
    pub fn new(policy: VerificationPolicy) -> Self {
        Self {
            policy,
            organizations: OrganizationCredentials::built_in(policy.credential_mode),
            apple_shared_secret: None,
            app_store_production_url: APP_STORE_PRODUCTION_VERIFY_RECEIPT_URL.to_string(),
            app_store_sandbox_url: APP_STORE_SANDBOX_VERIFY_RECEIPT_URL.to_string(),
            google_play_base_url: GOOGLE_PLAY_DEVELOPER_API_BASE_URL.to_string(),
        }
    }

    pub fn from_env(env: &impl EnvSource) -> Result<Self, IapError> {
        let defaults = VerificationPolicy::default();
        let policy = VerificationPolicy {
            credential_mode: parse_or(env, ENV_CREDENTIAL_MODE, defaults.credential_mode)?,
            post_verification: parse_or(
                env,
                ENV_PLAY_STORE_POST_VERIFICATION,
                defaults.post_verification,
            )?,
            task_routing: parse_or(env, ENV_TASK_ROUTING, defaults.task_routing)?,
        };
        let mut config = Self::new(policy);
        if let Some(mapping) = non_empty_var(env, ENV_ORGANIZATION_CREDENTIALS) {
            config.organizations.extend_from_mapping(&mapping)?;
        }
        config.apple_shared_secret = non_empty_var(env, ENV_APPLE_SHARED_SECRET);
        Ok(config)
    }
}

fn non_empty_var(env: &impl EnvSource, name: &str) -> Option<String> {
    env.var(name).filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr<Err = IapError>>(
    env: &impl EnvSource,
    name: &str,
    default: T,
) -> Result<T, IapError> {
    match non_empty_var(env, name) {
        Some(value) => value.parse(),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_yields_secrets_and_consume() {
        let config = VerifierConfig::from_env(&env(&[])).unwrap();
        assert_eq!(config.policy, VerificationPolicy::secrets_and_consume());
        assert_eq!(
            config.organizations.env_var_for("altersnap"),
            Some("GOOGLE_ALTERSNAP_CREDENTIALS_JSON_SECRET_ARN")
        );
        assert_eq!(config.apple_shared_secret, None);
    }

    #[test]
    fn environment_mode_switches_built_in_variable() {
        let config = VerifierConfig::from_env(&env(&[
            (ENV_CREDENTIAL_MODE, "environment"),
            (ENV_PLAY_STORE_POST_VERIFICATION, "require_acknowledgement"),
            (ENV_TASK_ROUTING, "verification_only"),
        ]))
        .unwrap();
        assert_eq!(config.policy.credential_mode, CredentialMode::Environment);
        assert_eq!(
            config.policy.post_verification,
            PostVerificationAction::RequireAcknowledgement
        );
        assert_eq!(config.policy.task_routing, TaskRouting::VerificationOnly);
        assert_eq!(
            config.organizations.env_var_for("altersnap"),
            Some("GOOGLE_ALTERSNAP_CREDENTIALS_JSON")
        );
    }

    #[test]
    fn extra_organizations_are_added() {
        let config = VerifierConfig::from_env(&env(&[(
            ENV_ORGANIZATION_CREDENTIALS,
            "acme = GOOGLE_ACME_ARN, globex=GOOGLE_GLOBEX_ARN",
        )]))
        .unwrap();
        assert_eq!(config.organizations.env_var_for("acme"), Some("GOOGLE_ACME_ARN"));
        assert_eq!(config.organizations.env_var_for("globex"), Some("GOOGLE_GLOBEX_ARN"));
        assert!(config.organizations.env_var_for("altersnap").is_some());
        assert_eq!(config.organizations.env_var_for("initech"), None);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            VerifierConfig::from_env(&env(&[(ENV_CREDENTIAL_MODE, "vault")])),
            Err(IapError::InvalidConfiguration { key: ENV_CREDENTIAL_MODE, .. })
        ));
        assert!(matches!(
            VerifierConfig::from_env(&env(&[(ENV_ORGANIZATION_CREDENTIALS, "acme")])),
            Err(IapError::InvalidConfiguration { key: ENV_ORGANIZATION_CREDENTIALS, .. })
        ));
    }
}
