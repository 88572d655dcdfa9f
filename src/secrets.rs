use crate::{
    config::{CredentialMode, EnvSource, OrganizationCredentials},
    data::datasources::secrets_manager_datasource::SecretsManagerDatasource,
    errors::IapError,
};

/// Resolves an organization's Play Store service-account JSON.
///
/// The organization ID picks an environment variable name. Depending on the
/// credential mode, that variable holds either the JSON itself or the ARN of
/// a Secrets Manager secret holding it. Nothing is cached: every call reads
/// the environment (and the secret store) again.
pub(crate) struct PlayStoreCredentialResolver<S: SecretsManagerDatasource, E: EnvSource> {
    secrets_manager_datasource: S,
    env: E,
    mode: CredentialMode,
    organizations: OrganizationCredentials,
}

impl<S: SecretsManagerDatasource, E: EnvSource> PlayStoreCredentialResolver<S, E> {
    pub(crate) fn new(
        secrets_manager_datasource: S,
        env: E,
        mode: CredentialMode,
        organizations: OrganizationCredentials,
    ) -> Self {
        Self {
            secrets_manager_datasource,
            env,
            mode,
            organizations,
        }
    }

    pub(crate) async fn resolve(&self, organization_id: &str) -> Result<String, IapError> {
        let env_var = self
            .organizations
            .env_var_for(organization_id)
            .ok_or_else(|| IapError::UnknownOrganization(organization_id.to_string()))?;
        let missing = || IapError::MissingCredentials {
            env_var: env_var.to_string(),
        };
        let value = self
            .env
            .var(env_var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(missing)?;
        match self.mode {
            CredentialMode::Environment => Ok(value),
            CredentialMode::SecretsManager => {
                let secret = self
                    .secrets_manager_datasource
                    .get_secret_string(value.trim())
                    .await?;
                if secret.trim().is_empty() {
                    return Err(missing());
                }
                Ok(secret)
            }
        }
    }
}
