use std::fmt;

use crate::mapping::claim::ClaimMapper;
use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::{EntityMapper, decode_code};
use crate::mapping::simple::{SimpleClient, SimpleSecret};
use crate::models::{AccessTokenType, Client, Flow, Secret, TokenExpiration, TokenUsage};

#[derive(Clone, Copy, Debug, Default)]
pub struct SecretMapper;

impl EntityMapper for SecretMapper {
    type Complex = Secret;
    type Simple = SimpleSecret;

    fn map_to_complex(&self, simple: &SimpleSecret) -> MappingResult<Secret> {
        Ok(Secret {
            value: simple.value.clone(),
            description: simple.description.clone(),
            expiration: simple.expiration,
            secret_type: simple.secret_type.clone(),
        })
    }

    fn map_to_simple(&self, complex: &Secret) -> MappingResult<SimpleSecret> {
        Ok(SimpleSecret {
            value: complex.value.clone(),
            description: complex.description.clone(),
            expiration: complex.expiration,
            secret_type: complex.secret_type.clone(),
        })
    }
}

pub struct ClientMapper<C = Client> {
    generic: GenericMapper<C, SimpleClient>,
    claims: ClaimMapper,
    secrets: SecretMapper,
}

impl<C> fmt::Debug for ClientMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<Client>> Default for ClientMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<Client>> ClientMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            claims: ClaimMapper,
            secrets: SecretMapper,
        }
    }
}

impl<C: Derived<Client>> EntityMapper for ClientMapper<C> {
    type Complex = C;
    type Simple = SimpleClient;

    fn map_to_complex(&self, simple: &SimpleClient) -> MappingResult<C> {
        let claims = self.claims.to_complex_all(Some(&simple.claims))?;
        let client_secrets = self.secrets.to_complex_all(Some(&simple.client_secrets))?;
        let flow = decode_code("flow", simple.flow, Flow::from_code)?;
        let refresh_token_usage = decode_code(
            "refresh_token_usage",
            simple.refresh_token_usage,
            TokenUsage::from_code,
        )?;
        let refresh_token_expiration = decode_code(
            "refresh_token_expiration",
            simple.refresh_token_expiration,
            TokenExpiration::from_code,
        )?;
        let access_token_type = decode_code(
            "access_token_type",
            simple.access_token_type,
            AccessTokenType::from_code,
        )?;

        let mut complex = self.generic.to_complex(simple)?;
        let client = complex.base_mut();
        client.enabled = simple.enabled;
        client.client_id = simple.client_id.clone();
        client.client_secrets = client_secrets;
        client.client_name = simple.client_name.clone();
        client.client_uri = simple.client_uri.clone();
        client.logo_uri = simple.logo_uri.clone();
        client.require_consent = simple.require_consent;
        client.allow_remember_consent = simple.allow_remember_consent;
        client.flow = flow;
        client.allow_client_credentials_only = simple.allow_client_credentials_only;
        client.redirect_uris = simple.redirect_uris.clone();
        client.post_logout_redirect_uris = simple.post_logout_redirect_uris.clone();
        client.logout_uri = simple.logout_uri.clone();
        client.logout_session_required = simple.logout_session_required;
        client.require_sign_out_prompt = simple.require_sign_out_prompt;
        client.allowed_scopes = simple.allowed_scopes.clone();
        client.allow_access_to_all_scopes = simple.allow_access_to_all_scopes;
        client.identity_token_lifetime = simple.identity_token_lifetime;
        client.access_token_lifetime = simple.access_token_lifetime;
        client.authorization_code_lifetime = simple.authorization_code_lifetime;
        client.absolute_refresh_token_lifetime = simple.absolute_refresh_token_lifetime;
        client.sliding_refresh_token_lifetime = simple.sliding_refresh_token_lifetime;
        client.refresh_token_usage = refresh_token_usage;
        client.update_access_token_claims_on_refresh = simple.update_access_token_claims_on_refresh;
        client.refresh_token_expiration = refresh_token_expiration;
        client.access_token_type = access_token_type;
        client.enable_local_login = simple.enable_local_login;
        client.identity_provider_restrictions = simple.identity_provider_restrictions.clone();
        client.include_jwt_id = simple.include_jwt_id;
        client.claims = claims;
        client.always_send_client_claims = simple.always_send_client_claims;
        client.prefix_client_claims = simple.prefix_client_claims;
        client.allowed_custom_grant_types = simple.allowed_custom_grant_types.clone();
        client.allowed_cors_origins = simple.allowed_cors_origins.clone();
        client.allow_access_token_via_browser = simple.allow_access_token_via_browser;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleClient> {
        let client = complex.base();
        let claims = self.claims.to_simple_all(Some(&client.claims))?;
        let client_secrets = self.secrets.to_simple_all(Some(&client.client_secrets))?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.enabled = client.enabled;
        simple.client_id = client.client_id.clone();
        simple.client_secrets = client_secrets;
        simple.client_name = client.client_name.clone();
        simple.client_uri = client.client_uri.clone();
        simple.logo_uri = client.logo_uri.clone();
        simple.require_consent = client.require_consent;
        simple.allow_remember_consent = client.allow_remember_consent;
        simple.flow = client.flow.code();
        simple.allow_client_credentials_only = client.allow_client_credentials_only;
        simple.redirect_uris = client.redirect_uris.clone();
        simple.post_logout_redirect_uris = client.post_logout_redirect_uris.clone();
        simple.logout_uri = client.logout_uri.clone();
        simple.logout_session_required = client.logout_session_required;
        simple.require_sign_out_prompt = client.require_sign_out_prompt;
        simple.allowed_scopes = client.allowed_scopes.clone();
        simple.allow_access_to_all_scopes = client.allow_access_to_all_scopes;
        simple.identity_token_lifetime = client.identity_token_lifetime;
        simple.access_token_lifetime = client.access_token_lifetime;
        simple.authorization_code_lifetime = client.authorization_code_lifetime;
        simple.absolute_refresh_token_lifetime = client.absolute_refresh_token_lifetime;
        simple.sliding_refresh_token_lifetime = client.sliding_refresh_token_lifetime;
        simple.refresh_token_usage = client.refresh_token_usage.code();
        simple.update_access_token_claims_on_refresh = client.update_access_token_claims_on_refresh;
        simple.refresh_token_expiration = client.refresh_token_expiration.code();
        simple.access_token_type = client.access_token_type.code();
        simple.enable_local_login = client.enable_local_login;
        simple.identity_provider_restrictions = client.identity_provider_restrictions.clone();
        simple.include_jwt_id = client.include_jwt_id;
        simple.claims = claims;
        simple.always_send_client_claims = client.always_send_client_claims;
        simple.prefix_client_claims = client.prefix_client_claims;
        simple.allowed_custom_grant_types = client.allowed_custom_grant_types.clone();
        simple.allowed_cors_origins = client.allowed_cors_origins.clone();
        simple.allow_access_token_via_browser = client.allow_access_token_via_browser;
        Ok(simple)
    }
}
