use chrono::{DateTime, Utc};

use crate::mapping::{Mappable, PropertyRegistrar};
use crate::models::claims::Claim;

pub const SHARED_SECRET: &str = "SharedSecret";

/// A credential a client or scope authenticates with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secret {
    pub value: String,
    pub description: Option<String>,
    pub expiration: Option<DateTime<Utc>>,
    pub secret_type: String,
}

impl Default for Secret {
    fn default() -> Self {
        Self {
            value: String::new(),
            description: None,
            expiration: None,
            secret_type: SHARED_SECRET.to_string(),
        }
    }
}

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Implements the compact integer code used on the wire for a fieldless enum.
macro_rules! wire_code {
    ($ty:ident { $($variant:ident = $code:literal),* $(,)? }) => {
        impl $ty {
            pub fn code(self) -> i32 {
                match self {
                    $($ty::$variant => $code,)*
                }
            }

            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some($ty::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use wire_code;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    #[default]
    AuthorizationCode,
    Implicit,
    Hybrid,
    ClientCredentials,
    ResourceOwner,
    Custom,
    AuthorizationCodeWithProofKey,
    HybridWithProofKey,
}

wire_code!(Flow {
    AuthorizationCode = 0,
    Implicit = 1,
    Hybrid = 2,
    ClientCredentials = 3,
    ResourceOwner = 4,
    Custom = 5,
    AuthorizationCodeWithProofKey = 6,
    HybridWithProofKey = 7,
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenUsage {
    ReUse,
    #[default]
    OneTimeOnly,
}

wire_code!(TokenUsage {
    ReUse = 0,
    OneTimeOnly = 1,
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenExpiration {
    Sliding,
    #[default]
    Absolute,
}

wire_code!(TokenExpiration {
    Sliding = 0,
    Absolute = 1,
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessTokenType {
    #[default]
    Jwt,
    Reference,
}

wire_code!(AccessTokenType {
    Jwt = 0,
    Reference = 1,
});

/// An OAuth2/OpenID Connect client registration. Lifetimes are in seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    pub enabled: bool,
    pub client_id: String,
    pub client_secrets: Vec<Secret>,
    pub client_name: String,
    pub client_uri: Option<String>,
    pub logo_uri: Option<String>,
    pub require_consent: bool,
    pub allow_remember_consent: bool,
    pub flow: Flow,
    pub allow_client_credentials_only: bool,
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
    pub logout_uri: Option<String>,
    pub logout_session_required: bool,
    pub require_sign_out_prompt: bool,
    pub allowed_scopes: Vec<String>,
    pub allow_access_to_all_scopes: bool,
    pub identity_token_lifetime: i32,
    pub access_token_lifetime: i32,
    pub authorization_code_lifetime: i32,
    pub absolute_refresh_token_lifetime: i32,
    pub sliding_refresh_token_lifetime: i32,
    pub refresh_token_usage: TokenUsage,
    pub update_access_token_claims_on_refresh: bool,
    pub refresh_token_expiration: TokenExpiration,
    pub access_token_type: AccessTokenType,
    pub enable_local_login: bool,
    pub identity_provider_restrictions: Vec<String>,
    pub include_jwt_id: bool,
    pub claims: Vec<Claim>,
    pub always_send_client_claims: bool,
    pub prefix_client_claims: bool,
    pub allowed_custom_grant_types: Vec<String>,
    pub allowed_cors_origins: Vec<String>,
    pub allow_access_token_via_browser: bool,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: String::new(),
            client_secrets: Vec::new(),
            client_name: String::new(),
            client_uri: None,
            logo_uri: None,
            require_consent: true,
            allow_remember_consent: true,
            flow: Flow::default(),
            allow_client_credentials_only: false,
            redirect_uris: Vec::new(),
            post_logout_redirect_uris: Vec::new(),
            logout_uri: None,
            logout_session_required: true,
            require_sign_out_prompt: false,
            allowed_scopes: Vec::new(),
            allow_access_to_all_scopes: false,
            identity_token_lifetime: 300,
            access_token_lifetime: 3600,
            authorization_code_lifetime: 300,
            absolute_refresh_token_lifetime: 2_592_000,
            sliding_refresh_token_lifetime: 1_296_000,
            refresh_token_usage: TokenUsage::default(),
            update_access_token_claims_on_refresh: false,
            refresh_token_expiration: TokenExpiration::default(),
            access_token_type: AccessTokenType::default(),
            enable_local_login: true,
            identity_provider_restrictions: Vec::new(),
            include_jwt_id: false,
            claims: Vec::new(),
            always_send_client_claims: false,
            prefix_client_claims: true,
            allowed_custom_grant_types: Vec::new(),
            allowed_cors_origins: Vec::new(),
            allow_access_token_via_browser: true,
        }
    }
}

impl Client {
    pub fn new(client_id: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_name: client_name.into(),
            ..Self::default()
        }
    }
}

impl Mappable for Client {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}
