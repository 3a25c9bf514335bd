use chrono::{DateTime, Duration, Utc};

use crate::mapping::{Mappable, PropertyRegistrar};
use crate::models::claims::{Claim, ClaimsPrincipal, claim_types};
use crate::models::client::Client;
use crate::models::scope::Scope;

pub const ACCESS_TOKEN_TYPE: &str = "access_token";
pub const CURRENT_TOKEN_VERSION: i32 = 4;

/// Owner, client and scope information every persisted grant exposes.
pub trait TokenMetadata {
    fn subject_id(&self) -> Option<&str>;
    fn client_id(&self) -> &str;
    fn scopes(&self) -> Vec<&str>;
}

/// An issued access or identity token. `lifetime` is in seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub audience: String,
    pub issuer: String,
    pub creation_time: DateTime<Utc>,
    pub lifetime: i32,
    pub token_type: String,
    pub client: Client,
    pub claims: Vec<Claim>,
    pub version: i32,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            audience: String::new(),
            issuer: String::new(),
            creation_time: DateTime::<Utc>::default(),
            lifetime: 0,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            client: Client::default(),
            claims: Vec::new(),
            version: CURRENT_TOKEN_VERSION,
        }
    }
}

impl Token {
    pub fn new(token_type: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            creation_time: Utc::now(),
            ..Self::default()
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.creation_time + Duration::seconds(i64::from(self.lifetime))
    }

    fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }
}

impl TokenMetadata for Token {
    fn subject_id(&self) -> Option<&str> {
        self.find_first(claim_types::SUBJECT)
            .map(|c| c.value.as_str())
    }

    fn client_id(&self) -> &str {
        &self.client.client_id
    }

    fn scopes(&self) -> Vec<&str> {
        self.claims
            .iter()
            .filter(|c| c.claim_type == claim_types::SCOPE)
            .map(|c| c.value.as_str())
            .collect()
    }
}

/// A refresh token handle's payload: the access token it renews and the
/// subject it was issued to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshToken {
    pub creation_time: DateTime<Utc>,
    pub lifetime: i32,
    pub access_token: Token,
    pub subject: ClaimsPrincipal,
    pub version: i32,
}

impl Default for RefreshToken {
    fn default() -> Self {
        Self {
            creation_time: DateTime::<Utc>::default(),
            lifetime: 0,
            access_token: Token::default(),
            subject: ClaimsPrincipal::default(),
            version: CURRENT_TOKEN_VERSION,
        }
    }
}

impl TokenMetadata for RefreshToken {
    fn subject_id(&self) -> Option<&str> {
        self.subject
            .subject_id()
            .or_else(|| self.access_token.subject_id())
    }

    fn client_id(&self) -> &str {
        self.access_token.client_id()
    }

    fn scopes(&self) -> Vec<&str> {
        self.access_token.scopes()
    }
}

/// A short-lived code exchanged for tokens at the token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub creation_time: DateTime<Utc>,
    pub client: Client,
    pub subject: ClaimsPrincipal,
    pub is_open_id: bool,
    pub requested_scopes: Vec<Scope>,
    pub redirect_uri: String,
    pub nonce: Option<String>,
    pub was_consent_shown: bool,
    pub session_id: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
}

impl TokenMetadata for AuthorizationCode {
    fn subject_id(&self) -> Option<&str> {
        self.subject.subject_id()
    }

    fn client_id(&self) -> &str {
        &self.client.client_id
    }

    fn scopes(&self) -> Vec<&str> {
        self.requested_scopes
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    }
}

impl Mappable for Token {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}

impl Mappable for RefreshToken {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}

impl Mappable for AuthorizationCode {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}
