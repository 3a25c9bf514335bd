#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use identity_cache::mapping::Derived;
use identity_cache::models::{
    AuthorizationCode, Claim, ClaimsIdentity, ClaimsPrincipal, Client, Flow, RefreshToken, Scope,
    ScopeClaim, ScopeType, Secret, Token,
};
use identity_cache::services::cache::{CacheClient, CacheError, CacheResult};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn handle() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A store that is always down.
#[derive(Clone, Debug, Default)]
pub struct FailingClient;

#[async_trait]
impl CacheClient for FailingClient {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn get_string(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::BackendConnection("connection refused".into()))
    }

    async fn get_strings(&self, _keys: &[String]) -> CacheResult<Vec<Option<String>>> {
        Err(CacheError::BackendConnection("connection refused".into()))
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::BackendCommand("READONLY replica".into()))
    }

    async fn del(&self, _key: &str) -> CacheResult<u64> {
        Err(CacheError::BackendConnection("connection refused".into()))
    }
}

// Subtypes as a host application would declare them.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TenantClient {
    pub base: Client,
    pub tenant: String,
    pub max_sessions: i32,
    pub tags: Vec<String>,
}

identity_cache::mappable!(TenantClient { tenant, max_sessions, tags });

impl Derived<Client> for TenantClient {
    fn base(&self) -> &Client {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Client {
        &mut self.base
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditedToken {
    pub base: Token,
    pub risk_score: u8,
    pub device_id: Option<String>,
    pub step_up: bool,
}

identity_cache::mappable!(AuditedToken { risk_score, device_id, step_up });

impl Derived<Token> for AuditedToken {
    fn base(&self) -> &Token {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Token {
        &mut self.base
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundRefreshToken {
    pub base: RefreshToken,
    pub confirmation_thumbprint: String,
    pub rotation_count: u32,
}

identity_cache::mappable!(BoundRefreshToken { confirmation_thumbprint, rotation_count });

impl Derived<RefreshToken> for BoundRefreshToken {
    fn base(&self) -> &RefreshToken {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RefreshToken {
        &mut self.base
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiScope {
    pub base: Scope,
    pub owner_team: String,
    pub rate_limit: i16,
}

identity_cache::mappable!(ApiScope { owner_team, rate_limit });

impl Derived<Scope> for ApiScope {
    fn base(&self) -> &Scope {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Scope {
        &mut self.base
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaggedIdentity {
    pub base: ClaimsIdentity,
    pub login_hint: Option<String>,
}

identity_cache::mappable!(TaggedIdentity { login_hint });

impl Derived<ClaimsIdentity> for TaggedIdentity {
    fn base(&self) -> &ClaimsIdentity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ClaimsIdentity {
        &mut self.base
    }
}

// Fixtures.

pub fn client() -> Client {
    Client {
        flow: Flow::AuthorizationCode,
        client_secrets: vec![Secret::new("s3cr3t")],
        redirect_uris: vec!["https://app.example/cb".into()],
        allowed_scopes: vec!["openid".into(), "profile".into(), "api".into()],
        claims: vec![Claim::new("tier", "gold")],
        authorization_code_lifetime: 300,
        ..Client::new("app", "Example App")
    }
}

pub fn subject() -> ClaimsPrincipal {
    let actor = ClaimsIdentity::new("delegation", vec![Claim::new("sub", "service-a")]);
    ClaimsPrincipal::from_identity(
        ClaimsIdentity::new(
            "pwd",
            vec![
                Claim::new("sub", "alice"),
                Claim::new("name", "Alice").with_issuer("https://idsrv"),
                Claim::new("amr", "pwd").with_property("source", "form"),
            ],
        )
        .with_actor(actor),
    )
}

pub fn token(lifetime: i32) -> Token {
    Token {
        audience: "https://idsrv/resources".into(),
        issuer: "https://idsrv".into(),
        creation_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        lifetime,
        client: client(),
        claims: vec![
            Claim::new("sub", "alice"),
            Claim::new("client_id", "app"),
            Claim::new("scope", "openid"),
            Claim::new("scope", "api"),
        ],
        ..Token::new("access_token")
    }
}

pub fn refresh_token(lifetime: i32) -> RefreshToken {
    RefreshToken {
        creation_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        lifetime,
        access_token: token(3600),
        subject: subject(),
        ..RefreshToken::default()
    }
}

pub fn scopes() -> Vec<Scope> {
    vec![
        Scope {
            claims: vec![ScopeClaim::new("sub", true)],
            ..Scope::new("openid", ScopeType::Identity)
        },
        Scope {
            display_name: Some("Example API".into()),
            scope_secrets: vec![Secret::new("introspection")],
            ..Scope::new("api", ScopeType::Resource)
        },
    ]
}

pub fn authorization_code() -> AuthorizationCode {
    AuthorizationCode {
        creation_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        client: client(),
        subject: subject(),
        is_open_id: true,
        requested_scopes: scopes(),
        redirect_uri: "https://app.example/cb".into(),
        nonce: Some("n-0S6_WzA2Mj".into()),
        was_consent_shown: true,
        session_id: Some("5f2a".into()),
        code_challenge: None,
        code_challenge_method: None,
    }
}
