//! Simple entities: the wire shape of every aggregate.
//!
//! Field names are kept short because every byte ends up in the store. Enum
//! fields travel as their integer codes; `db` carries subtype properties.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapping::generic::SimpleEntity;
use crate::mapping::value::DataBag;

macro_rules! simple_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl SimpleEntity for $ty {
            fn data_bag(&self) -> &DataBag {
                &self.data_bag
            }

            fn data_bag_mut(&mut self) -> &mut DataBag {
                &mut self.data_bag
            }
        })*
    };
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleClaim {
    #[serde(rename = "t")]
    pub claim_type: String,
    #[serde(rename = "v")]
    pub value: String,
    #[serde(rename = "vt")]
    pub value_type: String,
    #[serde(rename = "i")]
    pub issuer: String,
    #[serde(rename = "oi")]
    pub original_issuer: String,
    #[serde(rename = "p", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleClaimsIdentity {
    #[serde(rename = "at")]
    pub authentication_type: Option<String>,
    #[serde(rename = "nct")]
    pub name_claim_type: String,
    #[serde(rename = "rct")]
    pub role_claim_type: String,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "bc", default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_context: Option<String>,
    #[serde(rename = "c")]
    pub claims: Vec<SimpleClaim>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Box<SimpleClaimsIdentity>>,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleClaimsPrincipal {
    #[serde(rename = "id")]
    pub identities: Vec<SimpleClaimsIdentity>,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleSecret {
    #[serde(rename = "v")]
    pub value: String,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(rename = "t")]
    pub secret_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleScopeClaim {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ai")]
    pub always_include_in_id_token: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleScope {
    #[serde(rename = "en")]
    pub enabled: bool,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "dn", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "r")]
    pub required: bool,
    #[serde(rename = "e")]
    pub emphasize: bool,
    #[serde(rename = "t")]
    pub scope_type: i32,
    #[serde(rename = "c")]
    pub claims: Vec<SimpleScopeClaim>,
    #[serde(rename = "ia")]
    pub include_all_claims_for_user: bool,
    #[serde(rename = "cr", default, skip_serializing_if = "Option::is_none")]
    pub claims_rule: Option<String>,
    #[serde(rename = "sd")]
    pub show_in_discovery_document: bool,
    #[serde(rename = "ss")]
    pub scope_secrets: Vec<SimpleSecret>,
    #[serde(rename = "ui")]
    pub allow_unrestricted_introspection: bool,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleClient {
    #[serde(rename = "en")]
    pub enabled: bool,
    #[serde(rename = "id")]
    pub client_id: String,
    #[serde(rename = "cs")]
    pub client_secrets: Vec<SimpleSecret>,
    #[serde(rename = "n")]
    pub client_name: String,
    #[serde(rename = "cu", default, skip_serializing_if = "Option::is_none")]
    pub client_uri: Option<String>,
    #[serde(rename = "lu", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(rename = "rc")]
    pub require_consent: bool,
    #[serde(rename = "arc")]
    pub allow_remember_consent: bool,
    #[serde(rename = "f")]
    pub flow: i32,
    #[serde(rename = "acc")]
    pub allow_client_credentials_only: bool,
    #[serde(rename = "ru")]
    pub redirect_uris: Vec<String>,
    #[serde(rename = "plru")]
    pub post_logout_redirect_uris: Vec<String>,
    #[serde(rename = "lou", default, skip_serializing_if = "Option::is_none")]
    pub logout_uri: Option<String>,
    #[serde(rename = "lsr")]
    pub logout_session_required: bool,
    #[serde(rename = "rsp")]
    pub require_sign_out_prompt: bool,
    #[serde(rename = "as")]
    pub allowed_scopes: Vec<String>,
    #[serde(rename = "aas")]
    pub allow_access_to_all_scopes: bool,
    #[serde(rename = "itl")]
    pub identity_token_lifetime: i32,
    #[serde(rename = "atl")]
    pub access_token_lifetime: i32,
    #[serde(rename = "acl")]
    pub authorization_code_lifetime: i32,
    #[serde(rename = "artl")]
    pub absolute_refresh_token_lifetime: i32,
    #[serde(rename = "srtl")]
    pub sliding_refresh_token_lifetime: i32,
    #[serde(rename = "rtu")]
    pub refresh_token_usage: i32,
    #[serde(rename = "uac")]
    pub update_access_token_claims_on_refresh: bool,
    #[serde(rename = "rte")]
    pub refresh_token_expiration: i32,
    #[serde(rename = "att")]
    pub access_token_type: i32,
    #[serde(rename = "ell")]
    pub enable_local_login: bool,
    #[serde(rename = "ipr")]
    pub identity_provider_restrictions: Vec<String>,
    #[serde(rename = "jti")]
    pub include_jwt_id: bool,
    #[serde(rename = "c")]
    pub claims: Vec<SimpleClaim>,
    #[serde(rename = "asc")]
    pub always_send_client_claims: bool,
    #[serde(rename = "pcc")]
    pub prefix_client_claims: bool,
    #[serde(rename = "acg")]
    pub allowed_custom_grant_types: Vec<String>,
    #[serde(rename = "aco")]
    pub allowed_cors_origins: Vec<String>,
    #[serde(rename = "avb")]
    pub allow_access_token_via_browser: bool,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleToken {
    #[serde(rename = "a")]
    pub audience: String,
    #[serde(rename = "i")]
    pub issuer: String,
    #[serde(rename = "ct")]
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "lt")]
    pub lifetime: i32,
    #[serde(rename = "tt")]
    pub token_type: String,
    #[serde(rename = "cl")]
    pub client: SimpleClient,
    #[serde(rename = "c")]
    pub claims: Vec<SimpleClaim>,
    #[serde(rename = "v")]
    pub version: i32,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleRefreshToken {
    #[serde(rename = "ct")]
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "lt")]
    pub lifetime: i32,
    #[serde(rename = "at")]
    pub access_token: SimpleToken,
    #[serde(rename = "s")]
    pub subject: SimpleClaimsPrincipal,
    #[serde(rename = "v")]
    pub version: i32,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleAuthorizationCode {
    #[serde(rename = "ct")]
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "cl")]
    pub client: SimpleClient,
    #[serde(rename = "s")]
    pub subject: SimpleClaimsPrincipal,
    #[serde(rename = "oid")]
    pub is_open_id: bool,
    #[serde(rename = "rs")]
    pub requested_scopes: Vec<SimpleScope>,
    #[serde(rename = "ru")]
    pub redirect_uri: String,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(rename = "wcs")]
    pub was_consent_shown: bool,
    #[serde(rename = "sid", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "cc", default, skip_serializing_if = "Option::is_none")]
    pub code_challenge: Option<String>,
    #[serde(rename = "ccm", default, skip_serializing_if = "Option::is_none")]
    pub code_challenge_method: Option<String>,
    #[serde(rename = "db", default, skip_serializing_if = "DataBag::is_empty")]
    pub data_bag: DataBag,
}

simple_entity!(
    SimpleClaimsIdentity,
    SimpleClaimsPrincipal,
    SimpleScope,
    SimpleClient,
    SimpleToken,
    SimpleRefreshToken,
    SimpleAuthorizationCode,
);
