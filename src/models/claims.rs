use std::collections::BTreeMap;

use crate::mapping::{Mappable, PropertyRegistrar};

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const LOCAL_AUTHORITY: &str = "LOCAL AUTHORITY";
pub const DEFAULT_NAME_CLAIM_TYPE: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
pub const DEFAULT_ROLE_CLAIM_TYPE: &str =
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Well-known claim types used for token metadata lookups.
pub mod claim_types {
    pub const SUBJECT: &str = "sub";
    pub const CLIENT_ID: &str = "client_id";
    pub const SCOPE: &str = "scope";
    pub const NAME: &str = "name";
}

/// A single statement about a subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
    pub value_type: String,
    pub issuer: String,
    pub original_issuer: String,
    pub properties: BTreeMap<String, String>,
}

impl Default for Claim {
    fn default() -> Self {
        Self {
            claim_type: String::new(),
            value: String::new(),
            value_type: XSD_STRING.to_string(),
            issuer: LOCAL_AUTHORITY.to_string(),
            original_issuer: LOCAL_AUTHORITY.to_string(),
            properties: BTreeMap::new(),
        }
    }
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Sets both issuer and original issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.original_issuer = self.issuer.clone();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A set of claims asserted by one authentication, optionally acting on
/// behalf of another identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimsIdentity {
    pub authentication_type: Option<String>,
    pub name_claim_type: String,
    pub role_claim_type: String,
    pub label: Option<String>,
    pub bootstrap_context: Option<String>,
    pub claims: Vec<Claim>,
    pub actor: Option<Box<ClaimsIdentity>>,
}

impl Default for ClaimsIdentity {
    fn default() -> Self {
        Self {
            authentication_type: None,
            name_claim_type: DEFAULT_NAME_CLAIM_TYPE.to_string(),
            role_claim_type: DEFAULT_ROLE_CLAIM_TYPE.to_string(),
            label: None,
            bootstrap_context: None,
            claims: Vec::new(),
            actor: None,
        }
    }
}

impl ClaimsIdentity {
    pub fn new(authentication_type: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            authentication_type: Some(authentication_type.into()),
            claims,
            ..Self::default()
        }
    }

    pub fn with_actor(mut self, actor: ClaimsIdentity) -> Self {
        self.actor = Some(Box::new(actor));
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication_type
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    pub fn name(&self) -> Option<&str> {
        self.find_first(&self.name_claim_type)
            .map(|c| c.value.as_str())
    }

    /// Number of identities in the actor chain below this one.
    pub fn actor_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.actor.as_deref();
        while let Some(actor) = current {
            depth += 1;
            current = actor.actor.as_deref();
        }
        depth
    }
}

/// The authenticated caller: one or more identities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimsPrincipal {
    pub identities: Vec<ClaimsIdentity>,
}

impl ClaimsPrincipal {
    pub fn new(identities: Vec<ClaimsIdentity>) -> Self {
        Self { identities }
    }

    pub fn from_identity(identity: ClaimsIdentity) -> Self {
        Self::new(vec![identity])
    }

    pub fn identity(&self) -> Option<&ClaimsIdentity> {
        self.identities.first()
    }

    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.identities.iter().flat_map(|i| i.claims.iter())
    }

    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims().find(|c| c.claim_type == claim_type)
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.find_first(claim_types::SUBJECT)
            .map(|c| c.value.as_str())
    }
}

impl Mappable for ClaimsIdentity {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}

impl Mappable for ClaimsPrincipal {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}
