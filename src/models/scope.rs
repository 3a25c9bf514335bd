use crate::mapping::{Mappable, PropertyRegistrar};
use crate::models::client::{Secret, wire_code};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScopeType {
    Identity,
    #[default]
    Resource,
}

wire_code!(ScopeType {
    Identity = 0,
    Resource = 1,
});

/// A user claim emitted when its scope is granted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeClaim {
    pub name: String,
    pub description: Option<String>,
    pub always_include_in_id_token: bool,
}

impl ScopeClaim {
    pub fn new(name: impl Into<String>, always_include_in_id_token: bool) -> Self {
        Self {
            name: name.into(),
            description: None,
            always_include_in_id_token,
        }
    }
}

/// An identity or resource scope a client may request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub enabled: bool,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub emphasize: bool,
    pub scope_type: ScopeType,
    pub claims: Vec<ScopeClaim>,
    pub include_all_claims_for_user: bool,
    pub claims_rule: Option<String>,
    pub show_in_discovery_document: bool,
    pub scope_secrets: Vec<Secret>,
    pub allow_unrestricted_introspection: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            enabled: true,
            name: String::new(),
            display_name: None,
            description: None,
            required: false,
            emphasize: false,
            scope_type: ScopeType::default(),
            claims: Vec::new(),
            include_all_claims_for_user: false,
            claims_rule: None,
            show_in_discovery_document: true,
            scope_secrets: Vec::new(),
            allow_unrestricted_introspection: false,
        }
    }
}

impl Scope {
    pub fn new(name: impl Into<String>, scope_type: ScopeType) -> Self {
        Self {
            name: name.into(),
            scope_type,
            ..Self::default()
        }
    }
}

impl Mappable for Scope {
    fn declare(_: &mut PropertyRegistrar<Self>) {}
}
