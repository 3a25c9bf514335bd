use std::fmt;

use crate::mapping::client::SecretMapper;
use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::{EntityMapper, decode_code};
use crate::mapping::simple::{SimpleScope, SimpleScopeClaim};
use crate::models::{Scope, ScopeClaim, ScopeType};

#[derive(Clone, Copy, Debug, Default)]
pub struct ScopeClaimMapper;

impl EntityMapper for ScopeClaimMapper {
    type Complex = ScopeClaim;
    type Simple = SimpleScopeClaim;

    fn map_to_complex(&self, simple: &SimpleScopeClaim) -> MappingResult<ScopeClaim> {
        Ok(ScopeClaim {
            name: simple.name.clone(),
            description: simple.description.clone(),
            always_include_in_id_token: simple.always_include_in_id_token,
        })
    }

    fn map_to_simple(&self, complex: &ScopeClaim) -> MappingResult<SimpleScopeClaim> {
        Ok(SimpleScopeClaim {
            name: complex.name.clone(),
            description: complex.description.clone(),
            always_include_in_id_token: complex.always_include_in_id_token,
        })
    }
}

pub struct ScopeMapper<C = Scope> {
    generic: GenericMapper<C, SimpleScope>,
    claims: ScopeClaimMapper,
    secrets: SecretMapper,
}

impl<C> fmt::Debug for ScopeMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<Scope>> Default for ScopeMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<Scope>> ScopeMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            claims: ScopeClaimMapper,
            secrets: SecretMapper,
        }
    }
}

impl<C: Derived<Scope>> EntityMapper for ScopeMapper<C> {
    type Complex = C;
    type Simple = SimpleScope;

    fn map_to_complex(&self, simple: &SimpleScope) -> MappingResult<C> {
        let claims = self.claims.to_complex_all(Some(&simple.claims))?;
        let scope_secrets = self.secrets.to_complex_all(Some(&simple.scope_secrets))?;
        let scope_type = decode_code("scope_type", simple.scope_type, ScopeType::from_code)?;

        let mut complex = self.generic.to_complex(simple)?;
        let scope = complex.base_mut();
        scope.enabled = simple.enabled;
        scope.name = simple.name.clone();
        scope.display_name = simple.display_name.clone();
        scope.description = simple.description.clone();
        scope.required = simple.required;
        scope.emphasize = simple.emphasize;
        scope.scope_type = scope_type;
        scope.claims = claims;
        scope.include_all_claims_for_user = simple.include_all_claims_for_user;
        scope.claims_rule = simple.claims_rule.clone();
        scope.show_in_discovery_document = simple.show_in_discovery_document;
        scope.scope_secrets = scope_secrets;
        scope.allow_unrestricted_introspection = simple.allow_unrestricted_introspection;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleScope> {
        let scope = complex.base();
        let claims = self.claims.to_simple_all(Some(&scope.claims))?;
        let scope_secrets = self.secrets.to_simple_all(Some(&scope.scope_secrets))?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.enabled = scope.enabled;
        simple.name = scope.name.clone();
        simple.display_name = scope.display_name.clone();
        simple.description = scope.description.clone();
        simple.required = scope.required;
        simple.emphasize = scope.emphasize;
        simple.scope_type = scope.scope_type.code();
        simple.claims = claims;
        simple.include_all_claims_for_user = scope.include_all_claims_for_user;
        simple.claims_rule = scope.claims_rule.clone();
        simple.show_in_discovery_document = scope.show_in_discovery_document;
        simple.scope_secrets = scope_secrets;
        simple.allow_unrestricted_introspection = scope.allow_unrestricted_introspection;
        Ok(simple)
    }
}
