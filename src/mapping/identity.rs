use std::fmt;

use crate::mapping::claim::ClaimMapper;
use crate::mapping::error::{MappingError, MappingResult};
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::EntityMapper;
use crate::mapping::simple::SimpleClaimsIdentity;
use crate::models::ClaimsIdentity;

/// Deepest actor chain either direction accepts. Actor graphs are trees by
/// convention only; a chain past this depth is treated as malformed.
pub const MAX_ACTOR_DEPTH: usize = 32;

/// Maps claims identities, recursing through the actor chain.
pub struct ClaimsIdentityMapper<C = ClaimsIdentity> {
    generic: GenericMapper<C, SimpleClaimsIdentity>,
    claims: ClaimMapper,
}

impl<C> fmt::Debug for ClaimsIdentityMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsIdentityMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<ClaimsIdentity>> Default for ClaimsIdentityMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<ClaimsIdentity>> ClaimsIdentityMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            claims: ClaimMapper,
        }
    }

    fn actor_to_complex(
        &self,
        actor: Option<&SimpleClaimsIdentity>,
        depth: usize,
    ) -> MappingResult<Option<Box<ClaimsIdentity>>> {
        let Some(actor) = actor else {
            return Ok(None);
        };
        if depth > MAX_ACTOR_DEPTH {
            return Err(MappingError::ActorDepth {
                max: MAX_ACTOR_DEPTH,
            });
        }

        let mut identity = ClaimsIdentity::default();
        self.fill_complex(actor, &mut identity, depth)?;
        Ok(Some(Box::new(identity)))
    }

    fn actor_to_simple(
        &self,
        actor: Option<&ClaimsIdentity>,
        depth: usize,
    ) -> MappingResult<Option<Box<SimpleClaimsIdentity>>> {
        let Some(actor) = actor else {
            return Ok(None);
        };
        if depth > MAX_ACTOR_DEPTH {
            return Err(MappingError::ActorDepth {
                max: MAX_ACTOR_DEPTH,
            });
        }

        let mut simple = SimpleClaimsIdentity::default();
        self.fill_simple(actor, &mut simple, depth)?;
        Ok(Some(Box::new(simple)))
    }

    fn fill_complex(
        &self,
        simple: &SimpleClaimsIdentity,
        identity: &mut ClaimsIdentity,
        depth: usize,
    ) -> MappingResult<()> {
        let claims = self.claims.to_complex_all(Some(&simple.claims))?;
        let actor = self.actor_to_complex(simple.actor.as_deref(), depth + 1)?;

        identity.authentication_type = simple.authentication_type.clone();
        identity.name_claim_type = simple.name_claim_type.clone();
        identity.role_claim_type = simple.role_claim_type.clone();
        identity.label = simple.label.clone();
        identity.bootstrap_context = simple.bootstrap_context.clone();
        identity.claims = claims;
        identity.actor = actor;
        Ok(())
    }

    fn fill_simple(
        &self,
        identity: &ClaimsIdentity,
        simple: &mut SimpleClaimsIdentity,
        depth: usize,
    ) -> MappingResult<()> {
        let claims = self.claims.to_simple_all(Some(&identity.claims))?;
        let actor = self.actor_to_simple(identity.actor.as_deref(), depth + 1)?;

        simple.authentication_type = identity.authentication_type.clone();
        simple.name_claim_type = identity.name_claim_type.clone();
        simple.role_claim_type = identity.role_claim_type.clone();
        simple.label = identity.label.clone();
        simple.bootstrap_context = identity.bootstrap_context.clone();
        simple.claims = claims;
        simple.actor = actor;
        Ok(())
    }
}

impl<C: Derived<ClaimsIdentity>> EntityMapper for ClaimsIdentityMapper<C> {
    type Complex = C;
    type Simple = SimpleClaimsIdentity;

    fn map_to_complex(&self, simple: &SimpleClaimsIdentity) -> MappingResult<C> {
        let mut complex = self.generic.to_complex(simple)?;
        self.fill_complex(simple, complex.base_mut(), 0)?;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleClaimsIdentity> {
        let mut simple = self.generic.to_simple(complex)?;
        self.fill_simple(complex.base(), &mut simple, 0)?;
        Ok(simple)
    }
}
