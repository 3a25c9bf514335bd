use std::fmt;

use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::identity::ClaimsIdentityMapper;
use crate::mapping::mapper::EntityMapper;
use crate::mapping::simple::SimpleClaimsPrincipal;
use crate::models::{ClaimsIdentity, ClaimsPrincipal};

pub struct ClaimsPrincipalMapper<C = ClaimsPrincipal> {
    generic: GenericMapper<C, SimpleClaimsPrincipal>,
    identities: ClaimsIdentityMapper<ClaimsIdentity>,
}

impl<C> fmt::Debug for ClaimsPrincipalMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsPrincipalMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<ClaimsPrincipal>> Default for ClaimsPrincipalMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<ClaimsPrincipal>> ClaimsPrincipalMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            identities: ClaimsIdentityMapper::new(),
        }
    }
}

impl<C: Derived<ClaimsPrincipal>> EntityMapper for ClaimsPrincipalMapper<C> {
    type Complex = C;
    type Simple = SimpleClaimsPrincipal;

    fn map_to_complex(&self, simple: &SimpleClaimsPrincipal) -> MappingResult<C> {
        let identities = self.identities.to_complex_all(Some(&simple.identities))?;

        let mut complex = self.generic.to_complex(simple)?;
        complex.base_mut().identities = identities;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleClaimsPrincipal> {
        let identities = self
            .identities
            .to_simple_all(Some(&complex.base().identities))?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.identities = identities;
        Ok(simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Claim;

    #[test]
    fn round_trips_every_identity() {
        let principal = ClaimsPrincipal::new(vec![
            ClaimsIdentity::new("pwd", vec![Claim::new("sub", "alice")]),
            ClaimsIdentity::new("external", vec![Claim::new("idp", "google")]),
        ]);

        let mapper = ClaimsPrincipalMapper::<ClaimsPrincipal>::new();
        let simple = mapper.map_to_simple(&principal).unwrap();
        assert_eq!(simple.identities.len(), 2);
        assert_eq!(mapper.map_to_complex(&simple).unwrap(), principal);
    }

    #[test]
    fn empty_principal_stays_empty() {
        let mapper = ClaimsPrincipalMapper::<ClaimsPrincipal>::new();
        let simple = mapper.map_to_simple(&ClaimsPrincipal::default()).unwrap();
        assert!(mapper.map_to_complex(&simple).unwrap().identities.is_empty());
    }
}
