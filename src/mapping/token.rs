use std::fmt;

use crate::mapping::claim::ClaimMapper;
use crate::mapping::client::ClientMapper;
use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::EntityMapper;
use crate::mapping::simple::SimpleToken;
use crate::models::{Client, Token};

pub struct TokenMapper<C = Token> {
    generic: GenericMapper<C, SimpleToken>,
    client: ClientMapper<Client>,
    claims: ClaimMapper,
}

impl<C> fmt::Debug for TokenMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<Token>> Default for TokenMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<Token>> TokenMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            client: ClientMapper::new(),
            claims: ClaimMapper,
        }
    }
}

impl<C: Derived<Token>> EntityMapper for TokenMapper<C> {
    type Complex = C;
    type Simple = SimpleToken;

    fn map_to_complex(&self, simple: &SimpleToken) -> MappingResult<C> {
        let client = self.client.map_to_complex(&simple.client)?;
        let claims = self.claims.to_complex_all(Some(&simple.claims))?;

        let mut complex = self.generic.to_complex(simple)?;
        let token = complex.base_mut();
        token.audience = simple.audience.clone();
        token.issuer = simple.issuer.clone();
        token.creation_time = simple.creation_time;
        token.lifetime = simple.lifetime;
        token.token_type = simple.token_type.clone();
        token.client = client;
        token.claims = claims;
        token.version = simple.version;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleToken> {
        let token = complex.base();
        let client = self.client.map_to_simple(&token.client)?;
        let claims = self.claims.to_simple_all(Some(&token.claims))?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.audience = token.audience.clone();
        simple.issuer = token.issuer.clone();
        simple.creation_time = token.creation_time;
        simple.lifetime = token.lifetime;
        simple.token_type = token.token_type.clone();
        simple.client = client;
        simple.claims = claims;
        simple.version = token.version;
        Ok(simple)
    }
}
