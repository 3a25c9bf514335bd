use std::fmt;

use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::EntityMapper;
use crate::mapping::principal::ClaimsPrincipalMapper;
use crate::mapping::simple::SimpleRefreshToken;
use crate::mapping::token::TokenMapper;
use crate::models::{ClaimsPrincipal, RefreshToken, Token};

pub struct RefreshTokenMapper<C = RefreshToken> {
    generic: GenericMapper<C, SimpleRefreshToken>,
    access_token: TokenMapper<Token>,
    subject: ClaimsPrincipalMapper<ClaimsPrincipal>,
}

impl<C> fmt::Debug for RefreshTokenMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<RefreshToken>> Default for RefreshTokenMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<RefreshToken>> RefreshTokenMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            access_token: TokenMapper::new(),
            subject: ClaimsPrincipalMapper::new(),
        }
    }
}

impl<C: Derived<RefreshToken>> EntityMapper for RefreshTokenMapper<C> {
    type Complex = C;
    type Simple = SimpleRefreshToken;

    fn map_to_complex(&self, simple: &SimpleRefreshToken) -> MappingResult<C> {
        let access_token = self.access_token.map_to_complex(&simple.access_token)?;
        let subject = self.subject.map_to_complex(&simple.subject)?;

        let mut complex = self.generic.to_complex(simple)?;
        let refresh = complex.base_mut();
        refresh.creation_time = simple.creation_time;
        refresh.lifetime = simple.lifetime;
        refresh.access_token = access_token;
        refresh.subject = subject;
        refresh.version = simple.version;
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleRefreshToken> {
        let refresh = complex.base();
        let access_token = self.access_token.map_to_simple(&refresh.access_token)?;
        let subject = self.subject.map_to_simple(&refresh.subject)?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.creation_time = refresh.creation_time;
        simple.lifetime = refresh.lifetime;
        simple.access_token = access_token;
        simple.subject = subject;
        simple.version = refresh.version;
        Ok(simple)
    }
}
