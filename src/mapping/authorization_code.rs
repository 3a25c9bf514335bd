use std::fmt;

use crate::mapping::client::ClientMapper;
use crate::mapping::error::MappingResult;
use crate::mapping::generic::{Derived, GenericMapper};
use crate::mapping::mapper::EntityMapper;
use crate::mapping::principal::ClaimsPrincipalMapper;
use crate::mapping::scope::ScopeMapper;
use crate::mapping::simple::SimpleAuthorizationCode;
use crate::models::{AuthorizationCode, ClaimsPrincipal, Client, Scope};

pub struct AuthorizationCodeMapper<C = AuthorizationCode> {
    generic: GenericMapper<C, SimpleAuthorizationCode>,
    client: ClientMapper<Client>,
    subject: ClaimsPrincipalMapper<ClaimsPrincipal>,
    scopes: ScopeMapper<Scope>,
}

impl<C> fmt::Debug for AuthorizationCodeMapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationCodeMapper")
            .field("generic", &self.generic)
            .finish()
    }
}

impl<C: Derived<AuthorizationCode>> Default for AuthorizationCodeMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Derived<AuthorizationCode>> AuthorizationCodeMapper<C> {
    pub fn new() -> Self {
        Self {
            generic: GenericMapper::new(),
            client: ClientMapper::new(),
            subject: ClaimsPrincipalMapper::new(),
            scopes: ScopeMapper::new(),
        }
    }
}

impl<C: Derived<AuthorizationCode>> EntityMapper for AuthorizationCodeMapper<C> {
    type Complex = C;
    type Simple = SimpleAuthorizationCode;

    fn map_to_complex(&self, simple: &SimpleAuthorizationCode) -> MappingResult<C> {
        let client = self.client.map_to_complex(&simple.client)?;
        let subject = self.subject.map_to_complex(&simple.subject)?;
        let requested_scopes = self.scopes.to_complex_all(Some(&simple.requested_scopes))?;

        let mut complex = self.generic.to_complex(simple)?;
        let code = complex.base_mut();
        code.creation_time = simple.creation_time;
        code.client = client;
        code.subject = subject;
        code.is_open_id = simple.is_open_id;
        code.requested_scopes = requested_scopes;
        code.redirect_uri = simple.redirect_uri.clone();
        code.nonce = simple.nonce.clone();
        code.was_consent_shown = simple.was_consent_shown;
        code.session_id = simple.session_id.clone();
        code.code_challenge = simple.code_challenge.clone();
        code.code_challenge_method = simple.code_challenge_method.clone();
        Ok(complex)
    }

    fn map_to_simple(&self, complex: &C) -> MappingResult<SimpleAuthorizationCode> {
        let code = complex.base();
        let client = self.client.map_to_simple(&code.client)?;
        let subject = self.subject.map_to_simple(&code.subject)?;
        let requested_scopes = self.scopes.to_simple_all(Some(&code.requested_scopes))?;

        let mut simple = self.generic.to_simple(complex)?;
        simple.creation_time = code.creation_time;
        simple.client = client;
        simple.subject = subject;
        simple.is_open_id = code.is_open_id;
        simple.requested_scopes = requested_scopes;
        simple.redirect_uri = code.redirect_uri.clone();
        simple.nonce = code.nonce.clone();
        simple.was_consent_shown = code.was_consent_shown;
        simple.session_id = code.session_id.clone();
        simple.code_challenge = code.code_challenge.clone();
        simple.code_challenge_method = code.code_challenge_method.clone();
        Ok(simple)
    }
}
