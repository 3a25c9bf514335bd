//! Conversion between the domain model and its compact wire form.
//!
//! Every aggregate has a composite mapper that maps its fixed fields
//! explicitly and lets [`GenericMapper`] carry whatever a subtype declares
//! through the simple entity's [`DataBag`].

mod accessor;
mod authorization_code;
mod claim;
mod client;
mod error;
mod generic;
mod identity;
mod mapper;
mod principal;
mod refresh_token;
mod registry;
mod scope;
pub mod simple;
mod token;
mod value;

pub use accessor::{
    AccessorSet, Getter, Mappable, PropertyDescriptor, PropertyRegistrar, Setter, TypedSetter,
    accessors,
};
pub use authorization_code::AuthorizationCodeMapper;
pub use claim::ClaimMapper;
pub use client::{ClientMapper, SecretMapper};
pub use error::{MappingError, MappingResult};
pub use generic::{Derived, GenericMapper, SimpleEntity};
pub use identity::{ClaimsIdentityMapper, MAX_ACTOR_DEPTH};
pub use mapper::EntityMapper;
pub use principal::ClaimsPrincipalMapper;
pub use refresh_token::RefreshTokenMapper;
pub use registry::{PropertyInfo, PropertyList, TypeRegistry, declared_properties};
pub use scope::{ScopeClaimMapper, ScopeMapper};
pub use simple::{
    SimpleAuthorizationCode, SimpleClaim, SimpleClaimsIdentity, SimpleClaimsPrincipal,
    SimpleClient, SimpleRefreshToken, SimpleScope, SimpleScopeClaim, SimpleSecret, SimpleToken,
};
pub use token::TokenMapper;
pub use value::{DataBag, DeclaredType, ValueKind, coerce};
