//! Complex entities: the strongly typed objects the host framework hands to
//! the cache.
pub mod claims;
pub mod client;
pub mod scope;
pub mod token;

pub use claims::{Claim, ClaimsIdentity, ClaimsPrincipal, claim_types};
pub use client::{AccessTokenType, Client, Flow, Secret, TokenExpiration, TokenUsage};
pub use scope::{Scope, ScopeClaim, ScopeType};
pub use token::{AuthorizationCode, RefreshToken, Token, TokenMetadata};
