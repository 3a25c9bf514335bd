mod common;

use common::*;
use identity_cache::mapping::{
    AuthorizationCodeMapper, ClaimsIdentityMapper, ClaimsPrincipalMapper, ClientMapper,
    EntityMapper, MappingError, RefreshTokenMapper, ScopeMapper, TokenMapper, ValueKind,
    accessors, declared_properties,
};
use identity_cache::models::{
    AuthorizationCode, ClaimsIdentity, ClaimsPrincipal, Client, RefreshToken, Scope, Token,
};
use identity_cache::services::codec::JsonCodec;
use serde_json::json;

#[test]
fn base_aggregates_survive_the_wire() {
    let codec = JsonCodec::for_mapper(AuthorizationCodeMapper::<AuthorizationCode>::new());
    let bytes = codec.serialize(&authorization_code()).unwrap();
    assert_eq!(
        codec.deserialize(&bytes).unwrap(),
        Some(authorization_code())
    );

    let codec = JsonCodec::for_mapper(RefreshTokenMapper::<RefreshToken>::new());
    let bytes = codec.serialize(&refresh_token(86_400)).unwrap();
    assert_eq!(
        codec.deserialize(&bytes).unwrap(),
        Some(refresh_token(86_400))
    );
}

#[test]
fn token_subtype_fields_ride_in_the_bag() {
    let audited = AuditedToken {
        base: token(120),
        risk_score: 250,
        device_id: Some("dev-7".into()),
        step_up: true,
    };

    let mapper = TokenMapper::<AuditedToken>::new();
    let simple = mapper.map_to_simple(&audited).unwrap();
    assert_eq!(simple.data_bag.get("risk_score"), Some(&json!(250)));
    assert_eq!(simple.data_bag.get("device_id"), Some(&json!("dev-7")));
    assert_eq!(simple.client.client_id, "app");

    let codec = JsonCodec::for_mapper(TokenMapper::<AuditedToken>::new());
    let bytes = codec.serialize(&audited).unwrap();
    assert_eq!(codec.deserialize(&bytes).unwrap(), Some(audited));
}

#[test]
fn absent_optional_subtype_field_round_trips() {
    let audited = AuditedToken {
        base: token(60),
        ..AuditedToken::default()
    };

    let codec = JsonCodec::for_mapper(TokenMapper::<AuditedToken>::new());
    let bytes = codec.serialize(&audited).unwrap();
    assert_eq!(codec.deserialize(&bytes).unwrap(), Some(audited));
}

#[test]
fn client_and_scope_subtypes_round_trip() {
    let tenant = TenantClient {
        base: client(),
        tenant: "contoso".into(),
        max_sessions: 3,
        tags: vec!["internal".into(), "beta".into()],
    };
    let mapper = ClientMapper::<TenantClient>::new();
    let back = mapper
        .map_to_complex(&mapper.map_to_simple(&tenant).unwrap())
        .unwrap();
    assert_eq!(back, tenant);

    let scope = ApiScope {
        base: scopes().remove(1),
        owner_team: "payments".into(),
        rate_limit: 1200,
    };
    let mapper = ScopeMapper::<ApiScope>::new();
    let back = mapper
        .map_to_complex(&mapper.map_to_simple(&scope).unwrap())
        .unwrap();
    assert_eq!(back, scope);
}

#[test]
fn refresh_token_subtype_keeps_nested_graph() {
    let bound = BoundRefreshToken {
        base: refresh_token(2_592_000),
        confirmation_thumbprint: "0ZcOCORZNYy-DWpqq30jZyJGHTN0d2HglBV3uiguA4I".into(),
        rotation_count: 4,
    };

    let codec = JsonCodec::for_mapper(RefreshTokenMapper::<BoundRefreshToken>::new());
    let bytes = codec.serialize(&bound).unwrap();
    let back = codec.deserialize(&bytes).unwrap().unwrap();

    let identity = back.base.subject.identity().unwrap();
    assert_eq!(identity.actor.as_ref().unwrap().claims[0].value, "service-a");
    assert_eq!(back.base.access_token.client.client_id, "app");
    assert_eq!(back, bound);
}

#[test]
fn identity_subtype_round_trips_with_actor() {
    let tagged = TaggedIdentity {
        base: subject().identities.remove(0),
        login_hint: Some("alice@example.com".into()),
    };

    let mapper = ClaimsIdentityMapper::<TaggedIdentity>::new();
    let simple = mapper.map_to_simple(&tagged).unwrap();
    assert!(simple.actor.is_some());
    assert_eq!(mapper.map_to_complex(&simple).unwrap(), tagged);
}

#[test]
fn wide_integers_are_narrowed_for_declared_fields() {
    let mapper = TokenMapper::<AuditedToken>::new();
    let mut simple = mapper.map_to_simple(&AuditedToken::default()).unwrap();
    simple.data_bag.insert("risk_score", json!(200_i64));

    let back = mapper.map_to_complex(&simple).unwrap();
    assert_eq!(back.risk_score, 200);
}

#[test]
fn out_of_range_values_fail_loudly() {
    let mapper = TokenMapper::<AuditedToken>::new();
    let mut simple = mapper.map_to_simple(&AuditedToken::default()).unwrap();
    simple.data_bag.insert("risk_score", json!(300));

    let err = mapper.map_to_complex(&simple).unwrap_err();
    assert!(matches!(
        err,
        MappingError::Coercion {
            expected: ValueKind::U8,
            ..
        }
    ));
}

#[test]
fn unknown_bag_entries_are_ignored() {
    let mapper = ScopeMapper::<Scope>::new();
    let mut simple = mapper.map_to_simple(&scopes()[0]).unwrap();
    simple.data_bag.insert("from_a_newer_release", json!(true));

    assert_eq!(mapper.map_to_complex(&simple).unwrap(), scopes()[0]);
}

#[test]
fn absent_inputs_map_to_absent_or_empty() {
    let mapper = ClaimsPrincipalMapper::<ClaimsPrincipal>::new();
    assert_eq!(mapper.to_complex(None).unwrap(), None);
    assert_eq!(mapper.to_simple(None).unwrap(), None);
    assert!(mapper.to_complex_all(None).unwrap().is_empty());
    assert!(mapper.to_simple_all(None).unwrap().is_empty());
}

#[test]
fn accessor_sets_describe_declared_fields_only() {
    assert!(accessors::<Token>().is_empty());
    assert!(accessors::<Client>().is_empty());
    assert!(accessors::<ClaimsIdentity>().is_empty());

    let names: Vec<&str> = accessors::<TenantClient>().names().collect();
    assert_eq!(names, vec!["tenant", "max_sessions", "tags"]);

    let declared = declared_properties::<AuditedToken>();
    let kinds: Vec<_> = declared.iter().map(|p| (p.name, p.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("risk_score", ValueKind::U8),
            ("device_id", ValueKind::String),
            ("step_up", ValueKind::Bool),
        ]
    );
}

#[test]
fn concurrent_first_use_builds_one_accessor_set() {
    let sets: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| s.spawn(accessors::<BoundRefreshToken>))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for set in &sets[1..] {
        assert!(std::sync::Arc::ptr_eq(&sets[0], set));
    }
    assert_eq!(sets[0].len(), 2);
}
