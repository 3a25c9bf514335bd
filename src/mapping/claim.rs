use crate::mapping::error::MappingResult;
use crate::mapping::mapper::EntityMapper;
use crate::mapping::simple::SimpleClaim;
use crate::models::Claim;

/// Leaf mapper: claims are copied field by field and carry no data bag.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClaimMapper;

impl EntityMapper for ClaimMapper {
    type Complex = Claim;
    type Simple = SimpleClaim;

    fn map_to_complex(&self, simple: &SimpleClaim) -> MappingResult<Claim> {
        Ok(Claim {
            claim_type: simple.claim_type.clone(),
            value: simple.value.clone(),
            value_type: simple.value_type.clone(),
            issuer: simple.issuer.clone(),
            original_issuer: simple.original_issuer.clone(),
            properties: simple.properties.clone(),
        })
    }

    fn map_to_simple(&self, complex: &Claim) -> MappingResult<SimpleClaim> {
        Ok(SimpleClaim {
            claim_type: complex.claim_type.clone(),
            value: complex.value.clone(),
            value_type: complex.value_type.clone(),
            issuer: complex.issuer.clone(),
            original_issuer: complex.original_issuer.clone(),
            properties: complex.properties.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_every_field() {
        let claim = Claim::new("role", "admin")
            .with_issuer("https://idsrv")
            .with_value_type("urn:custom")
            .with_property("source", "ldap");

        let simple = ClaimMapper.map_to_simple(&claim).unwrap();
        assert_eq!(simple.claim_type, "role");
        assert_eq!(simple.properties.get("source").map(String::as_str), Some("ldap"));

        assert_eq!(ClaimMapper.map_to_complex(&simple).unwrap(), claim);
    }

    #[test]
    fn absent_inputs_stay_absent() {
        assert!(ClaimMapper.to_complex(None).unwrap().is_none());
        assert!(ClaimMapper.to_simple_all(None).unwrap().is_empty());
    }
}
