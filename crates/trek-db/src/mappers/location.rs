//! Location entity <-> model mapper

use trek_core::entities::{Location, LocationType};
use trek_core::error::DomainError;

use crate::models::LocationModel;

/// Convert database location type string to LocationType enum
fn parse_location_type(type_str: &str) -> Result<LocationType, DomainError> {
    match type_str {
        "visited" => Ok(LocationType::Visited),
        "planned" => Ok(LocationType::Planned),
        other => Err(DomainError::DatabaseError(format!(
            "unknown location type: {other}"
        ))),
    }
}

/// Convert LocationType enum to database string
pub fn location_type_to_str(lt: LocationType) -> &'static str {
    lt.as_str()
}

impl TryFrom<LocationModel> for Location {
    type Error = DomainError;

    fn try_from(model: LocationModel) -> Result<Self, DomainError> {
        Ok(Location {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            longitude: model.longitude,
            latitude: model.latitude,
            arrive_at: model.arrive_at,
            depart_at: model.depart_at,
            location_type: parse_location_type(&model.location_type)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_is_a_storage_fault() {
        let err = parse_location_type("wishlist").unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
