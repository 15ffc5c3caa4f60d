use serde::{Deserialize, Serialize};

/// Agency that books flights and hotels for approved trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelAgency {
    pub id: i64,
    pub name: String,
}

/// Body of `PATCH /requests/{id}` when assigning the booking agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAgencyDto {
    pub travel_agency_id: i64,
}

/// Agency name by id, falling back to the raw id when the list is stale
pub fn agency_name(agencies: &[TravelAgency], id: i64) -> String {
    agencies
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agency_name_lookup() {
        let agencies = vec![
            TravelAgency { id: 1, name: "Viajes Norte".into() },
            TravelAgency { id: 2, name: "Turismo Sur".into() },
        ];
        assert_eq!(agency_name(&agencies, 2), "Turismo Sur");
        assert_eq!(agency_name(&agencies, 9), "#9");
    }
}
