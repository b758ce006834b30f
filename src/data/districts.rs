use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rules::home::HomeLocation;
use crate::rules::prosperity::ProsperityWeights;
use crate::rules::qualification::{AgeBand, RoleRequirement};
use crate::rules::rank::RankTier;

const DEFAULT_DISTRICT_CATALOG_PATH: &str = "./assets/data/districts.json";

pub const DISTRICT_CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictCatalog {
    pub schema_version: u32,
    pub districts: Vec<DistrictDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictDefinition {
    pub id: String,
    pub name: String,
    /// Home tag whose residents count toward this district, if any.
    #[serde(default)]
    pub home: Option<HomeLocation>,
    /// Districts without weights sit outside the economic game.
    #[serde(default)]
    pub economy: Option<ProsperityWeights>,
    #[serde(default)]
    pub roles: Vec<RoleRequirement>,
}

#[derive(Debug)]
pub enum DistrictCatalogError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for DistrictCatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistrictCatalogError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            DistrictCatalogError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            DistrictCatalogError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for DistrictCatalogError {}

impl DistrictCatalog {
    pub fn district(&self, district_id: &str) -> Option<&DistrictDefinition> {
        self.districts.iter().find(|d| d.id == district_id)
    }

    pub fn requirement(&self, district_id: &str, role_id: &str) -> Option<&RoleRequirement> {
        self.district(district_id)?
            .roles
            .iter()
            .find(|role| role.id == role_id)
    }
}

pub fn load_default_district_catalog() -> Result<DistrictCatalog, DistrictCatalogError> {
    load_district_catalog(DEFAULT_DISTRICT_CATALOG_PATH)
}

pub fn load_district_catalog(
    path: impl AsRef<Path>,
) -> Result<DistrictCatalog, DistrictCatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DistrictCatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: DistrictCatalog =
        serde_json::from_str(&raw).map_err(|source| DistrictCatalogError::Json {
            path: path.display().to_string(),
            source,
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &DistrictCatalog) -> Result<(), DistrictCatalogError> {
    if catalog.schema_version != DISTRICT_CATALOG_SCHEMA_VERSION {
        return Err(DistrictCatalogError::Validation(format!(
            "unsupported district catalog schema_version {}",
            catalog.schema_version
        )));
    }

    let mut district_ids = HashSet::new();
    for district in &catalog.districts {
        if !district_ids.insert(district.id.as_str()) {
            return Err(DistrictCatalogError::Validation(format!(
                "duplicate district id {}",
                district.id
            )));
        }

        let mut role_ids = HashSet::new();
        for role in &district.roles {
            if !role_ids.insert(role.id.as_str()) {
                return Err(DistrictCatalogError::Validation(format!(
                    "duplicate role id {} in district {}",
                    role.id, district.id
                )));
            }
            if let Some(band) = role.age_band {
                if band.min < 0 || band.min > band.max {
                    return Err(DistrictCatalogError::Validation(format!(
                        "role {} in district {} has an invalid age band {}..{}",
                        role.id, district.id, band.min, band.max
                    )));
                }
            }
            // A row with no gate at all would qualify everyone.
            if role.min_mental.is_none() && role.min_physical.is_none() && role.age_band.is_none() {
                return Err(DistrictCatalogError::Validation(format!(
                    "role {} in district {} has no rank minimum and no age band",
                    role.id, district.id
                )));
            }
        }
    }

    Ok(())
}

/// Baseline catalog used when no catalog file is available.
pub fn builtin_district_catalog() -> DistrictCatalog {
    DistrictCatalog {
        schema_version: DISTRICT_CATALOG_SCHEMA_VERSION,
        districts: vec![
            DistrictDefinition {
                id: "london_tower".to_string(),
                name: "London Tower".to_string(),
                home: None,
                economy: None,
                roles: vec![
                    requirement("tower_guard", "Tower Guard", Some(RankTier::B), Some(RankTier::BPlus), None),
                    requirement("tower_archivist", "Tower Archivist", Some(RankTier::A), None, None),
                    requirement(
                        "academy_student",
                        "Academy Student",
                        None,
                        None,
                        Some(AgeBand { min: 16, max: 19 }),
                    ),
                ],
            },
            DistrictDefinition {
                id: "east_district".to_string(),
                name: "East District".to_string(),
                home: Some(HomeLocation::RichArea),
                economy: Some(ProsperityWeights {
                    resident: 1_000,
                    shop: 3_000,
                }),
                roles: vec![
                    requirement("east_mayor", "East District Mayor", Some(RankTier::S), Some(RankTier::APlus), None),
                    requirement("east_broker", "East District Broker", Some(RankTier::APlus), None, None),
                ],
            },
            DistrictDefinition {
                id: "west_district".to_string(),
                name: "West District".to_string(),
                home: Some(HomeLocation::Slums),
                economy: Some(ProsperityWeights {
                    resident: 100,
                    shop: 300,
                }),
                roles: vec![
                    requirement("west_mechanic", "West District Mechanic", None, Some(RankTier::CPlus), None),
                    requirement("west_foreman", "West District Foreman", Some(RankTier::CPlus), Some(RankTier::B), None),
                ],
            },
            DistrictDefinition {
                id: "spirit_bureau".to_string(),
                name: "Spirit Bureau".to_string(),
                home: Some(HomeLocation::Sanctuary),
                economy: None,
                roles: vec![
                    requirement("bureau_director", "Bureau Director", Some(RankTier::SPlus), Some(RankTier::SPlus), None),
                    requirement("bureau_investigator", "Field Investigator", Some(RankTier::A), Some(RankTier::BPlus), None),
                ],
            },
        ],
    }
}

fn requirement(
    id: &str,
    name: &str,
    min_mental: Option<RankTier>,
    min_physical: Option<RankTier>,
    age_band: Option<AgeBand>,
) -> RoleRequirement {
    RoleRequirement {
        id: id.to_string(),
        name: name.to_string(),
        min_mental,
        min_physical,
        age_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_passes_validation() {
        let catalog = builtin_district_catalog();
        assert!(validate_catalog(&catalog).is_ok());
        assert_eq!(catalog.districts.len(), 4);
    }

    #[test]
    fn requirement_lookup_resolves_thresholds() {
        let catalog = builtin_district_catalog();
        let director = catalog
            .requirement("spirit_bureau", "bureau_director")
            .expect("bureau director");
        assert_eq!(director.min_mental, Some(RankTier::SPlus));
        assert_eq!(director.min_physical, Some(RankTier::SPlus));
        assert!(catalog.requirement("spirit_bureau", "east_mayor").is_none());
    }

    #[test]
    fn gateless_roles_are_rejected() {
        let mut catalog = builtin_district_catalog();
        catalog.districts[0]
            .roles
            .push(requirement("open_door", "Open Door", None, None, None));
        assert!(matches!(
            validate_catalog(&catalog),
            Err(DistrictCatalogError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_district_ids_are_rejected() {
        let mut catalog = builtin_district_catalog();
        let copy = catalog.districts[0].clone();
        catalog.districts.push(copy);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(DistrictCatalogError::Validation(_))
        ));
    }

    #[test]
    fn inverted_age_band_is_rejected() {
        let mut catalog = builtin_district_catalog();
        catalog.districts[0].roles.push(requirement(
            "backwards",
            "Backwards",
            None,
            None,
            Some(AgeBand { min: 19, max: 16 }),
        ));
        assert!(matches!(
            validate_catalog(&catalog),
            Err(DistrictCatalogError::Validation(_))
        ));
    }

    #[test]
    fn catalog_rows_parse_rank_labels() {
        let raw = r#"{
            "schema_version": 1,
            "districts": [
                {
                    "id": "spirit_bureau",
                    "name": "Spirit Bureau",
                    "home": "SANCTUARY",
                    "roles": [
                        {
                            "id": "bureau_director",
                            "name": "Bureau Director",
                            "min_mental": "S+",
                            "min_physical": "S+"
                        },
                        {
                            "id": "academy_student",
                            "name": "Academy Student",
                            "age_band": { "min": 16, "max": 19 }
                        }
                    ]
                }
            ]
        }"#;
        let catalog: DistrictCatalog = serde_json::from_str(raw).unwrap();
        assert!(validate_catalog(&catalog).is_ok());
        let director = catalog.requirement("spirit_bureau", "bureau_director").unwrap();
        assert_eq!(director.min_mental, Some(RankTier::SPlus));
        let student = catalog.requirement("spirit_bureau", "academy_student").unwrap();
        assert_eq!(student.age_band, Some(AgeBand { min: 16, max: 19 }));
    }
}
