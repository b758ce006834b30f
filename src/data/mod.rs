pub mod districts;

pub use districts::{
    builtin_district_catalog, load_default_district_catalog, load_district_catalog,
    DistrictCatalog, DistrictCatalogError, DistrictDefinition,
};
