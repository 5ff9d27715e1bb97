pub mod catalog;
pub mod district;
pub mod observation;
pub mod raw;

pub use catalog::MagnitudeCatalog;
pub use district::StationDistrictMap;
pub use observation::{EmissionDataset, ObservationRecord, StationId};
pub use raw::RawWideRecord;
