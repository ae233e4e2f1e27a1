//! Value objects

mod archive_period;
mod geo_location;

pub use archive_period::ArchivePeriod;
pub use geo_location::GeoLocation;
