use serde::{Deserialize, Serialize};

/// One photo record from the library's metadata export.
///
/// Every field is optional in the export; absent strings deserialize to
/// empty and absent numbers to zero. The ranking kernel reads only the two
/// descriptions, the country/city pair, `photo_id`, and `stats_downloads`;
/// the remaining fields feed the metadata filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoMetadata {
    pub photo_id: String,
    pub photo_submitted_at: String,
    pub photo_location_country: String,
    pub photo_location_city: String,
    pub photo_location_latitude: f64,
    pub photo_location_longitude: f64,
    pub photographer_username: String,
    pub photographer_first_name: String,
    pub photographer_last_name: String,
    pub photo_description: String,
    pub ai_description: String,
    pub exif_camera_make: String,
    pub exif_camera_model: String,
    pub stats_downloads: u64,
}
