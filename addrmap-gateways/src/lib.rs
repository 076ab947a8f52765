pub mod geocoding;
pub mod json_file;
