pub mod error;
pub mod iso_bson_chrono;
pub mod response;
