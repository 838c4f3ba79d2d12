pub mod date_format;
pub mod deep_link;
