mod egdata;
mod images;

pub use egdata::*;
pub use images::ImageFetcher;
