mod broadcast;
mod data_source;

pub use broadcast::{SnapshotUpdate, UpdateBroadcast};
pub use data_source::{SnapshotDataSource, WidgetDataSource};
