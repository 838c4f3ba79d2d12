mod content;
mod payload;

pub mod handlers;
pub mod routes;

pub use content::NotificationContent;
pub use payload::{NotificationKind, PushData, PushNotification, PushPayload};
