mod fetch_events;
mod push_events;
mod refresh_events;

pub use fetch_events::*;
pub use push_events::*;
pub use refresh_events::*;
