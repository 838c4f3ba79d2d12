mod cycle;
mod scheduler;

pub use cycle::{
    filter_active_offers, run_cycle, update_preview_if_needed, TaskResult, MAX_WIDGET_GAMES,
};
pub use scheduler::{RefreshScheduler, REFRESH_PERIOD};
