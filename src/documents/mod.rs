mod free_game_offer;
mod widget_snapshot;

pub use free_game_offer::FreeGameOffer;
pub use widget_snapshot::WidgetSnapshot;
