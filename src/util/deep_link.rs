use lazy_static::lazy_static;
use regex::Regex;

/// Deep links understood by the app. Widgets, tiles and notifications all
/// route taps through these URIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    /// Opens the free games listing.
    FreeGames,
    /// Opens a specific offer page.
    Offer(String),
}

lazy_static! {
    static ref OFFER_URI: Regex =
        Regex::new(r"^egdata://offer/([A-Za-z0-9][A-Za-z0-9_-]*)$").unwrap();
}

const FREE_GAMES_URI: &str = "egdata://free-games";

impl DeepLink {
    pub fn offer(id: impl Into<String>) -> Self {
        DeepLink::Offer(id.into())
    }

    pub fn to_uri(&self) -> String {
        match self {
            DeepLink::FreeGames => FREE_GAMES_URI.to_owned(),
            DeepLink::Offer(id) => format!("egdata://offer/{id}"),
        }
    }

    pub fn parse(uri: &str) -> Option<DeepLink> {
        if uri == FREE_GAMES_URI {
            return Some(DeepLink::FreeGames);
        }
        OFFER_URI
            .captures(uri)
            .map(|captures| DeepLink::Offer(captures[1].to_owned()))
    }
}
