use chrono::Utc;
use clap::Parser;
use freegames_backend::{
    api::EgdataApi, logging::offer_description, worker::filter_active_offers, Status, Tracing,
};
use itertools::Itertools;
use tracing::info;

/// Util for printing the currently-active free game offers.
#[derive(Parser)]
struct Opts {
    #[clap(long, default_value = "https://api.egdata.app")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();
    Tracing::setup_verbose("util/list_offers")?;

    let api = EgdataApi::new(&opts.base_url)?;
    let listings = api.get_free_games().await;
    info!("listing returned {} offers", listings.len());

    let games = filter_active_offers(listings, Utc::now());
    for description in games.iter().map(offer_description).collect_vec() {
        info!("{description}");
    }

    Ok(())
}
