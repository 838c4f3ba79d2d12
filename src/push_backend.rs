use std::{env, sync::Arc};

use clap::Parser;
use freegames_backend::{api::EgdataApi, notifications, Status, Tracing};
use tracing::info;
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// Port number to use for listening to push payloads.
    #[clap(short, long, default_value = "8080")]
    port: u16,

    #[clap(long, default_value = "https://api.egdata.app")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();
    Tracing::setup("push-backend")?;

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let api = Arc::new(EgdataApi::new(&opts.base_url)?);

    info!("push formatter started");

    warp::serve(
        notifications::routes::routes(api).with(
            warp::cors()
                .allow_methods(vec!["POST"])
                .allow_headers(vec!["Content-Type", "Authorization"])
                .allow_any_origin()
                .allow_credentials(true),
        ),
    )
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
