use std::net::SocketAddr;

use color_eyre::eyre::WrapErr;
use osm_finder::{
    clients::{build_place_search, AppState},
    config::{Config, Transport},
    net::{routes::router, stdio},
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing; stdout belongs to the stdio transport, so log to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let search = build_place_search(&config)?;
    let state = AppState::new(search, &config);

    match config.transport {
        Transport::Stdio => {
            info!("Serving tools over stdio");
            stdio::serve(
                &state,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
        }
        Transport::Http => {
            let addr: SocketAddr = config
                .bind_addr
                .parse()
                .wrap_err_with(|| format!("Invalid bind address {:?}", config.bind_addr))?;
            info!("Running on {}", addr);
            axum::Server::bind(&addr)
                .serve(router(state).into_make_service())
                .await?;
        }
    }

    Ok(())
}
