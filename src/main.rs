use astra::{ConnectionInfo, Request, Server};
use listing_reranker::config::AppConfig;
use listing_reranker::router::respond;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.bind_addr,
        workers = config.max_workers,
        default_top_n = config.default_top_n,
        "starting listing reranker"
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    // The config is built once here and lent to every request.
    let result = server.serve(move |req: Request, _info: ConnectionInfo| respond(req, &config));

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
