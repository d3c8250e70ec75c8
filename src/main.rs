use clap::Parser;
use danmarkskort::{Config, statics};
use tracing_subscriber::EnvFilter;

/// Map of Denmark with address search and grid-operator lookup.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the elnet proxy. Leave empty to disable the grid-operator lookup.
    #[arg(long, env = "ELNET_PROXY_BASE", default_value = "")]
    proxy_base: String,

    /// Base URL of the address registry.
    #[arg(long, env = "DAWA_BASE_URL", default_value = statics::DAWA_BASE_URL)]
    registry_base: String,

    /// Tile URL pattern with `{z}`, `{x}` and `{y}` placeholders.
    #[arg(long, default_value = statics::OSM_TILE_URL)]
    tile_url: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("danmarkskort=info,warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::new(&args.registry_base, Some(args.proxy_base.as_str()), &args.tile_url);
    danmarkskort::run_gui(config)
}
