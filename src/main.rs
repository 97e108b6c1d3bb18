use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use stardrift::Starfield;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let mut starfield = Starfield::new();

    // Optional particle-count override: `stardrift [COUNT]`.
    if let Some(count) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
        starfield = starfield.with_particle_count(count);
    }

    info!("stardrift starting");
    if let Err(e) = starfield.run() {
        error!("stardrift failed: {e}");
        std::process::exit(1);
    }
}
