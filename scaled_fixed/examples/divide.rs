//! Divides 7.125 (12.4 format) in place by 10.25 (14.2 format).
//!
//! Run with `RUST_LOG=debug` to see the raw integers involved.

use scaled_fixed::{FixedI16, FixedPointError};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<(), FixedPointError> {
    init_logging();

    let mut g = FixedI16::<4>::from_f32(7.125)?;
    let f = FixedI16::<2>::from_f32(10.25)?;
    debug!(g = g.scaled_int(), f = f.scaled_int(), "operands");

    g.div_assign(f)?;
    info!(raw = g.scaled_int(), value = g.to_f32(), "7.125 / 10.25");

    println!("{}", g.to_f32());
    Ok(())
}
