//! sqrt(2) - sqrt(3) in an 8-bit format with 4 fractional bits, followed by
//! shifts and an overflow that is reported instead of wrapping.

use scaled_fixed::{Fixed4_4, FixedPointError};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<(), FixedPointError> {
    init_logging();

    let a = Fixed4_4::from_f64(2f64.sqrt())?;
    let b = Fixed4_4::from_f64(3f64.sqrt())?;
    info!(a = a.to_f64(), b = b.to_f64(), "operands");

    let diff = (a - b)?;
    info!(
        raw = diff.scaled_int(),
        value = diff.to_f64(),
        exact = 2f64.sqrt() - 3f64.sqrt(),
        "sqrt(2) - sqrt(3)"
    );
    println!("{}", diff.to_f32());

    let doubled = (diff << 1)?;
    let halved = (diff >> 1)?;
    info!(doubled = doubled.to_f64(), halved = halved.to_f64(), "shifted");

    match a << 3 {
        Ok(value) => info!(value = value.to_f64(), "a << 3"),
        Err(err) => warn!(%err, "a << 3 does not fit"),
    }

    Ok(())
}
