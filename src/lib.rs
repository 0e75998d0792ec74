pub mod config;
pub mod models;
pub mod dosing; // Units, concentration, dose, frequency, quantity
pub mod rx; // Instruction, grouping, control split, print rendering

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber for binaries. The library itself only emits
/// events.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
