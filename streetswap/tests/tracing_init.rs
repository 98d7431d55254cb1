use streetswap::trace::init_tracing;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn initializes_tracing_with_the_log_bridge() {
    init_tracing(LevelFilter::DEBUG).unwrap();

    // both native events and `log` records must now have a consumer
    tracing::info!("tracing event");
    tracing_log::log::info!("log record");
}

#[test]
fn off_level_skips_initialization() {
    // runs before or after the other test in the same process; OFF must
    // not touch the global state either way
    init_tracing(LevelFilter::OFF).unwrap();
}
