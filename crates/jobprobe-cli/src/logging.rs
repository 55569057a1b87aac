use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
    // Default shows the link counts and first-page URL of a run.
    // -v adds info from reqwest and the other dependencies, -vv goes to debug.
    // RUST_LOG overrides both.
    let filter = match verbosity {
        0 => "warn,jobprobe_core=info,jobprobe_cli=info",
        1 => "info",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .init();
}
