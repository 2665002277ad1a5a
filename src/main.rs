//! taplet CLI entry point

fn main() {
    // TAP owns stdout, so logs go to stderr; quiet unless RUST_LOG asks for more
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    taplet::cli::run();
}
