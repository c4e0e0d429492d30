pub mod settings;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` adds to the `outlay=info` default.
/// Called once from [`crate::init`].
pub(crate) fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "outlay=info".parse() {
        filter = filter.add_directive(directive);
    }
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
