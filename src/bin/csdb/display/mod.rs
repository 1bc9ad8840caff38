mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{
    print_block_failures, print_component_summary, print_interaction_record,
    print_interaction_summary, print_name_summary, print_outputs,
};

/// Whether progress, tables and the banner go to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    /// Interactive when stderr is a terminal and `--quiet` was not given.
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: !quiet && crate::io::stderr_is_tty(),
        }
    }
}

/// Starts `env_logger` on stderr.
///
/// Interactive runs report block failures in tables, so only errors are
/// logged by default; otherwise warnings are logged too. `RUST_LOG` always
/// takes precedence.
pub fn init_logging(ctx: Context) {
    let default_level = if ctx.interactive { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
