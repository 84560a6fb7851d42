//! Shared setup for the Nano command-line tools

use nano_spec::{MemoryLayout, MAX_INSTRUCTION_LEN, PAGE_SIZE};
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level from
/// `warn` through `info` and `debug` to `trace`.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Memory layout with the default page size and guard
pub fn layout_with_stack_pages(stack_pages: usize) -> Result<MemoryLayout, nano_spec::ConfigError> {
    MemoryLayout::new(PAGE_SIZE, stack_pages, MAX_INSTRUCTION_LEN)
}
