// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod player;
pub mod rest;
pub mod runtime;
pub mod session;
pub mod snapshot;
pub mod timer;
pub mod total_clock;
pub mod util;
