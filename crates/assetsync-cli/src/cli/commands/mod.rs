//! CLI command handlers, one per file.

mod fetch;
mod list;
mod sync;

pub use fetch::run_fetch;
pub use list::run_list;
pub use sync::run_sync;

use assetsync_core::sync::SyncEvent;

/// Writes an event's progress line, if it has one, to stdout.
fn print_event(event: &SyncEvent) {
    if let Some(line) = event.message() {
        println!("{line}");
    }
}
