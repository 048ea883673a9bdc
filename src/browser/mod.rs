// src/browser/mod.rs
// =============================================================================
// The repository browsing core.
//
// Submodules:
// - state: the state container and the reduce(state, event) transition
// - session: runs remote lookups and feeds results through reduce
// - view: breadcrumbs, display ordering and size formatting derived at read
//   time
// =============================================================================

mod session;
mod state;
mod view;

pub use session::RepositorySession;
pub use state::{BrowserState, FileContent, LoadedRepository};
pub use view::{breadcrumbs, format_size, sorted};
