// src/browser/state.rs
// =============================================================================
// The browsing state container and its transition function.
//
// All state changes go through `reduce(state, event)`. The session issues
// events before and after each remote lookup; every request carries a
// Ticket, and a completion event is only applied when its ticket is still
// the pending one for that kind of request. That single check is what keeps
// late responses (for a path or file the user already moved away from) from
// overwriting newer data.
// =============================================================================

use crate::error::BrowseError;
use crate::github::{DirectoryEntry, RepositoryMetadata, RepositoryRef};

/// Identifies one in-flight request. Issued from a monotonically increasing
/// counter, so no two requests share a ticket.
pub type Ticket = u64;

/// The repository being browsed. Reference and metadata live and die together.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRepository {
    pub reference: RepositoryRef,
    pub metadata: RepositoryMetadata,
}

/// The last file whose content was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    pub file: DirectoryEntry,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    pub repository: Option<LoadedRepository>,
    /// `""` is the repository root.
    pub current_path: String,
    /// Entries of `current_path`, in provider order.
    pub listing: Vec<DirectoryEntry>,
    /// Always a file. Survives folder navigation.
    pub selected_file: Option<DirectoryEntry>,
    /// Content of `selected_file` once it has arrived.
    pub file_content: Option<FileContent>,
    /// Most recent failure; cleared when the next operation starts.
    pub error: Option<BrowseError>,
    pending_load: Option<Ticket>,
    pending_listing: Option<Ticket>,
    pending_file: Option<Ticket>,
}

impl BrowserState {
    /// True while the selected file's content is still being fetched.
    pub fn is_loading_file(&self) -> bool {
        self.pending_file.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Input was refused before any request was made.
    Rejected { error: BrowseError },

    LoadStarted {
        ticket: Ticket,
    },
    LoadSucceeded {
        ticket: Ticket,
        reference: RepositoryRef,
        metadata: RepositoryMetadata,
        listing: Vec<DirectoryEntry>,
    },
    LoadFailed {
        ticket: Ticket,
        error: BrowseError,
    },

    NavigationStarted {
        ticket: Ticket,
    },
    NavigationSucceeded {
        ticket: Ticket,
        path: String,
        listing: Vec<DirectoryEntry>,
    },
    NavigationFailed {
        ticket: Ticket,
        error: BrowseError,
    },

    FileSelected {
        ticket: Ticket,
        entry: DirectoryEntry,
    },
    FileLoaded {
        ticket: Ticket,
        content: String,
    },
    FileFailed {
        ticket: Ticket,
        error: BrowseError,
    },
}

impl Event {
    /// The failure carried by this event, if any.
    pub fn error(&self) -> Option<&BrowseError> {
        match self {
            Event::Rejected { error }
            | Event::LoadFailed { error, .. }
            | Event::NavigationFailed { error, .. }
            | Event::FileFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Whether `reduce` changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The event answered a request that is no longer current.
    Stale,
    /// The event was refused without touching the state.
    Ignored,
}

/// Applies one event to the state.
pub fn reduce(mut state: BrowserState, event: Event) -> (BrowserState, Outcome) {
    match event {
        Event::Rejected { error } => {
            state.error = Some(error);
        }

        // A new load tears everything down before the first request goes
        // out, so old data is never shown next to new.
        Event::LoadStarted { ticket } => {
            state = BrowserState {
                pending_load: Some(ticket),
                ..BrowserState::default()
            };
        }
        Event::LoadSucceeded {
            ticket,
            reference,
            metadata,
            listing,
        } => {
            if state.pending_load != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_load = None;
            state.repository = Some(LoadedRepository {
                reference,
                metadata,
            });
            state.current_path = String::new();
            state.listing = listing;
        }
        Event::LoadFailed { ticket, error } => {
            if state.pending_load != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_load = None;
            state.error = Some(error);
        }

        Event::NavigationStarted { ticket } => {
            state.pending_listing = Some(ticket);
            state.error = None;
        }
        Event::NavigationSucceeded {
            ticket,
            path,
            listing,
        } => {
            if state.pending_listing != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_listing = None;
            state.current_path = path;
            state.listing = listing;
        }
        Event::NavigationFailed { ticket, error } => {
            if state.pending_listing != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_listing = None;
            state.error = Some(error);
        }

        // Selections need a loaded repository with no reload in flight.
        Event::FileSelected { ticket, entry } => {
            if entry.content_locator().is_none()
                || state.repository.is_none()
                || state.pending_load.is_some()
            {
                return (state, Outcome::Ignored);
            }
            state.pending_file = Some(ticket);
            state.selected_file = Some(entry);
            state.file_content = None;
            state.error = None;
        }
        Event::FileLoaded { ticket, content } => {
            if state.pending_file != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_file = None;
            if let Some(file) = state.selected_file.clone() {
                state.file_content = Some(FileContent { file, content });
            }
        }
        Event::FileFailed { ticket, error } => {
            if state.pending_file != Some(ticket) {
                return (state, Outcome::Stale);
            }
            state.pending_file = None;
            state.error = Some(error);
        }
    }

    (state, Outcome::Applied)
}

/// Parent of a `/`-separated path; `None` at the root.
///
/// "a/b/c" -> "a/b", "a" -> "".
pub fn parent_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    match path.rsplit_once('/') {
        Some((parent, _)) => Some(parent.to_string()),
        None => Some(String::new()),
    }
}
