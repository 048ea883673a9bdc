// src/browser/session.rs
// =============================================================================
// The repository session: turns user intents (load, navigate, select) into
// remote lookups and feeds the results through the state reducer.
//
// Each operation follows the same shape:
// 1. take a fresh ticket and apply a "started" event
// 2. await the provider (no lock held)
// 3. apply a "succeeded"/"failed" event carrying the same ticket
//
// Several operations may be in flight at once (e.g. the user clicks a second
// file before the first one arrives). The reducer drops any completion whose
// ticket is no longer the pending one, so the last request always wins and
// in-flight requests never need cancelling.
// =============================================================================

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::browser::state::{parent_path, reduce, BrowserState, Event, Outcome, Ticket};
use crate::error::{BrowseError, BrowseResult};
use crate::github::{self, DirectoryEntry, RepositoryProvider};

pub struct RepositorySession<P> {
    provider: P,
    state: Mutex<BrowserState>,
    tickets: AtomicU64,
}

impl<P: RepositoryProvider> RepositorySession<P> {
    pub fn new(provider: P) -> Self {
        RepositorySession {
            provider,
            state: Mutex::new(BrowserState::default()),
            tickets: AtomicU64::new(0),
        }
    }

    /// A copy of the current state, for rendering.
    pub fn snapshot(&self) -> BrowserState {
        self.state.lock().clone()
    }

    /// Parses `input`, then fetches metadata and the root listing together.
    ///
    /// The previous repository, selection and cached content are dropped
    /// before the requests go out. If either request fails nothing of the
    /// new repository is shown.
    pub async fn load_repository(&self, input: &str) -> BrowseResult<()> {
        let reference = match github::parse(input) {
            Ok(reference) => reference,
            Err(error) => return self.reject(error),
        };

        let ticket = self.next_ticket();
        self.apply(Event::LoadStarted { ticket });
        tracing::debug!(repo = %reference, ticket, "loading repository");

        let fetched = futures::try_join!(
            self.provider.fetch_metadata(&reference),
            self.provider.fetch_listing(&reference, ""),
        );

        let event = match fetched {
            Ok((metadata, listing)) => {
                tracing::info!(repo = %reference, entries = listing.len(), "repository loaded");
                Event::LoadSucceeded {
                    ticket,
                    reference,
                    metadata,
                    listing,
                }
            }
            Err(error) => {
                tracing::warn!(repo = %reference, %error, "repository load failed");
                Event::LoadFailed { ticket, error }
            }
        };
        self.finish(event)
    }

    /// Shows the listing of `path` (`""` for the root).
    ///
    /// On failure the previous path and listing stay in place.
    pub async fn navigate_to(&self, path: &str) -> BrowseResult<()> {
        let path = path.trim_matches('/').to_string();
        let loaded = self
            .state
            .lock()
            .repository
            .as_ref()
            .map(|repository| repository.reference.clone());
        let Some(reference) = loaded else {
            return self.reject(BrowseError::NoRepository);
        };

        let ticket = self.next_ticket();
        self.apply(Event::NavigationStarted { ticket });
        tracing::debug!(repo = %reference, path = %path, ticket, "navigating");

        let fetched = self.provider.fetch_listing(&reference, &path).await;
        let event = match fetched {
            Ok(listing) => Event::NavigationSucceeded {
                ticket,
                path,
                listing,
            },
            Err(error) => {
                tracing::warn!(path = %path, %error, "navigation failed");
                Event::NavigationFailed { ticket, error }
            }
        };
        self.finish(event)
    }

    /// Moves to the parent directory. Does nothing at the root.
    pub async fn navigate_up(&self) -> BrowseResult<()> {
        let current = self.state.lock().current_path.clone();
        match parent_path(&current) {
            Some(parent) => self.navigate_to(&parent).await,
            None => Ok(()),
        }
    }

    pub async fn navigate_to_root(&self) -> BrowseResult<()> {
        self.navigate_to("").await
    }

    /// Selects a file and fetches its content.
    ///
    /// Directories and files without a content locator are ignored. Fails
    /// with `NoRepository` unless a repository is loaded and no reload is in
    /// flight. The selection is visible immediately; the content follows once
    /// it arrives.
    pub async fn select_file(&self, entry: DirectoryEntry) -> BrowseResult<()> {
        let Some(locator) = entry.content_locator().cloned() else {
            tracing::debug!(path = entry.path(), "ignoring selection without content");
            return Ok(());
        };

        let ticket = self.next_ticket();
        tracing::debug!(path = entry.path(), ticket, "selecting file");
        if self.apply(Event::FileSelected { ticket, entry }) == Outcome::Ignored {
            return self.reject(BrowseError::NoRepository);
        }

        let event = match self.provider.fetch_content(&locator).await {
            Ok(content) => Event::FileLoaded { ticket, content },
            Err(error) => {
                tracing::warn!(%locator, %error, "file fetch failed");
                Event::FileFailed { ticket, error }
            }
        };
        self.finish(event)
    }

    fn next_ticket(&self) -> Ticket {
        self.tickets.fetch_add(1, Ordering::Relaxed) + 1
    }

    // The single place state changes.
    fn apply(&self, event: Event) -> Outcome {
        let mut state = self.state.lock();
        let (next, outcome) = reduce(std::mem::take(&mut *state), event);
        *state = next;
        outcome
    }

    fn reject(&self, error: BrowseError) -> BrowseResult<()> {
        self.apply(Event::Rejected {
            error: error.clone(),
        });
        Err(error)
    }

    // Applies a completion event. Stale completions are dropped quietly, even
    // failed ones: their error belongs to a request nobody is waiting for.
    fn finish(&self, event: Event) -> BrowseResult<()> {
        let error = event.error().cloned();
        match (self.apply(event), error) {
            (Outcome::Stale, _) => {
                tracing::debug!("discarding stale response");
                Ok(())
            }
            (Outcome::Ignored, _) => Ok(()),
            (Outcome::Applied, Some(error)) => Err(error),
            (Outcome::Applied, None) => Ok(()),
        }
    }
}
