// src/github/mod.rs
// =============================================================================
// Everything that knows about GitHub.
//
// - parse: turns a URL or "owner/name" shorthand into a RepositoryRef
// - types: repository, metadata and directory entry types (plus the JSON
//   shapes the API returns)
// - fetch: the RepositoryProvider trait and its reqwest implementation
// =============================================================================

mod fetch;
mod parse;
mod types;

pub use fetch::{GitHubClient, RepositoryProvider};
pub use parse::parse;
pub use types::{DirectoryEntry, RepositoryMetadata, RepositoryRef};
