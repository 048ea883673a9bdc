// src/github/types.rs
// =============================================================================
// Data types for repositories and their contents.
//
// There are two layers here:
// - Wire types (RepoResponse, ContentItem) that mirror the JSON the GitHub
//   API returns, deserialized with serde
// - Domain types (RepositoryRef, RepositoryMetadata, DirectoryEntry) that the
//   browsing core works with
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An `owner/name` pair identifying a repository.
///
/// Only constructed through `github::parse`, so both fields are non-empty and
/// the name never ends in `.git`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository description shown above the file tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryMetadata {
    pub full_name: String,
    pub description: Option<String>,
    pub owner_avatar_url: Option<String>,
    pub primary_language: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub html_url: String,
    pub default_branch: Option<String>,
}

/// One item of a directory listing.
///
/// Paths are relative to the repository root, `/`-separated, with no leading
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryEntry {
    Directory {
        name: String,
        path: String,
    },
    File {
        name: String,
        path: String,
        size: u64,
        /// Where the raw content can be downloaded from. Submodules and some
        /// special entries have none.
        content_locator: Option<Url>,
    },
}

impl DirectoryEntry {
    pub fn name(&self) -> &str {
        match self {
            DirectoryEntry::Directory { name, .. } | DirectoryEntry::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DirectoryEntry::Directory { path, .. } | DirectoryEntry::File { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DirectoryEntry::Directory { .. })
    }

    pub fn size(&self) -> Option<u64> {
        match self {
            DirectoryEntry::File { size, .. } => Some(*size),
            DirectoryEntry::Directory { .. } => None,
        }
    }

    /// The download locator, only for files that have one.
    pub fn content_locator(&self) -> Option<&Url> {
        match self {
            DirectoryEntry::File {
                content_locator, ..
            } => content_locator.as_ref(),
            DirectoryEntry::Directory { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Wire types
// -----------------------------------------------------------------------------

/// `GET /repos/{owner}/{name}` response (only the fields we use).
#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    full_name: String,
    description: Option<String>,
    owner: Option<OwnerResponse>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    html_url: String,
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    avatar_url: Option<String>,
}

impl From<RepoResponse> for RepositoryMetadata {
    fn from(repo: RepoResponse) -> Self {
        RepositoryMetadata {
            full_name: repo.full_name,
            description: repo.description,
            owner_avatar_url: repo.owner.and_then(|o| o.avatar_url),
            primary_language: repo.language,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            html_url: repo.html_url,
            default_branch: repo.default_branch,
        }
    }
}

/// One element of a `GET /repos/{owner}/{name}/contents/{path}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentItem {
    name: String,
    pub(crate) path: String,
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    size: u64,
    download_url: Option<String>,
}

/// The contents endpoint returns an array for directories and a single
/// object when the path names a file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Directory(Vec<ContentItem>),
    File(ContentItem),
}

impl From<ContentItem> for DirectoryEntry {
    fn from(item: ContentItem) -> Self {
        if item.type_ == "dir" {
            DirectoryEntry::Directory {
                name: item.name,
                path: item.path,
            }
        } else {
            DirectoryEntry::File {
                name: item.name,
                path: item.path,
                size: item.size,
                content_locator: item
                    .download_url
                    .as_deref()
                    .and_then(|u| Url::parse(u).ok()),
            }
        }
    }
}
