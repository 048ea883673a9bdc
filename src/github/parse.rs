// src/github/parse.rs
// =============================================================================
// Turns whatever the user typed into a RepositoryRef.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main/src   (extra segments are ignored)
//   - git clone https://github.com/owner/repo   (any surrounding text)
//   - owner/repo                            (shorthand)
//
// Pure string handling, no network access.
// =============================================================================

use crate::error::{BrowseError, BrowseResult};
use crate::github::types::RepositoryRef;

const HOST: &str = "github.com/";

/// Parses a repository URL or `owner/name` shorthand.
///
/// Example:
///   "https://github.com/rust-lang/rust" -> rust-lang/rust
pub fn parse(input: &str) -> BrowseResult<RepositoryRef> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BrowseError::EmptyInput);
    }

    let invalid = || BrowseError::InvalidFormat {
        input: trimmed.to_string(),
    };

    let at_host = trimmed
        .match_indices(HOST)
        .map(|(at, _)| at)
        .find(|&at| starts_host(&trimmed[..at]));

    let path = match at_host {
        Some(at) => &trimmed[at + HOST.len()..],
        None if is_shorthand(trimmed) => trimmed,
        None => return Err(invalid()),
    };

    // Stop at whitespace, query or fragment
    let path = path
        .split(|c: char| c.is_whitespace() || c == '?' || c == '#')
        .next()
        .unwrap_or("");

    let mut parts = path.split('/');
    let owner = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");
    let name = name.strip_suffix(".git").unwrap_or(name);

    if owner.is_empty() || name.is_empty() {
        return Err(invalid());
    }

    Ok(RepositoryRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

// The host match must be the whole host: preceded by nothing, a `/`
// (after the scheme) or whitespace, with `www.` as the only allowed prefix.
fn starts_host(before: &str) -> bool {
    let before = before.strip_suffix("www.").unwrap_or(before);
    match before.chars().last() {
        None => true,
        Some(c) => c == '/' || c.is_whitespace(),
    }
}

// `owner/name` with nothing else: exactly two non-empty segments, no scheme
// and no whitespace.
fn is_shorthand(text: &str) -> bool {
    if text.contains("://") || text.contains(char::is_whitespace) {
        return false;
    }
    let parts: Vec<&str> = text.split('/').collect();
    parts.len() == 2 && parts.iter().all(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(input: &str) -> (String, String) {
        let repo = parse(input).unwrap();
        (repo.owner, repo.name)
    }

    #[test]
    fn test_parse_github_url() {
        assert_eq!(
            pair("https://github.com/rust-lang/rust"),
            ("rust-lang".to_string(), "rust".to_string())
        );
    }

    #[test]
    fn test_parse_github_url_with_git() {
        assert_eq!(
            pair("https://github.com/user/repo.git"),
            ("user".to_string(), "repo".to_string())
        );
    }

    #[test]
    fn test_parse_ignores_extra_segments_and_query() {
        assert_eq!(
            pair("https://www.github.com/tokio-rs/tokio/tree/master/tokio?tab=readme#top"),
            ("tokio-rs".to_string(), "tokio".to_string())
        );
        assert_eq!(
            pair("github.com/serde-rs/serde/"),
            ("serde-rs".to_string(), "serde".to_string())
        );
    }

    #[test]
    fn test_parse_finds_url_inside_text() {
        assert_eq!(
            pair("  git clone https://github.com/owner/name.git  "),
            ("owner".to_string(), "name".to_string())
        );
    }

    #[test]
    fn test_parse_skips_lookalike_host_before_real_one() {
        assert_eq!(
            pair("mirror of notgithub.com/x/y is github.com/owner/name"),
            ("owner".to_string(), "name".to_string())
        );
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(pair("owner/repo"), ("owner".to_string(), "repo".to_string()));
    }

    #[test]
    fn test_parse_blank_input() {
        assert_eq!(parse("   "), Err(BrowseError::EmptyInput));
    }

    #[test]
    fn test_parse_invalid_url() {
        for input in [
            "https://gitlab.com/user/repo",
            "not a repository",
            "https://github.com/owner",
            "https://github.com//repo",
            "https://github.com/owner/.git",
            "owner/",
            "a/b/c",
            "https://notgithub.com/alice/repo",
            "https://gist.github.com/alice/abc123",
        ] {
            assert!(
                matches!(parse(input), Err(BrowseError::InvalidFormat { .. })),
                "expected InvalidFormat for {:?}",
                input
            );
        }
    }
}
