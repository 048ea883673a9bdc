// src/shell.rs
// =============================================================================
// Terminal front end for the browsing session.
//
// Nothing here decides what state the browser is in; it only turns text
// into session calls and session snapshots into text:
// - render_* functions format a BrowserState for the terminal
// - open_path / save_content back the `cat` and `download` subcommands
// - run_interactive is the `browse` prompt loop
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::browser::{
    breadcrumbs, format_size, sorted, BrowserState, FileContent, LoadedRepository,
    RepositorySession,
};
use crate::error::BrowseError;
use crate::github::{DirectoryEntry, RepositoryProvider};

// -----------------------------------------------------------------------------
// Rendering
// -----------------------------------------------------------------------------

pub fn render_repository(repository: &LoadedRepository) -> String {
    let meta = &repository.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "📦 {}", meta.full_name);
    if let Some(description) = &meta.description {
        let _ = writeln!(out, "   {}", description);
    }
    let _ = write!(out, "   ⭐ {}  🍴 {}", meta.star_count, meta.fork_count);
    if let Some(language) = &meta.primary_language {
        let _ = write!(out, "  🔤 {}", language);
    }
    if let Some(branch) = &meta.default_branch {
        let _ = write!(out, "  🌿 {}", branch);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "   {}", meta.html_url);
    out
}

/// Breadcrumb row with the index `crumb <n>` expects.
pub fn render_breadcrumbs(current_path: &str) -> String {
    breadcrumbs(current_path)
        .iter()
        .enumerate()
        .map(|(i, crumb)| format!("[{}] {}", i, crumb.label))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn render_listing(state: &BrowserState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_breadcrumbs(&state.current_path));

    let entries = sorted(&state.listing);
    if entries.is_empty() {
        let _ = writeln!(out, "   (empty directory)");
    }
    for entry in entries {
        match entry.size() {
            None => {
                let _ = writeln!(out, "   📁 {}/", entry.name());
            }
            Some(size) => {
                let _ = writeln!(out, "   📄 {:<48} {:>12}", entry.name(), format_size(size));
            }
        }
    }
    out
}

fn render_selection(state: &BrowserState) -> String {
    match (&state.selected_file, &state.file_content) {
        (None, _) => "No file selected".to_string(),
        (Some(file), Some(_)) => format!("📄 {}", file.path()),
        (Some(file), None) if state.is_loading_file() => format!("⏳ {} (loading)", file.path()),
        (Some(file), None) => format!("📄 {} (no content)", file.path()),
    }
}

// -----------------------------------------------------------------------------
// Files
// -----------------------------------------------------------------------------

/// Finds a listing entry by name or full path.
pub fn find_entry<'a>(state: &'a BrowserState, name: &str) -> Option<&'a DirectoryEntry> {
    let name = name.trim_matches('/');
    state
        .listing
        .iter()
        .find(|e| e.name() == name || e.path() == name)
}

/// Navigates to the file's directory, selects it and returns its content.
pub async fn open_path<P: RepositoryProvider>(
    session: &RepositorySession<P>,
    path: &str,
) -> Result<FileContent> {
    let path = path.trim_matches('/');
    let parent = match path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    };
    session.navigate_to(parent).await?;

    let state = session.snapshot();
    let entry = find_entry(&state, path)
        .filter(|e| !e.is_dir())
        .cloned()
        .ok_or_else(|| BrowseError::NotFound {
            path: path.to_string(),
        })?;

    session.select_file(entry).await?;
    session
        .snapshot()
        .file_content
        .ok_or_else(|| anyhow!("{} has no downloadable content", path))
}

/// Writes cached content to `output`, or to the file's own name.
pub async fn save_content(file: &FileContent, output: Option<&Path>) -> Result<PathBuf> {
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file.file.name()),
    };
    tokio::fs::write(&target, file.content.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), bytes = file.content.len(), "saved file");
    Ok(target)
}

// -----------------------------------------------------------------------------
// Interactive prompt
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    List,
    Cd(String),
    Up,
    Root,
    Crumb(usize),
    Open(String),
    Cat,
    Save(Option<PathBuf>),
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  load <repo>      open a repository (URL or owner/name)
  ls               list the current directory
  cd <dir|path>    enter a directory (`cd ..` goes up, `cd /` to the root)
  up               go to the parent directory
  root             go to the repository root
  crumb <n>        jump to breadcrumb n
  open <file>      select a file and fetch its content
  cat              print the selected file
  save [file]      save the selected file to disk
  help             show this text
  quit             leave";

/// Parses one prompt line. Blank lines give `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let needs_arg = |what: &str| -> Result<String> {
        if rest.is_empty() {
            Err(anyhow!("usage: {} <{}>", word, what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word {
        "load" => Command::Load(needs_arg("repo")?),
        "ls" => Command::List,
        "cd" => match rest {
            ".." => Command::Up,
            "/" | "" => Command::Root,
            _ => Command::Cd(rest.to_string()),
        },
        "up" => Command::Up,
        "root" => Command::Root,
        "crumb" => {
            let index = needs_arg("n")?;
            Command::Crumb(
                index
                    .parse()
                    .map_err(|_| anyhow!("not a breadcrumb index: {}", index))?,
            )
        }
        "open" => Command::Open(needs_arg("file")?),
        "cat" => Command::Cat,
        "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(anyhow!("unknown command: {} (try `help`)", other)),
    };
    Ok(Some(command))
}

/// Where `cd <target>` should go from `current_path`.
///
/// A directory in the listing wins; otherwise `target` is a path, absolute
/// when it starts with `/`.
pub fn resolve_cd(state: &BrowserState, target: &str) -> String {
    if let Some(entry) = find_entry(state, target).filter(|e| e.is_dir()) {
        return entry.path().to_string();
    }
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.trim_matches('/').to_string();
    }
    let target = target.trim_matches('/');
    if state.current_path.is_empty() {
        target.to_string()
    } else {
        format!("{}/{}", state.current_path, target)
    }
}

/// Runs the `browse` prompt on stdin until `quit` or end of input.
pub async fn run_interactive<P: RepositoryProvider>(
    session: &RepositorySession<P>,
    initial: Option<&str>,
) -> Result<()> {
    if let Some(repo) = initial {
        run_command(session, Command::Load(repo.to_string())).await?;
    } else {
        println!("{}", HELP);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&session.snapshot())?;

        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };

        match parse_command(&line) {
            Ok(Some(Command::Quit)) => return Ok(()),
            Ok(Some(command)) => run_command(session, command).await?,
            Ok(None) => {}
            Err(e) => println!("⚠️  {}", e),
        }
    }
}

fn print_prompt(state: &BrowserState) -> Result<()> {
    let repo = state
        .repository
        .as_ref()
        .map(|r| r.reference.to_string())
        .unwrap_or_default();
    print!("{}:/{}> ", repo, state.current_path);
    std::io::stdout().flush()?;
    Ok(())
}

// Runs one command and prints what changed. Session failures are shown and
// the prompt carries on; only I/O on our own side ends the loop.
async fn run_command<P: RepositoryProvider>(
    session: &RepositorySession<P>,
    command: Command,
) -> Result<()> {
    let before = session.snapshot();

    let outcome = match &command {
        Command::Load(repo) => session.load_repository(repo).await,
        Command::List | Command::Cat | Command::Help | Command::Quit => Ok(()),
        Command::Cd(target) => session.navigate_to(&resolve_cd(&before, target)).await,
        Command::Up => session.navigate_up().await,
        Command::Root => session.navigate_to_root().await,
        Command::Crumb(index) => match breadcrumbs(&before.current_path).get(*index) {
            Some(crumb) => session.navigate_to(&crumb.path).await,
            None => Err(BrowseError::NotFound {
                path: format!("breadcrumb {}", index),
            }),
        },
        Command::Open(name) => match find_entry(&before, name).filter(|e| !e.is_dir()) {
            Some(entry) => session.select_file(entry.clone()).await,
            None => Err(BrowseError::NotFound { path: name.clone() }),
        },
        Command::Save(_) => Ok(()),
    };

    if let Err(e) = outcome {
        println!("❌ {}", e);
        return Ok(());
    }

    let state = session.snapshot();
    match command {
        Command::Help => println!("{}", HELP),
        Command::Load(_) => {
            if let Some(repository) = &state.repository {
                print!("{}", render_repository(repository));
            }
            print!("{}", render_listing(&state));
        }
        Command::List | Command::Cd(_) | Command::Up | Command::Root | Command::Crumb(_) => {
            print!("{}", render_listing(&state));
        }
        Command::Open(_) => println!("{}", render_selection(&state)),
        Command::Cat => match &state.file_content {
            Some(file) => println!("{}", file.content),
            None => println!("{}", render_selection(&state)),
        },
        Command::Save(output) => match &state.file_content {
            Some(file) => {
                let target = save_content(file, output.as_deref()).await?;
                println!("💾 Saved {} to {}", file.file.path(), target.display());
            }
            None => println!("{}", render_selection(&state)),
        },
        Command::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn dir(path: &str) -> DirectoryEntry {
        DirectoryEntry::Directory {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
        }
    }

    fn file(path: &str, size: u64) -> DirectoryEntry {
        DirectoryEntry::File {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            size,
            content_locator: Some(Url::parse("https://raw.example/f").unwrap()),
        }
    }

    fn state_at(path: &str, listing: Vec<DirectoryEntry>) -> BrowserState {
        let mut state = BrowserState::default();
        state.current_path = path.to_string();
        state.listing = listing;
        state
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("load owner/repo").unwrap(),
            Some(Command::Load("owner/repo".to_string()))
        );
        assert_eq!(parse_command("cd ..").unwrap(), Some(Command::Up));
        assert_eq!(parse_command("cd /").unwrap(), Some(Command::Root));
        assert_eq!(
            parse_command("cd src/bin").unwrap(),
            Some(Command::Cd("src/bin".to_string()))
        );
        assert_eq!(parse_command("crumb 2").unwrap(), Some(Command::Crumb(2)));
        assert_eq!(parse_command("save").unwrap(), Some(Command::Save(None)));
        assert_eq!(
            parse_command("save out.txt").unwrap(),
            Some(Command::Save(Some(PathBuf::from("out.txt"))))
        );
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("load").is_err());
        assert!(parse_command("open").is_err());
        assert!(parse_command("crumb x").is_err());
        assert!(parse_command("rm -rf").is_err());
    }

    #[test]
    fn test_resolve_cd() {
        let state = state_at("src", vec![dir("src/bin"), file("src/main.rs", 1)]);
        assert_eq!(resolve_cd(&state, "bin"), "src/bin");
        assert_eq!(resolve_cd(&state, "nested/deeper/"), "src/nested/deeper");
        assert_eq!(resolve_cd(&state, "/docs/"), "docs");

        let root = state_at("", vec![]);
        assert_eq!(resolve_cd(&root, "docs"), "docs");
    }

    #[test]
    fn test_render_listing_sorted_with_sizes() {
        let state = state_at("src", vec![file("src/lib.rs", 1536), dir("src/bin")]);
        let text = render_listing(&state);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[0] Root / [1] src");
        assert!(lines[1].contains("📁 bin/"));
        assert!(lines[2].contains("lib.rs"));
        assert!(lines[2].ends_with("1.5 KB"));
    }

    #[test]
    fn test_render_selection_states() {
        let mut state = state_at("", vec![]);
        assert_eq!(render_selection(&state), "No file selected");

        state.selected_file = Some(file("a.txt", 1));
        assert_eq!(render_selection(&state), "📄 a.txt (no content)");
    }

    #[tokio::test]
    async fn test_save_content_writes_output() {
        let file = FileContent {
            file: file("docs/notes.txt", 5),
            content: "hello".to_string(),
        };
        let dir = std::env::temp_dir().join(format!("repo-browser-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let target = dir.join("copy.txt");
        let written = save_content(&file, Some(&target)).await.unwrap();
        assert_eq!(written, target);
        assert_eq!(tokio::fs::read_to_string(&target).await.unwrap(), "hello");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
