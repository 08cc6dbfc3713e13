//! `git shortlog` backed implementation of [`VersionControlLog`]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use regex::Regex;
use super::{ContributorCount, ShortLogOptions, VcsError, VersionControlLog};

static SHORTLOG_LINE: OnceLock<Regex> = OnceLock::new();

fn shortlog_line() -> &'static Regex {
    // "<count>\t<name> <<email>>", as printed by `git shortlog -s -e`
    SHORTLOG_LINE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\t(.*?)\s*<([^<>]*)>\s*$").expect("shortlog pattern is valid")
    })
}

/// A git checkout on the local filesystem
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open a git work tree, failing if `path` is not inside one
    pub fn open(path: &Path) -> std::result::Result<Self, VcsError> {
        let repo = Self {
            path: path.to_path_buf(),
        };
        let inside = repo
            .git(&["rev-parse", "--is-inside-work-tree"])
            .map_err(|_| VcsError::NotARepository(path.display().to_string()))?;
        if inside.trim() != "true" {
            return Err(VcsError::NotARepository(path.display().to_string()));
        }
        Ok(repo)
    }

    /// Run git in the checkout and return its stdout
    fn git(&self, args: &[&str]) -> std::result::Result<String, VcsError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VcsError::Spawn {
                program: "git".to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::Command {
                command: format!("git {}", args.join(" ")),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControlLog for GitRepo {
    fn short_log(&self, opts: &ShortLogOptions) -> std::result::Result<Vec<ContributorCount>, VcsError> {
        // an explicit revision keeps shortlog from reading stdin
        let range = opts
            .range
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("HEAD");
        if range.starts_with('-') {
            return Err(VcsError::InvalidRange(range.to_string()));
        }

        tracing::debug!("git shortlog {} in {}", range, self.path.display());
        let stdout = self.git(&["shortlog", "-s", "-n", "-e", range, "--"])?;
        parse_shortlog(&stdout)
    }
}

/// Parse `git shortlog -s -e` output, keeping git's ordering
pub fn parse_shortlog(output: &str) -> std::result::Result<Vec<ContributorCount>, VcsError> {
    let re = shortlog_line();
    let mut counts = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let caps = re
            .captures(line)
            .ok_or_else(|| VcsError::Parse(line.to_string()))?;
        let count = caps[1]
            .parse::<u32>()
            .map_err(|_| VcsError::Parse(line.to_string()))?;

        counts.push(ContributorCount::new(&caps[2], &caps[3], count));
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run_git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Committer", "-c", "user.email=committer@example.com", "-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn commit_as(dir: &Path, author: &str, message: &str) {
        run_git(dir, &["commit", "--allow-empty", "-q", "--author", author, "-m", message]);
    }

    #[test]
    fn test_parse_shortlog_keeps_order() {
        let output = "    12\tAlice Liddell <alice@example.com>\n     3\tbob <bob@example.com>\n";
        let counts = parse_shortlog(output).unwrap();
        assert_eq!(
            counts,
            vec![
                ContributorCount::new("Alice Liddell", "alice@example.com", 12),
                ContributorCount::new("bob", "bob@example.com", 3),
            ]
        );
    }

    #[test]
    fn test_parse_shortlog_empty_output() {
        assert!(parse_shortlog("").unwrap().is_empty());
        assert!(parse_shortlog("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_shortlog_rejects_garbage() {
        let err = parse_shortlog("not a shortlog line\n").unwrap_err();
        assert!(matches!(err, VcsError::Parse(_)));
    }

    #[test]
    fn test_short_log_rejects_option_like_range() {
        let repo = GitRepo { path: PathBuf::from(".") };
        let err = repo.short_log(&ShortLogOptions::with_range("--output=/tmp/x")).unwrap_err();
        assert!(matches!(err, VcsError::InvalidRange(_)));
    }

    #[test]
    fn test_open_rejects_plain_directory() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(GitRepo::open(dir.path()), Err(VcsError::NotARepository(_))));
    }

    #[test]
    fn test_short_log_on_real_repository() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init", "-q"]);
        commit_as(dir.path(), "Alice <alice@example.com>", "one");
        commit_as(dir.path(), "Alice <alice@example.com>", "two");
        run_git(dir.path(), &["tag", "v1"]);
        commit_as(dir.path(), "Bob <bob@example.com>", "three");

        let repo = GitRepo::open(dir.path()).unwrap();

        let all = repo.short_log(&ShortLogOptions::default()).unwrap();
        assert_eq!(
            all,
            vec![
                ContributorCount::new("Alice", "alice@example.com", 2),
                ContributorCount::new("Bob", "bob@example.com", 1),
            ]
        );

        let empty_range = repo.short_log(&ShortLogOptions::with_range("")).unwrap();
        assert_eq!(empty_range, all);

        let since_tag = repo.short_log(&ShortLogOptions::with_range("v1..HEAD")).unwrap();
        assert_eq!(since_tag, vec![ContributorCount::new("Bob", "bob@example.com", 1)]);

        let err = repo.short_log(&ShortLogOptions::with_range("no-such-rev")).unwrap_err();
        assert!(matches!(err, VcsError::Command { .. }));
    }
}
