//! Local git repository operations
//!
//! Wraps git2 for repository discovery, history and tags, and the system
//! `git` binary for the index-level commands (diff, stage, commit, push)
//! so that hooks and user configuration apply exactly as on the command line.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository, Signature};

use crate::core::diff::{attach_diffs, parse_name_status, FileChange};
use crate::error::{CommitaiError, Result};

/// Wrapper for local git repository operations
pub struct GitRepository {
    repo: Repository,
    root: PathBuf,
}

impl GitRepository {
    /// Open the git repository in the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Discover a git repository from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| CommitaiError::NotGitRepository)?;
        let root = repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or(CommitaiError::NotGitRepository)?;
        Ok(Self { repo, root })
    }

    /// Check if the current directory is a git repository
    pub fn is_git_repository() -> bool {
        Repository::discover(".").is_ok()
    }

    /// Get the repository root directory
    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Staged changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Collect staged files with their status and own diff section
    pub fn staged_changes(&self) -> Result<Vec<FileChange>> {
        let listing = self.run_checked(
            &["diff", "--cached", "--no-color", "-z", "--name-status"],
            "Failed to get staged files",
        )?;

        let mut changes = parse_name_status(&listing);
        if changes.is_empty() {
            return Err(CommitaiError::NoStagedChanges);
        }

        let full_diff = self.run_checked(
            &[
                "-c",
                "core.quotePath=false",
                "diff",
                "--cached",
                "--no-color",
                "--unified=3",
            ],
            "Failed to get diff",
        )?;
        attach_diffs(&mut changes, &full_diff);

        tracing::debug!(
            files = changes.len(),
            diff_len = full_diff.len(),
            "collected staged changes"
        );
        Ok(changes)
    }

    /// Remove everything from the index, keeping the working tree
    pub fn unstage_all(&self) -> Result<()> {
        if self.has_head() {
            self.run_checked(&["restore", "--staged", "--", "."], "Failed to unstage files")?;
        } else {
            // No commit to restore from yet
            self.run_checked(
                &["rm", "-r", "--cached", "--quiet", "--", "."],
                "Failed to unstage files",
            )?;
        }
        Ok(())
    }

    /// Write the current index as a tree object and return its id
    pub fn snapshot_index(&self) -> Result<String> {
        let tree = self.run_checked(&["write-tree"], "Failed to snapshot the index")?;
        Ok(tree.trim().to_string())
    }

    /// Set the index entries of `paths` to their state in `tree`
    ///
    /// Paths missing from `tree` are dropped from the index. The working
    /// tree is never read.
    pub fn restore_staged_from(&self, tree: &str, paths: &[&str]) -> Result<()> {
        let source = format!("--source={}", tree);
        let mut args = vec!["--literal-pathspecs", "restore", "--staged", source.as_str(), "--"];
        args.extend_from_slice(paths);
        self.run_checked(&args, &format!("Failed to stage {}", paths.join(", ")))?;
        Ok(())
    }

    /// Create a commit with the staged changes
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message], "Commit failed")?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether HEAD points at a commit
    pub fn has_head(&self) -> bool {
        self.repo.head().is_ok()
    }

    /// Most recent commits as `<short-sha> <summary>` lines, newest first
    pub fn recent_commits(&self, limit: usize) -> Result<Vec<String>> {
        self.oneline_log(None, Some(limit))
    }

    /// Commits reachable from HEAD but not from `tag`, as oneline entries
    ///
    /// With no tag, the whole history is returned.
    pub fn commits_since_tag(&self, tag: Option<&str>) -> Result<Vec<String>> {
        self.oneline_log(tag, None)
    }

    fn oneline_log(&self, since: Option<&str>, limit: Option<usize>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(tag) = since {
            let base = self.repo.revparse_single(tag)?.peel_to_commit()?;
            // Hide the tagged commit and all its ancestors (tag..HEAD)
            revwalk.hide(base.id())?;
        }

        let mut lines = Vec::new();
        for oid in revwalk {
            if limit.is_some_and(|n| lines.len() >= n) {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            let sha = commit.id().to_string();
            let summary = commit.summary().unwrap_or("").trim().to_string();
            lines.push(format!("{} {}", &sha[..7.min(sha.len())], summary));
        }

        Ok(lines)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tag operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Most recent tag reachable from HEAD, if any
    pub fn latest_tag(&self) -> Option<String> {
        let mut opts = DescribeOptions::new();
        opts.describe_tags();
        let describe = self.repo.describe(&opts).ok()?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        describe.format(Some(&format)).ok()
    }

    /// Check if a tag exists locally
    pub fn tag_exists(&self, name: &str) -> bool {
        let refname = format!("refs/tags/{}", name);
        self.repo.find_reference(&refname).is_ok()
    }

    /// Create an annotated tag at HEAD
    pub fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tag_exists(name) {
            return Err(CommitaiError::TagAlreadyExists(name.to_string()));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self
            .repo
            .signature()
            .or_else(|_| Signature::now("commitai", "commitai@localhost"))?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    /// Push a specific tag to origin using system git
    pub fn push_tag(&self, tag_name: &str) -> Result<()> {
        self.run_checked(&["push", "origin", tag_name], "Failed to push tag")?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // System git
    // ─────────────────────────────────────────────────────────────────────────

    fn run(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| CommitaiError::GitCommand {
                context: "Failed to execute git".to_string(),
                output: e.to_string(),
            })
    }

    /// Run git and return stdout, turning a non-zero exit into an error
    fn run_checked(&self, args: &[&str], context: &str) -> Result<String> {
        let output = self.run(args)?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommitaiError::GitCommand {
                context: context.to_string(),
                output: format!("{}{}", stdout, stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
