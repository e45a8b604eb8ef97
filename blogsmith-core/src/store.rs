//! Post store
//!
//! Posts are markdown files named `<UTC timestamp>-<slug>.md` with a YAML
//! front-matter block. The timestamp carries milliseconds and is unique per
//! directory, so filenames sort lexically by creation time and the listing
//! order is simply filename descending.

use crate::generation::ContentDraft;
use crate::seo::OptimizationResult;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const FRONT_MATTER_DELIMITER: &str = "---";
const POST_EXTENSION: &str = "md";
const FILENAME_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Metadata block written ahead of the body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFrontMatter {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub model: String,
    pub word_count: usize,
    /// Internal links to the site found in the body
    pub backlinks: usize,
    pub topic: String,
    pub slug: String,
}

impl PostFrontMatter {
    /// Front matter for a draft and its optimization result
    pub fn from_draft(draft: &ContentDraft, optimization: &OptimizationResult) -> Self {
        Self {
            title: optimization.meta.title.clone(),
            description: optimization.meta.description.clone(),
            keywords: optimization.meta.keywords.clone(),
            generated_at: Some(draft.generated_at),
            model: draft.model_used.clone(),
            word_count: draft.word_count,
            backlinks: optimization.analysis.internal_links.count,
            topic: draft.topic.clone(),
            slug: optimization.meta.slug.clone(),
        }
    }
}

/// A post read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPost {
    pub path: PathBuf,
    pub front_matter: PostFrontMatter,
    pub body: String,
}

pub struct PostStore {
    root: PathBuf,
}

impl PostStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a post record, returning its path
    pub async fn save(&self, front_matter: &PostFrontMatter, body: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create output directory {}", self.root.display()))?;

        let timestamp = front_matter.generated_at.unwrap_or_else(Utc::now);
        let prefix = self.unused_prefix(timestamp).await?;
        let path = self.root.join(format!("{prefix}{}.{POST_EXTENSION}", front_matter.slug));

        let content = render_post(front_matter, body)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write post {}", path.display()))?;

        info!("Saved post to {}", path.display());
        Ok(path)
    }

    /// Read a post; plain markdown loads with empty front matter
    pub async fn load(path: &Path) -> Result<StoredPost> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read post {}", path.display()))?;
        let (front_matter, body) = parse_post(&content);

        Ok(StoredPost { path: path.to_path_buf(), front_matter, body })
    }

    /// Post files, newest first. A missing directory lists as empty.
    pub async fn list(&self) -> Result<Vec<PathBuf>> {
        if !fs::try_exists(&self.root).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to read output directory {}", self.root.display()))?;

        let mut posts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == POST_EXTENSION) {
                posts.push(path);
            }
        }

        posts.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(posts)
    }

    /// Every post, loaded, newest first
    pub async fn list_posts(&self) -> Result<Vec<StoredPost>> {
        let mut posts = Vec::new();
        for path in self.list().await? {
            posts.push(Self::load(&path).await?);
        }
        Ok(posts)
    }

    /// Delete all but the newest `keep` posts, returning the removed paths
    pub async fn cleanup(&self, keep: usize) -> Result<Vec<PathBuf>> {
        let stale: Vec<PathBuf> = self.list().await?.into_iter().skip(keep).collect();

        for path in &stale {
            fs::remove_file(path)
                .await
                .with_context(|| format!("Failed to delete {}", path.display()))?;
            debug!("Deleted {}", path.display());
        }

        if !stale.is_empty() {
            info!("Removed {} old posts, kept {}", stale.len(), keep);
        }
        Ok(stale)
    }

    /// Timestamp prefix no existing post uses. A taken millisecond moves
    /// forward, which keeps a later save sorting after an earlier one.
    async fn unused_prefix(&self, timestamp: DateTime<Utc>) -> Result<String> {
        let existing: Vec<String> = self
            .list()
            .await?
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        let mut at = timestamp;
        loop {
            let prefix = format!("{}-", at.format(FILENAME_TIME_FORMAT));
            if !existing.iter().any(|name| name.starts_with(&prefix)) {
                return Ok(prefix);
            }
            at += TimeDelta::milliseconds(1);
        }
    }
}

fn render_post(front_matter: &PostFrontMatter, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(front_matter).context("Failed to serialize front matter")?;
    Ok(format!(
        "{FRONT_MATTER_DELIMITER}\n{yaml}{FRONT_MATTER_DELIMITER}\n\n{}\n",
        body.trim_end()
    ))
}

/// Split front matter from the body. A leading `---` that is not followed
/// by a YAML mapping is a horizontal rule, and the whole file is body.
fn parse_post(content: &str) -> (PostFrontMatter, String) {
    let normalized = content.replace("\r\n", "\n");
    let Some(rest) = normalized.strip_prefix("---\n") else {
        return (PostFrontMatter::default(), normalized);
    };

    let (yaml, body) = match rest.find("\n---\n") {
        Some(end) => (&rest[..end], &rest[end + 5..]),
        None => match rest.strip_suffix("\n---") {
            Some(yaml) => (yaml, ""),
            None => return (PostFrontMatter::default(), normalized.clone()),
        },
    };

    match serde_yaml::from_str::<PostFrontMatter>(yaml) {
        Ok(front_matter) => (front_matter, body.trim_start_matches('\n').to_string()),
        Err(e) => {
            debug!("Leading block is not front matter ({}), reading as plain markdown", e);
            (PostFrontMatter::default(), normalized.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn front_matter(slug: &str, at: DateTime<Utc>) -> PostFrontMatter {
        PostFrontMatter {
            title: "Remote Python Jobs".to_string(),
            description: "Where to find remote Python work.".to_string(),
            keywords: vec!["remote jobs".to_string(), "python".to_string()],
            generated_at: Some(at),
            model: "gemini-2.5-pro".to_string(),
            word_count: 1200,
            backlinks: 2,
            topic: "remote python jobs".to_string(),
            slug: slug.to_string(),
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path().join("posts"));
        let meta = front_matter("remote-python-jobs", at(1));

        let path = store.save(&meta, "# Remote Python Jobs\n\nBody text.\n").await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2025-03-01T09-30-00.000-remote-python-jobs.md"
        );

        let post = PostStore::load(&path).await.unwrap();
        assert_eq!(post.front_matter, meta);
        assert_eq!(post.body, "# Remote Python Jobs\n\nBody text.\n");
    }

    #[tokio::test]
    async fn test_load_plain_markdown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.md");
        tokio::fs::write(&path, "# Draft\n\nNo metadata here.").await.unwrap();

        let post = PostStore::load(&path).await.unwrap();
        assert_eq!(post.front_matter, PostFrontMatter::default());
        assert_eq!(post.body, "# Draft\n\nNo metadata here.");
    }

    #[tokio::test]
    async fn test_load_markdown_opening_with_horizontal_rule() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ruled.md");
        let content = "---\n\nIntro paragraph.\n\n---\n\nMore text.\n";
        tokio::fs::write(&path, content).await.unwrap();

        let post = PostStore::load(&path).await.unwrap();
        assert_eq!(post.front_matter, PostFrontMatter::default());
        assert_eq!(post.body, content);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails_with_path() {
        let err = PostStore::load(Path::new("/nonexistent/post.md")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/post.md"));
    }

    #[tokio::test]
    async fn test_same_second_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path());
        let meta = front_matter("same", at(2));

        let first = store.save(&meta, "one").await.unwrap();
        let second = store.save(&meta, "two").await.unwrap();
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("T09-30-00.001-same.md"));
    }

    #[tokio::test]
    async fn test_same_second_saves_keep_creation_order() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path());
        let older = store.save(&front_matter("same", at(2)), "one").await.unwrap();
        let newer = store.save(&front_matter("other", at(2)), "two").await.unwrap();
        let newest = store.save(&front_matter("same", at(2)), "three").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![newest.clone(), newer.clone(), older.clone()]);

        let removed = store.cleanup(1).await.unwrap();
        assert_eq!(removed, vec![newer, older]);
        let kept = store.list_posts().await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].path, newest);
        assert_eq!(kept[0].body, "three\n");
    }

    #[tokio::test]
    async fn test_list_newest_first_and_cleanup() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path());
        for day in [3, 1, 5, 2, 4] {
            store.save(&front_matter(&format!("day-{day}"), at(day)), "body").await.unwrap();
        }
        tokio::fs::write(dir.path().join("notes.txt"), "ignored").await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<String> = listed
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 5);
        assert!(names[0].ends_with("day-5.md"));
        assert!(names[4].ends_with("day-1.md"));

        let removed = store.cleanup(2).await.unwrap();
        assert_eq!(removed.len(), 3);
        let remaining = store.list_posts().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].front_matter.slug, "day-5");
        assert_eq!(remaining[1].front_matter.slug, "day-4");
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path().join("absent"));
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.cleanup(10).await.unwrap().is_empty());
    }

    #[test]
    fn test_render_has_front_matter_block() {
        let rendered = render_post(&front_matter("s", at(1)), "Body").unwrap();
        assert!(rendered.starts_with("---\ntitle: Remote Python Jobs\n"));
        assert!(rendered.contains("backlinks: 2\n"));
        assert!(rendered.ends_with("---\n\nBody\n"));
    }
}
