//! Source references and remote download

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;
use uuid::Uuid;

/// A reference to the text being processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// File on the local disk
    Local(PathBuf),
    /// HTTP(S) URL to download first
    Remote(String),
}

impl Source {
    /// Parse a local path, `file://` URL or `http(s)://` URL
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::InvalidSource("empty source reference".into()));
        }

        match reference.split_once("://") {
            Some((scheme, rest)) => match scheme.to_ascii_lowercase().as_str() {
                "http" | "https" if !rest.is_empty() => Ok(Source::Remote(reference.to_string())),
                "file" => file_url_path(reference).map(Source::Local),
                _ => Err(Error::InvalidSource(reference.to_string())),
            },
            None => Ok(Source::Local(PathBuf::from(reference))),
        }
    }

    /// Name of the source: its final path segment, or a fresh UUID when there is none
    pub fn name(&self) -> String {
        let segment = match self {
            Source::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Source::Remote(url) => url_file_name(url).map(str::to_owned),
        };
        segment
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// Local path of a `file://` URL, percent-decoded; the host must be empty or `localhost`
fn file_url_path(reference: &str) -> Result<PathBuf> {
    let invalid = || Error::InvalidSource(reference.to_string());
    let url = Url::parse(reference).map_err(|_| invalid())?;
    if url.path().is_empty() || url.path() == "/" {
        return Err(invalid());
    }
    url.to_file_path().map_err(|_| invalid())
}

/// Final path segment of a URL, ignoring query and fragment
fn url_file_name(url: &str) -> Option<&str> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let (_, path) = path.split_once('/')?;
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Fetches a remote source into a local file
pub trait Downloader: Send + Sync {
    /// Download `url` into `target_dir`, returning the written file
    fn download(&self, url: &str, target_dir: &Path) -> Result<PathBuf>;
}

/// Pick a path in `dir` for `file_name` that does not overwrite an existing file
///
/// Tries `name`, then `name_0` through `name_999` (keeping the extension),
/// then a random UUID.
pub fn unique_target_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    (0..1000)
        .map(|i| dir.join(format!("{stem}_{i}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dir.join(Uuid::new_v4().to_string()))
}

/// Downloader backed by a blocking HTTP client
#[cfg(feature = "download")]
#[derive(Clone)]
pub struct HttpDownloader {
    agent: ureq::Agent,
}

#[cfg(feature = "download")]
impl HttpDownloader {
    /// Create a downloader with the given request timeout
    pub fn new(timeout: std::time::Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

#[cfg(feature = "download")]
impl Downloader for HttpDownloader {
    fn download(&self, url: &str, target_dir: &Path) -> Result<PathBuf> {
        let failed = |reason: String| Error::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        std::fs::create_dir_all(target_dir).map_err(|e| failed(e.to_string()))?;
        let target = unique_target_path(target_dir, &Source::Remote(url.to_string()).name());

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| failed(e.to_string()))?;

        let mut body = response.into_reader();
        let mut file = std::fs::File::create(&target).map_err(|e| failed(e.to_string()))?;
        if let Err(e) = std::io::copy(&mut body, &mut file) {
            let _ = std::fs::remove_file(&target);
            return Err(failed(e.to_string()));
        }

        log::info!("Downloaded {} to {}", url, target.display());
        Ok(target)
    }
}

/// Downloader used when remote support is compiled out
#[derive(Debug, Clone, Default)]
pub struct UnsupportedDownloader;

impl Downloader for UnsupportedDownloader {
    fn download(&self, url: &str, _target_dir: &Path) -> Result<PathBuf> {
        Err(Error::DownloadFailed {
            url: url.to_string(),
            reason: "remote sources are not supported in this build".into(),
        })
    }
}

/// Default downloader for the current build
pub fn default_downloader(timeout: std::time::Duration) -> Box<dyn Downloader> {
    #[cfg(feature = "download")]
    {
        Box::new(HttpDownloader::new(timeout))
    }
    #[cfg(not(feature = "download"))]
    {
        let _ = timeout;
        Box::new(UnsupportedDownloader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_local_paths() {
        assert_eq!(
            Source::parse("/tmp/alice.txt").unwrap(),
            Source::Local(PathBuf::from("/tmp/alice.txt"))
        );
        assert_eq!(
            Source::parse("  notes/alice.txt ").unwrap(),
            Source::Local(PathBuf::from("notes/alice.txt"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_file_urls() {
        assert_eq!(
            Source::parse("file:///tmp/alice.txt").unwrap(),
            Source::Local(PathBuf::from("/tmp/alice.txt"))
        );
        assert_eq!(
            Source::parse("file:///tmp/my%20file.txt").unwrap(),
            Source::Local(PathBuf::from("/tmp/my file.txt"))
        );
        assert_eq!(
            Source::parse("file://localhost/tmp/alice.txt").unwrap(),
            Source::Local(PathBuf::from("/tmp/alice.txt"))
        );
        assert_eq!(
            Source::parse("FILE:///tmp/caf%C3%A9.txt").unwrap(),
            Source::Local(PathBuf::from("/tmp/café.txt"))
        );
        assert!(matches!(
            Source::parse("file://example.com/tmp/alice.txt"),
            Err(Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_parse_remote_urls() {
        assert_eq!(
            Source::parse("https://www.gutenberg.org/files/11/11-0.txt").unwrap(),
            Source::Remote("https://www.gutenberg.org/files/11/11-0.txt".into())
        );
        assert!(matches!(
            Source::parse("HTTP://example.com").unwrap(),
            Source::Remote(_)
        ));
    }

    #[test]
    fn test_parse_invalid_references() {
        for reference in ["", "   ", "ftp://example.com/a.txt", "https://", "file://"] {
            assert!(
                matches!(Source::parse(reference), Err(Error::InvalidSource(_))),
                "reference {reference:?}"
            );
        }
    }

    #[test]
    fn test_source_names() {
        assert_eq!(Source::Local(PathBuf::from("/a/b/alice.txt")).name(), "alice.txt");
        assert_eq!(
            Source::Remote("https://example.com/books/alice.txt?x=1".into()).name(),
            "alice.txt"
        );

        let generated = Source::Remote("https://example.com/".into()).name();
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[test]
    fn test_unique_target_path() {
        let dir = TempDir::new().unwrap();
        let first = unique_target_path(dir.path(), "alice.txt");
        assert_eq!(first, dir.path().join("alice.txt"));

        fs::write(&first, "x").unwrap();
        let second = unique_target_path(dir.path(), "alice.txt");
        assert_eq!(second, dir.path().join("alice_0.txt"));

        fs::write(&second, "x").unwrap();
        assert_eq!(
            unique_target_path(dir.path(), "alice.txt"),
            dir.path().join("alice_1.txt")
        );
    }

    #[test]
    fn test_unsupported_downloader_fails() {
        let dir = TempDir::new().unwrap();
        let result = UnsupportedDownloader.download("https://example.com/a.txt", dir.path());
        assert!(matches!(result, Err(Error::DownloadFailed { .. })));
    }
}
