//! Template retrieval from a remote archive host or a local directory
//!
//! Both locations are read completely into memory before the destination is
//! touched. The destination is then replaced wholesale, so a failed download
//! never damages an existing directory and repeated fetches never leave
//! stale files behind.

use super::source::TemplateSource;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::product::ProductConfig;
use anyhow::Context;
use std::ffi::OsStr;
use std::future::Future;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use url::Url;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Something that can materialize a [`TemplateSource`] into a directory
pub trait TemplateRetriever {
    /// Fetch `source` and replace `dest` with its files
    fn retrieve(
        &self,
        source: &TemplateSource,
        dest: &Path,
    ) -> impl Future<Output = ScaffoldResult<()>> + Send;
}

/// Where templates are read from
#[derive(Debug, Clone)]
pub enum TemplateLocation {
    /// Archive host laid out like `codeload.github.com`
    Remote(Url),
    /// Directory holding one sub-directory per template name
    Local(PathBuf),
}

impl TemplateLocation {
    /// Remote location from a product config, honouring the env override
    pub fn from_config<C: ProductConfig>(config: &C) -> anyhow::Result<Self> {
        let url_str = std::env::var(config.archive_host_env())
            .unwrap_or_else(|_| config.default_archive_host().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid template host: {}", url_str))?;
        Ok(Self::Remote(url))
    }
}

/// What a template entry holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContents {
    /// Regular file with its unix permission bits, when the source records them
    File { data: Vec<u8>, mode: Option<u32> },
    /// Symbolic link, target relative to the directory holding the link
    Symlink(PathBuf),
}

/// One entry of a template, relative to the template root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub contents: TemplateContents,
}

impl TemplateFile {
    pub fn file(path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: TemplateContents::File {
                data: data.into(),
                mode: None,
            },
        }
    }

    pub fn symlink(path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contents: TemplateContents::Symlink(target.into()),
        }
    }

    /// File bytes, `None` for links
    pub fn data(&self) -> Option<&[u8]> {
        match &self.contents {
            TemplateContents::File { data, .. } => Some(data),
            TemplateContents::Symlink(_) => None,
        }
    }
}

enum LocalEntry {
    File {
        path: PathBuf,
        relative: PathBuf,
        mode: Option<u32>,
    },
    Link {
        path: PathBuf,
        relative: PathBuf,
    },
}

/// Template fetcher - handles retrieving templates from remote or local sources
#[derive(Debug, Clone)]
pub struct TemplateFetcher {
    location: TemplateLocation,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(location: TemplateLocation, user_agent: &str) -> Self {
        Self {
            location,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> anyhow::Result<Self> {
        let location = TemplateLocation::from_config(config)?;
        Ok(Self::new(location, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateLocation::Local(path), user_agent)
    }

    /// Get the template location
    pub fn location(&self) -> &TemplateLocation {
        &self.location
    }

    /// Branch archive URL: `{host}/{owner}/{name}/zip/refs/heads/{branch}`
    pub fn archive_url(host: &Url, source: &TemplateSource) -> ScaffoldResult<Url> {
        let mut url = host.clone();
        url.path_segments_mut()
            .map_err(|_| ScaffoldError::NetworkFailure {
                template: source.to_string(),
                reason: format!("template host cannot have path segments: {}", host),
            })?
            .pop_if_empty()
            .push(&source.owner)
            .push(&source.name)
            .extend(["zip", "refs", "heads"])
            .extend(source.branch.split('/'));
        Ok(url)
    }

    async fn download(
        &self,
        host: &Url,
        source: &TemplateSource,
    ) -> ScaffoldResult<Vec<TemplateFile>> {
        let url = Self::archive_url(host, source)?;
        tracing::debug!(%url, "downloading template archive");

        let network_failure = |reason: String| ScaffoldError::NetworkFailure {
            template: source.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| network_failure(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScaffoldError::TemplateNotFound {
                template: source.to_string(),
            });
        }
        if !status.is_success() {
            return Err(network_failure(format!("HTTP {} from {}", status, url)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| network_failure(e.to_string()))?;
        tracing::debug!(bytes = bytes.len(), "template archive received");

        extract_archive(&bytes).map_err(|e| network_failure(format!("{:#}", e)))
    }

    async fn read_local(
        &self,
        root: &Path,
        source: &TemplateSource,
    ) -> ScaffoldResult<Vec<TemplateFile>> {
        let template_dir = root.join(&source.name);
        if !template_dir.is_dir() {
            return Err(ScaffoldError::TemplateNotFound {
                template: source.to_string(),
            });
        }
        tracing::debug!(dir = %template_dir.display(), "reading local template");

        let read_failure = |reason: String| ScaffoldError::TemplateReadFailure {
            template: source.to_string(),
            reason,
        };

        let mut entries = Vec::new();
        for entry in WalkDir::new(&template_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| read_failure(e.to_string()))?;
            let file_type = entry.file_type();
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&template_dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            // A local checkout may carry its own history
            if relative.components().next() == Some(Component::Normal(OsStr::new(".git"))) {
                continue;
            }
            let path = entry.path().to_path_buf();
            if file_type.is_symlink() {
                entries.push(LocalEntry::Link { path, relative });
            } else {
                let mode = file_mode(&entry);
                entries.push(LocalEntry::File {
                    path,
                    relative,
                    mode,
                });
            }
        }

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            let file = match entry {
                LocalEntry::File {
                    path,
                    relative,
                    mode,
                } => {
                    let data = fs::read(&path).await.map_err(|e| {
                        read_failure(format!("failed to read {}: {}", path.display(), e))
                    })?;
                    TemplateFile {
                        path: relative,
                        contents: TemplateContents::File { data, mode },
                    }
                }
                LocalEntry::Link { path, relative } => {
                    let target = fs::read_link(&path).await.map_err(|e| {
                        read_failure(format!("failed to read link {}: {}", path.display(), e))
                    })?;
                    TemplateFile::symlink(relative, target)
                }
            };
            files.push(file);
        }

        Ok(files)
    }
}

impl TemplateRetriever for TemplateFetcher {
    async fn retrieve(&self, source: &TemplateSource, dest: &Path) -> ScaffoldResult<()> {
        let files = match &self.location {
            TemplateLocation::Remote(host) => self.download(host, source).await?,
            TemplateLocation::Local(root) => self.read_local(root, source).await?,
        };
        materialize(&files, dest).await
    }
}

/// Unpack a branch archive, dropping its single top-level directory
pub fn extract_archive(zip_bytes: &[u8]) -> anyhow::Result<Vec<TemplateFile>> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).context("Failed to read template archive")?;

    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let enclosed = file
            .enclosed_name()
            .ok_or_else(|| anyhow::anyhow!("Archive entry escapes the template: {}", name))?;

        // Archives look like {name}-{branch}/file.txt
        let relative: PathBuf = enclosed.components().skip(1).collect();
        if relative.as_os_str().is_empty() {
            continue;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .with_context(|| format!("Failed to read {} from archive", name))?;

        if file.is_symlink() {
            // Link entries store their target as the entry data
            let target = PathBuf::from(
                String::from_utf8(data)
                    .with_context(|| format!("Link {} has a non UTF-8 target", name))?,
            );
            if !link_stays_inside(&relative, &target) {
                anyhow::bail!(
                    "Archive link escapes the template: {} -> {}",
                    name,
                    target.display()
                );
            }
            files.push(TemplateFile::symlink(relative, target));
        } else {
            files.push(TemplateFile {
                path: relative,
                contents: TemplateContents::File {
                    data,
                    mode: file.unix_mode(),
                },
            });
        }
    }

    if files.is_empty() {
        anyhow::bail!("Template archive is empty");
    }

    Ok(files)
}

/// Replace `dest` with exactly `files`
///
/// Links pointing outside `dest` are refused before anything is removed.
pub async fn materialize(files: &[TemplateFile], dest: &Path) -> ScaffoldResult<()> {
    for file in files {
        if let TemplateContents::Symlink(target) = &file.contents {
            if !link_stays_inside(&file.path, target) {
                return Err(ScaffoldError::write(
                    dest.join(&file.path),
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("link target {} is outside the project", target.display()),
                    ),
                ));
            }
        }
    }

    if fs::try_exists(dest).await.unwrap_or(false) {
        tracing::debug!(dest = %dest.display(), "overwriting existing destination");
        fs::remove_dir_all(dest)
            .await
            .map_err(|e| ScaffoldError::write(dest, e))?;
    }
    fs::create_dir_all(dest)
        .await
        .map_err(|e| ScaffoldError::write(dest, e))?;

    for file in files {
        let target_path = dest.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::write(parent, e))?;
        }
        match &file.contents {
            TemplateContents::File { data, mode } => {
                fs::write(&target_path, data)
                    .await
                    .map_err(|e| ScaffoldError::write(&target_path, e))?;
                apply_mode(&target_path, *mode).await?;
            }
            TemplateContents::Symlink(target) => {
                create_symlink(target, &target_path)
                    .await
                    .map_err(|e| ScaffoldError::write(&target_path, e))?;
            }
        }
    }

    tracing::debug!(files = files.len(), dest = %dest.display(), "template written");
    Ok(())
}

/// Whether `target`, resolved from the directory holding `link`, stays under the root
fn link_stays_inside(link: &Path, target: &Path) -> bool {
    let mut depth = link.components().count() as isize - 1;
    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(unix)]
async fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    fs::symlink(target, link).await
}

#[cfg(not(unix))]
async fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    fs::symlink_file(target, link).await
}

#[cfg(unix)]
fn file_mode(entry: &walkdir::DirEntry) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    entry.metadata().ok().map(|m| m.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_entry: &walkdir::DirEntry) -> Option<u32> {
    None
}

#[cfg(unix)]
async fn apply_mode(path: &Path, mode: Option<u32>) -> ScaffoldResult<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777))
            .await
            .map_err(|e| ScaffoldError::write(path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
async fn apply_mode(_path: &Path, _mode: Option<u32>) -> ScaffoldResult<()> {
    Ok(())
}
