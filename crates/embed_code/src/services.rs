// crates/embed_code/src/services.rs
//
// Side-effecting collaborators: reading sources and persisting images.
// The extraction crates never touch the filesystem or network; the
// embedder receives these as trait objects.

use anyhow::{anyhow, bail, Context, Result};
use cell_renderer::ImageStore;
use embed_error::EmbedError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

const VAULT_SCHEME: &str = "vault://";

/// Where an embed's `PATH` points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Path relative to the vault root (`vault://` stripped).
    Vault(String),
    /// `http://` or `https://` URL.
    Remote(String),
}

impl SourceLocation {
    pub fn parse(path: &str) -> Result<Self, EmbedError> {
        if path.starts_with("https://") || path.starts_with("http://") {
            Ok(SourceLocation::Remote(path.to_string()))
        } else if let Some(rel) = path.strip_prefix(VAULT_SCHEME) {
            Ok(SourceLocation::Vault(rel.to_string()))
        } else {
            Err(EmbedError::Format(
                "invalid source path, use 'vault://...' or 'http[s]://...'".to_string(),
            ))
        }
    }

    /// Path as shown to the user: vault paths without the scheme.
    pub fn display_path(&self) -> &str {
        match self {
            SourceLocation::Vault(p) | SourceLocation::Remote(p) => p,
        }
    }
}

/// Returns the raw text behind a [`SourceLocation`].
pub trait SourceFetcher {
    fn fetch(&self, location: &SourceLocation) -> Result<String>;
}

/// Resolves `relative` below `root`, refusing absolute paths and `..`.
fn vault_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let rel = Path::new(relative);
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        bail!("path '{}' leaves the vault", relative);
    }
    Ok(root.join(rel))
}

/// Reads `vault://` paths from disk and fetches URLs with `curl`.
pub struct StandardFetcher {
    pub vault_root: PathBuf,
}

impl StandardFetcher {
    fn read_vault_file(&self, relative: &str) -> Result<String> {
        let path = vault_path(&self.vault_root, relative)
            .with_context(|| format!("couldn't read file '{}'", relative))?;
        fs::read_to_string(&path).with_context(|| format!("couldn't read file '{}'", relative))
    }

    fn curl(&self, url: &str) -> Result<String> {
        let out = Command::new("curl")
            .args(["-fsSL", url])
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("couldn't fetch '{}'", url))?;
        if !out.status.success() {
            return Err(anyhow!("curl exited with status {}", out.status)
                .context(format!("couldn't fetch '{}'", url)));
        }
        String::from_utf8(out.stdout).with_context(|| format!("couldn't fetch '{}'", url))
    }
}

impl SourceFetcher for StandardFetcher {
    fn fetch(&self, location: &SourceLocation) -> Result<String> {
        match location {
            SourceLocation::Vault(rel) => self.read_vault_file(rel),
            SourceLocation::Remote(url) => self.curl(url),
        }
    }
}

/// Writes images below the vault root, creating folders as needed.
pub struct FsImageStore {
    pub vault_root: PathBuf,
}

impl ImageStore for FsImageStore {
    fn save(&self, path: &str, bytes: &[u8]) -> Result<String> {
        let target = vault_path(&self.vault_root, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create folder {}", parent.display()))?;
        }
        fs::write(&target, bytes)
            .with_context(|| format!("Failed to write image {}", target.display()))?;
        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_locations() {
        assert_eq!(
            SourceLocation::parse("vault://src/a.py").unwrap(),
            SourceLocation::Vault("src/a.py".into())
        );
        assert_eq!(
            SourceLocation::parse("https://x.org/a.py").unwrap(),
            SourceLocation::Remote("https://x.org/a.py".into())
        );
        let err = SourceLocation::parse("/etc/passwd").unwrap_err();
        assert_eq!(err.to_string(), "invalid source path, use 'vault://...' or 'http[s]://...'");
    }

    #[test]
    fn vault_fetch_reads_relative_files() {
        let vault = TempDir::new().unwrap();
        fs::create_dir_all(vault.path().join("code")).unwrap();
        fs::write(vault.path().join("code/a.py"), "print(1)\n").unwrap();

        let fetcher = StandardFetcher {
            vault_root: vault.path().to_path_buf(),
        };
        let text = fetcher.fetch(&SourceLocation::Vault("code/a.py".into())).unwrap();
        assert_eq!(text, "print(1)\n");

        let err = fetcher.fetch(&SourceLocation::Vault("missing.py".into())).unwrap_err();
        assert_eq!(err.to_string(), "couldn't read file 'missing.py'");
    }

    #[test]
    fn unreachable_url_is_a_fetch_error() {
        let fetcher = StandardFetcher {
            vault_root: PathBuf::from("."),
        };
        let url = "http://127.0.0.1:1/x";
        let err = fetcher
            .fetch(&SourceLocation::Remote(url.into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "couldn't fetch 'http://127.0.0.1:1/x'");
    }

    #[test]
    fn vault_paths_cannot_escape() {
        let vault = TempDir::new().unwrap();
        let fetcher = StandardFetcher {
            vault_root: vault.path().to_path_buf(),
        };
        assert!(fetcher.fetch(&SourceLocation::Vault("../secret".into())).is_err());
        assert!(fetcher.fetch(&SourceLocation::Vault("/etc/hosts".into())).is_err());
    }

    #[test]
    fn image_store_creates_folders() {
        let vault = TempDir::new().unwrap();
        let store = FsImageStore {
            vault_root: vault.path().to_path_buf(),
        };
        let stored = store.save("attachments/nb/img_0.png", b"\x89PNG").unwrap();
        assert_eq!(stored, "attachments/nb/img_0.png");
        assert_eq!(
            fs::read(vault.path().join("attachments/nb/img_0.png")).unwrap(),
            b"\x89PNG"
        );
    }
}
