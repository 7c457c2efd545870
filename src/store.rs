use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::util::ensure_directory;

pub const PARSED_NAMESPACE: &str = "parsed";
pub const CHUNKS_NAMESPACE: &str = "chunks";

/// File-backed key-value blob store. Namespaces are subdirectories of the
/// store root; blob names are relative paths within a namespace and may
/// contain `/` separators (e.g. `pdf/Criminal Code Act 1899.json`).
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn open(root: &Path) -> Result<Self> {
        ensure_directory(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root.join(namespace)
    }

    pub fn exists(&self, namespace: &str, name: &str) -> bool {
        self.blob_path(namespace, name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    pub fn read(&self, namespace: &str, name: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(namespace, name)?;
        fs::read(&path).with_context(|| format!("failed to read blob: {}", path.display()))
    }

    pub fn write(&self, namespace: &str, name: &str, data: &[u8]) -> Result<()> {
        let path = self.blob_path(namespace, name)?;
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        fs::write(&path, data).with_context(|| format!("failed to write blob: {}", path.display()))
    }

    /// Lists all blob names in a namespace, relative to the namespace root,
    /// in sorted order. A missing namespace directory lists as empty.
    pub fn list(&self, namespace: &str) -> Result<Vec<String>> {
        let base = self.namespace_dir(namespace);
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        collect_blob_names(&base, &base, &mut names)?;
        names.sort();
        Ok(names)
    }

    fn blob_path(&self, namespace: &str, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            bail!("blob name must not be empty");
        }
        for segment in name.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                bail!("invalid blob name: {name}");
            }
        }

        let mut path = self.namespace_dir(namespace);
        for segment in name.split('/') {
            path.push(segment);
        }
        Ok(path)
    }
}

fn collect_blob_names(base: &Path, dir: &Path, names: &mut Vec<String>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            collect_blob_names(base, &path, names)?;
            continue;
        }

        let relative = path
            .strip_prefix(base)
            .with_context(|| format!("blob outside namespace root: {}", path.display()))?;
        let name = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<&str>>>()
            .map(|segments| segments.join("/"))
            .with_context(|| format!("invalid UTF-8 blob name: {}", path.display()))?;

        names.push(name);
    }

    Ok(())
}
