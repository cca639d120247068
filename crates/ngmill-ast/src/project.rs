//! Multi-file projects

use crate::document::{ParseOptions, SourceDocument};
use glob::Pattern;
use ngmill_config::ProjectConfig;
use ngmill_foundation::{NgError, NgResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories that are never descended into while loading a project
const IGNORED_DIRS: &[&str] = &[".angular", ".git", ".nx", "node_modules"];

/// An ordered set of source documents
///
/// Documents keep the order in which they were added; [`Project::load`]
/// adds them in file-name order of a depth-first walk.
#[derive(Debug, Default)]
pub struct Project {
    documents: Vec<SourceDocument>,
    skipped: Vec<(PathBuf, NgError)>,
}

impl Project {
    /// Create an empty project
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every matching file under `root`
    ///
    /// Files that fail to parse are logged and recorded in
    /// [`Project::skipped`] instead of failing the whole load.
    pub fn load(root: &Path, config: &ProjectConfig, options: &ParseOptions) -> NgResult<Self> {
        let excludes = config
            .exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| {
                    NgError::config(format!("Invalid exclude pattern '{}': {}", pattern, e))
                })
            })
            .collect::<NgResult<Vec<_>>>()?;

        let mut project = Self::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_ignored_dir(entry));

        for entry in walker {
            let entry = entry.map_err(|e| NgError::Io(std::io::Error::from(e)))?;
            let path = entry.path();

            if !entry.file_type().is_file() || !has_extension(path, &config.extensions) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if excludes.iter().any(|pattern| pattern.matches_path(relative)) {
                debug!(file_path = %relative.display(), "Excluded by pattern");
                continue;
            }

            match SourceDocument::from_path(path, options) {
                Ok(document) => {
                    project.documents.push(document);
                }
                Err(e) => {
                    warn!(file_path = %path.display(), error = %e, "Skipping unparsable file");
                    project.skipped.push((path.to_path_buf(), e));
                }
            }
        }

        info!(
            root = %root.display(),
            documents = project.documents.len(),
            skipped = project.skipped.len(),
            "Project loaded"
        );

        Ok(project)
    }

    /// Add a document, replacing any document with the same path in place
    pub fn add(&mut self, document: SourceDocument) -> &mut SourceDocument {
        let index = match self.position(document.path()) {
            Some(index) => {
                self.documents[index] = document;
                index
            }
            None => {
                self.documents.push(document);
                self.documents.len() - 1
            }
        };
        &mut self.documents[index]
    }

    /// Remove and return the document at `path`
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<SourceDocument> {
        let index = self.position(path.as_ref())?;
        Some(self.documents.remove(index))
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&SourceDocument> {
        let index = self.position(path.as_ref())?;
        self.documents.get(index)
    }

    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut SourceDocument> {
        let index = self.position(path.as_ref())?;
        self.documents.get_mut(index)
    }

    /// Documents in project order
    pub fn documents(&self) -> impl Iterator<Item = &SourceDocument> {
        self.documents.iter()
    }

    pub fn documents_mut(&mut self) -> impl Iterator<Item = &mut SourceDocument> {
        self.documents.iter_mut()
    }

    /// Files that were found but could not be parsed by [`Project::load`]
    pub fn skipped(&self) -> &[(PathBuf, NgError)] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.documents.iter().position(|doc| doc.path() == path)
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
