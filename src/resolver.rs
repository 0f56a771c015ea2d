//! Locating icon assets across search roots.
//!
//! Resolution is layered defense: identifiers are validated syntactically
//! before any filesystem access, the only path construction is a single
//! bounded join of a trusted root with the relative search path, and a hit
//! from an extra search root is additionally required to canonicalize to a
//! descendant of its root.  Even a validator bug cannot escape the
//! configured roots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::IconError;
use crate::validation;

/// Capability for asset-pipeline lookups.
///
/// The finder is authoritative: it is consulted before any extra search
/// roots.  Implementations are expected to be traversal-safe by
/// construction, i.e. to only ever hand back paths inside the asset
/// pipeline's own storage.
pub trait AssetFinder: Send + Sync {
    /// Returns the absolute path backing `relative`, if the pipeline has it.
    fn find(&self, relative: &str) -> Option<PathBuf>;
}

/// [`AssetFinder`] over an ordered list of root directories.
///
/// The batteries-included finder for applications without an asset
/// pipeline: probes each root in order and returns the first regular file
/// whose canonical path stays inside its root.
pub struct DirectoryFinder {
    roots: Vec<PathBuf>,
}

impl DirectoryFinder {
    /// Creates a finder over `roots`, probed in order.
    pub fn new(roots: Vec<PathBuf>) -> DirectoryFinder {
        DirectoryFinder { roots }
    }
}

impl AssetFinder for DirectoryFinder {
    fn find(&self, relative: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .find_map(|root| contained_file(root, relative))
    }
}

/// A resolved on-disk asset plus the freshness token used for caching.
///
/// Created per request by [`Resolver::resolve`]; never persisted.
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    /// Absolute path of the backing file.
    pub path: PathBuf,
    /// Modification time, used to key the content cache.
    pub modified: SystemTime,
}

/// Turns `(name, library)` into a single trusted file path.
pub(crate) struct Resolver {
    finder: Box<dyn AssetFinder>,
    extra_roots: Vec<PathBuf>,
}

impl Resolver {
    pub fn new(finder: Box<dyn AssetFinder>) -> Resolver {
        Resolver {
            finder,
            extra_roots: Vec::new(),
        }
    }

    pub fn set_extra_roots(&mut self, roots: Vec<PathBuf>) {
        self.extra_roots = roots;
    }

    /// The relative search path for `(name, library)`.
    ///
    /// Callers must have validated both parts; this only joins them.
    pub fn search_path(name: &str, library: Option<&str>) -> String {
        match library {
            Some(library) => format!("icons/{library}/{name}.svg"),
            None => format!("icons/{name}.svg"),
        }
    }

    /// Resolves `(name, library)` to a file, or reports why it could not.
    ///
    /// Validation happens first; an invalid identifier never causes a
    /// filesystem probe.  `NotFound` is a normal outcome, not a hard error.
    pub fn resolve(&self, name: &str, library: Option<&str>) -> Result<ResolvedAsset, IconError> {
        if !validation::is_valid_icon_name(name) {
            return Err(IconError::InvalidIdentifier(name.to_string()));
        }
        if let Some(library) = library {
            if !validation::is_valid_library_name(library) {
                return Err(IconError::InvalidIdentifier(library.to_string()));
            }
        }

        let relative = Self::search_path(name, library);

        let path = self
            .finder
            .find(&relative)
            .or_else(|| {
                self.extra_roots
                    .iter()
                    .find_map(|root| contained_file(root, &relative))
            })
            .ok_or_else(|| IconError::NotFound(relative.clone()))?;

        let metadata = fs::metadata(&path).map_err(|e| IconError::read(&path, e))?;
        let modified = metadata.modified().map_err(|e| IconError::read(&path, e))?;

        Ok(ResolvedAsset { path, modified })
    }
}

/// Joins `relative` onto `root` and accepts the result only if it is a
/// regular file whose canonical path is a descendant of the canonical root.
fn contained_file(root: &Path, relative: &str) -> Option<PathBuf> {
    let candidate = root.join(relative);
    if !candidate.is_file() {
        return None;
    }

    let root_canon = root.canonicalize().ok()?;
    let candidate_canon = candidate.canonicalize().ok()?;
    if candidate_canon.starts_with(&root_canon) {
        Some(candidate)
    } else {
        None
    }
}
