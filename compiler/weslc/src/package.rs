//! Package discovery, parsing and registration.
//!
//! Every `.wesl`/`.wgsl` file under the base directory becomes a module
//! under `package`, every file under a `--lib name=dir` directory a module
//! under `name`. Files are read and parsed in parallel, then registered in
//! module path order so module ids do not depend on scheduling.

use std::io;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use wesl_diagnostic::emitter::SourceLookup;
use wesl_diagnostic::Diagnostic;
use wesl_ir::ModulePath;
use wesl_link::{Registry, RegistryError};

use crate::options::LinkOptions;

/// Root segment for modules under the base directory.
pub const PACKAGE_ROOT: &str = "package";

const EXTENSIONS: [&str; 2] = ["wesl", "wgsl"];

/// Failures that stop a command before linking.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("root file `{}` is not inside `{}`", .root.display(), .base.display())]
    RootOutsideBase { root: PathBuf, base: PathBuf },
    #[error("module `{0}` cannot be linked: its scope tree is malformed")]
    Unusable(ModulePath),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Parsed and registered modules plus where they came from.
pub struct Package {
    pub registry: Registry,
    pub root: ModulePath,
    /// Parse diagnostics, in registration order.
    pub diagnostics: Vec<Diagnostic>,
    files: FxHashMap<ModulePath, PathBuf>,
}

impl Package {
    /// File a module was read from.
    pub fn file(&self, module: &ModulePath) -> Option<&Path> {
        self.files.get(module).map(PathBuf::as_path)
    }
}

impl SourceLookup for Package {
    fn source(&self, module: &ModulePath) -> Option<&str> {
        self.registry.source(module)
    }

    fn display_name(&self, module: &ModulePath) -> String {
        match self.file(module) {
            Some(file) => file.display().to_string(),
            None => module.to_string(),
        }
    }
}

/// Read, parse and register every module `options` names.
pub fn load_package(options: &LinkOptions) -> Result<Package, PackageError> {
    let base = canonical(&non_empty(options.base_dir()))?;
    let root_file = canonical(&options.root)?;
    let root = module_path(PACKAGE_ROOT, &base, &root_file).ok_or_else(|| {
        PackageError::RootOutsideBase {
            root: options.root.clone(),
            base: base.clone(),
        }
    })?;

    let mut files = Vec::new();
    collect(PACKAGE_ROOT, &base, &base, &mut files)?;
    for (name, dir) in &options.libs {
        let dir = canonical(dir)?;
        collect(name, &dir, &dir, &mut files)?;
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(base = %base.display(), files = files.len(), "collected sources");

    let parsed: Vec<_> = files
        .into_par_iter()
        .map(|(module, file)| {
            let text = std::fs::read_to_string(&file).map_err(|source| PackageError::Io {
                path: file.clone(),
                source,
            })?;
            Ok((file, wesl_parse::parse(module, text)))
        })
        .collect::<Result<_, PackageError>>()?;

    let mut registry = Registry::new();
    let mut diagnostics = Vec::new();
    let mut paths = FxHashMap::default();
    for (file, output) in parsed {
        diagnostics.extend(output.diagnostics());
        let module = output.module.path().clone();
        if output.fatal_error().is_some() {
            warn!(module = %module, "skipping module with malformed scope tree");
            if module == root {
                return Err(PackageError::Unusable(module));
            }
            continue;
        }
        registry.register(output.module)?;
        paths.insert(module, file);
    }

    Ok(Package {
        registry,
        root,
        diagnostics,
        files: paths,
    })
}

/// Module path of `file` inside `dir`, rooted at `root`.
///
/// `dir/a/b.wesl` becomes `root::a::b`.
pub fn module_path(root: &str, dir: &Path, file: &Path) -> Option<ModulePath> {
    let relative = file.strip_prefix(dir).ok()?.with_extension("");
    let mut segments = vec![root.to_owned()];
    for component in relative.components() {
        let Component::Normal(name) = component else {
            return None;
        };
        segments.push(name.to_str()?.to_owned());
    }
    (segments.len() > 1).then(|| ModulePath::new(segments))
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// Gather `(module path, file)` for every source file below `current`.
fn collect(
    root: &str,
    dir: &Path,
    current: &Path,
    out: &mut Vec<(ModulePath, PathBuf)>,
) -> Result<(), PackageError> {
    let io_error = |source| PackageError::Io {
        path: current.to_path_buf(),
        source,
    };
    let mut entries = std::fs::read_dir(current)
        .map_err(io_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect(root, dir, &path, out)?;
        } else if is_source_file(&path) {
            if let Some(module) = module_path(root, dir, &path) {
                out.push((module, path));
            }
        }
    }
    Ok(())
}

fn non_empty(path: PathBuf) -> PathBuf {
    if path.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        path
    }
}

fn canonical(path: &Path) -> Result<PathBuf, PackageError> {
    path.canonicalize().map_err(|source| PackageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
