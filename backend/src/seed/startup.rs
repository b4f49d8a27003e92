//! Seed file loading and application at startup.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::Dispose;
use crate::domain::ports::ContextProvider;
use crate::domain::seeding::{SeedDocument, SeedOutcome, SeedingError, apply_seed};

/// Errors returned while seeding on startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a valid seed document.
    #[error("failed to parse seed file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Rows could not be written.
    #[error("seeding failed: {0}")]
    Seeding(#[from] SeedingError),
}

/// Apply the seed file at `path`, if one is configured.
///
/// # Examples
///
/// ```rust
/// use homeworks::outbound::persistence::ContextFactory;
/// use homeworks::seed::seed_on_startup;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let contexts = ContextFactory::in_memory("seed-doc-example");
/// let outcome = seed_on_startup(None, &contexts).await.unwrap();
/// assert!(outcome.is_none());
/// # });
/// ```
pub async fn seed_on_startup(
    path: Option<&Path>,
    contexts: &dyn ContextProvider,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    let Some(path) = path else {
        info!(reason = "no seed file configured", "seeding skipped");
        return Ok(None);
    };

    let document = load_seed_document(path)?;
    let context = contexts.new_context();
    let outcome = apply_seed(context.as_ref(), &document).await;
    context.dispose();
    Ok(Some(outcome?))
}

/// Read and parse a seed document.
///
/// # Errors
///
/// Returns [`StartupSeedingError::Read`] when the file cannot be opened and
/// [`StartupSeedingError::Parse`] when it is not a seed document.
pub fn load_seed_document(path: &Path) -> Result<SeedDocument, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_str(&contents).map_err(|source| StartupSeedingError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
