//! World generation error types.

use glade_config::ConfigError;
use glade_terrain::PlacementError;

/// Errors that can occur while building a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A scatter pass rejected its parameters.
    #[error("cannot place {group}: {source}")]
    Placement {
        /// Which population failed ("trees", "mushrooms").
        group: &'static str,
        /// Underlying placement error.
        #[source]
        source: PlacementError,
    },
}
