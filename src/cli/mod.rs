//! CLI commands

mod info;
mod predict;
mod serve;

pub use info::info;
pub use predict::predict;
pub use serve::serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::artifact::Artifact;
use crate::engine::Predictor;

/// carprice - vehicle price prediction server
#[derive(Parser)]
#[command(name = "carprice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction server
    Serve {
        /// Artifact file or directory
        #[arg(long, short, env = "CARPRICE_ARTIFACT")]
        artifact: Option<PathBuf>,

        /// Config file (.yaml, .yml or .json)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Port to listen on (default: 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (default: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
    },

    /// Validate an artifact and print its layout
    Info {
        /// Artifact file or directory
        #[arg(long, short, env = "CARPRICE_ARTIFACT")]
        artifact: Option<PathBuf>,

        /// Config file (.yaml, .yml or .json)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Predict one price without starting the server
    Predict {
        /// Artifact file or directory
        #[arg(long, short, env = "CARPRICE_ARTIFACT")]
        artifact: Option<PathBuf>,

        /// Config file (.yaml, .yml or .json)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Request body as JSON, or @path to read it from a file
        #[arg(long, short)]
        input: String,
    },
}

/// Load and validate the artifact, then wrap it for prediction
///
/// Also returns the file that was read, which differs from `path` when
/// `path` is a directory.
pub fn load_predictor(path: &Path) -> Result<(Predictor, PathBuf)> {
    let (artifact, source) = Artifact::load_with_source(path)
        .with_context(|| format!("failed to load artifact from {}", path.display()))?;
    let summary = artifact.summary();
    tracing::info!(
        variant = summary.variant,
        n_features = summary.n_features,
        "Loaded artifact {}",
        source.path.display()
    );
    Ok((Predictor::new(artifact), source.path))
}
