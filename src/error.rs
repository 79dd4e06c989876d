//! Error taxonomy shared by the detection stages and their collaborators.
//!
//! Finding no lines or no staves is not an error; every stage returns an
//! empty collection in that case.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating inputs, running the pipeline or talking to
/// page sources and storage.
#[derive(Debug, Error)]
pub enum StaffError {
    /// The raster handed to the pipeline is empty or inconsistent.
    #[error("invalid input image: {message}")]
    Input { message: String },

    /// A tunable is outside its valid range.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// A page could not be obtained from the page source.
    #[error("failed to load page {index}: {message}")]
    PageSource { index: usize, message: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image codec error at {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl StaffError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
