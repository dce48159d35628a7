//! Errors reported while configuring an acceleration structure or
//! writing rendered images. Ray queries never fail, they report no
//! hit instead.

use thiserror::Error;

/// Errors of the **rs_bvh** crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The `"splitmethod"` parameter named an unsupported method.
    #[error("split method \"{0}\" unknown (expected \"sah\", \"middle\" or \"equal\")")]
    UnknownSplitMethod(String),

    /// A numeric parameter is outside of its valid range.
    #[error("parameter \"{name}\" has invalid value {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// A render worker thread panicked.
    #[error("render worker thread panicked")]
    WorkerPanicked,

    /// Writing an image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
