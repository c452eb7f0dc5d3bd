//! Error types
//!
//! Only [`LoadError`] ever leaves a frame: it is fatal at startup. The others
//! describe geometry dropped from a single frame and are recovered where raised.

use std::path::PathBuf;
use thiserror::Error;

/// Startup failure loading the mesh, texture or configuration
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Mesh parse error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("Mesh {0} contains no faces")]
    EmptyMesh(PathBuf),
}

/// A triangle that cannot be seen this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipError {
    #[error("vertex lies behind the camera plane")]
    BehindCamera,
    #[error("triangle projects outside the horizontal margin")]
    OffScreen,
    #[error("triangle faces away from the camera")]
    BackFacing,
    #[error("vertex shader produced a non-finite position")]
    NonFinite,
}

/// A face that references geometry the mesh does not have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("face loop has {0} corners, need at least 3")]
    ShortLoop(usize),
    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },
}

/// Why a candidate triangle was left out of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriangleError {
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A triangle the compositor could not fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RasterizeError {
    #[error("zero-area polygon")]
    Degenerate,
    #[error("screen coordinates exceed the drawable range")]
    CoordinateOverflow,
}

/// Failure writing a surface capture
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("surface buffer does not match its dimensions")]
    BadSurface,
}
