//! Rendering groups to external formats.

#[cfg(feature = "svg-io")]
pub mod svg;
