//! Errors raised by group and attribute-store operations

use crate::group::Kind;

/// Everything that can go wrong while composing groups.
///
/// Degenerate boolean fragments are not in here: they are filtered out
/// silently (and traced through `log`), never reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GroupError {
    /// (KindMismatch) Polygon-kind and polyline-kind geometry were mixed
    #[error("(KindMismatch) expected {expected} geometry, found {found}")]
    KindMismatch { expected: Kind, found: Kind },
    /// (IndexCollision) Two attribute dictionaries were mapped onto the same index
    #[error("(IndexCollision) attribute index {index} is already occupied")]
    IndexCollision { index: usize },
    /// (IndexOutOfRange) An element index past the end of the group
    #[error("(IndexOutOfRange) index {index} is out of range for a group of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
    /// (EmptyOperation) The operation needs at least one element
    #[error("(EmptyOperation) {0} requires a non-empty group")]
    EmptyOperation(&'static str),
    /// (UnsupportedGeometryKind) The geometry is neither areal nor linear
    #[error("(UnsupportedGeometryKind) cannot build a group from {0}")]
    UnsupportedGeometryKind(String),
}
