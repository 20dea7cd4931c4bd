use thiserror::Error;

use crate::drawings::AnchorKind;

/// Errors raised by the drawing model itself.
///
/// These are caller-contract violations (asking an anchor for data its variant does not carry),
/// never transient conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawingError {
    #[error("{kind} anchors have no bottom-right marker")]
    UnsupportedAnchorKind { kind: AnchorKind },
}
