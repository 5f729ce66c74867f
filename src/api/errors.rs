use crate::types::errors::{Error, ErrorKind};
use crate::types::Status;

// Stable identifiers attached to failure facts as `error_id`.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    /// Malformed request (relative path, empty target, missing token).
    E_INPUT,
    /// Policy forbids the required change.
    E_POLICY,
    /// Filesystem shape does not allow the primitive (real file where a link was expected).
    E_CONFLICT,
    /// An underlying syscall failed.
    E_IO,
    /// The path to restore from the trash is occupied again.
    E_UNTRASH,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_INPUT => "E_INPUT",
        ErrorId::E_POLICY => "E_POLICY",
        ErrorId::E_CONFLICT => "E_CONFLICT",
        ErrorId::E_IO => "E_IO",
        ErrorId::E_UNTRASH => "E_UNTRASH",
    }
}

/// Status reported when an operation fails with `id` before any mutation.
/// Failures during execution are always [`Status::ActionFailed`].
#[must_use]
pub const fn status_for(id: ErrorId) -> Status {
    match id {
        ErrorId::E_INPUT => Status::BadRequest,
        ErrorId::E_POLICY => Status::PreconditionFailed,
        ErrorId::E_CONFLICT | ErrorId::E_IO | ErrorId::E_UNTRASH => Status::ActionFailed,
    }
}

#[must_use]
pub const fn id_for_kind(kind: ErrorKind) -> ErrorId {
    match kind {
        ErrorKind::InvalidInput => ErrorId::E_INPUT,
        ErrorKind::Policy => ErrorId::E_POLICY,
        ErrorKind::Conflict => ErrorId::E_CONFLICT,
        ErrorKind::Io => ErrorId::E_IO,
    }
}

#[must_use]
pub const fn id_for(e: &Error) -> ErrorId {
    id_for_kind(e.kind)
}
