//! Terminal status translation.
//!
//! The transport reports a raw wire-level status (gRPC numbering) when
//! a call finishes; the rest of the library speaks [`Status`], the
//! domain `{ok | code, message}` pair. Translation happens exactly
//! once, at the finish-completion boundary.

use thiserror::Error;

/// Raw terminal status as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportStatus {
    /// Wire-level status code (<https://grpc.github.io/grpc/core/md_doc_statuscodes.html>).
    pub code: u32,
    /// Human-readable detail from the server, possibly empty.
    pub message: String,
}

impl TransportStatus {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        TransportStatus {
            code,
            message: message.into(),
        }
    }

    /// A clean completion.
    pub fn ok() -> Self {
        TransportStatus {
            code: 0,
            message: String::new(),
        }
    }
}

/// Domain error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl ErrorCode {
    /// Map a wire-level code into the domain space. Out-of-range
    /// values collapse to `Unknown`.
    pub fn from_u32(v: u32) -> Self {
        match v {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::DeadlineExceeded => write!(f, "DEADLINE_EXCEEDED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::ResourceExhausted => write!(f, "RESOURCE_EXHAUSTED"),
            Self::FailedPrecondition => write!(f, "FAILED_PRECONDITION"),
            Self::Aborted => write!(f, "ABORTED"),
            Self::OutOfRange => write!(f, "OUT_OF_RANGE"),
            Self::Unimplemented => write!(f, "UNIMPLEMENTED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::DataLoss => write!(f, "DATA_LOSS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
        }
    }
}

/// Domain-level terminal status delivered to the stream observer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct Status {
    pub code: ErrorCode,
    pub message: String,
}

impl Status {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    /// A clean completion.
    pub fn ok() -> Self {
        Status {
            code: ErrorCode::Ok,
            message: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ErrorCode::Ok
    }
}

impl From<TransportStatus> for Status {
    fn from(ts: TransportStatus) -> Self {
        Status {
            code: ErrorCode::from_u32(ts.code),
            message: ts.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for code in 0..=16u32 {
            assert_eq!(ErrorCode::from_u32(code) as u32, code);
        }
    }

    #[test]
    fn unknown_code_collapses() {
        assert_eq!(ErrorCode::from_u32(42), ErrorCode::Unknown);
        assert_eq!(ErrorCode::from_u32(u32::MAX), ErrorCode::Unknown);
    }

    #[test]
    fn translation() {
        let status: Status = TransportStatus::new(14, "connection reset").into();
        assert_eq!(status.code, ErrorCode::Unavailable);
        assert_eq!(status.message, "connection reset");
        assert!(!status.is_ok());
    }

    #[test]
    fn ok_translation() {
        let status: Status = TransportStatus::ok().into();
        assert!(status.is_ok());
        assert!(status.message.is_empty());
    }

    #[test]
    fn display() {
        let status = Status::new(ErrorCode::DeadlineExceeded, "too slow");
        assert_eq!(status.to_string(), "DEADLINE_EXCEEDED: too slow");
    }
}
