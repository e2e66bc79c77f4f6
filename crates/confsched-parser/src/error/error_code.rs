//! Error codes for schedule diagnostics.
//!
//! Codes are organized by phase:
//! - `E1xx` - Scanner errors and warnings
//! - `E2xx` - Attribution and reference errors raised while populating rooms

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Scanner (E1xx)
    // =========================================================================
    /// Malformed annotation.
    ///
    /// A line inside the region starts with an annotation marker but does not
    /// carry the expected number of brace-delimited fields.
    E100,

    /// Unterminated region.
    ///
    /// The region start marker was seen but the document ended before the
    /// region end marker.
    E101,

    /// Missing region.
    ///
    /// The document contains no region start marker, so no annotation is read.
    E102,

    // =========================================================================
    // Attribution (E2xx)
    // =========================================================================
    /// Timed item outside a session.
    ///
    /// A timed item appeared while no session was open, so there is no room
    /// to attribute it to.
    E200,

    /// Undiscovered room.
    ///
    /// A session names a room that room discovery did not register.
    E201,

    /// Item reference is not a bare file name.
    ///
    /// A timed item names its document with a path (`/`, `\` or `..`)
    /// instead of a file name in the conference directory.
    E202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns `true` for the codes reporting an undefined room reference.
    pub fn is_undefined_room(&self) -> bool {
        matches!(self, ErrorCode::E200 | ErrorCode::E201)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }

    #[test]
    fn test_undefined_room_codes() {
        assert!(ErrorCode::E200.is_undefined_room());
        assert!(ErrorCode::E201.is_undefined_room());
        assert!(!ErrorCode::E100.is_undefined_room());
        assert!(!ErrorCode::E202.is_undefined_room());
    }
}
