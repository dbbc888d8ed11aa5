//! Document lifecycle status
//!
//! The host document store drives submissions and cancellations; the
//! numeric codes mirror its wire representation (0/1/2).

use serde::{Deserialize, Serialize};

/// Lifecycle status of a posted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Document is being drafted
    Draft,
    /// Document has been submitted and is in effect
    Submitted,
    /// Document has been cancelled; retained for audit
    Cancelled,
}

impl DocStatus {
    /// Returns the host store's numeric code
    pub fn code(&self) -> i16 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    /// Maps a numeric code back to a status
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(DocStatus::Draft),
            1 => Some(DocStatus::Submitted),
            2 => Some(DocStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, DocStatus::Submitted)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DocStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for status in [DocStatus::Draft, DocStatus::Submitted, DocStatus::Cancelled] {
            assert_eq!(DocStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(DocStatus::from_code(5), None);
    }
}
