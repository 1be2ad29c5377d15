use serde::{Deserialize, Serialize};

/// One scored event about a peer.
///
/// Records are immutable once built. The ledger stores copies, never the
/// caller's instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    reason: String,
    point: i64,
    violation: bool,
}

impl Record {
    pub fn new(reason: impl Into<String>, point: i64, violation: bool) -> Self {
        Self {
            reason: reason.into(),
            point,
            violation,
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Score delta applied per application.
    pub fn point(&self) -> i64 {
        self.point
    }

    /// Whether the record is also logged as a violation.
    pub fn is_violation(&self) -> bool {
        self.violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_fields() {
        let record = Record::new("network error", -5, true);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["reason"], "network error");
        assert_eq!(json["point"], -5);
        assert_eq!(json["violation"], true);

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
