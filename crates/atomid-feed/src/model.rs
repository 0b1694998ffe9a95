//! Rows written by the rewards collector.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Cumulative payout statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedStats {
    /// SOL paid out since the collector started.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sol_paid: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_payout_amount: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_payout_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Success,
    Error,
    Warning,
    Info,
    /// Any level the collector writes that this client does not know.
    Other(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Other(s) => s,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✕",
            Self::Warning => "⚠",
            Self::Info | Self::Other(_) => "•",
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            "info" => Self::Info,
            _ => Self::Other(s),
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// One collector log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub level: LogLevel,
    pub message: String,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub sol_amount: Option<f64>,
    #[serde(default)]
    pub tx_signature: Option<String>,
}

impl LogEntry {
    /// The payout signature, when it is a well-formed transaction signature.
    pub fn signature(&self) -> Option<&str> {
        self.tx_signature
            .as_deref()
            .filter(|s| atomid_core::explorer::is_signature(s))
    }
}

/// Stats plus the most recent logs, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub stats: Option<FeedStats>,
    pub logs: Vec<LogEntry>,
}

impl FeedSnapshot {
    /// Sum of `sol_amount` over the fetched logs.
    pub fn paid_in_window(&self) -> f64 {
        self.logs.iter().filter_map(|l| l.sol_amount).sum()
    }
}

/// PostgREST renders `numeric` columns as JSON numbers or strings depending
/// on configuration; accept either. Null is zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

/// As `lenient_f64`, keeping null (and an empty string) as `None`.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(f64),
        Str(String),
        Null(()),
    }

    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(n) => Ok(Some(n)),
        NumOrString::Str(s) if s.trim().is_empty() => Ok(None),
        NumOrString::Str(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
        NumOrString::Null(()) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_row_parses() {
        let v = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "total_sol_paid": "12.5",
            "last_payout_amount": 0.25,
            "last_payout_at": "2025-01-05T14:03:09.123456+00:00",
            "updated_at": "2025-01-05T14:03:09+00:00"
        });
        let stats: FeedStats = serde_json::from_value(v).unwrap();
        assert_eq!(stats.total_sol_paid, 12.5);
        assert_eq!(stats.last_payout_amount, 0.25);
        assert_eq!(stats.last_payout_at.unwrap().unix_timestamp(), 1_736_085_789);
    }

    #[test]
    fn stats_without_payout() {
        let v = serde_json::json!({ "total_sol_paid": 0, "last_payout_amount": null, "last_payout_at": null });
        let stats: FeedStats = serde_json::from_value(v).unwrap();
        assert_eq!(stats.last_payout_amount, 0.0);
        assert!(stats.last_payout_at.is_none());
    }

    #[test]
    fn log_levels() {
        assert_eq!(LogLevel::from("success".to_string()), LogLevel::Success);
        assert_eq!(LogLevel::from("debug".to_string()), LogLevel::Other("debug".into()));
        assert_eq!(LogLevel::Warning.glyph(), "⚠");
        assert_eq!(LogLevel::Other("debug".into()).glyph(), "•");
        assert_eq!(String::from(LogLevel::Error), "error");
    }

    #[test]
    fn log_row_parses() {
        let sig = bs58::encode([9u8; 64]).into_string();
        let v = serde_json::json!({
            "id": 7,
            "timestamp": "2025-01-05T14:03:09Z",
            "level": "success",
            "message": "Distributed rewards",
            "sol_amount": 0.5,
            "tx_signature": sig
        });
        let log: LogEntry = serde_json::from_value(v).unwrap();
        assert_eq!(log.level, LogLevel::Success);
        assert_eq!(log.signature(), Some(sig.as_str()));

        let bare: LogEntry = serde_json::from_value(serde_json::json!({
            "id": 8, "timestamp": "2025-01-05T14:04:00Z", "level": "info",
            "message": "Waiting", "tx_signature": "not-a-signature"
        }))
        .unwrap();
        assert_eq!(bare.sol_amount, None);
        assert_eq!(bare.signature(), None);
    }

    #[test]
    fn log_amount_accepts_numeric_strings() {
        let row = |amount: serde_json::Value| {
            serde_json::json!({
                "id": 9, "timestamp": "2025-01-05T14:05:00Z", "level": "success",
                "message": "Distributed rewards", "sol_amount": amount
            })
        };
        let log: LogEntry = serde_json::from_value(row(serde_json::json!("0.5"))).unwrap();
        assert_eq!(log.sol_amount, Some(0.5));
        let log: LogEntry = serde_json::from_value(row(serde_json::json!(0.25))).unwrap();
        assert_eq!(log.sol_amount, Some(0.25));
        let log: LogEntry = serde_json::from_value(row(serde_json::Value::Null)).unwrap();
        assert_eq!(log.sol_amount, None);
        assert!(serde_json::from_value::<LogEntry>(row(serde_json::json!("lots"))).is_err());
    }
}
