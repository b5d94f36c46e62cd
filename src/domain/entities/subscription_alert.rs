use serde::{Deserialize, Serialize};

/// Kind of alert attached to a subscription. Only expiration warnings are
/// generated by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Expiration,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Expiration => "EXPIRATION",
        }
    }
}

/// Delivery state of an alert. The scheduler only ever creates `Pending`;
/// the external dispatch process flips alerts to `Sent` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Pending,
    Sent,
    Failed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Pending => "PENDING",
            AlertStatus::Sent => "SENT",
            AlertStatus::Failed => "FAILED",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AlertStatus::Pending)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_replaceable_status() {
        assert!(AlertStatus::Pending.is_pending());
        assert!(!AlertStatus::Sent.is_pending());
        assert!(!AlertStatus::Failed.is_pending());
    }

    #[test]
    fn serializes_to_exact_wire_values() {
        assert_eq!(serde_json::to_string(&AlertType::Expiration).unwrap(), "\"EXPIRATION\"");
        assert_eq!(serde_json::to_string(&AlertStatus::Pending).unwrap(), "\"PENDING\"");
        assert_eq!(serde_json::to_string(&AlertStatus::Sent).unwrap(), "\"SENT\"");
        assert_eq!(serde_json::to_string(&AlertStatus::Failed).unwrap(), "\"FAILED\"");
    }
}
