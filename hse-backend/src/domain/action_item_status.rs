// src/domain/action_item_status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action item workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionItemStatus {
    Open,
    PendingVerification,
    Verified,
    Closed,
}

impl ActionItemStatus {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "pending_verification" => Some(Self::PendingVerification),
            "verified" => Some(Self::Verified),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::PendingVerification => "pending_verification",
            Self::Verified => "verified",
            Self::Closed => "closed",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Open,
            Self::PendingVerification,
            Self::Verified,
            Self::Closed,
        ]
    }

    /// Terminal states need no further action.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Verified | Self::Closed)
    }

    /// Workflow transition table:
    /// - open -> pending_verification (closure submitted, verifier set)
    /// - open -> closed (closure submitted, no verifier)
    /// - pending_verification -> verified (verifier approves)
    /// - pending_verification -> open (verifier rejects, item re-opened)
    pub fn can_transition_to(&self, new_status: Self) -> bool {
        matches!(
            (self, new_status),
            (Self::Open, Self::PendingVerification)
                | (Self::Open, Self::Closed)
                | (Self::PendingVerification, Self::Verified)
                | (Self::PendingVerification, Self::Open)
        )
    }
}

impl Default for ActionItemStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for ActionItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid action item status: '{}'. Valid statuses are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl From<ActionItemStatus> for String {
    fn from(status: ActionItemStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Action item priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionItemPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl ActionItemPriority {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Default for ActionItemPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for ActionItemPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionItemPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid action item priority: '{}'", s))
    }
}

impl From<ActionItemPriority> for String {
    fn from(priority: ActionItemPriority) -> Self {
        priority.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in ActionItemStatus::all() {
            assert_eq!(ActionItemStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ActionItemStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_valid_transitions() {
        use ActionItemStatus::*;

        assert!(Open.can_transition_to(PendingVerification));
        assert!(Open.can_transition_to(Closed));
        assert!(PendingVerification.can_transition_to(Verified));
        assert!(PendingVerification.can_transition_to(Open));
    }

    #[test]
    fn test_invalid_transitions() {
        use ActionItemStatus::*;

        assert!(!Open.can_transition_to(Verified));
        assert!(!Open.can_transition_to(Open));
        assert!(!Verified.can_transition_to(Open));
        assert!(!Verified.can_transition_to(Closed));
        assert!(!Closed.can_transition_to(Open));
        assert!(!Closed.can_transition_to(PendingVerification));
        assert!(!PendingVerification.can_transition_to(Closed));
    }

    #[test]
    fn test_finished_states() {
        assert!(ActionItemStatus::Verified.is_finished());
        assert!(ActionItemStatus::Closed.is_finished());
        assert!(!ActionItemStatus::Open.is_finished());
        assert!(!ActionItemStatus::PendingVerification.is_finished());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(
            ActionItemPriority::from_str("CRITICAL"),
            Some(ActionItemPriority::Critical)
        );
        assert_eq!(ActionItemPriority::from_str("urgent"), None);
        assert_eq!(ActionItemPriority::default(), ActionItemPriority::Medium);
    }

    #[test]
    fn test_serde() {
        let serialized = serde_json::to_string(&ActionItemStatus::PendingVerification).unwrap();
        assert_eq!(serialized, r#""pending_verification""#);

        let deserialized: ActionItemPriority = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(deserialized, ActionItemPriority::High);
    }
}
