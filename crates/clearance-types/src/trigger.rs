//! Trigger kind and severity definitions.

use serde::{Deserialize, Serialize};

/// The fixed set of safety-event categories the watcher reacts to.
///
/// This is deliberately a closed enum: downstream dispatch behavior is
/// decided by exhaustive matching, never by per-kind polymorphic objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// A weapon was drawn or taken out.
    WeaponDrawn,
    /// Gunfire was reported. The only kind that escalates to an outbound call.
    ShotsFired,
    /// A person is down.
    ManDown,
    /// An officer is down.
    OfficerDown,
    /// A suspect is down.
    SuspectDown,
    /// A camera feed was blocked or obscured.
    CameraBlocked,
}

impl TriggerKind {
    /// Returns the stable wire label for this kind, as sent to the
    /// incident API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeaponDrawn => "weapon_drawn",
            Self::ShotsFired => "shots_fired",
            Self::ManDown => "man_down",
            Self::OfficerDown => "officer_down",
            Self::SuspectDown => "suspect_down",
            Self::CameraBlocked => "camera_blocked",
        }
    }

    /// Returns the severity of this kind. `ShotsFired` is the only
    /// critical trigger.
    pub fn severity(self) -> Severity {
        match self {
            Self::ShotsFired => Severity::Critical,
            Self::WeaponDrawn
            | Self::ManDown
            | Self::OfficerDown
            | Self::SuspectDown
            | Self::CameraBlocked => Severity::Info,
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = ParseTriggerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon_drawn" => Ok(Self::WeaponDrawn),
            "shots_fired" => Ok(Self::ShotsFired),
            "man_down" => Ok(Self::ManDown),
            "officer_down" => Ok(Self::OfficerDown),
            "suspect_down" => Ok(Self::SuspectDown),
            "camera_blocked" => Ok(Self::CameraBlocked),
            _ => Err(ParseTriggerKindError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown trigger kind label.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown trigger kind: {0}")]
pub struct ParseTriggerKindError(pub String);

/// Ordered severity of a trigger kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Recorded in the incident API only.
    Info,
    /// Recorded and escalated to an outbound call.
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [TriggerKind; 6] = [
        TriggerKind::WeaponDrawn,
        TriggerKind::ShotsFired,
        TriggerKind::ManDown,
        TriggerKind::OfficerDown,
        TriggerKind::SuspectDown,
        TriggerKind::CameraBlocked,
    ];

    #[test]
    fn wire_labels_round_trip() {
        for kind in ALL_KINDS {
            let parsed: TriggerKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("weapons_drawn".parse::<TriggerKind>().is_err());
        assert!("".parse::<TriggerKind>().is_err());
    }

    #[test]
    fn shots_fired_is_the_only_critical_kind() {
        for kind in ALL_KINDS {
            if kind == TriggerKind::ShotsFired {
                assert_eq!(kind.severity(), Severity::Critical);
            } else {
                assert_eq!(kind.severity(), Severity::Info);
            }
        }
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Info < Severity::Critical);
    }

    #[test]
    fn serde_uses_wire_labels() {
        let json = serde_json::to_string(&TriggerKind::ShotsFired).unwrap();
        assert_eq!(json, "\"shots_fired\"");
    }
}
