//! Transport modes reported by the field player

use serde::{Deserialize, Serialize};

/// How the party is currently moving on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    OnFoot,
    Ship,
    Airship,
    Canoe,
    Submarine,
    Chocobo,
    /// Placeholder the engine reports during cutscenes and loading
    Intermediate,
}

impl TransportMode {
    /// Map a raw engine transport id. Anything unrecognised is treated as a sentinel.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => TransportMode::OnFoot,
            2 => TransportMode::Ship,
            3 => TransportMode::Airship,
            4 => TransportMode::Canoe,
            5 => TransportMode::Submarine,
            6 => TransportMode::Chocobo,
            _ => TransportMode::Intermediate,
        }
    }

    pub fn is_vehicle(self) -> bool {
        !matches!(self, TransportMode::OnFoot | TransportMode::Intermediate)
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, TransportMode::Intermediate)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TransportMode::OnFoot => "foot",
            TransportMode::Ship => "ship",
            TransportMode::Airship => "airship",
            TransportMode::Canoe => "canoe",
            TransportMode::Submarine => "submarine",
            TransportMode::Chocobo => "chocobo",
            TransportMode::Intermediate => "intermediate",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ids_are_sentinels() {
        assert_eq!(TransportMode::from_id(0), TransportMode::Intermediate);
        assert_eq!(TransportMode::from_id(-1), TransportMode::Intermediate);
        assert_eq!(TransportMode::from_id(42), TransportMode::Intermediate);
        assert!(TransportMode::from_id(0).is_sentinel());
    }

    #[test]
    fn test_vehicle_classification() {
        assert!(TransportMode::Ship.is_vehicle());
        assert!(TransportMode::Chocobo.is_vehicle());
        assert!(!TransportMode::OnFoot.is_vehicle());
        assert!(!TransportMode::Intermediate.is_vehicle());
    }
}
