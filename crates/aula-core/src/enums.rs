//! Status, priority, classification, and role enums for Aula.
//!
//! Wire values are the Spanish strings the backend stores, so every enum
//! renames its variants explicitly. `InterventionStatus` carries the case
//! lifecycle state machine via `allowed_next_states()`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// InterventionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an intervention.
///
/// ```text
/// Pendiente → En Proceso → Resuelto → Cerrado
///           → Resuelto     Resuelto → En Proceso (reopened)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InterventionStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Proceso")]
    InProgress,
    #[serde(rename = "Resuelto")]
    Resolved,
    #[serde(rename = "Cerrado")]
    Closed,
}

impl InterventionStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Resolved, Self::Closed];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Resolved],
            Self::InProgress => &[Self::Resolved],
            Self::Resolved => &[Self::Closed, Self::InProgress],
            Self::Closed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Pending and in-progress cases still need attention.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En Proceso",
            Self::Resolved => "Resuelto",
            Self::Closed => "Cerrado",
        }
    }

    /// Human-readable label. Status labels are their wire values.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| unknown("status", s))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Case priority. Serialized as its number: 1 is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

/// Backends have been seen sending priority both as a number and as a
/// numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    Number(i64),
    Text(String),
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Map a numeric priority onto the enum.
    #[must_use]
    pub const fn from_number(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::High),
            2 => Some(Self::Medium),
            3 => Some(Self::Low),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_number())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = match PriorityRepr::deserialize(deserializer)? {
            PriorityRepr::Number(n) => n,
            PriorityRepr::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                serde::de::Error::custom(format!("invalid priority: {text}"))
            })?,
        };
        Self::from_number(number)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid priority: {number}")))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    /// Accepts either the number (`"1"`) or the label (`"Alta"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .ok()
            .and_then(Self::from_number)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|p| p.label().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| unknown("priority", s))
    }
}

// ---------------------------------------------------------------------------
// InterventionType
// ---------------------------------------------------------------------------

/// Area of concern an intervention addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterventionType {
    #[serde(rename = "Comportamiento")]
    Behavior,
    #[serde(rename = "Académico")]
    Academic,
    #[serde(rename = "Asistencia")]
    Attendance,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Familiar")]
    Family,
    #[serde(rename = "Social")]
    Social,
    #[serde(rename = "Emocional")]
    Emotional,
    #[serde(rename = "Otro")]
    Other,
}

impl InterventionType {
    pub const ALL: [Self; 8] = [
        Self::Behavior,
        Self::Academic,
        Self::Attendance,
        Self::Health,
        Self::Family,
        Self::Social,
        Self::Emotional,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Behavior => "Comportamiento",
            Self::Academic => "Académico",
            Self::Attendance => "Asistencia",
            Self::Health => "Salud",
            Self::Family => "Familiar",
            Self::Social => "Social",
            Self::Emotional => "Emocional",
            Self::Other => "Otro",
        }
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| unknown("type", s))
    }
}

// ---------------------------------------------------------------------------
// InterventionScope
// ---------------------------------------------------------------------------

/// Who the intervention targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterventionScope {
    #[default]
    Individual,
    #[serde(rename = "Grupal")]
    Group,
    #[serde(rename = "Familiar")]
    Family,
}

impl InterventionScope {
    pub const ALL: [Self; 3] = [Self::Individual, Self::Group, Self::Family];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Group => "Grupal",
            Self::Family => "Familiar",
        }
    }
}

impl fmt::Display for InterventionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| unknown("interventionScope", s))
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Staff role. Capabilities derive from the role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Profesor,
    Profesional,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Profesor, Self::Profesional];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Profesor => "profesor",
            Self::Profesional => "profesional",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Profesor => "Profesor",
            Self::Profesional => "Profesional",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| unknown("role", s))
    }
}

// ---------------------------------------------------------------------------
// StudentType
// ---------------------------------------------------------------------------

/// Enrollment program of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StudentType {
    #[default]
    Regular,
    #[serde(rename = "Programa Integración")]
    Integration,
}

impl StudentType {
    pub const ALL: [Self; 2] = [Self::Regular, Self::Integration];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Integration => "Programa Integración",
        }
    }
}

impl fmt::Display for StudentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| unknown("studentType", s))
    }
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Grade levels offered by the school, youngest first.
pub const GRADES: [&str; 14] = [
    "Pre-Kinder",
    "Kinder",
    "1° Básico",
    "2° Básico",
    "3° Básico",
    "4° Básico",
    "5° Básico",
    "6° Básico",
    "7° Básico",
    "8° Básico",
    "I Medio",
    "II Medio",
    "III Medio",
    "IV Medio",
];

/// Whether `grade` is one of [`GRADES`].
#[must_use]
pub fn is_known_grade(grade: &str) -> bool {
    GRADES.contains(&grade)
}

fn unknown(field: &'static str, value: &str) -> CoreError {
    CoreError::UnknownValue {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_json:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, $expected_json);
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_in_progress,
        InterventionStatus,
        InterventionStatus::InProgress,
        "\"En Proceso\""
    );
    test_serde_roundtrip!(
        status_closed,
        InterventionStatus,
        InterventionStatus::Closed,
        "\"Cerrado\""
    );
    test_serde_roundtrip!(priority_high, Priority, Priority::High, "1");
    test_serde_roundtrip!(priority_low, Priority, Priority::Low, "3");
    test_serde_roundtrip!(
        type_academic,
        InterventionType,
        InterventionType::Academic,
        "\"Académico\""
    );
    test_serde_roundtrip!(
        scope_group,
        InterventionScope,
        InterventionScope::Group,
        "\"Grupal\""
    );
    test_serde_roundtrip!(role_profesional, Role, Role::Profesional, "\"profesional\"");
    test_serde_roundtrip!(
        student_type_integration,
        StudentType,
        StudentType::Integration,
        "\"Programa Integración\""
    );

    #[test]
    fn priority_accepts_numeric_string() {
        let priority: Priority = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(priority, Priority::Medium);
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(serde_json::from_str::<Priority>("4").is_err());
        assert!(serde_json::from_str::<Priority>("\"alta\"").is_err());
    }

    #[test]
    fn status_rejects_unknown_string() {
        assert!(serde_json::from_str::<InterventionStatus>("\"Archivado\"").is_err());
    }

    // --- Transition tests ---

    #[rstest]
    #[case(InterventionStatus::Pending, &[InterventionStatus::InProgress, InterventionStatus::Resolved])]
    #[case(InterventionStatus::InProgress, &[InterventionStatus::Resolved])]
    #[case(InterventionStatus::Resolved, &[InterventionStatus::Closed, InterventionStatus::InProgress])]
    #[case(InterventionStatus::Closed, &[])]
    fn allowed_next_states_table(
        #[case] from: InterventionStatus,
        #[case] expected: &[InterventionStatus],
    ) {
        assert_eq!(from.allowed_next_states(), expected);
    }

    #[test]
    fn closed_is_terminal() {
        for next in InterventionStatus::ALL {
            assert!(!InterventionStatus::Closed.can_transition_to(next));
        }
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in InterventionStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} → {status}");
        }
    }

    #[test]
    fn pending_cannot_jump_to_closed() {
        assert!(!InterventionStatus::Pending.can_transition_to(InterventionStatus::Closed));
    }

    #[test]
    fn active_statuses() {
        assert!(InterventionStatus::Pending.is_active());
        assert!(InterventionStatus::InProgress.is_active());
        assert!(!InterventionStatus::Resolved.is_active());
        assert!(!InterventionStatus::Closed.is_active());
    }

    // --- Parsing ---

    #[rstest]
    #[case("1", Priority::High)]
    #[case(" 3 ", Priority::Low)]
    #[case("Media", Priority::Medium)]
    #[case("alta", Priority::High)]
    fn priority_from_str(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(input.parse::<Priority>().unwrap(), expected);
    }

    #[test]
    fn unknown_status_reports_field() {
        let err = "Archivado".parse::<InterventionStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownValue { field: "status", .. }));
    }

    #[test]
    fn labels() {
        assert_eq!(Priority::High.label(), "Alta");
        assert_eq!(Role::Admin.label(), "Administrador");
        assert_eq!(InterventionStatus::Resolved.label(), "Resuelto");
    }

    #[test]
    fn grades_cover_both_cycles() {
        assert!(is_known_grade("Pre-Kinder"));
        assert!(is_known_grade("8° Básico"));
        assert!(is_known_grade("IV Medio"));
        assert!(!is_known_grade("9° Básico"));
    }
}
