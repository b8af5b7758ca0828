//! Permission and status-transition engine.
//!
//! Two static tables drive every decision:
//! - status permissions: what may be done to an intervention in a given
//!   status, optionally narrowed to a list of roles
//! - role capabilities: what a staff role may do at all
//!
//! Every check takes optional inputs and answers `false` (or an empty set)
//! when the intervention, the user, or the status is missing or unknown.
//! Callers treat `false` as deny.

use serde::Serialize;

use crate::entities::{Intervention, User};
use crate::enums::{InterventionStatus, Role};

// ---------------------------------------------------------------------------
// Allowance
// ---------------------------------------------------------------------------

/// A status-table entry: unconditional, or restricted to some roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowance {
    Always,
    Never,
    Roles(&'static [Role]),
}

impl Allowance {
    /// Whether a user with `role` is allowed. `Never` wins over any role.
    #[must_use]
    pub fn allows(self, role: Role) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Roles(roles) => roles.contains(&role),
        }
    }
}

// ---------------------------------------------------------------------------
// Status permissions
// ---------------------------------------------------------------------------

/// What may be done to an intervention while it is in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPermissions {
    pub can_edit: Allowance,
    pub can_delete: Allowance,
    pub can_add_comments: Allowance,
    pub can_change_status: Allowance,
    pub can_add_attachments: Allowance,
}

/// The status permission table.
#[must_use]
pub const fn status_permissions(status: InterventionStatus) -> StatusPermissions {
    use Allowance::{Always, Never};
    match status {
        InterventionStatus::Pending => StatusPermissions {
            can_edit: Always,
            can_delete: Always,
            can_add_comments: Always,
            can_change_status: Always,
            can_add_attachments: Always,
        },
        InterventionStatus::InProgress => StatusPermissions {
            can_edit: Always,
            can_delete: Never,
            can_add_comments: Always,
            can_change_status: Always,
            can_add_attachments: Always,
        },
        InterventionStatus::Resolved => StatusPermissions {
            can_edit: Never,
            can_delete: Never,
            can_add_comments: Always,
            can_change_status: Always,
            can_add_attachments: Never,
        },
        InterventionStatus::Closed => StatusPermissions {
            can_edit: Never,
            can_delete: Never,
            can_add_comments: Never,
            can_change_status: Never,
            can_add_attachments: Never,
        },
    }
}

/// Statuses reachable from `current`. Empty for `None`.
#[must_use]
pub fn allowed_transitions(current: Option<InterventionStatus>) -> &'static [InterventionStatus] {
    match current {
        Some(status) => status.allowed_next_states(),
        None => &[],
    }
}

/// Statuses reachable from a raw status string. Unknown strings have no
/// successors.
#[must_use]
pub fn allowed_transitions_for_label(current: &str) -> &'static [InterventionStatus] {
    allowed_transitions(current.parse().ok())
}

// ---------------------------------------------------------------------------
// Role capabilities
// ---------------------------------------------------------------------------

/// Actions gated by staff role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CreateUsers,
    EditUsers,
    DeleteUsers,
    ViewAllUsers,
    CreateStudents,
    EditStudents,
    DeleteStudents,
    ViewAllStudents,
    CreateInterventions,
    EditInterventions,
    DeleteInterventions,
    ViewAllInterventions,
    ViewOwnInterventions,
    ViewAssignedInterventions,
}

impl Capability {
    pub const ALL: [Self; 14] = [
        Self::CreateUsers,
        Self::EditUsers,
        Self::DeleteUsers,
        Self::ViewAllUsers,
        Self::CreateStudents,
        Self::EditStudents,
        Self::DeleteStudents,
        Self::ViewAllStudents,
        Self::CreateInterventions,
        Self::EditInterventions,
        Self::DeleteInterventions,
        Self::ViewAllInterventions,
        Self::ViewOwnInterventions,
        Self::ViewAssignedInterventions,
    ];
}

/// Capabilities granted to `role`.
#[must_use]
pub const fn role_capabilities(role: Role) -> &'static [Capability] {
    use Capability::{
        CreateInterventions, CreateStudents, EditInterventions, EditStudents,
        ViewAllStudents, ViewAssignedInterventions, ViewOwnInterventions,
    };
    match role {
        Role::Admin => &Capability::ALL,
        Role::Profesor => &[
            CreateStudents,
            EditStudents,
            ViewAllStudents,
            CreateInterventions,
            EditInterventions,
            ViewOwnInterventions,
            ViewAssignedInterventions,
        ],
        Role::Profesional => &[
            ViewAllStudents,
            CreateInterventions,
            EditInterventions,
            ViewOwnInterventions,
            ViewAssignedInterventions,
        ],
    }
}

/// Whether `role` holds `capability`.
#[must_use]
pub fn has_capability(role: Role, capability: Capability) -> bool {
    role_capabilities(role).contains(&capability)
}

// ---------------------------------------------------------------------------
// Intervention checks
// ---------------------------------------------------------------------------

/// Admins and the two staff members named on the intervention.
#[must_use]
pub fn is_party(intervention: &Intervention, user: &User) -> bool {
    user.role == Role::Admin
        || intervention.responsible_id == Some(user.id)
        || intervention.informer_id == Some(user.id)
}

/// Admins, the responsible, and the informer may modify an intervention,
/// and only while its status allows editing.
#[must_use]
pub fn can_modify(intervention: Option<&Intervention>, user: Option<&User>) -> bool {
    let (Some(intervention), Some(user)) = (intervention, user) else {
        return false;
    };
    is_party(intervention, user) && status_permissions(intervention.status).can_edit.allows(user.role)
}

/// Whether `user` may comment on `intervention` in its current status.
#[must_use]
pub fn can_add_comments(intervention: Option<&Intervention>, user: Option<&User>) -> bool {
    let (Some(intervention), Some(user)) = (intervention, user) else {
        return false;
    };
    status_permissions(intervention.status)
        .can_add_comments
        .allows(user.role)
}

/// Deleting requires the role capability and a status that permits it.
#[must_use]
pub fn can_delete(intervention: Option<&Intervention>, user: Option<&User>) -> bool {
    let (Some(intervention), Some(user)) = (intervention, user) else {
        return false;
    };
    has_capability(user.role, Capability::DeleteInterventions)
        && status_permissions(intervention.status).can_delete.allows(user.role)
}

/// Whether `user` may move an intervention from `current` to `next`.
#[must_use]
pub fn is_valid_status_change(
    current: Option<InterventionStatus>,
    next: Option<InterventionStatus>,
    user: Option<&User>,
) -> bool {
    let (Some(current), Some(next), Some(user)) = (current, next, user) else {
        return false;
    };
    current.can_transition_to(next) && status_permissions(current).can_change_status.allows(user.role)
}

// ---------------------------------------------------------------------------
// Per-user flag set
// ---------------------------------------------------------------------------

/// Flags describing what the current user may do with one intervention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionPermissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_add_comments: bool,
    pub can_change_status: bool,
    pub can_delete_comments: bool,
    pub is_responsible: bool,
    pub is_informer: bool,
}

impl InterventionPermissions {
    /// Compute the flags. Missing inputs yield all `false`.
    #[must_use]
    pub fn for_user(intervention: Option<&Intervention>, user: Option<&User>) -> Self {
        let (Some(i), Some(u)) = (intervention, user) else {
            return Self::default();
        };
        Self {
            can_edit: can_modify(intervention, user),
            can_delete: can_delete(intervention, user),
            can_add_comments: can_add_comments(intervention, user),
            can_change_status: status_permissions(i.status).can_change_status.allows(u.role),
            can_delete_comments: u.role == Role::Admin,
            is_responsible: i.responsible_id == Some(u.id),
            is_informer: i.informer_id == Some(u.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{InterventionScope, InterventionType, Priority};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            first_name: "Test".into(),
            last_name: "User".into(),
            email: format!("u{id}@colegio.cl"),
            rut: None,
            role,
            staff_type: None,
            department: None,
            phone: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn intervention(status: InterventionStatus) -> Intervention {
        Intervention {
            id: 1,
            title: "Caso".into(),
            description: "Descripción".into(),
            intervention_type: InterventionType::Behavior,
            status,
            priority: Priority::Medium,
            intervention_scope: InterventionScope::Individual,
            student_id: Some(100),
            responsible_id: Some(10),
            informer_id: Some(20),
            date_reported: None,
            date_resolved: None,
            follow_up_date: None,
            actions_taken: vec![],
            outcome_evaluation: None,
            requires_external_referral: false,
            external_referral_details: None,
            parent_feedback: None,
            created_at: None,
            updated_at: None,
            student: None,
            responsible: None,
            informer: None,
        }
    }

    #[test]
    fn closed_has_no_transitions() {
        assert!(allowed_transitions(Some(InterventionStatus::Closed)).is_empty());
    }

    #[test]
    fn missing_or_unknown_status_has_no_transitions() {
        assert!(allowed_transitions(None).is_empty());
        assert!(allowed_transitions_for_label("Archivado").is_empty());
        assert_eq!(
            allowed_transitions_for_label("Pendiente"),
            &[InterventionStatus::InProgress, InterventionStatus::Resolved]
        );
    }

    #[rstest]
    #[case(Role::Admin, 99, true)]
    #[case(Role::Profesor, 10, true)]
    #[case(Role::Profesional, 20, true)]
    #[case(Role::Profesor, 99, false)]
    #[case(Role::Profesional, 99, false)]
    fn can_modify_pending_by_party(#[case] role: Role, #[case] id: i64, #[case] expected: bool) {
        let i = intervention(InterventionStatus::Pending);
        assert_eq!(can_modify(Some(&i), Some(&user(id, role))), expected);
    }

    #[rstest]
    #[case(InterventionStatus::Pending, true)]
    #[case(InterventionStatus::InProgress, true)]
    #[case(InterventionStatus::Resolved, false)]
    #[case(InterventionStatus::Closed, false)]
    fn status_gates_admin_edits(#[case] status: InterventionStatus, #[case] expected: bool) {
        let i = intervention(status);
        assert_eq!(can_modify(Some(&i), Some(&user(1, Role::Admin))), expected);
    }

    #[test]
    fn missing_inputs_deny() {
        let i = intervention(InterventionStatus::Pending);
        let u = user(10, Role::Admin);
        assert!(!can_modify(None, Some(&u)));
        assert!(!can_modify(Some(&i), None));
        assert!(!can_add_comments(None, None));
        assert!(!can_delete(Some(&i), None));
        assert!(!is_valid_status_change(
            Some(InterventionStatus::Pending),
            Some(InterventionStatus::InProgress),
            None
        ));
        assert!(!is_valid_status_change(
            None,
            Some(InterventionStatus::InProgress),
            Some(&u)
        ));
        assert_eq!(
            InterventionPermissions::for_user(None, Some(&u)),
            InterventionPermissions::default()
        );
    }

    #[test]
    fn self_transitions_are_never_valid() {
        for role in Role::ALL {
            let u = user(1, role);
            for status in InterventionStatus::ALL {
                assert!(!is_valid_status_change(Some(status), Some(status), Some(&u)));
            }
        }
    }

    #[test]
    fn pending_cannot_go_straight_to_closed() {
        let u = user(1, Role::Admin);
        assert!(!is_valid_status_change(
            Some(InterventionStatus::Pending),
            Some(InterventionStatus::Closed),
            Some(&u)
        ));
    }

    #[test]
    fn resolved_can_reopen_or_close() {
        let u = user(1, Role::Profesor);
        let from = Some(InterventionStatus::Resolved);
        assert!(is_valid_status_change(from, Some(InterventionStatus::InProgress), Some(&u)));
        assert!(is_valid_status_change(from, Some(InterventionStatus::Closed), Some(&u)));
        assert!(!is_valid_status_change(from, Some(InterventionStatus::Pending), Some(&u)));
    }

    #[test]
    fn never_beats_role_list() {
        assert!(!Allowance::Never.allows(Role::Admin));
        assert!(Allowance::Roles(&[Role::Admin]).allows(Role::Admin));
        assert!(!Allowance::Roles(&[Role::Admin]).allows(Role::Profesor));
    }

    #[test]
    fn comments_blocked_only_when_closed() {
        let u = user(5, Role::Profesor);
        for status in InterventionStatus::ALL {
            let i = intervention(status);
            assert_eq!(
                can_add_comments(Some(&i), Some(&u)),
                status != InterventionStatus::Closed
            );
        }
    }

    #[test]
    fn only_admin_deletes_and_only_while_pending() {
        let pending = intervention(InterventionStatus::Pending);
        let in_progress = intervention(InterventionStatus::InProgress);
        assert!(can_delete(Some(&pending), Some(&user(1, Role::Admin))));
        assert!(!can_delete(Some(&in_progress), Some(&user(1, Role::Admin))));
        assert!(!can_delete(Some(&pending), Some(&user(10, Role::Profesor))));
    }

    #[test]
    fn role_capability_table() {
        assert!(has_capability(Role::Admin, Capability::DeleteUsers));
        assert!(has_capability(Role::Profesor, Capability::CreateStudents));
        assert!(!has_capability(Role::Profesor, Capability::DeleteStudents));
        assert!(!has_capability(Role::Profesional, Capability::CreateStudents));
        assert!(has_capability(Role::Profesional, Capability::ViewAllStudents));
        assert!(!has_capability(Role::Profesional, Capability::ViewAllInterventions));
    }

    #[test]
    fn flag_set_for_responsible_teacher() {
        let i = intervention(InterventionStatus::InProgress);
        let flags = InterventionPermissions::for_user(Some(&i), Some(&user(10, Role::Profesor)));
        assert_eq!(
            flags,
            InterventionPermissions {
                can_edit: true,
                can_delete: false,
                can_add_comments: true,
                can_change_status: true,
                can_delete_comments: false,
                is_responsible: true,
                is_informer: false,
            }
        );
    }
}
