//! Role capabilities and the therapist-to-patient visibility rule.

use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageUsers,
    ManageCatalog,
    ModerateCircles,
    ViewPatients,
}

impl Role {
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => matches!(
                capability,
                Capability::ManageUsers | Capability::ManageCatalog | Capability::ModerateCircles
            ),
            Role::Therapist => matches!(capability, Capability::ViewPatients),
            Role::User => false,
        }
    }
}

pub fn require(user: &AuthUser, capability: Capability) -> AppResult<()> {
    if user.role.allows(capability) {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, role = ?user.role, ?capability, "Capability denied");
        Err(AppError::Forbidden("Not authorized".into()))
    }
}

/// What storage knows about a requested patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientLink {
    pub id: Uuid,
    pub therapist_id: Option<Uuid>,
}

/// Decide whether `requester` may read `patient`'s entries, returning the owner id
/// to aggregate over.
///
/// A missing patient is `NotFound`; a patient assigned to someone else is `Forbidden`.
pub fn authorize_patient_view(requester: &AuthUser, patient: Option<PatientLink>) -> AppResult<Uuid> {
    require(requester, Capability::ViewPatients)?;

    let patient = patient.ok_or_else(|| AppError::NotFound("Patient not found".into()))?;
    if patient.therapist_id != Some(requester.id) {
        tracing::warn!(
            therapist_id = %requester.id,
            patient_id = %patient.id,
            "Therapist requested a patient not assigned to them"
        );
        return Err(AppError::Forbidden("Not authorized to view this patient".into()));
    }

    Ok(patient.id)
}
