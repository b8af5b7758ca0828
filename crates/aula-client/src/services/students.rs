use aula_core::drafts::StudentDraft;
use aula_core::entities::{Intervention, InterventionRecord, RecordId, Student, StudentRecord};
use aula_core::filter::StudentFilter;
use aula_core::format::StudentPayload;
use aula_core::validation::{Mode, validate_student};
use chrono::Utc;
use serde_json::Value;

use super::{decode, decode_list};
use crate::endpoints;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Student records. RUT uniqueness is the backend's job; a collision comes
/// back as `ApiError::Duplicate`.
#[derive(Debug, Clone)]
pub struct StudentService<T> {
    transport: T,
}

impl<T: Transport> StudentService<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn list(&self, filter: &StudentFilter) -> Result<Vec<StudentRecord>, ApiError> {
        let request = ApiRequest::get(endpoints::STUDENTS).with_query(filter.to_query());
        let rows: Vec<Student> = decode_list(self.transport.send(request).await?)?;
        Ok(rows.into_iter().map(StudentRecord::from).collect())
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn get(&self, id: RecordId) -> Result<StudentRecord, ApiError> {
        let value = self.transport.send(ApiRequest::get(endpoints::student(id))).await?;
        Ok(StudentRecord::from(decode::<Student>(value)?))
    }

    /// The student with every intervention on file.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn get_with_interventions(&self, id: RecordId) -> Result<StudentRecord, ApiError> {
        let mut value = self
            .transport
            .send(ApiRequest::get(endpoints::student_with_interventions(id)))
            .await?;
        let interventions = match value.as_object_mut().and_then(|o| o.remove("interventions")) {
            Some(items @ Value::Array(_)) => decode::<Vec<Intervention>>(items)?,
            _ => Vec::new(),
        };
        let mut record = StudentRecord::from(decode::<Student>(value)?);
        record.interventions = Some(
            interventions
                .into_iter()
                .map(InterventionRecord::from)
                .collect(),
        );
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` without calling the backend when the
    /// draft is invalid, `ApiError::Duplicate` when the RUT is taken, or
    /// another translated backend failure.
    pub async fn create(&self, draft: &StudentDraft) -> Result<StudentRecord, ApiError> {
        validate_student(draft, Mode::Create, Utc::now()).into_result()?;
        let body = StudentPayload::from_draft(draft, Mode::Create);
        let request = ApiRequest::post(endpoints::STUDENTS).with_json(&body)?;
        let created: Student = decode(self.transport.send(request).await?)?;
        tracing::info!(id = created.id, "student created");
        Ok(StudentRecord::from(created))
    }

    /// Only the fields present in `draft` are checked and sent.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&self, id: RecordId, draft: &StudentDraft) -> Result<StudentRecord, ApiError> {
        validate_student(draft, Mode::Update, Utc::now()).into_result()?;
        let body = StudentPayload::from_draft(draft, Mode::Update);
        let request = ApiRequest::put(endpoints::student(id)).with_json(&body)?;
        let updated: Student = decode(self.transport.send(request).await?)?;
        Ok(StudentRecord::from(updated))
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        self.transport.send(ApiRequest::delete(endpoints::student(id))).await?;
        tracing::info!(id, "student deleted");
        Ok(())
    }
}
