// Enrollment endpoints.
//
// Enrollments link students to classrooms. Deleting an enrollment is a
// withdrawal, and the classroom roster is a read-side join served from
// this router.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    Enrollment, EnrollmentCreate, EnrollmentFilter, EnrollmentUpdate, RosterStudent,
};

impl ApiClient {
    /// `GET /enrollments`, with optional filters.
    pub async fn list_enrollments(
        &self,
        filter: &EnrollmentFilter,
    ) -> Result<Vec<Enrollment>, Error> {
        self.get_with_params("/enrollments", &filter.params()).await
    }

    /// `GET /enrollments/{id}`
    pub async fn get_enrollment(&self, id: &Uuid) -> Result<Enrollment, Error> {
        self.get(&format!("/enrollments/{id}")).await
    }

    /// `POST /enrollments` -- enroll a student in a classroom.
    pub async fn create_enrollment(&self, body: &EnrollmentCreate) -> Result<Enrollment, Error> {
        self.post("/enrollments", body).await
    }

    /// `PATCH /enrollments/{id}`
    pub async fn update_enrollment(
        &self,
        id: &Uuid,
        body: &EnrollmentUpdate,
    ) -> Result<Enrollment, Error> {
        self.patch(&format!("/enrollments/{id}"), body).await
    }

    /// `DELETE /enrollments/{id}` -- withdraw the student.
    pub async fn withdraw_enrollment(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/enrollments/{id}")).await
    }

    /// `GET /enrollments/classrooms/{classroom_id}/students` -- the
    /// classroom roster.
    pub async fn classroom_roster(
        &self,
        classroom_id: &Uuid,
        active_only: bool,
    ) -> Result<Vec<RosterStudent>, Error> {
        self.get_with_params(
            &format!("/enrollments/classrooms/{classroom_id}/students"),
            &[("active_only", active_only.to_string())],
        )
        .await
    }
}
