// Student endpoints.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    Enrollment, NextStudentId, Student, StudentCreate, StudentEnrollmentFilter, StudentFilter,
    StudentUpdate,
};

impl ApiClient {
    /// `GET /students`, with optional filters.
    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, Error> {
        self.get_with_params("/students", &filter.params()).await
    }

    /// `GET /students/{id}`
    pub async fn get_student(&self, id: &Uuid) -> Result<Student, Error> {
        self.get(&format!("/students/{id}")).await
    }

    /// `GET /students/next-id` -- the next free external student number
    /// for a school. Derived from the current student set, so it goes
    /// stale the moment a student is created.
    pub async fn next_student_id(&self, school_id: &Uuid) -> Result<NextStudentId, Error> {
        self.get_with_params("/students/next-id", &[("school_id", school_id.to_string())])
            .await
    }

    /// `GET /students/{id}/enrollments`
    pub async fn student_enrollments(
        &self,
        id: &Uuid,
        filter: &StudentEnrollmentFilter,
    ) -> Result<Vec<Enrollment>, Error> {
        self.get_with_params(&format!("/students/{id}/enrollments"), &filter.params())
            .await
    }

    /// `POST /students`
    pub async fn create_student(&self, body: &StudentCreate) -> Result<Student, Error> {
        self.post("/students", body).await
    }

    /// `PUT /students/{id}`
    pub async fn update_student(&self, id: &Uuid, body: &StudentUpdate) -> Result<Student, Error> {
        self.put(&format!("/students/{id}"), body).await
    }

    /// `DELETE /students/{id}` (soft delete)
    pub async fn delete_student(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/students/{id}")).await
    }
}
