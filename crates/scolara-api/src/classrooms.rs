// Classroom endpoints.
//
// The classroom roster (students enrolled in a classroom) is served by
// the enrollments router; see `enrollments.rs`.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Classroom, ClassroomCreate, ClassroomUpdate};

impl ApiClient {
    /// `GET /classrooms`
    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>, Error> {
        self.get("/classrooms").await
    }

    /// `POST /classrooms`
    pub async fn create_classroom(&self, body: &ClassroomCreate) -> Result<Classroom, Error> {
        self.post("/classrooms", body).await
    }

    /// `PUT /classrooms/{id}`
    pub async fn update_classroom(
        &self,
        id: &Uuid,
        body: &ClassroomUpdate,
    ) -> Result<Classroom, Error> {
        self.put(&format!("/classrooms/{id}"), body).await
    }

    /// `DELETE /classrooms/{id}`
    pub async fn delete_classroom(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/classrooms/{id}")).await
    }
}
