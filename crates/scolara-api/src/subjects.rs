// Subject endpoints.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Subject, SubjectCreate, SubjectUpdate};

impl ApiClient {
    /// `GET /subjects`
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        self.get("/subjects").await
    }

    /// `GET /subjects/core` -- the school's core curriculum subjects.
    pub async fn list_core_subjects(&self) -> Result<Vec<Subject>, Error> {
        self.get("/subjects/core").await
    }

    /// `POST /subjects`
    pub async fn create_subject(&self, body: &SubjectCreate) -> Result<Subject, Error> {
        self.post("/subjects", body).await
    }

    /// `PUT /subjects/{id}`
    pub async fn update_subject(&self, id: &Uuid, body: &SubjectUpdate) -> Result<Subject, Error> {
        self.put(&format!("/subjects/{id}"), body).await
    }

    /// `DELETE /subjects/{id}`
    pub async fn delete_subject(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/subjects/{id}")).await
    }
}
