// Academic year endpoints.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AcademicYear, AcademicYearCreate, AcademicYearUpdate};

impl ApiClient {
    /// `GET /academic-years`
    pub async fn list_years(&self) -> Result<Vec<AcademicYear>, Error> {
        self.get("/academic-years").await
    }

    /// `GET /academic-years/active` -- the single currently-active year.
    pub async fn active_year(&self) -> Result<AcademicYear, Error> {
        self.get("/academic-years/active").await
    }

    /// `POST /academic-years`
    pub async fn create_year(&self, body: &AcademicYearCreate) -> Result<AcademicYear, Error> {
        self.post("/academic-years", body).await
    }

    /// `PUT /academic-years/{id}`
    pub async fn update_year(
        &self,
        id: &Uuid,
        body: &AcademicYearUpdate,
    ) -> Result<AcademicYear, Error> {
        self.put(&format!("/academic-years/{id}"), body).await
    }

    /// `PATCH /academic-years/{id}/activate` -- make this the active
    /// year, deactivating any other.
    pub async fn activate_year(&self, id: &Uuid) -> Result<AcademicYear, Error> {
        self.patch_empty(&format!("/academic-years/{id}/activate"))
            .await
    }

    /// `DELETE /academic-years/{id}`
    pub async fn delete_year(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/academic-years/{id}")).await
    }
}
