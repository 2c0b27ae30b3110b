// Room (facility) endpoints.
//
// Rooms are soft-deleted: DELETE marks a room inactive and a restore
// endpoint brings it back.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Room, RoomCreate, RoomFilter, RoomUpdate, RoomUsage};

impl ApiClient {
    /// `GET /rooms`, with optional facility filters.
    pub async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, Error> {
        self.get_with_params("/rooms", &filter.params()).await
    }

    /// `GET /rooms/{id}`
    pub async fn get_room(&self, id: &Uuid) -> Result<Room, Error> {
        self.get(&format!("/rooms/{id}")).await
    }

    /// `GET /rooms/{id}/usage` -- availability plus the classrooms
    /// currently assigned to the room.
    pub async fn room_usage(&self, id: &Uuid) -> Result<RoomUsage, Error> {
        self.get(&format!("/rooms/{id}/usage")).await
    }

    /// `POST /rooms`
    pub async fn create_room(&self, body: &RoomCreate) -> Result<Room, Error> {
        self.post("/rooms", body).await
    }

    /// `PATCH /rooms/{id}`
    pub async fn update_room(&self, id: &Uuid, body: &RoomUpdate) -> Result<Room, Error> {
        self.patch(&format!("/rooms/{id}"), body).await
    }

    /// `DELETE /rooms/{id}` (soft delete)
    pub async fn delete_room(&self, id: &Uuid) -> Result<(), Error> {
        self.delete(&format!("/rooms/{id}")).await
    }

    /// `POST /rooms/{id}/restore` -- undo a soft delete.
    pub async fn restore_room(&self, id: &Uuid) -> Result<Room, Error> {
        self.post_empty(&format!("/rooms/{id}/restore")).await
    }
}
