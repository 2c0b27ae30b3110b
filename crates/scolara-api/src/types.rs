// Wire types for the Scolara REST API.
//
// One canonical schema per resource, matching the server's output
// models field for field. Create/Update payloads mirror the server's
// input models: update payloads are all-optional and omit unset fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Authentication ──────────────────────────────────────────────────

/// `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `GET /auth/context` response: the user plus every role/school pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthContext {
    pub user: AuthUser,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    #[serde(default)]
    pub schools: Vec<SchoolRef>,
    #[serde(default)]
    pub active_role: Option<String>,
    #[serde(default)]
    pub active_school: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One role grant: a server-side role identifier scoped to a school.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleEntry {
    pub role: String,
    pub school_id: Uuid,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRef {
    pub id: Uuid,
    pub name: String,
}

// ── Academic years ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcademicYearCreate {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AcademicYearUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ── Subjects ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// ── Classrooms ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassroomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

// ── Rooms ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Classroom,
    Special,
    Outdoor,
    MultiPurpose,
    Other,
    Art,
    Library,
    Lab,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // mirrors the server's flag set
pub struct Room {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub room_code: String,
    pub room_type: RoomType,
    pub capacity: i32,
    #[serde(default)]
    pub has_projector: bool,
    #[serde(default)]
    pub has_computers: bool,
    #[serde(default)]
    pub has_smartboard: bool,
    #[serde(default)]
    pub has_sink: bool,
    #[serde(default = "default_true")]
    pub is_bookable: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[allow(clippy::struct_excessive_bools)] // mirrors the server's flag set
pub struct RoomCreate {
    pub school_id: Uuid,
    pub name: String,
    pub room_code: String,
    pub room_type: RoomType,
    pub capacity: i32,
    pub has_projector: bool,
    pub has_computers: bool,
    pub has_smartboard: bool,
    pub has_sink: bool,
    pub is_bookable: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projector: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_computers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_smartboard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_sink: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `GET /rooms/{id}/usage` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUsage {
    pub room: RoomUsageSummary,
    pub is_available: bool,
    #[serde(default)]
    pub assigned_classrooms: Vec<RoomUsageClassroom>,
    pub usage_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUsageSummary {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUsageClassroom {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Optional filters for `GET /rooms`.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub school_id: Option<Uuid>,
    pub room_type: Option<RoomType>,
    pub bookable_only: Option<bool>,
    pub min_capacity: Option<i32>,
    pub has_projector: Option<bool>,
    pub has_computers: Option<bool>,
    pub has_smartboard: Option<bool>,
    pub has_sink: Option<bool>,
}

impl RoomFilter {
    /// Query parameters, in declaration order, skipping unset fields.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.school_id {
            params.push(("school_id", id.to_string()));
        }
        if let Some(t) = self.room_type {
            // Enum serializes as a bare JSON string; strip the quotes.
            let raw = serde_json::to_string(&t).unwrap_or_default();
            params.push(("room_type", raw.trim_matches('"').to_owned()));
        }
        if let Some(v) = self.bookable_only {
            params.push(("bookable_only", v.to_string()));
        }
        if let Some(v) = self.min_capacity {
            params.push(("min_capacity", v.to_string()));
        }
        if let Some(v) = self.has_projector {
            params.push(("has_projector", v.to_string()));
        }
        if let Some(v) = self.has_computers {
            params.push(("has_computers", v.to_string()));
        }
        if let Some(v) = self.has_smartboard {
            params.push(("has_smartboard", v.to_string()));
        }
        if let Some(v) = self.has_sink {
            params.push(("has_sink", v.to_string()));
        }
        params
    }
}

// ── Students ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// External student number, distinct from the primary `id`.
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    /// Grade when first enrolled (historical).
    pub entry_grade_level: String,
    /// Grade now.
    pub current_grade_level: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    pub entry_grade_level: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `GET /students/next-id` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextStudentId {
    pub student_id: String,
}

/// Optional filters for `GET /students`.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub school_id: Option<Uuid>,
    pub grade_level: Option<String>,
    pub is_active: Option<bool>,
}

impl StudentFilter {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.school_id {
            params.push(("school_id", id.to_string()));
        }
        if let Some(ref g) = self.grade_level {
            params.push(("grade_level", g.clone()));
        }
        if let Some(v) = self.is_active {
            params.push(("is_active", v.to_string()));
        }
        params
    }
}

// ── Enrollments ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Pending,
    Withdrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub classroom_id: Uuid,
    #[serde(default)]
    pub academic_year_id: Option<Uuid>,
    /// Grade for this enrollment specifically; may differ from the
    /// student's current grade.
    pub grade_level: String,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub withdrawal_date: Option<NaiveDate>,
    pub enrollment_status: EnrollmentStatus,
    pub is_active: bool,
    #[serde(default)]
    pub withdrawal_reason: Option<String>,
    #[serde(default)]
    pub is_audit_only: bool,
    #[serde(default)]
    pub requires_accommodation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentCreate {
    pub student_id: Uuid,
    pub classroom_id: Uuid,
    pub grade_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    pub enrollment_status: EnrollmentStatus,
    pub is_audit_only: bool,
    pub requires_accommodation: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrollmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<EnrollmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_audit_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_accommodation: Option<bool>,
}

/// One row of a classroom roster: student joined with enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterStudent {
    pub id: Uuid,
    #[serde(default)]
    pub student_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub current_grade_level: String,
    pub enrollment_id: Uuid,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    pub enrollment_status: EnrollmentStatus,
    pub is_active: bool,
    #[serde(default)]
    pub requires_accommodation: bool,
}

/// Optional filters for `GET /enrollments`.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    pub student_id: Option<Uuid>,
    pub classroom_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl EnrollmentFilter {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.student_id {
            params.push(("student_id", id.to_string()));
        }
        if let Some(id) = self.classroom_id {
            params.push(("classroom_id", id.to_string()));
        }
        if let Some(v) = self.is_active {
            params.push(("is_active", v.to_string()));
        }
        params
    }
}

/// Optional filters for `GET /students/{id}/enrollments`.
#[derive(Debug, Clone, Default)]
pub struct StudentEnrollmentFilter {
    pub academic_year_id: Option<Uuid>,
    pub active_only: Option<bool>,
}

impl StudentEnrollmentFilter {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.academic_year_id {
            params.push(("academic_year_id", id.to_string()));
        }
        if let Some(v) = self.active_only {
            params.push(("active_only", v.to_string()));
        }
        params
    }
}

fn default_true() -> bool {
    true
}
