// ── Session/cache coordinator ──
//
// The facade UI code calls into. Owns the session (single writer) and
// the query cache, and enforces the two ordering contracts:
//   - invalidation runs only after a mutation's success is observed,
//     never before and never on failure;
//   - a 401 from any endpoint tears the session down before the error
//     reaches the caller.

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use scolara_api::types::{
    AcademicYear, AcademicYearCreate, AcademicYearUpdate, Classroom, ClassroomCreate,
    ClassroomUpdate, Enrollment, EnrollmentCreate, EnrollmentFilter, EnrollmentUpdate,
    NextStudentId, RoleEntry, Room, RoomCreate, RoomFilter, RoomUpdate, RoomUsage, RosterStudent,
    Student, StudentCreate, StudentEnrollmentFilter, StudentFilter, StudentUpdate, Subject,
    SubjectCreate, SubjectUpdate,
};
use scolara_api::{ApiClient, TokenStore};

use crate::error::CoreError;
use crate::query::{Collection, FilterSet, QueryCache, QueryKey, Relation, Selector};
use crate::roles::{Role, map_server_role};
use crate::session::{Profile, SessionState};

/// The main entry point for UI consumers.
///
/// Cheaply cloneable via `Arc` internals; all clones share the same
/// session, token slot, and cache.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    cache: QueryCache,
    session: watch::Sender<SessionState>,
}

impl Coordinator {
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.tokens();
        let (session, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            inner: Arc::new(CoordinatorInner {
                api,
                tokens,
                cache: QueryCache::new(),
                session,
            }),
        }
    }

    /// The underlying transport client.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The query cache (exposed for observation, e.g. epoch subscription).
    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Subscribe to session state changes. The UI watches this channel
    /// and redirects to login when the state drops to `Unauthenticated`.
    pub fn session(&self) -> watch::Receiver<SessionState> {
        self.inner.session.subscribe()
    }

    /// Snapshot of the current session state.
    pub fn session_state(&self) -> SessionState {
        self.inner.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.borrow().is_authenticated()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in and resolve the profile.
    ///
    /// The token is persisted only after the credential exchange
    /// succeeds. If the follow-up profile resolution fails the token is
    /// cleared again, so a failed login never leaves a half-opened
    /// session and never persists a token.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Profile, CoreError> {
        let token = self
            .inner
            .api
            .login(username, password)
            .await
            .map_err(|e| match e {
                scolara_api::Error::Authentication { message } => {
                    CoreError::AuthFailed { message }
                }
                scolara_api::Error::SessionExpired => CoreError::AuthFailed {
                    message: "invalid credentials".into(),
                },
                other => other.into(),
            })?;

        self.inner.tokens.set(token);
        let _ = self.inner.session.send(SessionState::PendingProfile);

        match self.fetch_profile().await {
            Ok(profile) => {
                let _ = self
                    .inner
                    .session
                    .send(SessionState::Authenticated(profile.clone()));
                debug!(role = %profile.role, "login complete");
                Ok(profile)
            }
            Err(e) => {
                self.inner.tokens.clear();
                let _ = self.inner.session.send(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// Clear token, profile, and user-scoped cache. Never fails.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.inner.cache.clear();
        let _ = self.inner.session.send(SessionState::Unauthenticated);
        debug!("logged out");
    }

    /// Startup path: revalidate a persisted token.
    ///
    /// Never surfaces an error. Any failure (including a 401 for a
    /// revoked token) clears the token and leaves the session
    /// unauthenticated, so app boot is not blocked by a stale token.
    pub async fn restore_session(&self) -> SessionState {
        if self.inner.tokens.get().is_none() {
            let _ = self.inner.session.send(SessionState::Unauthenticated);
            return SessionState::Unauthenticated;
        }

        let _ = self.inner.session.send(SessionState::PendingProfile);

        match self.fetch_profile().await {
            Ok(profile) => {
                let state = SessionState::Authenticated(profile);
                let _ = self.inner.session.send(state.clone());
                state
            }
            Err(e) => {
                warn!(error = %e, "profile revalidation failed, demoting to unauthenticated");
                self.inner.tokens.clear();
                let _ = self.inner.session.send(SessionState::Unauthenticated);
                SessionState::Unauthenticated
            }
        }
    }

    /// Fetch `/auth/context` and derive the effective profile.
    async fn fetch_profile(&self) -> Result<Profile, CoreError> {
        let ctx = self.inner.api.auth_context().await?;
        let (role, school_id) = derive_role(&ctx.roles)?;
        Ok(Profile {
            user_id: ctx.user.id,
            email: ctx.user.email,
            first_name: ctx.user.first_name,
            last_name: ctx.user.last_name,
            role,
            school_id,
        })
    }

    // ── Internal plumbing ────────────────────────────────────────────

    fn require_auth(&self) -> Result<(), CoreError> {
        if self.inner.tokens.get().is_some() {
            Ok(())
        } else {
            Err(CoreError::Unauthenticated)
        }
    }

    /// Translate a transport error, tearing the session down on 401.
    /// The transport has already cleared the token by the time
    /// `SessionExpired` is observed here.
    fn normalize_error(&self, err: scolara_api::Error) -> CoreError {
        if matches!(err, scolara_api::Error::SessionExpired) {
            self.inner.cache.clear();
            let _ = self.inner.session.send(SessionState::Unauthenticated);
        }
        err.into()
    }

    /// Serve a read through the cache.
    ///
    /// Fresh hit: deserialize the cached value, no HTTP. Miss or stale:
    /// fetch, store the completed result (last completion wins), return.
    async fn cached<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, CoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, scolara_api::Error>>,
    {
        self.require_auth()?;

        if let Some(value) = self.inner.cache.fresh(&key) {
            debug!(key = %key, "cache hit");
            return serde_json::from_value(value.as_ref().clone()).map_err(|e| {
                CoreError::ValidationFailed {
                    message: format!("cached value for {key} no longer matches schema: {e}"),
                }
            });
        }

        debug!(key = %key, "cache miss");
        let fetched = fetch().await.map_err(|e| self.normalize_error(e))?;

        match serde_json::to_value(&fetched) {
            Ok(value) => self.inner.cache.store(key, value),
            Err(e) => warn!(key = %key, error = %e, "response not cacheable"),
        }

        Ok(fetched)
    }

    fn invalidate_all(&self, selectors: &[Selector]) {
        for selector in selectors {
            let marked = self.inner.cache.invalidate(selector);
            debug!(?selector, marked, "invalidated");
        }
    }

    // ── Academic years ───────────────────────────────────────────────

    pub async fn list_years(&self) -> Result<Vec<AcademicYear>, CoreError> {
        let api = self.inner.api.clone();
        self.cached(
            QueryKey::list(Collection::Years, FilterSet::empty()),
            || async move { api.list_years().await },
        )
        .await
    }

    /// The currently-active year. Cached as a Years list with a
    /// reserved filter so every Years list invalidation covers it.
    pub async fn active_year(&self) -> Result<AcademicYear, CoreError> {
        let api = self.inner.api.clone();
        self.cached(
            QueryKey::list(Collection::Years, FilterSet::new([("active", "true")])),
            || async move { api.active_year().await },
        )
        .await
    }

    pub async fn create_year(&self, body: &AcademicYearCreate) -> Result<AcademicYear, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_year(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[Selector::Lists(Collection::Years)]);
        Ok(created)
    }

    pub async fn update_year(
        &self,
        id: &Uuid,
        body: &AcademicYearUpdate,
    ) -> Result<AcademicYear, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_year(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Years),
            Selector::Detail(Collection::Years, *id),
        ]);
        Ok(updated)
    }

    pub async fn activate_year(&self, id: &Uuid) -> Result<AcademicYear, CoreError> {
        self.require_auth()?;
        let activated = self
            .inner
            .api
            .activate_year(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        // Activation flips is_active on the previously-active year too,
        // so every Years list (the active singleton included) goes stale.
        self.invalidate_all(&[
            Selector::Lists(Collection::Years),
            Selector::Detail(Collection::Years, *id),
        ]);
        Ok(activated)
    }

    pub async fn delete_year(&self, id: &Uuid) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .delete_year(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Years),
            Selector::Detail(Collection::Years, *id),
        ]);
        Ok(())
    }

    // ── Subjects ─────────────────────────────────────────────────────

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, CoreError> {
        let api = self.inner.api.clone();
        self.cached(
            QueryKey::list(Collection::Subjects, FilterSet::empty()),
            || async move { api.list_subjects().await },
        )
        .await
    }

    pub async fn list_core_subjects(&self) -> Result<Vec<Subject>, CoreError> {
        let api = self.inner.api.clone();
        self.cached(
            QueryKey::list(Collection::Subjects, FilterSet::new([("core", "true")])),
            || async move { api.list_core_subjects().await },
        )
        .await
    }

    pub async fn create_subject(&self, body: &SubjectCreate) -> Result<Subject, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_subject(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[Selector::Lists(Collection::Subjects)]);
        Ok(created)
    }

    pub async fn update_subject(
        &self,
        id: &Uuid,
        body: &SubjectUpdate,
    ) -> Result<Subject, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_subject(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Subjects),
            Selector::Detail(Collection::Subjects, *id),
        ]);
        Ok(updated)
    }

    pub async fn delete_subject(&self, id: &Uuid) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .delete_subject(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Subjects),
            Selector::Detail(Collection::Subjects, *id),
        ]);
        Ok(())
    }

    // ── Classrooms ───────────────────────────────────────────────────

    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>, CoreError> {
        let api = self.inner.api.clone();
        self.cached(
            QueryKey::list(Collection::Classrooms, FilterSet::empty()),
            || async move { api.list_classrooms().await },
        )
        .await
    }

    pub async fn classroom_roster(
        &self,
        classroom_id: &Uuid,
        active_only: bool,
    ) -> Result<Vec<RosterStudent>, CoreError> {
        let api = self.inner.api.clone();
        let id = *classroom_id;
        self.cached(
            QueryKey::relation(
                Collection::Classrooms,
                Relation::ClassroomRoster,
                id,
                FilterSet::new([("active_only", active_only.to_string())]),
            ),
            || async move { api.classroom_roster(&id, active_only).await },
        )
        .await
    }

    pub async fn create_classroom(&self, body: &ClassroomCreate) -> Result<Classroom, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_classroom(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[Selector::Lists(Collection::Classrooms)]);
        Ok(created)
    }

    pub async fn update_classroom(
        &self,
        id: &Uuid,
        body: &ClassroomUpdate,
    ) -> Result<Classroom, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_classroom(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Classrooms),
            Selector::Detail(Collection::Classrooms, *id),
            Selector::Relation(Collection::Classrooms, Relation::ClassroomRoster, *id),
        ]);
        Ok(updated)
    }

    pub async fn delete_classroom(&self, id: &Uuid) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .delete_classroom(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Classrooms),
            Selector::Detail(Collection::Classrooms, *id),
            Selector::Relation(Collection::Classrooms, Relation::ClassroomRoster, *id),
        ]);
        Ok(())
    }

    // ── Rooms ────────────────────────────────────────────────────────

    pub async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, CoreError> {
        let api = self.inner.api.clone();
        let filter = filter.clone();
        self.cached(
            QueryKey::list(Collection::Rooms, FilterSet::new(filter.params())),
            || async move { api.list_rooms(&filter).await },
        )
        .await
    }

    pub async fn get_room(&self, id: &Uuid) -> Result<Room, CoreError> {
        let api = self.inner.api.clone();
        let id = *id;
        self.cached(QueryKey::detail(Collection::Rooms, id), || async move {
            api.get_room(&id).await
        })
        .await
    }

    pub async fn room_usage(&self, id: &Uuid) -> Result<RoomUsage, CoreError> {
        let api = self.inner.api.clone();
        let id = *id;
        self.cached(
            QueryKey::relation(
                Collection::Rooms,
                Relation::RoomUsage,
                id,
                FilterSet::empty(),
            ),
            || async move { api.room_usage(&id).await },
        )
        .await
    }

    pub async fn create_room(&self, body: &RoomCreate) -> Result<Room, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_room(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[Selector::Lists(Collection::Rooms)]);
        Ok(created)
    }

    pub async fn update_room(&self, id: &Uuid, body: &RoomUpdate) -> Result<Room, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_room(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&room_selectors(*id));
        Ok(updated)
    }

    pub async fn delete_room(&self, id: &Uuid) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .delete_room(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&room_selectors(*id));
        Ok(())
    }

    pub async fn restore_room(&self, id: &Uuid) -> Result<Room, CoreError> {
        self.require_auth()?;
        let restored = self
            .inner
            .api
            .restore_room(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&room_selectors(*id));
        Ok(restored)
    }

    // ── Students ─────────────────────────────────────────────────────

    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, CoreError> {
        let api = self.inner.api.clone();
        let filter = filter.clone();
        self.cached(
            QueryKey::list(Collection::Students, FilterSet::new(filter.params())),
            || async move { api.list_students(&filter).await },
        )
        .await
    }

    pub async fn get_student(&self, id: &Uuid) -> Result<Student, CoreError> {
        let api = self.inner.api.clone();
        let id = *id;
        self.cached(QueryKey::detail(Collection::Students, id), || async move {
            api.get_student(&id).await
        })
        .await
    }

    /// The next free external student number for a school. Never served
    /// stale for long: creating a student invalidates it.
    pub async fn next_student_id(&self, school_id: &Uuid) -> Result<String, CoreError> {
        let api = self.inner.api.clone();
        let school = *school_id;
        let next: NextStudentId = self
            .cached(
                QueryKey::relation(
                    Collection::Students,
                    Relation::NextStudentId,
                    school,
                    FilterSet::empty(),
                ),
                || async move { api.next_student_id(&school).await },
            )
            .await?;
        Ok(next.student_id)
    }

    pub async fn student_enrollments(
        &self,
        student_id: &Uuid,
        filter: &StudentEnrollmentFilter,
    ) -> Result<Vec<Enrollment>, CoreError> {
        let api = self.inner.api.clone();
        let id = *student_id;
        let filter = filter.clone();
        self.cached(
            QueryKey::relation(
                Collection::Students,
                Relation::StudentEnrollments,
                id,
                FilterSet::new(filter.params()),
            ),
            || async move { api.student_enrollments(&id, &filter).await },
        )
        .await
    }

    pub async fn create_student(&self, body: &StudentCreate) -> Result<Student, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_student(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        // The school's next-id is derived from the student set, so it
        // went stale the instant this create landed.
        self.invalidate_all(&[
            Selector::Lists(Collection::Students),
            Selector::Relation(
                Collection::Students,
                Relation::NextStudentId,
                created.school_id,
            ),
        ]);
        Ok(created)
    }

    pub async fn update_student(
        &self,
        id: &Uuid,
        body: &StudentUpdate,
    ) -> Result<Student, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_student(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Students),
            Selector::Detail(Collection::Students, *id),
        ]);
        Ok(updated)
    }

    pub async fn delete_student(&self, id: &Uuid) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .delete_student(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Students),
            Selector::Detail(Collection::Students, *id),
        ]);
        Ok(())
    }

    // ── Enrollments ──────────────────────────────────────────────────

    pub async fn list_enrollments(
        &self,
        filter: &EnrollmentFilter,
    ) -> Result<Vec<Enrollment>, CoreError> {
        let api = self.inner.api.clone();
        let filter = filter.clone();
        self.cached(
            QueryKey::list(Collection::Enrollments, FilterSet::new(filter.params())),
            || async move { api.list_enrollments(&filter).await },
        )
        .await
    }

    pub async fn get_enrollment(&self, id: &Uuid) -> Result<Enrollment, CoreError> {
        let api = self.inner.api.clone();
        let id = *id;
        self.cached(
            QueryKey::detail(Collection::Enrollments, id),
            || async move { api.get_enrollment(&id).await },
        )
        .await
    }

    /// Enroll a student. Invalidates the enrollment lists, the affected
    /// student's enrollment relation, and the affected classroom's
    /// roster.
    pub async fn create_enrollment(
        &self,
        body: &EnrollmentCreate,
    ) -> Result<Enrollment, CoreError> {
        self.require_auth()?;
        let created = self
            .inner
            .api
            .create_enrollment(body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Enrollments),
            Selector::Relation(
                Collection::Students,
                Relation::StudentEnrollments,
                created.student_id,
            ),
            Selector::Relation(
                Collection::Classrooms,
                Relation::ClassroomRoster,
                created.classroom_id,
            ),
        ]);
        Ok(created)
    }

    pub async fn update_enrollment(
        &self,
        id: &Uuid,
        body: &EnrollmentUpdate,
    ) -> Result<Enrollment, CoreError> {
        self.require_auth()?;
        let updated = self
            .inner
            .api
            .update_enrollment(id, body)
            .await
            .map_err(|e| self.normalize_error(e))?;
        self.invalidate_all(&[
            Selector::Lists(Collection::Enrollments),
            Selector::Detail(Collection::Enrollments, *id),
            Selector::Relation(
                Collection::Students,
                Relation::StudentEnrollments,
                updated.student_id,
            ),
            Selector::Relation(
                Collection::Classrooms,
                Relation::ClassroomRoster,
                updated.classroom_id,
            ),
        ]);
        Ok(updated)
    }

    /// Withdraw an enrollment.
    ///
    /// The DELETE response is empty, so the caller supplies the student
    /// (and, where relevant, the classroom) whose derived reads must be
    /// dropped.
    pub async fn withdraw_enrollment(
        &self,
        id: &Uuid,
        student_id: &Uuid,
        classroom_id: Option<&Uuid>,
    ) -> Result<(), CoreError> {
        self.require_auth()?;
        self.inner
            .api
            .withdraw_enrollment(id)
            .await
            .map_err(|e| self.normalize_error(e))?;
        let mut selectors = vec![
            Selector::Lists(Collection::Enrollments),
            Selector::Detail(Collection::Enrollments, *id),
            Selector::Relation(
                Collection::Students,
                Relation::StudentEnrollments,
                *student_id,
            ),
        ];
        if let Some(classroom_id) = classroom_id {
            selectors.push(Selector::Relation(
                Collection::Classrooms,
                Relation::ClassroomRoster,
                *classroom_id,
            ));
        }
        self.invalidate_all(&selectors);
        Ok(())
    }
}

/// Selectors a room mutation must drop: the lists, the detail, and the
/// room's usage relation.
fn room_selectors(id: Uuid) -> [Selector; 3] {
    [
        Selector::Lists(Collection::Rooms),
        Selector::Detail(Collection::Rooms, id),
        Selector::Relation(Collection::Rooms, Relation::RoomUsage, id),
    ]
}

/// Derive the effective (role, school) from the server's role grants.
///
/// Active grants are considered in server order; the first one the
/// mapping table knows wins. Active grants the table does not know are
/// logged and skipped -- and if no active grant maps at all, resolution
/// fails rather than guessing. A user with no active grants falls back
/// to the least-privileged role, scoped to the first grant's school if
/// one exists.
fn derive_role(entries: &[RoleEntry]) -> Result<(Role, Option<Uuid>), CoreError> {
    let mut unmapped: Option<String> = None;

    for entry in entries.iter().filter(|e| e.is_active) {
        match map_server_role(&entry.role) {
            Some(role) => return Ok((role, Some(entry.school_id))),
            None => {
                warn!(role = %entry.role, "unmapped server role, skipping");
                unmapped.get_or_insert_with(|| entry.role.clone());
            }
        }
    }

    if let Some(role) = unmapped {
        return Err(CoreError::UnmappedRole { role });
    }

    Ok((Role::Student, entries.first().map(|e| e.school_id)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(role: &str, school: u8, active: bool) -> RoleEntry {
        RoleEntry {
            role: role.into(),
            school_id: Uuid::from_u128(u128::from(school)),
            is_active: active,
        }
    }

    #[test]
    fn first_active_mapped_grant_wins() {
        let entries = vec![
            entry("teacher", 1, false),
            entry("principal", 2, true),
            entry("teacher", 3, true),
        ];
        let (role, school) = derive_role(&entries).unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(school, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn unmapped_active_grants_are_skipped_in_favor_of_mapped_ones() {
        let entries = vec![entry("lunch monitor", 1, true), entry("teacher", 2, true)];
        let (role, school) = derive_role(&entries).unwrap();
        assert_eq!(role, Role::Teacher);
        assert_eq!(school, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn only_unmapped_active_grants_fail_resolution() {
        let entries = vec![entry("lunch monitor", 1, true)];
        let err = derive_role(&entries).unwrap_err();
        assert!(matches!(err, CoreError::UnmappedRole { ref role } if role == "lunch monitor"));
    }

    #[test]
    fn no_active_grants_falls_back_to_student() {
        let entries = vec![entry("teacher", 7, false)];
        let (role, school) = derive_role(&entries).unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(school, Some(Uuid::from_u128(7)));
    }

    #[test]
    fn no_grants_at_all_has_no_school() {
        let (role, school) = derive_role(&[]).unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(school, None);
    }
}
