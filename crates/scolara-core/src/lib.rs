//! Session and cache coordination between `scolara-api` and UI consumers.
//!
//! This crate owns the pieces that keep an interactive client consistent
//! with the server without full-page reloads:
//!
//! - **[`Coordinator`]** — Central facade. Tracks the authenticated
//!   session (token + resolved profile), serves cached reads, and runs
//!   mutations with post-success cache invalidation. Cheaply cloneable.
//!
//! - **[`QueryCache`]** — Cached query results addressed by
//!   [`QueryKey`] (collection, scope, filters). Mutations invalidate
//!   via [`Selector`]s so every list of a collection can be dropped
//!   without knowing which filter combinations are live.
//!
//! - **[`SessionState`]** — Observable authentication state. A 401 from
//!   any endpoint demotes the session to `Unauthenticated`; the UI
//!   watches the channel and redirects to login.
//!
//! - **[`Role`]** — The closed application role set, derived from
//!   server role grants through an explicit mapping table.

pub mod coordinator;
pub mod error;
pub mod query;
pub mod roles;
pub mod session;

pub use coordinator::Coordinator;
pub use error::CoreError;
pub use query::{Collection, FilterSet, QueryCache, QueryKey, Relation, Scope, Selector};
pub use roles::Role;
pub use session::{Profile, SessionState};
