// ── Cache keys ──
//
// A key addresses exactly one cached result: (collection, scope).
// List scopes carry their filter set, so differently-filtered lists of
// the same collection are distinct entries. Selectors are the other
// side of the contract: a mutation invalidates every list of a
// collection without having to know which filter combinations are live.

use std::fmt;

use strum::Display;
use uuid::Uuid;

/// Entity collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Collection {
    Years,
    Subjects,
    Classrooms,
    Rooms,
    Students,
    Enrollments,
}

/// Relation reads hanging off a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Relation {
    /// `/students/{id}/enrollments`, keyed by student.
    StudentEnrollments,
    /// Classroom roster, keyed by classroom.
    ClassroomRoster,
    /// `/rooms/{id}/usage`, keyed by room.
    RoomUsage,
    /// `/students/next-id`, keyed by school.
    NextStudentId,
}

/// Sorted, deduplicated (name, value) pairs.
///
/// The same pairs serve as the request's query string and as part of
/// the cache key, so two reads with the same filters in a different
/// order share one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet(Vec<(String, String)>);

impl FilterSet {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        pairs.sort();
        pairs.dedup();
        Self(pairs)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

/// Operation kind within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A filtered list. The unfiltered list is `List(FilterSet::empty())`.
    List(FilterSet),
    /// One entity by primary id.
    Detail(Uuid),
    /// A relation read off one entity, optionally filtered.
    Relation {
        rel: Relation,
        id: Uuid,
        filters: FilterSet,
    },
}

/// Address of one cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub collection: Collection,
    pub scope: Scope,
}

impl QueryKey {
    pub fn list(collection: Collection, filters: FilterSet) -> Self {
        Self {
            collection,
            scope: Scope::List(filters),
        }
    }

    pub fn detail(collection: Collection, id: Uuid) -> Self {
        Self {
            collection,
            scope: Scope::Detail(id),
        }
    }

    pub fn relation(collection: Collection, rel: Relation, id: Uuid, filters: FilterSet) -> Self {
        Self {
            collection,
            scope: Scope::Relation { rel, id, filters },
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::List(filters) if filters.is_empty() => {
                write!(f, "{}/list", self.collection)
            }
            Scope::List(filters) => write!(f, "{}/list?{filters}", self.collection),
            Scope::Detail(id) => write!(f, "{}/detail/{id}", self.collection),
            Scope::Relation { rel, id, filters } if filters.is_empty() => {
                write!(f, "{}/{rel}/{id}", self.collection)
            }
            Scope::Relation { rel, id, filters } => {
                write!(f, "{}/{rel}/{id}?{filters}", self.collection)
            }
        }
    }
}

/// Which keys a mutation invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every list of the collection, regardless of filters.
    Lists(Collection),
    /// One detail entry.
    Detail(Collection, Uuid),
    /// One entity's relation entries, regardless of filters.
    Relation(Collection, Relation, Uuid),
    /// Everything under the collection.
    Collection(Collection),
}

impl Selector {
    /// Does this selector cover the given key?
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Lists(c) => key.collection == *c && matches!(key.scope, Scope::List(_)),
            Self::Detail(c, id) => key.collection == *c && key.scope == Scope::Detail(*id),
            Self::Relation(c, r, id) => {
                key.collection == *c
                    && matches!(&key.scope, Scope::Relation { rel, id: kid, .. }
                        if rel == r && kid == id)
            }
            Self::Collection(c) => key.collection == *c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> Uuid {
        Uuid::from_u128(u128::from(n))
    }

    #[test]
    fn filter_order_does_not_matter() {
        let a = FilterSet::new([("grade_level", "3"), ("is_active", "true")]);
        let b = FilterSet::new([("is_active", "true"), ("grade_level", "3")]);
        assert_eq!(a, b);
        assert_eq!(
            QueryKey::list(Collection::Students, a),
            QueryKey::list(Collection::Students, b)
        );
    }

    #[test]
    fn lists_selector_covers_every_filter_combination() {
        let sel = Selector::Lists(Collection::Students);
        assert!(sel.matches(&QueryKey::list(Collection::Students, FilterSet::empty())));
        assert!(sel.matches(&QueryKey::list(
            Collection::Students,
            FilterSet::new([("grade_level", "3")])
        )));
        assert!(!sel.matches(&QueryKey::detail(Collection::Students, id(1))));
        assert!(!sel.matches(&QueryKey::list(Collection::Rooms, FilterSet::empty())));
    }

    #[test]
    fn detail_selector_is_per_identifier() {
        let sel = Selector::Detail(Collection::Rooms, id(1));
        assert!(sel.matches(&QueryKey::detail(Collection::Rooms, id(1))));
        assert!(!sel.matches(&QueryKey::detail(Collection::Rooms, id(2))));
    }

    #[test]
    fn relation_selector_ignores_filters() {
        let sel = Selector::Relation(Collection::Students, Relation::StudentEnrollments, id(1));
        assert!(sel.matches(&QueryKey::relation(
            Collection::Students,
            Relation::StudentEnrollments,
            id(1),
            FilterSet::new([("active_only", "true")])
        )));
        assert!(!sel.matches(&QueryKey::relation(
            Collection::Students,
            Relation::StudentEnrollments,
            id(2),
            FilterSet::empty()
        )));
    }

    #[test]
    fn collection_selector_covers_all_scopes() {
        let sel = Selector::Collection(Collection::Rooms);
        assert!(sel.matches(&QueryKey::list(Collection::Rooms, FilterSet::empty())));
        assert!(sel.matches(&QueryKey::detail(Collection::Rooms, id(3))));
        assert!(sel.matches(&QueryKey::relation(
            Collection::Rooms,
            Relation::RoomUsage,
            id(3),
            FilterSet::empty()
        )));
    }
}
