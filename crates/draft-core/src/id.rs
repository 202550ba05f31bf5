use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A UUID tagged with the Rust type it identifies, so `ID<Session>` and
/// `ID<Participant>` can't be swapped at a call site even though both are
/// backed by the same representation.
pub struct ID<T> {
    uuid: Uuid,
    marker: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            marker: PhantomData,
        }
    }
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}
impl<T> Eq for ID<T> {}
impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state)
    }
}

impl<T> fmt::Debug for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}
impl<T> fmt::Display for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(s)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::from_uuid(Uuid::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Session;
    struct Participant;
    #[test]
    fn distinct_types_do_not_compare() {
        let a: ID<Session> = ID::default();
        let b: ID<Participant> = ID::from_uuid(a.uuid());
        assert_eq!(a.uuid(), b.uuid());
    }
    #[test]
    fn roundtrips_through_string() {
        let id: ID<Session> = ID::default();
        let parsed: ID<Session> = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
