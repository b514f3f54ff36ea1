use crate::enums::StoreKey;
use crate::error::CorruptStateError;
use crate::store::StateStore;
use crate::types::OfferIdSet;

/// The persisted offer sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollData {
    /// IDs the user marked as resolved. Stored under `oldOffers`.
    pub resolved: OfferIdSet,
    /// IDs already surfaced to the user. Stored under `knownOffers`.
    pub seen: OfferIdSet,
}

impl PollData {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Loads both sets from `store`. A missing set is empty; a corrupt one is logged and treated
    /// as empty.
    pub fn load<S>(store: &S) -> Self
    where
        S: StateStore + ?Sized,
    {
        Self {
            resolved: load_set_or_empty(store, StoreKey::OldOffers),
            seen: load_set_or_empty(store, StoreKey::KnownOffers),
        }
    }
    
    /// Writes both sets to `store`.
    pub fn save<S>(&self, store: &mut S)
    where
        S: StateStore + ?Sized,
    {
        self.save_resolved(store);
        self.save_seen(store);
    }
    
    /// Writes the resolved set to `store`.
    pub fn save_resolved<S>(&self, store: &mut S)
    where
        S: StateStore + ?Sized,
    {
        store.set_key(StoreKey::OldOffers, encode_set(&self.resolved));
    }
    
    /// Writes the seen set to `store`.
    pub fn save_seen<S>(&self, store: &mut S)
    where
        S: StateStore + ?Sized,
    {
        store.set_key(StoreKey::KnownOffers, encode_set(&self.seen));
    }
}

/// Loads the set under `key`.
pub fn load_set<S>(store: &S, key: StoreKey) -> Result<OfferIdSet, CorruptStateError>
where
    S: StateStore + ?Sized,
{
    let Some(data) = store.get_key(key) else {
        return Ok(OfferIdSet::new());
    };
    let ids: Vec<String> = serde_json::from_str(&data)
        .map_err(|source| CorruptStateError { key, source })?;
    
    Ok(ids.into_iter().collect())
}

fn load_set_or_empty<S>(store: &S, key: StoreKey) -> OfferIdSet
where
    S: StateStore + ?Sized,
{
    load_set(store, key).unwrap_or_else(|error| {
        log::warn!("{error}");
        OfferIdSet::new()
    })
}

/// Encodes a set as a JSON array. IDs are sorted so the same set is always written the same way.
fn encode_set(set: &OfferIdSet) -> String {
    let mut ids = set.iter().collect::<Vec<_>>();
    
    ids.sort();
    
    // Serializing a list of strings cannot fail.
    serde_json::to_string(&ids).unwrap_or_else(|_| String::from("[]"))
}
