//! A separately chained hash table stored in [`GrowVec`] buckets.
//!
//! Keys are hashed with a [`BuildHasher`], [`FxBuildHasher`] unless another
//! is given. The bucket count is a power of two and doubles once the load
//! factor passes 3/4.

use core::{
    borrow::Borrow,
    fmt::{self, Debug, Formatter},
    hash::{BuildHasher, Hash},
    mem,
    ops::Index,
};

use rustc_hash::FxBuildHasher;

use crate::{GrowVec, Result, VecError::CapacityOverflow};

const INITIAL_BUCKETS: usize = 8;

struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

pub struct HashTable<K, V, S = FxBuildHasher> {
    buckets: GrowVec<GrowVec<Entry<K, V>>>,
    len: usize,
    hasher: S,
}

impl<K, V> HashTable<K, V, FxBuildHasher> {

    /// Creates an empty table. Buckets are allocated on the first insert.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {

    #[inline(always)]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: GrowVec::empty(),
            len: 0,
            hasher,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every entry, keeping the allocated buckets.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|entry| (&entry.key, &entry.value)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.buckets
            .iter_mut()
            .flat_map(|bucket| bucket.iter_mut().map(|entry| (&entry.key, &mut entry.value)))
    }
}

impl<K, V, S> HashTable<K, V, S>
    where
        K: Hash + Eq,
        S: BuildHasher,
{

    /// Creates an empty table with at least `count` buckets allocated.
    pub fn with_buckets(count: usize) -> Result<Self>
        where
            S: Default,
    {
        let count = count
            .max(1)
            .checked_next_power_of_two()
            .ok_or(CapacityOverflow { requested: count })?;
        let mut table = Self::with_hasher(S::default());
        table.rehash(count)?;
        Ok(table)
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Returns `false`, keeping the stored value, when the key exists.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        let hash = self.hasher.hash_one(&key);
        if self.find(hash, &key).is_some() {
            return Ok(false)
        }
        self.insert_new(hash, key, value)?;
        Ok(true)
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.hasher.hash_one(&key);
        if let Some((bucket, slot)) = self.find(hash, &key) {
            let entry = &mut self.buckets[bucket][slot];
            return Ok(Some(mem::replace(&mut entry.value, value)))
        }
        self.insert_new(hash, key, value)?;
        Ok(None)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.find(self.hasher.hash_one(key), key)?;
        Some(&self.buckets[bucket][slot].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.find(self.hasher.hash_one(key), key)?;
        Some(&mut self.buckets[bucket][slot].value)
    }

    #[inline(always)]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
    {
        let (bucket, slot) = self.find(self.hasher.hash_one(key), key)?;
        let entry = self.buckets[bucket].swap_remove(slot).ok()?;
        self.len -= 1;
        Some(entry.value)
    }

    fn find<Q>(&self, hash: u64, key: &Q) -> Option<(usize, usize)>
        where
            K: Borrow<Q>,
            Q: Eq + ?Sized,
    {
        if self.buckets.is_empty() {
            return None
        }
        let bucket = Self::bucket_index(hash, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .position(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|slot| (bucket, slot))
    }

    fn insert_new(&mut self, hash: u64, key: K, value: V) -> Result<()> {
        let count = self.buckets.len();
        if count == 0 {
            self.rehash(INITIAL_BUCKETS)?;
        }
        else if (self.len + 1) * 4 > count * 3 {
            let grown = count
                .checked_mul(2)
                .ok_or(CapacityOverflow { requested: count })?;
            self.rehash(grown)?;
        }
        let bucket = Self::bucket_index(hash, self.buckets.len());
        self.buckets[bucket].push(Entry { hash, key, value })?;
        self.len += 1;
        Ok(())
    }

    /// Moves every entry into `count` new buckets.
    ///
    /// All allocation happens before the first entry moves, so on error the
    /// table is left untouched.
    fn rehash(&mut self, count: usize) -> Result<()> {
        debug_assert!(count.is_power_of_two());
        let mut sizes: GrowVec<usize> = GrowVec::with_len(count, 0)?;
        for entry in self.buckets.iter().flat_map(|bucket| bucket.iter()) {
            sizes[Self::bucket_index(entry.hash, count)] += 1;
        }
        let mut buckets: GrowVec<GrowVec<Entry<K, V>>> = GrowVec::with_capacity(count)?;
        for &size in &sizes {
            buckets.push(GrowVec::with_capacity(size)?)?;
        }
        for bucket in &mut self.buckets {
            while let Ok(entry) = bucket.pop() {
                let target = &mut buckets[Self::bucket_index(entry.hash, count)];
                let pushed = target.push(entry).is_ok();
                debug_assert!(pushed);
            }
        }
        self.buckets = buckets;
        Ok(())
    }

    #[inline(always)]
    fn bucket_index(hash: u64, count: usize) -> usize {
        hash as usize & (count - 1)
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {

    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, Q> Index<&Q> for HashTable<K, V, S>
    where
        K: Hash + Eq + Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        S: BuildHasher,
{

    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in hash table"),
        }
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::RandomState;

    use super::*;

    #[test]
    fn insert_keeps_existing_value() {
        let mut table = HashTable::new();
        assert_eq!(table.insert("a", 1), Ok(true));
        assert_eq!(table.insert("a", 2), Ok(false));
        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_or_replace_returns_old() {
        let mut table = HashTable::new();
        assert_eq!(table.insert_or_replace(1u32, "one"), Ok(None));
        assert_eq!(table.insert_or_replace(1u32, "uno"), Ok(Some("one")));
        assert_eq!(table[&1], "uno");
    }

    #[test]
    fn lazily_allocates_buckets() {
        let mut table: HashTable<u32, u32> = HashTable::new();
        assert_eq!(table.bucket_count(), 0);
        assert_eq!(table.get(&1), None);
        table.insert(1, 1).unwrap();
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS);
    }

    #[test]
    fn grows_past_load_factor() {
        let mut table: HashTable<u32, u32> = HashTable::new();
        for i in 0..100 {
            table.insert(i, i * i).unwrap();
        }
        assert_eq!(table.len(), 100);
        assert!(table.bucket_count() * 3 >= table.len() * 4);
        for i in 0..100 {
            assert_eq!(table.get(&i), Some(&(i * i)));
        }
    }

    #[test]
    fn borrowed_lookup() {
        let mut table: HashTable<String, usize> = HashTable::new();
        table.insert(String::from("alpha"), 1).unwrap();
        assert!(table.contains_key("alpha"));
        assert!(!table.contains_key("beta"));
        *table.get_mut("alpha").unwrap() += 1;
        assert_eq!(table["alpha"], 2);
    }

    #[test]
    fn remove_then_reinsert() {
        let mut table = HashTable::new();
        table.insert(7, 'x').unwrap();
        assert_eq!(table.remove(&7), Some('x'));
        assert_eq!(table.remove(&7), None);
        assert!(table.is_empty());
        assert_eq!(table.insert(7, 'y'), Ok(true));
        assert_eq!(table[&7], 'y');
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut table = HashTable::new();
        for i in 0..20 {
            table.insert(i, ()).unwrap();
        }
        let buckets = table.bucket_count();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), buckets);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn iteration_visits_every_entry() {
        let mut table = HashTable::new();
        for i in 0..10u64 {
            table.insert(i, i).unwrap();
        }
        for (_, value) in table.iter_mut() {
            *value += 1;
        }
        let mut seen: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
        seen.sort();
        assert_eq!(seen, (0..10).map(|i| (i, i + 1)).collect::<Vec<_>>());
    }

    #[test]
    fn with_buckets_rounds_up() {
        let table: HashTable<u8, u8, RandomState> = HashTable::with_buckets(5).unwrap();
        assert_eq!(table.bucket_count(), 8);
    }

    #[test]
    fn with_buckets_reports_overflow() {
        let result: Result<HashTable<u8, u8>> = HashTable::with_buckets(usize::MAX);
        assert!(matches!(result, Err(CapacityOverflow { requested: usize::MAX })));
        let result: Result<HashTable<u8, u8>> = HashTable::with_buckets((usize::MAX >> 1) + 2);
        assert!(matches!(result, Err(CapacityOverflow { .. })));
    }

    #[test]
    fn rehash_keeps_every_entry() {
        let mut table: HashTable<u32, u32> = HashTable::with_buckets(1).unwrap();
        assert_eq!(table.bucket_count(), 1);
        for i in 0..64 {
            table.insert(i, i + 1).unwrap();
            assert_eq!(table.iter().count(), table.len());
        }
        assert_eq!(table.bucket_count(), 128);
        for i in 0..64 {
            assert_eq!(table[&i], i + 1);
        }
    }

    #[test]
    fn independent_of_insertion_order() {
        let mut forward = HashTable::new();
        let mut backward = HashTable::new();
        for i in 0..32u32 {
            forward.insert(i, i).unwrap();
            backward.insert(31 - i, 31 - i).unwrap();
        }
        for i in 0..32u32 {
            assert_eq!(forward.get(&i), backward.get(&i));
        }
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn missing_key_panics() {
        let table: HashTable<u32, u32> = HashTable::new();
        let _ = table[&3];
    }
}
