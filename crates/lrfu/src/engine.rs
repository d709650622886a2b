//! The LRFU engine: an arena-backed recency list scored by decaying CRF.
//!
//! # Complexity
//! - `new`, `len`, `is_empty`, `clock`, `stats`: `O(1)`.
//! - `set`, `get`, `peek`, `contains`, `crf`, `remove`, `pop`: `O(1)`
//!   amortized.
//! - `evict` and over-capacity `set`: `O(1)` with
//!   [`EvictionStrategy::Recency`], `O(n)` with
//!   [`EvictionStrategy::MinimumCrf`].
//! - `clear`: `O(n)` listener calls plus drops.
//!
//! # Thread Safety
//! - `Lrfu` performs no internal locking. It is `Send` when `K: Send + Sync`
//!   and `V: Send`; wrap it in a mutex and take one exclusive section per
//!   operation to share it across threads.
//!
//! # Clock
//! - Every `set` advances the logical clock. Every `get` advances it too,
//!   hit or miss, unless the engine is unpopulated (freshly constructed or
//!   just cleared). `peek`, `contains`, `crf` and `remove` never advance it.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::clock::LogicalClock;
use crate::config::{EvictionStrategy, LrfuConfig};
use crate::error::LrfuResult;
use crate::score::Decay;
use crate::stats::{Counters, LrfuStats};

/// Upper bound on slots reserved up front for bounded engines.
const MAX_PREALLOCATED_SLOTS: usize = 4096;

type NodeSlot<K, V> = Option<Node<K, V>>;
type EvictionListener<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// LRFU cache backed by an indexable doubly linked list stored in a `Vec`.
///
/// Entries are kept in touch order (front = most recently touched) and each
/// carries a combined recency-frequency score that decays with the logical
/// clock. Which entry is evicted when the capacity is exceeded is decided by
/// the configured [`EvictionStrategy`].
///
/// # Examples
///
/// ```
/// use lrfu::Lrfu;
///
/// let mut cache = Lrfu::new(2, 1.0).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.set("c", 3); // Evicts "b", the least recently touched entry
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Lrfu<K, V>
where
    K: Eq + Hash,
{
    config: LrfuConfig,
    decay: Decay,
    clock: LogicalClock,
    populated: bool,
    map: HashMap<Arc<K>, usize>,
    nodes: Vec<NodeSlot<K, V>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    listener: Option<EvictionListener<K, V>>,
    counters: Counters,
}

impl<K, V> Lrfu<K, V>
where
    K: Eq + Hash,
{
    /// Creates an engine holding at most `max_entries` entries (0 =
    /// unbounded) with decay rate `lambda`.
    ///
    /// # Errors
    ///
    /// Returns [`LrfuError::InvalidConfiguration`](crate::LrfuError) when
    /// `lambda` is negative, NaN or infinite.
    pub fn new(max_entries: usize, lambda: f64) -> LrfuResult<Self> {
        Self::with_config(LrfuConfig::bounded(max_entries, lambda))
    }

    /// Creates an engine from a full configuration.
    ///
    /// # Errors
    ///
    /// See [`LrfuConfig::validate`].
    pub fn with_config(config: LrfuConfig) -> LrfuResult<Self> {
        config.validate()?;
        debug!(
            max_entries = config.max_entries,
            lambda = config.lambda,
            strategy = ?config.strategy,
            "created lrfu engine"
        );

        let reserve = config.max_entries.min(MAX_PREALLOCATED_SLOTS);
        Ok(Self {
            decay: Decay::new(config.lambda),
            config,
            clock: LogicalClock::new(),
            populated: false,
            map: HashMap::with_capacity(reserve),
            nodes: Vec::with_capacity(reserve),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            listener: None,
            counters: Counters::default(),
        })
    }

    /// Installs the listener notified with the key and value of every entry
    /// leaving the engine through eviction, `remove`, `pop` or `clear`.
    ///
    /// The listener runs synchronously inside the triggering call.
    pub fn set_eviction_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Builder-style variant of [`Lrfu::set_eviction_listener`].
    #[must_use]
    pub fn with_eviction_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.set_eviction_listener(listener);
        self
    }

    /// Removes the eviction listener, if any.
    pub fn clear_eviction_listener(&mut self) {
        self.listener = None;
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &LrfuConfig {
        &self.config
    }

    /// Returns the capacity bound (0 = unbounded).
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    /// Returns the decay rate.
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.config.lambda
    }

    /// Returns the victim selection strategy.
    #[must_use]
    pub const fn strategy(&self) -> EvictionStrategy {
        self.config.strategy
    }

    /// Returns the current logical time.
    #[must_use]
    pub const fn clock(&self) -> u64 {
        self.clock.now()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the engine has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> LrfuStats {
        let max_entries = self.config.is_bounded().then_some(self.config.max_entries);
        self.counters.snapshot(self.len, max_entries)
    }

    /// Resets the operation counters to zero.
    pub fn reset_stats(&mut self) {
        self.counters.reset();
    }

    /// Inserts or updates a key-value pair, returning the previous value when
    /// the key was already present.
    ///
    /// Both paths advance the clock, rescore the entry and move it to the
    /// front. Only an insert can push the engine over capacity, in which case
    /// exactly one other entry is evicted.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let now = self.clock.tick();
        self.populated = true;

        if let Some(&index) = self.map.get(&key) {
            if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
                node.touch(&self.decay, now);
                let previous = std::mem::replace(&mut node.value, value);
                self.promote(index);
                self.counters.record_update();
                return Some(previous);
            }
        }

        let key_ptr = Arc::new(key);
        let index = self.allocate_slot(Arc::clone(&key_ptr), value, now);
        self.attach_front(index);
        self.map.insert(key_ptr, index);
        self.len += 1;
        self.counters.record_insert();
        debug_assert_eq!(self.map.len(), self.len);

        if self.config.is_bounded() && self.len > self.config.max_entries {
            self.evict_excluding(Some(index));
        }
        None
    }

    /// Retrieves a value by key, rescoring the entry and moving it to the
    /// front when found.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.access(key)?;
        self.nodes.get(index).and_then(Option::as_ref).map(|node| &node.value)
    }

    /// Mutable variant of [`Lrfu::get`] with the same clock and scoring
    /// effects.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.access(key)?;
        self.nodes.get_mut(index).and_then(Option::as_mut).map(|node| &mut node.value)
    }

    /// Reads a value without touching the entry or the clock.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.slot_of(key).map(|node| &node.value)
    }

    /// Returns `true` when a value associated with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the entry's CRF score at the current clock.
    #[must_use]
    pub fn crf(&self, key: &K) -> Option<f64> {
        let now = self.clock.now();
        self.slot_of(key).map(|node| node.score_at(&self.decay, now))
    }

    /// Removes the entry for `key`, notifying the listener. Returns `true`
    /// when an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.pop(key).is_some()
    }

    /// Removes the entry for `key` and returns its value. The listener is
    /// notified before the value is handed back.
    pub fn pop(&mut self, key: &K) -> Option<V> {
        let &index = self.map.get(key)?;
        let node = self.unlink(index)?;
        trace!(slot = index, clock = self.clock.now(), "removed entry");
        self.counters.record_removal();
        self.notify(&node);
        Some(node.value)
    }

    /// Evicts one entry chosen by the configured strategy, notifying the
    /// listener. Returns `false` when the engine is empty.
    pub fn evict(&mut self) -> bool {
        self.evict_excluding(None)
    }

    /// Notifies the listener for every live entry, then drops all entries and
    /// rewinds the clock to zero.
    ///
    /// The configuration, listener and counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.len;
        if let Some(listener) = self.listener.as_mut() {
            let mut current = self.head;
            while let Some(index) = current {
                let Some(node) = self.nodes.get(index).and_then(Option::as_ref) else {
                    break;
                };
                listener(&*node.key, &node.value);
                current = node.next;
            }
        }

        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.clock.reset();
        self.populated = false;
        debug!(dropped, "cleared lrfu engine");
    }

    /// Returns an iterator that yields entries from most to least recently
    /// touched.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { cache: self, current: self.head, remaining: self.len }
    }

    /// Advances the clock and, on a hit, rescores and promotes the entry.
    fn access(&mut self, key: &K) -> Option<usize> {
        if !self.populated {
            return None;
        }
        let now = self.clock.tick();

        let Some(&index) = self.map.get(key) else {
            self.counters.record_miss();
            return None;
        };
        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.touch(&self.decay, now);
        }
        self.promote(index);
        self.counters.record_hit();
        Some(index)
    }

    fn evict_excluding(&mut self, exclude: Option<usize>) -> bool {
        let Some(index) = self.select_victim(exclude) else {
            return false;
        };
        let Some(node) = self.unlink(index) else {
            return false;
        };

        let now = self.clock.now();
        trace!(slot = index, crf = node.score_at(&self.decay, now), clock = now, "evicted entry");
        self.counters.record_eviction();
        self.notify(&node);
        true
    }

    /// Picks the eviction victim, walking from the back of the recency order.
    fn select_victim(&self, exclude: Option<usize>) -> Option<usize> {
        let mut candidates = std::iter::successors(self.tail, |&index| {
            self.nodes.get(index).and_then(Option::as_ref).and_then(|node| node.prev)
        })
        .filter(|&index| Some(index) != exclude);

        match self.config.strategy {
            EvictionStrategy::Recency => candidates.next(),
            EvictionStrategy::MinimumCrf => {
                let now = self.clock.now();
                let mut victim: Option<(usize, f64)> = None;
                for index in candidates {
                    let Some(node) = self.nodes.get(index).and_then(Option::as_ref) else {
                        continue;
                    };
                    let score = node.score_at(&self.decay, now);
                    // Strict comparison keeps the entry nearest the back on ties.
                    if victim.map_or(true, |(_, lowest)| score < lowest) {
                        victim = Some((index, score));
                    }
                }
                victim.map(|(index, _)| index)
            }
        }
    }

    fn notify(&mut self, node: &Node<K, V>) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&*node.key, &node.value);
        }
    }

    fn slot_of(&self, key: &K) -> Option<&Node<K, V>> {
        self.map.get(key).and_then(|&index| self.nodes.get(index).and_then(Option::as_ref))
    }

    fn allocate_slot(&mut self, key: Arc<K>, value: V, now: u64) -> usize {
        let node = Node::new(key, value, now);
        if let Some(index) = self.free_list.pop() {
            self.nodes[index] = Some(node);
            index
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Detaches the slot and drops it from the index, returning the node.
    fn unlink(&mut self, index: usize) -> Option<Node<K, V>> {
        self.detach(index);
        let node = self.nodes.get_mut(index).and_then(Option::take)?;
        self.map.remove(&*node.key);
        self.free_list.push(index);
        self.len = self.len.saturating_sub(1);
        debug_assert_eq!(self.map.len(), self.len);
        Some(node)
    }

    fn promote(&mut self, index: usize) {
        if self.head == Some(index) {
            return;
        }
        self.detach(index);
        self.attach_front(index);
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = match self.nodes.get(index).and_then(Option::as_ref) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_node) = self.nodes.get_mut(prev_index).and_then(Option::as_mut) {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_index) => {
                if let Some(next_node) = self.nodes.get_mut(next_index).and_then(Option::as_mut) {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }

        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_index) = self.head {
            if let Some(head_node) = self.nodes.get_mut(head_index).and_then(Option::as_mut) {
                head_node.prev = Some(index);
            }
        } else {
            self.tail = Some(index);
        }

        self.head = Some(index);
    }
}

impl<K, V> fmt::Debug for Lrfu<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lrfu")
            .field("len", &self.len)
            .field("config", &self.config)
            .field("clock", &self.clock.now())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

struct Node<K, V> {
    key: Arc<K>,
    value: V,
    last_reference: u64,
    last_crf: f64,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<K, V> Node<K, V> {
    /// A new entry has no history, so its score is the weight of a fresh
    /// touch.
    fn new(key: Arc<K>, value: V, now: u64) -> Self {
        Self { key, value, last_reference: now, last_crf: 1.0, prev: None, next: None }
    }

    fn score_at(&self, decay: &Decay, now: u64) -> f64 {
        decay.crf(self.last_crf, self.last_reference, now)
    }

    fn touch(&mut self, decay: &Decay, now: u64) {
        self.last_crf = decay.touch(self.last_crf, self.last_reference, now);
        self.last_reference = now;
    }
}

/// Iterator over engine entries from most to least recently touched.
pub struct Iter<'a, K, V>
where
    K: Eq + Hash,
{
    cache: &'a Lrfu<K, V>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let node = self.cache.nodes.get(index).and_then(Option::as_ref)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key.as_ref(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> where K: Eq + Hash {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> where K: Eq + Hash {}

impl<'a, K, V> IntoIterator for &'a Lrfu<K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
