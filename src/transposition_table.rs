/// Default number of slots, odd so that keys spread over the whole table
pub const DEFAULT_TABLE_SIZE: usize = (1 << 18) + 3;

/// Position and search parameters identifying a table entry
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Key {
    pub fingerprint: u64,
    pub depth: u32,
    pub maximizing: bool,
}

impl Key {
    pub fn new(fingerprint: u64, depth: u32, maximizing: bool) -> Self {
        Self {
            fingerprint,
            depth,
            maximizing,
        }
    }

    fn slot(&self, len: usize) -> usize {
        let mixed = self.fingerprint
            ^ (self.depth as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ self.maximizing as u64;
        (mixed % len as u64) as usize
    }
}

/// Known bounds on the minimax score of a position, with the best move found
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Bounds {
    pub best_move: Option<usize>,
    pub lower: i32,
    pub upper: i32,
}

impl Bounds {
    pub fn unknown(infinity: i32) -> Self {
        Self {
            best_move: None,
            lower: -infinity,
            upper: infinity,
        }
    }
}

#[derive(Copy, Clone)]
struct Entry {
    key: Key,
    bounds: Bounds,
}

/// A direct-mapped store of fail-soft search bounds
///
/// Each key maps to a single slot; a newer entry replaces whatever occupied it.
/// Lookups check the full key, so a replaced entry is a miss rather than a wrong hit.
#[derive(Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<Entry>>,
    /// Successful lookups since the last clear (for diagnostics only)
    pub hits: usize,
    /// Lookups that found nothing since the last clear (for diagnostics only)
    pub misses: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_TABLE_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            entries: vec![None; size.max(1)],
            hits: 0,
            misses: 0,
        }
    }

    pub fn set(&mut self, key: Key, bounds: Bounds) {
        let len = self.entries.len();
        self.entries[key.slot(len)] = Some(Entry { key, bounds });
    }

    pub fn get(&mut self, key: Key) -> Option<Bounds> {
        match self.entries[key.slot(self.entries.len())] {
            Some(entry) if entry.key == key => {
                self.hits += 1;
                Some(entry.bounds)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Forgets every entry, for reuse on an unrelated position
    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = None;
        }
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
