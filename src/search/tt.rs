use std::collections::HashSet;

use log::{debug, trace};
use serde::Serialize;

use crate::board::{Move, Position, UndoInfo};
use crate::movegen;
use crate::search::is_mate_score;

/// What a stored score means relative to the true score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Bound {
    Exact = 0,
    /// True score >= stored score.
    Lower = 1,
    /// True score <= stored score.
    Upper = 2,
    /// Unused slot.
    Empty = 3,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    mv: u16,
    score: i16,
    pub depth: i16,
    pub generation: u8,
    pub bound: Bound,
    /// Which hash function placed this entry, 0 or 1.
    pub hash_slot: u8,
    pub eval_score: i16,
}

impl Entry {
    const EMPTY: Entry = Entry { key: 0, mv: 0, score: 0, depth: 0, generation: 0, bound: Bound::Empty, hash_slot: 0, eval_score: 0 };

    #[inline]
    pub fn is_empty(&self) -> bool { self.bound == Bound::Empty }

    /// True if this entry is more valuable than `other`. Current generation
    /// beats stale, exact beats bound, deeper beats shallower; anything else
    /// is a tie and neither wins.
    pub fn better_than(&self, other: &Entry, curr_gen: u8) -> bool {
        if (self.generation == curr_gen) != (other.generation == curr_gen) {
            return self.generation == curr_gen;
        }
        if (self.bound == Bound::Exact) != (other.bound == Bound::Exact) {
            return self.bound == Bound::Exact;
        }
        if self.depth != other.depth {
            return self.depth > other.depth;
        }
        false
    }

    /// Worth an extra relocation attempt before being overwritten.
    pub fn valuable(&self, curr_gen: u8) -> bool {
        if self.generation != curr_gen { return false; }
        self.bound == Bound::Exact || self.depth > 3
    }

    #[inline]
    pub fn get_move(&self) -> Move { Move::unpack(self.mv) }

    #[inline]
    pub fn set_move(&mut self, m: &Move) { self.mv = m.pack(); }

    /// Stored score converted from "mate relative to root" to "mate at `ply`".
    pub fn get_score(&self, ply: i32) -> i32 {
        let sc = self.score as i32;
        if !is_mate_score(sc) { return sc; }
        if sc > 0 { sc - ply } else { sc + ply }
    }

    pub fn set_score(&mut self, score: i32, ply: i32) {
        self.score = to_stored_score(score, ply);
    }

    /// Raw stored (root-relative) score.
    #[inline]
    pub fn stored_score(&self) -> i32 { self.score as i32 }
}

fn to_stored_score(score: i32, ply: i32) -> i16 {
    if !is_mate_score(score) { return score as i16; }
    (if score > 0 { score + ply } else { score - ply }) as i16
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct TtStats {
    pub size: usize,
    pub unused: usize,
    pub this_gen: usize,
    /// Entry count by depth 0..20.
    pub depth_histogram: Vec<usize>,
}

/// Fixed-size table of 2^k entries. Each key has two candidate slots, the low
/// k bits (`h0`) and bits 32.. (`h1`), giving a two-way set-associative cache.
///
/// Not synchronised: mutate through `&mut` from one search thread.
pub struct TranspositionTable {
    table: Vec<Entry>,
    empty_slot: Entry,
    generation: u8,
}

impl TranspositionTable {
    pub fn new(log2_size: u32) -> Self {
        let n = 1usize << log2_size;
        debug!("transposition table: {} entries ({} KiB)", n, n * std::mem::size_of::<Entry>() / 1024);
        Self { table: vec![Entry::EMPTY; n], empty_slot: Entry::EMPTY, generation: 0 }
    }

    /// Largest power-of-two table that fits in `mb` megabytes (at least 2 entries).
    pub fn with_capacity_mb(mb: usize) -> Self {
        let bytes = mb.saturating_mul(1024 * 1024);
        let entries = (bytes / std::mem::size_of::<Entry>()).max(2);
        let log2 = usize::BITS - 1 - entries.leading_zeros();
        Self::new(log2)
    }

    #[inline]
    pub fn len(&self) -> usize { self.table.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    #[inline]
    pub fn generation(&self) -> u8 { self.generation }

    #[inline]
    pub fn h0(&self, key: u64) -> usize { (key as usize) & (self.table.len() - 1) }

    #[inline]
    pub fn h1(&self, key: u64) -> usize { ((key >> 32) as usize) & (self.table.len() - 1) }

    /// Raw slot access, for inspection.
    #[inline]
    pub fn slot(&self, idx: usize) -> &Entry { &self.table[idx] }

    /// Stores a search result. The score travels in `m.score`; `ply` is the
    /// distance from the root used to normalise mate scores.
    pub fn insert(&mut self, key: u64, m: &Move, bound: Bound, ply: i32, depth: i32, eval_score: i32) {
        let idx0 = self.h0(key);
        let idx1 = self.h1(key);
        let gen = self.generation;

        let (mut idx, mut hash_slot) = (idx0, 0u8);
        if self.table[idx].key != key {
            idx = idx1;
            hash_slot = 1;
        }
        if self.table[idx].key != key {
            if self.table[idx1].better_than(&self.table[idx0], gen) {
                idx = idx0;
                hash_slot = 0;
            }
            let victim = self.table[idx];
            if victim.valuable(gen) {
                let alt = if victim.hash_slot == 0 { self.h1(victim.key) } else { self.h0(victim.key) };
                if victim.better_than(&self.table[alt], gen) {
                    let mut moved = victim;
                    moved.hash_slot = 1 - victim.hash_slot;
                    self.table[alt] = moved;
                }
            }
        }

        let new_score = to_stored_score(m.score, ply);
        let ent = &mut self.table[idx];
        let mut do_store = true;
        if ent.key == key && ent.depth as i32 >= depth && ent.bound == bound {
            match bound {
                Bound::Lower if new_score <= ent.score => do_store = false,
                Bound::Upper if new_score >= ent.score => do_store = false,
                _ => {}
            }
        }
        if do_store {
            if ent.key != key || !m.is_null() {
                ent.set_move(m);
            }
            ent.key = key;
            ent.score = new_score;
            ent.depth = depth as i16;
            ent.generation = gen;
            ent.bound = bound;
            ent.hash_slot = hash_slot;
            ent.eval_score = eval_score as i16;
        }
    }

    /// Slot holding `key`, or a shared empty entry. Check `is_empty()` before
    /// using the other fields.
    pub fn probe(&self, key: u64) -> &Entry {
        let ent = &self.table[self.h0(key)];
        if ent.key == key { return ent; }
        let ent = &self.table[self.h1(key)];
        if ent.key == key { return ent; }
        &self.empty_slot
    }

    /// Makes every current entry stale relative to later inserts.
    pub fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        debug!("transposition table cleared");
        for ent in &mut self.table {
            ent.bound = Bound::Empty;
        }
    }

    /// PV starting with `first` from `root`, continued with stored best moves.
    /// Stops on an empty slot, a stored move that is not legal, or a position
    /// that repeats.
    pub fn extract_pv_moves(&self, root: &Position, first: Move) -> Vec<Move> {
        let mut pos = root.clone();
        let mut m = first;
        let mut ret = Vec::new();
        let mut undo = UndoInfo::default();
        let mut seen = HashSet::new();
        loop {
            ret.push(m);
            pos.make_move(&m, &mut undo);
            if !seen.insert(pos.zobrist_hash()) {
                trace!("pv walk: repetition after {} moves", ret.len());
                break;
            }
            let ent = self.probe(pos.history_hash());
            if ent.is_empty() {
                break;
            }
            m = ent.get_move();
            let moves = movegen::legal_moves(&mut pos);
            if !moves.contains(&m) {
                trace!("pv walk: stored move {} not legal", m);
                break;
            }
        }
        ret
    }

    /// PV from `pos` as space separated coordinate moves. Bound entries are
    /// prefixed with `<` (upper) or `>` (lower).
    pub fn extract_pv(&self, pos: &Position) -> String {
        let mut pos = pos.clone();
        let mut ret = String::with_capacity(100);
        let mut undo = UndoInfo::default();
        let mut seen = HashSet::new();
        let mut repetition = false;
        let mut ent = *self.probe(pos.history_hash());
        while !ent.is_empty() {
            let m = ent.get_move();
            let moves = movegen::legal_moves(&mut pos);
            if !moves.contains(&m) || repetition {
                break;
            }
            if !ret.is_empty() {
                ret.push(' ');
            }
            match ent.bound {
                Bound::Upper => ret.push('<'),
                Bound::Lower => ret.push('>'),
                _ => {}
            }
            ret.push_str(&m.to_string());
            pos.make_move(&m, &mut undo);
            if !seen.insert(pos.zobrist_hash()) {
                repetition = true;
            }
            ent = *self.probe(pos.history_hash());
        }
        ret
    }

    pub fn stats(&self) -> TtStats {
        let mut s = TtStats { size: self.table.len(), depth_histogram: vec![0; 20], ..Default::default() };
        for ent in &self.table {
            if ent.is_empty() {
                s.unused += 1;
                continue;
            }
            if ent.generation == self.generation {
                s.this_gen += 1;
            }
            if (0..20).contains(&ent.depth) {
                s.depth_histogram[ent.depth as usize] += 1;
            }
        }
        s
    }
}
