//! The option set: a per-cell candidate bitmask plus an answer flag.
//!
//! Mirrors `original_source/Sudoku/Sudoku/Options.h`: a fixed-width
//! bitmask where bit 0 is the "unsolved" flag and bit `v` (`1 <= v <=
//! elem`) tracks whether `v` is still a candidate, stored as a
//! `bitvec::array::BitArray<[u32; 1]>`. `elem` is carried alongside the
//! bitmask itself (rather than as a type parameter) so `flip()`/
//! `available()` know where the board's value range ends without every
//! call site having to pass it in.

use bitvec::array::BitArray;

use crate::engine::error::SudokuErrors;
use crate::engine::value::Value;

pub(crate) type Bits = BitArray<[u32; 1]>;

/// Largest `elem` a 32-bit `Options` bitmask can hold (1 flag bit + 31
/// candidate bits).
pub const MAX_ELEM: usize = 31;

/// A cell's remaining candidates, plus whether it's still unsolved.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    bits: Bits,
    elem: usize,
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}
impl Eq for Options {}

impl PartialOrd for Options {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Options {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bits.data.cmp(&other.bits.data)
    }
}

fn check_elem(elem: usize) -> Result<(), SudokuErrors> {
    if elem == 0 || elem > MAX_ELEM {
        return Err(SudokuErrors::BadSize);
    }
    Ok(())
}

impl Options {
    /// All candidates `1..=elem` set, unsolved flag set.
    ///
    /// # Errors
    /// [`SudokuErrors::BadSize`] if `elem` doesn't fit the bitmask.
    pub fn new(elem: usize) -> Result<Self, SudokuErrors> {
        check_elem(elem)?;
        let mut bits = Bits::ZERO;
        bits.set(0, true);
        for v in 1..=elem {
            bits.set(v, true);
        }
        Ok(Self { bits, elem })
    }

    /// Only `value` set as a candidate; unsolved flag clear (answered).
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidOption`] if `value` isn't in `1..=elem`.
    pub fn from_value(value: usize, elem: usize) -> Result<Self, SudokuErrors> {
        check_elem(elem)?;
        if value == 0 || value > elem {
            return Err(SudokuErrors::InvalidOption);
        }
        let mut bits = Bits::ZERO;
        bits.set(value, true);
        Ok(Self { bits, elem })
    }

    /// No bits set at all: an invalid, transient, "emptied" state.
    #[must_use]
    pub fn empty(elem: usize) -> Self {
        Self {
            bits: Bits::ZERO,
            elem,
        }
    }

    /// Same as [`Options::new`], kept as a separate name to match the
    /// source's `reset()`/`new()` pair.
    ///
    /// # Errors
    /// See [`Options::new`].
    pub fn reset(elem: usize) -> Result<Self, SudokuErrors> {
        Self::new(elem)
    }

    /// Clear every bit, including the unsolved flag.
    pub fn clear(&mut self) -> &mut Self {
        self.bits = Bits::ZERO;
        self
    }

    /// Force the unsolved flag to `true`, leaving candidate bits alone.
    /// Used by `appearance_sets` to restore a well-formed flag after the
    /// flip/XOR bit tricks that compute it, which touch bit 0 along with
    /// the rest of the mask.
    pub(crate) fn force_unsolved(&mut self) -> &mut Self {
        self.bits.set(0, true);
        self
    }

    /// Invert every candidate bit and the unsolved flag. May produce an
    /// invalid (empty) state; callers that need a legal result should
    /// check [`Options::is_empty`] afterward.
    pub fn flip(&mut self) -> &mut Self {
        for i in 0..=self.elem {
            let cur = self.bits[i];
            self.bits.set(i, !cur);
        }
        self
    }

    /// Clear candidate bit `value`.
    ///
    /// # Errors
    /// [`SudokuErrors::Contradiction`]-adjacent callers are expected to
    /// check [`Options::is_answer_value`] themselves; this simply
    /// returns [`SudokuErrors::InvalidOption`] if `value` is out of
    /// range for this `Options`.
    pub fn remove(&mut self, value: usize) -> Result<&mut Self, SudokuErrors> {
        if value == 0 || value > self.elem {
            return Err(SudokuErrors::InvalidOption);
        }
        self.bits.set(value, false);
        Ok(self)
    }

    /// Set candidate bit `value`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidOption`] if `value` is out of range.
    pub fn add(&mut self, value: usize) -> Result<&mut Self, SudokuErrors> {
        if value == 0 || value > self.elem {
            return Err(SudokuErrors::InvalidOption);
        }
        self.bits.set(value, true);
        Ok(self)
    }

    /// Replace contents with the single answer `value`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidOption`] if `value` is out of range.
    pub fn set(&mut self, value: usize) -> Result<&mut Self, SudokuErrors> {
        if value == 0 || value > self.elem {
            return Err(SudokuErrors::InvalidOption);
        }
        self.bits = Bits::ZERO;
        self.bits.set(value, true);
        Ok(self)
    }

    /// Value range this `Options` was built for.
    #[must_use]
    pub fn elem(&self) -> usize {
        self.elem
    }

    /// Candidate count, `0` if already answered.
    #[must_use]
    pub fn count(&self) -> usize {
        if self.is_unsolved() {
            self.count_all()
        } else {
            0
        }
    }

    /// Candidate count, irrespective of the unsolved flag.
    #[must_use]
    pub fn count_all(&self) -> usize {
        let total = self.bits.count_ones();
        if self.bits[0] {
            total - 1
        } else {
            total
        }
    }

    /// Whether candidate bit `value` is set (answer or candidate alike).
    #[must_use]
    pub fn test(&self, value: usize) -> bool {
        value >= 1 && value <= self.elem && self.bits[value]
    }

    fn is_unsolved(&self) -> bool {
        self.bits[0]
    }

    /// Unsolved flag clear AND exactly one candidate bit set.
    #[must_use]
    pub fn is_answer(&self) -> bool {
        !self.is_unsolved() && self.count_all() == 1
    }

    /// Equivalent to `self == Options::from_value(value, self.elem)`.
    #[must_use]
    pub fn is_answer_value(&self, value: usize) -> bool {
        self.is_answer() && self.test(value)
    }

    /// `test(value) && ` still unsolved: `value` is a live candidate,
    /// not a committed answer.
    #[must_use]
    pub fn is_option(&self, value: usize) -> bool {
        self.test(value) && self.is_unsolved()
    }

    /// No candidates left, regardless of the unsolved flag: a
    /// contradiction. (The flag bit alone, with every candidate bit
    /// clear, is still "empty" — a cell doesn't stop being unsolved just
    /// because its last candidate was removed.)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count_all() == 0
    }

    /// Candidate values in ascending order; empty when answered or
    /// already empty.
    pub fn available(&self) -> impl Iterator<Item = Value> + '_ {
        (1..=self.elem).filter(move |v| self.bits[*v]).map(Value)
    }

    /// The sole value when `count_all() == 1`, else `0`.
    #[must_use]
    pub fn get_answer(&self) -> Value {
        if self.count_all() == 1 {
            Value((1..=self.elem).find(|v| self.bits[*v]).unwrap_or(0))
        } else {
            Value(0)
        }
    }

    /// Union of candidate bits (does not touch the unsolved flag unless
    /// `other`'s flag is also set).
    pub fn union_assign(&mut self, other: &Self) -> &mut Self {
        debug_assert_eq!(self.elem, other.elem);
        self.bits |= other.bits;
        self
    }

    /// Non-mutating union.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.union_assign(other);
        out
    }

    /// Intersection of candidate bits (binary AND), a.k.a. `shared`.
    #[must_use]
    pub fn shared(&self, other: &Self) -> Self {
        debug_assert_eq!(self.elem, other.elem);
        let mut out = *self;
        out.bits &= other.bits;
        out
    }

    /// XOR, including the unsolved flag.
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        debug_assert_eq!(self.elem, other.elem);
        let mut out = *self;
        out.bits ^= other.bits;
        out
    }

    /// Remove the candidate bits of `other` from `self`.
    ///
    /// # Panics
    /// In debug builds, panics if `other` is not itself answered (its
    /// unsolved flag must be clear) — mirrors the source's precondition
    /// that the subtrahend is "answered-shaped".
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.elem, other.elem);
        debug_assert!(!other.is_unsolved() || other.count_all() == 0);
        let mut out = *self;
        out.bits &= !other.bits;
        out.bits.set(0, self.bits[0]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_all_candidates_and_flag() {
        let o = Options::new(9).unwrap();
        assert_eq!(o.count(), 9);
        assert_eq!(o.count_all(), 9);
        assert!(!o.is_answer());
        for v in 1..=9 {
            assert!(o.test(v));
            assert!(o.is_option(v));
        }
    }

    #[test]
    fn from_value_is_answered() {
        let o = Options::from_value(5, 9).unwrap();
        assert!(o.is_answer());
        assert_eq!(o.get_answer(), Value(5));
        assert_eq!(o.count(), 0);
        assert_eq!(o.count_all(), 1);
        assert!(!o.is_option(5)); // answered, not merely an option
    }

    #[test]
    fn from_value_out_of_range() {
        assert_eq!(Options::from_value(0, 9), Err(SudokuErrors::InvalidOption));
        assert_eq!(Options::from_value(10, 9), Err(SudokuErrors::InvalidOption));
    }

    #[test]
    fn remove_and_set() {
        let mut o = Options::new(9).unwrap();
        o.remove(5).unwrap();
        assert!(!o.test(5));
        assert_eq!(o.count(), 8);

        o.set(3).unwrap();
        assert!(o.is_answer());
        assert_eq!(o.get_answer(), Value(3));
    }

    #[test]
    fn empty_is_empty() {
        let o = Options::empty(9);
        assert!(o.is_empty());
        assert!(!o.is_answer());
    }

    #[test]
    fn set_algebra_self_identities() {
        let a = Options::from_value(2, 9).unwrap();
        assert_eq!(a.union(&a), a);
        assert_eq!(a.shared(&a), a);
        assert!(a.xor(&a).is_empty());
    }

    #[test]
    fn union_then_intersect_is_identity() {
        let mut a = Options::new(9).unwrap();
        a.remove(1).unwrap();
        a.remove(2).unwrap();
        let mut b = Options::new(9).unwrap();
        b.remove(3).unwrap();

        let u = a.union(&b);
        assert_eq!(u.shared(&a), a);
    }

    #[test]
    fn xor_matches_union_minus_shared_cardinality() {
        let mut a = Options::new(9).unwrap();
        a.remove(1).unwrap();
        let mut b = Options::new(9).unwrap();
        b.remove(9).unwrap();
        b.remove(8).unwrap();

        let union_count = a.union(&b).count_all();
        let shared_count = a.shared(&b).count_all();
        let xor_count = a.xor(&b).count_all();
        assert_eq!(xor_count, union_count + shared_count - 2 * shared_count);
    }

    /// 1000 random `Options` pairs, checked against the de Morgan
    /// cardinality identity (`|A xor B| = |A union B| - |A shared B|`,
    /// equivalently `|A union B| + |A shared B| = |A| + |B|`). Uses a
    /// small hand-rolled xorshift64 generator seeded with a fixed
    /// constant rather than pulling in `rand`/`proptest` — neither
    /// appears anywhere in the retrieval pack this crate was grounded on.
    #[test]
    fn de_morgan_cardinality_holds_for_random_pairs() {
        let mut state: u64 = 0x243F_6A88_85A3_08D3;
        let mut next_bit = |shift: u32| -> bool {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> shift) & 1 == 1
        };

        for _ in 0..1000 {
            let elem = 9;
            let mut a = Options::new(elem).unwrap();
            let mut b = Options::new(elem).unwrap();
            for v in 1..=elem {
                if !next_bit(3) {
                    a.remove(v).unwrap();
                }
                if !next_bit(11) {
                    b.remove(v).unwrap();
                }
            }

            let union = a.union(&b);
            let shared = a.shared(&b);
            let xor = a.xor(&b);

            assert_eq!(xor.count_all(), union.count_all() - shared.count_all());
            assert_eq!(union.count_all() + shared.count_all(), a.count_all() + b.count_all());
        }
    }

    #[test]
    fn available_ascending() {
        let mut o = Options::new(9).unwrap();
        o.remove(5).unwrap();
        let got: Vec<_> = o.available().map(|v| v.0).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn sub_removes_answered_candidate() {
        let full = Options::new(9).unwrap();
        let answer = Options::from_value(4, 9).unwrap();
        let result = full.sub(&answer);
        assert!(!result.test(4));
        assert_eq!(result.count(), 8);
    }
}
