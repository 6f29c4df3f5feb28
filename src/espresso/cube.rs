//! Bit-packed multi-valued cubes and the shared variable layout
//!
//! A cube is a bit vector partitioned into one contiguous field per variable.
//! Binary inputs occupy two bits (part 0 = the "0" literal, part 1 = the "1"
//! literal); the outputs form one final multi-valued variable with one part
//! per output. A point is covered by a cube when every variable field has the
//! bit for the point's value set.
//!
//! All operations here are pure and O(size / 32). Cubes never outlive the
//! [`CubeLayout`] they were built against; every binary operation requires
//! both operands to share a layout.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Number of bits per storage word.
const WORD_BITS: usize = 32;

/// Shared description of the variable structure of a problem
///
/// A layout fixes the number of multi-valued input variables, the part count
/// of each, and the number of outputs. The outputs are modelled as one extra
/// multi-valued variable occupying the last field, following the classic
/// positional-cube encoding.
#[derive(Debug, PartialEq, Eq)]
pub struct CubeLayout {
    /// Part count per variable; the final entry is the output variable.
    parts: Vec<usize>,
    /// First bit position of each variable field.
    first_bit: Vec<usize>,
    /// Pre-computed (word index, mask) pairs covering each variable field.
    field_words: Vec<Vec<(usize, u32)>>,
    /// Number of input variables (parts.len() - 1).
    num_inputs: usize,
    /// Number of outputs (part count of the last variable).
    num_outputs: usize,
    /// Total bit count.
    size: usize,
    /// Storage words per cube.
    words: usize,
}

impl CubeLayout {
    /// Layout for `num_inputs` binary inputs and `num_outputs` outputs
    pub fn binary(num_inputs: usize, num_outputs: usize) -> Arc<Self> {
        let parts = vec![2usize; num_inputs];
        Self::with_parts(&parts, num_outputs)
    }

    /// Layout for multi-valued inputs with the given part counts
    ///
    /// Each entry of `input_parts` is the number of values of one input
    /// variable; every entry must be at least 1 and `num_outputs` at least 1.
    pub fn with_parts(input_parts: &[usize], num_outputs: usize) -> Arc<Self> {
        assert!(num_outputs >= 1, "a function needs at least one output");
        assert!(
            input_parts.iter().all(|&p| p >= 1),
            "every variable needs at least one part"
        );

        let mut parts: Vec<usize> = input_parts.to_vec();
        parts.push(num_outputs);

        let mut first_bit = Vec::with_capacity(parts.len());
        let mut bit = 0usize;
        for &p in &parts {
            first_bit.push(bit);
            bit += p;
        }
        let size = bit;
        let words = size.div_ceil(WORD_BITS).max(1);

        let field_words = parts
            .iter()
            .zip(first_bit.iter())
            .map(|(&p, &first)| word_masks(first, p))
            .collect();

        Arc::new(CubeLayout {
            num_inputs: input_parts.len(),
            num_outputs,
            parts,
            first_bit,
            field_words,
            size,
            words,
        })
    }

    /// Number of input variables
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of outputs
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Number of variables including the output variable
    pub fn num_vars(&self) -> usize {
        self.parts.len()
    }

    /// Index of the output variable (always the last)
    pub fn output_var(&self) -> usize {
        self.parts.len() - 1
    }

    /// Part count of variable `var`
    pub fn var_parts(&self, var: usize) -> usize {
        self.parts[var]
    }

    /// First bit position of variable `var`
    pub fn var_first(&self, var: usize) -> usize {
        self.first_bit[var]
    }

    /// Total bit count of a cube under this layout
    pub fn size(&self) -> usize {
        self.size
    }

    /// Storage words per cube
    pub fn words(&self) -> usize {
        self.words
    }

    /// The variable owning bit position `bit`
    pub fn var_of_bit(&self, bit: usize) -> usize {
        debug_assert!(bit < self.size);
        // first_bit is sorted; partition_point finds the owning field.
        self.first_bit.partition_point(|&f| f <= bit) - 1
    }

    fn masks(&self, var: usize) -> &[(usize, u32)] {
        &self.field_words[var]
    }
}

/// (word, mask) pairs covering the bit range [first, first + len)
fn word_masks(first: usize, len: usize) -> Vec<(usize, u32)> {
    let mut out = Vec::new();
    let mut bit = first;
    let end = first + len;
    while bit < end {
        let word = bit / WORD_BITS;
        let lo = bit % WORD_BITS;
        let hi = ((word + 1) * WORD_BITS).min(end) - word * WORD_BITS;
        let mask = if hi - lo == WORD_BITS {
            u32::MAX
        } else {
            ((1u32 << (hi - lo)) - 1) << lo
        };
        out.push((word, mask));
        bit = (word + 1) * WORD_BITS;
    }
    out
}

/// A single product term, packed as a bit vector under a [`CubeLayout`]
///
/// Cubes are plain bit arrays; they do not carry their layout. The cover
/// types pair them with an `Arc<CubeLayout>` and the algebra below takes the
/// layout explicitly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    words: Box<[u32]>,
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube[")?;
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{:08x}", w)?;
        }
        write!(f, "]")
    }
}

impl Cube {
    /// The empty bit vector (no parts set anywhere)
    pub fn zero(layout: &CubeLayout) -> Cube {
        Cube {
            words: vec![0u32; layout.words()].into_boxed_slice(),
        }
    }

    /// The universal cube (every field full)
    pub fn full(layout: &CubeLayout) -> Cube {
        let mut c = Cube::zero(layout);
        for w in 0..layout.words() {
            c.words[w] = u32::MAX;
        }
        mask_tail(&mut c, layout);
        c
    }

    /// Test bit `bit`
    pub fn get(&self, bit: usize) -> bool {
        self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0
    }

    /// Set bit `bit`
    pub fn set(&mut self, bit: usize) {
        self.words[bit / WORD_BITS] |= 1 << (bit % WORD_BITS);
    }

    /// Clear bit `bit`
    pub fn clear(&mut self, bit: usize) {
        self.words[bit / WORD_BITS] &= !(1 << (bit % WORD_BITS));
    }

    /// True iff every part of `other` is also in `self`
    pub fn contains(&self, other: &Cube) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| b & !a == 0)
    }

    /// Bitwise AND (no emptiness check); see [`Cube::intersect`]
    pub fn and(&self, other: &Cube) -> Cube {
        Cube {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a & b)
                .collect(),
        }
    }

    /// Bitwise OR; the smallest cube containing both operands
    pub fn supercube(&self, other: &Cube) -> Cube {
        Cube {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a | b)
                .collect(),
        }
    }

    /// Bitwise complement within the layout's bit range
    pub fn complement_bits(&self, layout: &CubeLayout) -> Cube {
        let mut c = Cube {
            words: self.words.iter().map(|w| !w).collect(),
        };
        mask_tail(&mut c, layout);
        c
    }

    /// Intersection, or `None` when some variable field becomes empty
    pub fn intersect(&self, other: &Cube, layout: &CubeLayout) -> Option<Cube> {
        let c = self.and(other);
        if c.has_empty_field(layout) {
            None
        } else {
            Some(c)
        }
    }

    /// Number of variable fields whose intersection with `other` is empty
    ///
    /// Distance 0 means the cubes intersect; distance 1 means they admit a
    /// consensus on the single conflicting variable.
    pub fn distance(&self, other: &Cube, layout: &CubeLayout) -> usize {
        let mut dist = 0;
        for var in 0..layout.num_vars() {
            if layout
                .masks(var)
                .iter()
                .all(|&(w, m)| self.words[w] & other.words[w] & m == 0)
            {
                dist += 1;
            }
        }
        dist
    }

    /// Consensus of two cubes, defined for distance at most 1
    ///
    /// At the single conflicting variable the result takes the union of the
    /// two fields, everywhere else the intersection. Distance 0 degenerates
    /// to the plain intersection. Returns `None` for distance 2 or more.
    pub fn consensus(&self, other: &Cube, layout: &CubeLayout) -> Option<Cube> {
        let mut conflict = None;
        for var in 0..layout.num_vars() {
            if layout
                .masks(var)
                .iter()
                .all(|&(w, m)| self.words[w] & other.words[w] & m == 0)
            {
                if conflict.is_some() {
                    return None;
                }
                conflict = Some(var);
            }
        }
        let mut c = self.and(other);
        if let Some(var) = conflict {
            for &(w, m) in layout.masks(var) {
                c.words[w] |= (self.words[w] | other.words[w]) & m;
            }
        }
        Some(c)
    }

    /// Consensus taken on a chosen variable
    ///
    /// The result has the union of the two fields at `var` and the
    /// intersection everywhere else; it exists when every other variable
    /// intersects. This generalises [`Cube::consensus`]: distance-0 pairs
    /// admit a consensus on any variable, which matters for multi-valued
    /// fields (the output variable included) where the union can escape both
    /// operands. Prime generation iterates exactly this.
    pub fn consensus_on(&self, other: &Cube, var: usize, layout: &CubeLayout) -> Option<Cube> {
        for v in 0..layout.num_vars() {
            if v != var
                && layout
                    .masks(v)
                    .iter()
                    .all(|&(w, m)| self.words[w] & other.words[w] & m == 0)
            {
                return None;
            }
        }
        let mut c = self.and(other);
        for &(w, m) in layout.masks(var) {
            c.words[w] = (c.words[w] & !m) | ((self.words[w] | other.words[w]) & m);
        }
        Some(c)
    }

    /// Cover of `self \ other` (the sharp product)
    ///
    /// One result cube per variable where `other` does not include `self`'s
    /// field: a copy of `self` with that field replaced by
    /// `self.field & !other.field`. The result cubes may overlap; use
    /// [`Cube::dsharp`] when disjoint fragments are required.
    pub fn sharp(&self, other: &Cube, layout: &CubeLayout) -> Vec<Cube> {
        if self.distance(other, layout) > 0 {
            return vec![self.clone()];
        }
        let mut out = Vec::new();
        for var in 0..layout.num_vars() {
            let masks = layout.masks(var);
            if masks
                .iter()
                .any(|&(w, m)| self.words[w] & !other.words[w] & m != 0)
            {
                let mut c = self.clone();
                for &(w, m) in masks {
                    c.words[w] = (c.words[w] & !m) | (self.words[w] & !other.words[w] & m);
                }
                out.push(c);
            }
        }
        out
    }

    /// Disjoint sharp: like [`Cube::sharp`] but the result cubes partition
    /// `self \ other`
    ///
    /// Fields are processed in variable order; the k-th result cube agrees
    /// with `other` on all earlier conflict variables, which makes the
    /// fragments pairwise disjoint.
    pub fn dsharp(&self, other: &Cube, layout: &CubeLayout) -> Vec<Cube> {
        if self.distance(other, layout) > 0 {
            return vec![self.clone()];
        }
        let mut out = Vec::new();
        let mut base = self.clone();
        for var in 0..layout.num_vars() {
            let masks = layout.masks(var);
            if masks
                .iter()
                .any(|&(w, m)| self.words[w] & !other.words[w] & m != 0)
            {
                let mut c = base.clone();
                for &(w, m) in masks {
                    c.words[w] = (c.words[w] & !m) | (self.words[w] & !other.words[w] & m);
                }
                out.push(c);
                // Later fragments agree with `other` on this variable.
                for &(w, m) in masks {
                    base.words[w] = (base.words[w] & !m) | (self.words[w] & other.words[w] & m);
                }
            }
        }
        out
    }

    /// True iff some variable field is all zeros (the cube denotes no point)
    pub fn has_empty_field(&self, layout: &CubeLayout) -> bool {
        (0..layout.num_vars()).any(|var| {
            layout
                .masks(var)
                .iter()
                .all(|&(w, m)| self.words[w] & m == 0)
        })
    }

    /// True iff every field is full (the universal cube)
    pub fn is_full(&self, layout: &CubeLayout) -> bool {
        (0..layout.num_vars()).all(|var| self.field_is_full(var, layout))
    }

    /// True iff the field of `var` is full
    pub fn field_is_full(&self, var: usize, layout: &CubeLayout) -> bool {
        layout
            .masks(var)
            .iter()
            .all(|&(w, m)| self.words[w] & m == m)
    }

    /// Raise the field of `var` to full
    pub fn raise_var(&mut self, var: usize, layout: &CubeLayout) {
        for &(w, m) in layout.masks(var) {
            self.words[w] |= m;
        }
    }

    /// Restrict the field of `var` to the single part `part`
    pub fn fix_var(&mut self, var: usize, part: usize, layout: &CubeLayout) {
        for &(w, m) in layout.masks(var) {
            self.words[w] &= !m;
        }
        self.set(layout.var_first(var) + part);
    }

    /// Number of set bits
    pub fn popcount(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Set bits within the field of `var`
    pub fn field_popcount(&self, var: usize, layout: &CubeLayout) -> usize {
        layout
            .masks(var)
            .iter()
            .map(|&(w, m)| (self.words[w] & m).count_ones() as usize)
            .sum()
    }

    /// Literal count: set parts of every non-full field
    ///
    /// A full field is a don't-care and contributes nothing; a binary field
    /// with one part set contributes exactly one literal.
    pub fn literal_count(&self, layout: &CubeLayout) -> u64 {
        let mut n = 0u64;
        for var in 0..layout.num_vars() {
            if !self.field_is_full(var, layout) {
                n = n.saturating_add(self.field_popcount(var, layout) as u64);
            }
        }
        n
    }

    /// The lexicographically smallest minterm of the cube
    ///
    /// For every variable, the lowest set part is kept and the rest cleared.
    /// The cube must have no empty field.
    pub fn lowest_minterm(&self, layout: &CubeLayout) -> Cube {
        let mut c = Cube::zero(layout);
        for var in 0..layout.num_vars() {
            let first = layout.var_first(var);
            let parts = layout.var_parts(var);
            let low = (0..parts)
                .find(|&p| self.get(first + p))
                .expect("cube with an empty variable field");
            c.set(first + low);
        }
        c
    }

    /// Total order on the raw bit vectors, most-significant word first
    ///
    /// This order backs contain-sort and every canonicalisation step; larger
    /// cubes (more don't-cares in high positions) sort first.
    pub fn cmp_canonical(&self, other: &Cube) -> Ordering {
        for (a, b) in self.words.iter().zip(other.words.iter()).rev() {
            match b.cmp(a) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Raw storage words (low word first)
    pub fn raw_words(&self) -> &[u32] {
        &self.words
    }
}

/// Clear bits beyond the layout's size in the last word
fn mask_tail(c: &mut Cube, layout: &CubeLayout) {
    let used = layout.size() % WORD_BITS;
    if used != 0 {
        let last = layout.words() - 1;
        c.words[last] &= (1u32 << used) - 1;
    }
    for w in layout.words()..c.words.len() {
        c.words[w] = 0;
    }
}
