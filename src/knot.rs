// knot.rs      Arena-backed knot rings.
//
// Copyright (c) 2021  Douglas P Lau
//
// The pre-distillation engine represents paths and pens as pool-allocated
// doubly-linked cyclic lists of `knot_t` nodes reached through raw pointers.
// Per the design notes this is reworked as a single `Vec<Knot>` arena: rings
// are sequences of `u32` indices, with `succ`/`pred` stored per entry. This
// sidesteps lifetime bookkeeping across ring-clone and ring-reverse and keeps
// iteration cache-friendly.

use crate::geom::Point;
use std::collections::HashMap;

/// How a knot's control-point slot should be interpreted.
///
/// Only `Regular`, `Explicit` and `Open` are produced by this crate's
/// pipeline; `Given` and `Curl` exist for extensibility with other path
/// authoring front ends and are treated as invariant violations if the
/// convolution engine ever encounters them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideType {
    Regular,
    Explicit,
    Given,
    Curl,
    Open,
}

/// A node in a doubly-linked cyclic ring.
#[derive(Clone, Copy, Debug)]
pub struct Knot {
    pub pos: Point,
    pub left: Point,
    pub right: Point,
    pub left_type: SideType,
    pub right_type: SideType,
    succ: KnotId,
    pred: KnotId,
}

impl Knot {
    fn at(pos: Point) -> Knot {
        Knot {
            pos,
            left: Point::zero(),
            right: Point::zero(),
            left_type: SideType::Regular,
            right_type: SideType::Regular,
            succ: 0,
            pred: 0,
        }
    }
}

/// Index of a knot within a `KnotStore`.
pub type KnotId = u32;

/// A handle to a ring: the index of one of its knots.
///
/// Path constructors preserve this handle's identity across `lineto` /
/// `rlineto` / `curveto` / `pathclose` calls (new knots are linked in
/// *before* the handle, so the handle always still names the knot created
/// by the ring's originating `moveto`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ring(pub KnotId);

/// Caller-owned arena of knots backing every path and pen in a session.
///
/// Not concurrency-safe: all mutating operations take `&mut self`, which
/// keeps the type `!Sync` for free and matches the "single-threaded
/// cooperative" contract of the kernel.
#[derive(Default)]
pub struct KnotStore {
    knots: Vec<Knot>,
    free: Vec<KnotId>,
}

impl KnotStore {
    pub fn new() -> KnotStore {
        KnotStore {
            knots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> KnotStore {
        KnotStore {
            knots: Vec::with_capacity(cap),
            free: Vec::new(),
        }
    }

    fn alloc(&mut self, pos: Point) -> KnotId {
        if let Some(id) = self.free.pop() {
            self.knots[id as usize] = Knot::at(pos);
            id
        } else {
            let id = self.knots.len();
            assert!(id < KnotId::MAX as usize, "knot store exhausted");
            self.knots.push(Knot::at(pos));
            id as KnotId
        }
    }

    fn link(&mut self, pred: KnotId, mid: KnotId, succ: KnotId) {
        self.knots[pred as usize].succ = mid;
        self.knots[mid as usize].pred = pred;
        self.knots[mid as usize].succ = succ;
        self.knots[succ as usize].pred = mid;
    }

    pub fn succ(&self, k: KnotId) -> KnotId {
        self.knots[k as usize].succ
    }

    pub fn pred(&self, k: KnotId) -> KnotId {
        self.knots[k as usize].pred
    }

    pub fn point(&self, k: KnotId) -> Point {
        self.knots[k as usize].pos
    }

    pub fn set_point(&mut self, k: KnotId, p: Point) {
        self.knots[k as usize].pos = p;
    }

    pub fn left(&self, k: KnotId) -> Point {
        self.knots[k as usize].left
    }

    pub fn right(&self, k: KnotId) -> Point {
        self.knots[k as usize].right
    }

    pub fn left_type(&self, k: KnotId) -> SideType {
        self.knots[k as usize].left_type
    }

    pub fn right_type(&self, k: KnotId) -> SideType {
        self.knots[k as usize].right_type
    }

    pub fn set_left(&mut self, k: KnotId, p: Point, t: SideType) {
        self.knots[k as usize].left = p;
        self.knots[k as usize].left_type = t;
    }

    pub fn set_right(&mut self, k: KnotId, p: Point, t: SideType) {
        self.knots[k as usize].right = p;
        self.knots[k as usize].right_type = t;
    }

    /// Inserts a freshly-allocated knot between `pred` and its successor,
    /// returning the new knot's id. Used by de Casteljau subdivision.
    pub fn insert_after(&mut self, pred: KnotId, pos: Point) -> KnotId {
        let succ = self.succ(pred);
        let mid = self.alloc(pos);
        self.link(pred, mid, succ);
        mid
    }

    /// Inserts a freshly-allocated knot immediately before `succ`, returning
    /// its id. Used by the path constructors, which grow a ring backwards
    /// from its handle.
    pub fn insert_before(&mut self, succ: KnotId, pos: Point) -> KnotId {
        let pred = self.pred(succ);
        let mid = self.alloc(pos);
        self.link(pred, mid, succ);
        mid
    }

    /// Allocates a new, self-linked single-knot ring.
    pub fn new_ring(&mut self, pos: Point) -> Ring {
        let id = self.alloc(pos);
        self.knots[id as usize].succ = id;
        self.knots[id as usize].pred = id;
        Ring(id)
    }

    /// Releases every knot in `ring` back to the free list.
    pub fn free_ring(&mut self, ring: Ring) {
        let start = ring.0;
        let mut k = start;
        loop {
            let next = self.succ(k);
            self.free.push(k);
            k = next;
            if k == start {
                break;
            }
        }
    }

    /// Deep-copies a ring, preserving relative topology, and returns the new
    /// ring's handle (the knot corresponding to the original handle).
    pub fn ring_clone(&mut self, ring: Ring) -> Ring {
        let mut old_ids = Vec::new();
        let mut k = ring.0;
        loop {
            old_ids.push(k);
            k = self.succ(k);
            if k == ring.0 {
                break;
            }
        }

        let mut map = HashMap::with_capacity(old_ids.len());
        for &old in &old_ids {
            let new_id = self.alloc(self.point(old));
            self.knots[new_id as usize] = self.knots[old as usize];
            map.insert(old, new_id);
        }
        for &old in &old_ids {
            let new_id = map[&old];
            let old_succ = self.knots[old as usize].succ;
            let old_pred = self.knots[old as usize].pred;
            self.knots[new_id as usize].succ = map[&old_succ];
            self.knots[new_id as usize].pred = map[&old_pred];
        }
        Ring(map[&ring.0])
    }

    /// Reverses a ring's traversal direction in place: swaps succ/pred for
    /// every knot, and swaps each knot's left/right control slot (what was
    /// the incoming side becomes the outgoing side once direction flips).
    pub fn ring_reverse(&mut self, ring: Ring) -> Ring {
        let mut ids = Vec::new();
        let mut k = ring.0;
        loop {
            ids.push(k);
            k = self.succ(k);
            if k == ring.0 {
                break;
            }
        }
        for &id in &ids {
            let kn = &mut self.knots[id as usize];
            std::mem::swap(&mut kn.succ, &mut kn.pred);
            std::mem::swap(&mut kn.left, &mut kn.right);
            std::mem::swap(&mut kn.left_type, &mut kn.right_type);
        }
        ring
    }

    /// Number of knots currently live (allocated and not freed).
    pub fn len(&self) -> usize {
        self.knots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates a ring's knot ids in successor order, starting and ending at
    /// the handle.
    pub fn ring_ids(&self, ring: Ring) -> Vec<KnotId> {
        let mut ids = Vec::new();
        let mut k = ring.0;
        loop {
            ids.push(k);
            k = self.succ(k);
            if k == ring.0 {
                break;
            }
        }
        ids
    }
}
