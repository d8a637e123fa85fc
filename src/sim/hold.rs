//! Wall holds and their procedural generation
//!
//! Index 0 of the queue is the top of the wall; the last hold is the active one
//! the next input must match.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Which lane a hold occupies (and which way the player moves)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Outline a hold is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldShape {
    Circle,
    RoundedRect,
}

/// Size/shape class of a hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldClass {
    Small,
    Medium,
    Large,
    Rounded,
}

impl HoldClass {
    pub const ALL: [HoldClass; 4] = [
        HoldClass::Small,
        HoldClass::Medium,
        HoldClass::Large,
        HoldClass::Rounded,
    ];

    /// (width, height) in pixels
    pub fn size(self) -> (f32, f32) {
        match self {
            HoldClass::Small => (40.0, 40.0),
            HoldClass::Medium => (60.0, 30.0),
            HoldClass::Large => (80.0, 40.0),
            HoldClass::Rounded => (50.0, 50.0),
        }
    }

    pub fn shape(self) -> HoldShape {
        match self {
            HoldClass::Small | HoldClass::Rounded => HoldShape::Circle,
            HoldClass::Medium | HoldClass::Large => HoldShape::RoundedRect,
        }
    }
}

/// A single grip on the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    pub side: Side,
    pub class: HoldClass,
}

impl Hold {
    pub fn new(side: Side, class: HoldClass) -> Self {
        Self { side, class }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.class.size().0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.class.size().1
    }

    #[inline]
    pub fn shape(&self) -> HoldShape {
        self.class.shape()
    }
}

/// Anything that can supply the next hold for the wall
pub trait HoldSource {
    fn next_hold(&mut self) -> Hold;
}

/// Seeded random hold generator (same seed, same wall)
#[derive(Debug, Clone)]
pub struct HoldGenerator {
    rng: Pcg32,
}

impl HoldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform side, uniform class
    pub fn generate(&mut self) -> Hold {
        let side = if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let class = HoldClass::ALL[self.rng.random_range(0..HoldClass::ALL.len())];
        Hold { side, class }
    }
}

impl HoldSource for HoldGenerator {
    fn next_hold(&mut self) -> Hold {
        self.generate()
    }
}

/// Replays a fixed hold list, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedHolds {
    script: Vec<Hold>,
    cursor: usize,
}

impl ScriptedHolds {
    /// Panics on an empty script
    pub fn new(script: Vec<Hold>) -> Self {
        assert!(!script.is_empty(), "scripted hold list must not be empty");
        Self { script, cursor: 0 }
    }

    /// Holds on the given sides, all of one class
    pub fn from_sides(sides: &[Side]) -> Self {
        Self::new(
            sides
                .iter()
                .map(|&side| Hold::new(side, HoldClass::Medium))
                .collect(),
        )
    }
}

impl HoldSource for ScriptedHolds {
    fn next_hold(&mut self) -> Hold {
        let hold = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        hold
    }
}

/// Fixed-length run of holds: visible wall plus lookahead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldQueue {
    holds: VecDeque<Hold>,
}

impl HoldQueue {
    /// Generate `len` holds in order; the last one generated is active
    pub fn generate<S: HoldSource>(source: &mut S, len: usize) -> Self {
        assert!(len > 0, "hold queue needs at least one hold");
        let holds = (0..len).map(|_| source.next_hold()).collect();
        Self { holds }
    }

    /// The hold the next move must match
    pub fn active(&self) -> &Hold {
        // Length is fixed and non-zero from construction
        &self.holds[self.holds.len() - 1]
    }

    /// Drop the active hold and add a fresh one at the top of the wall
    pub fn advance(&mut self, fresh: Hold) -> Hold {
        let len = self.holds.len();
        let consumed = self.holds.pop_back();
        self.holds.push_front(fresh);
        debug_assert_eq!(self.holds.len(), len, "hold queue length changed");
        consumed.expect("hold queue is never empty")
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hold> {
        self.holds.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Hold> {
        self.holds.get(index)
    }
}

/// Build the opening wall segment
pub fn init_queue<S: HoldSource>(source: &mut S, len: usize) -> HoldQueue {
    HoldQueue::generate(source, len)
}
