//! Electron particle state.

use rand::Rng;
use std::collections::VecDeque;

use crate::orbital::OrbitalKind;
use crate::sampling::OrbitalSampler;
use crate::vector::Vector3;

/// Number of past screen positions kept for the motion trail.
pub const TRAIL_CAPACITY: usize = 10;

/// Index of an atom in the simulation's atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomId(pub usize);

/// One orbiting particle.
///
/// Shell and orbital are fixed at construction. Each [`update`](Self::update)
/// replaces the position with a fresh sample; positions are not integrated
/// over time.
#[derive(Debug, Clone)]
pub struct Electron {
    atom: AtomId,
    shell: u32,
    orbital: OrbitalKind,
    position: Vector3,
    trail: VecDeque<[f32; 2]>,
    trail_capacity: usize,
}

impl Electron {
    pub fn new(atom: AtomId, shell: u32, orbital: OrbitalKind, nucleus: Vector3) -> Self {
        Self::with_trail_capacity(atom, shell, orbital, nucleus, TRAIL_CAPACITY)
    }

    pub fn with_trail_capacity(
        atom: AtomId,
        shell: u32,
        orbital: OrbitalKind,
        nucleus: Vector3,
        trail_capacity: usize,
    ) -> Self {
        let trail_capacity = trail_capacity.max(1);
        Electron {
            atom,
            shell: shell.max(1),
            orbital,
            position: nucleus,
            trail: VecDeque::with_capacity(trail_capacity + 1),
            trail_capacity,
        }
    }

    pub fn atom(&self) -> AtomId {
        self.atom
    }

    pub fn shell(&self) -> u32 {
        self.shell
    }

    pub fn orbital(&self) -> OrbitalKind {
        self.orbital
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Recent screen positions, oldest first.
    pub fn trail(&self) -> &VecDeque<[f32; 2]> {
        &self.trail
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    /// Resample the position around `nucleus` and push it onto the trail.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        nucleus: Vector3,
        a0_scale: f32,
        sampler: &OrbitalSampler,
        rng: &mut R,
    ) {
        let offset = sampler.sample_offset(rng, a0_scale, self.shell, self.orbital);
        self.place(nucleus + offset);
    }

    fn place(&mut self, position: Vector3) {
        self.position = position;
        self.trail.push_back(position.xy());
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }
    }
}
