//! Atom construction: nucleus, shell occupancy and orbital assignment.
//!
//! Shells are filled greedily with capacities 2, 8, 18, 18, ... (simplified
//! Bohr filling, not the real aufbau order). Within a shell, orbitals are
//! assigned round-robin from [`OrbitalKind::cycle_for_shell`].

use log::debug;
use rand::Rng;

use crate::electron::{AtomId, Electron, TRAIL_CAPACITY};
use crate::elements;
use crate::error::AtomError;
use crate::orbital::OrbitalKind;
use crate::sampling::OrbitalSampler;
use crate::vector::Vector3;

/// Electrons per shell; the last entry repeats for outer shells.
pub const SHELL_CAPACITIES: [u32; 3] = [2, 8, 18];

/// Default base radius in pixels for [`bohr_scale`].
pub const DEFAULT_BOHR_BASE: f32 = 25.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Nucleus {
    pub position: Vector3,
    pub symbol: &'static str,
    pub atomic_number: u32,
    pub color: [u8; 3],
}

/// A nucleus together with the electrons it owns.
#[derive(Debug, Clone)]
pub struct Atom {
    pub id: AtomId,
    pub nucleus: Nucleus,
    pub electrons: Vec<Electron>,
    /// Characteristic sampling distance for this atom's electrons.
    pub a0_scale: f32,
}

impl Atom {
    /// Resample every electron of this atom.
    pub fn update<R: Rng + ?Sized>(&mut self, sampler: &OrbitalSampler, rng: &mut R) {
        let origin = self.nucleus.position;
        for electron in &mut self.electrons {
            electron.update(origin, self.a0_scale, sampler, rng);
        }
    }

    /// Occupancy per shell, derived from the electrons.
    pub fn shell_occupancy(&self) -> Vec<u32> {
        let mut shells: Vec<u32> = Vec::new();
        for e in &self.electrons {
            let idx = e.shell() as usize - 1;
            if shells.len() <= idx {
                shells.resize(idx + 1, 0);
            }
            shells[idx] += 1;
        }
        shells
    }

    /// (shell, orbital) for every electron in creation order.
    pub fn orbital_assignment(&self) -> Vec<(u32, OrbitalKind)> {
        self.electrons
            .iter()
            .map(|e| (e.shell(), e.orbital()))
            .collect()
    }
}

/// Capacity of the 1-based `shell`.
pub fn shell_capacity(shell: u32) -> u32 {
    let idx = (shell.max(1) - 1) as usize;
    SHELL_CAPACITIES
        .get(idx)
        .copied()
        .unwrap_or(SHELL_CAPACITIES[SHELL_CAPACITIES.len() - 1])
}

/// How many electrons go in each shell for atomic number `z`.
pub fn electron_shells_for_z(z: u32) -> Vec<u32> {
    let mut shells = Vec::new();
    let mut remaining = z;
    let mut shell = 1;
    while remaining > 0 {
        let fill = shell_capacity(shell).min(remaining);
        shells.push(fill);
        remaining -= fill;
        shell += 1;
    }
    shells
}

/// Per-atom Bohr radius: `base / sqrt(Z)`, so heavier atoms pack tighter.
pub fn bohr_scale(base: f32, z: u32) -> f32 {
    base / (z.max(1) as f32).sqrt()
}

/// Build an atom with its electrons in their creation-time classification.
///
/// Construction is deterministic for a given symbol; only later updates are
/// random.
pub fn build_atom(
    id: AtomId,
    symbol: &str,
    position: Vector3,
    bohr_base: f32,
    trail_capacity: usize,
) -> Result<Atom, AtomError> {
    let element = elements::lookup(symbol)?;
    let z = element.atomic_number;
    let shells = electron_shells_for_z(z);

    let mut electrons = Vec::with_capacity(z as usize);
    for (shell_idx, &count) in shells.iter().enumerate() {
        let shell = shell_idx as u32 + 1;
        for slot in 0..count as usize {
            let orbital = OrbitalKind::for_slot(shell, slot);
            electrons.push(Electron::with_trail_capacity(
                id,
                shell,
                orbital,
                position,
                trail_capacity,
            ));
        }
    }

    let a0_scale = bohr_scale(bohr_base, z);
    debug!(
        "built {} (Z={z}) at ({}, {}): shells {:?}, a0={a0_scale:.2}",
        element.symbol, position.x, position.y, shells
    );

    Ok(Atom {
        id,
        nucleus: Nucleus {
            position,
            symbol: element.symbol,
            atomic_number: z,
            color: element.color,
        },
        electrons,
        a0_scale,
    })
}

/// [`build_atom`] with the default base radius and trail length.
pub fn build_default_atom(id: AtomId, symbol: &str, position: Vector3) -> Result<Atom, AtomError> {
    build_atom(id, symbol, position, DEFAULT_BOHR_BASE, TRAIL_CAPACITY)
}
