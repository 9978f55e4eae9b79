//! Simulation state and per-frame snapshots.
//!
//! A tick resamples every electron of every atom, after which the whole
//! frame is read through [`SimulationState::snapshot`].

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::atom::{build_atom, Atom};
use crate::config::AppConfig;
use crate::electron::{AtomId, Electron};
use crate::error::AtomError;
use crate::orbital::OrbitalKind;
use crate::sampling::OrbitalSampler;
use crate::vector::Vector3;

#[derive(Debug, Clone, Serialize)]
pub struct ElectronFrame {
    pub shell: u32,
    pub orbital: OrbitalKind,
    pub position: [f32; 3],
    /// Oldest first.
    pub trail: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtomFrame {
    pub symbol: String,
    pub atomic_number: u32,
    pub position: [f32; 3],
    pub color: [u8; 3],
    pub electrons: Vec<ElectronFrame>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    pub atoms: Vec<AtomFrame>,
}

pub struct SimulationState {
    atoms: Vec<Atom>,
    sampler: OrbitalSampler,
    rng: StdRng,
    frame: u64,
    width: u32,
    height: u32,
}

impl SimulationState {
    pub fn new(config: &AppConfig) -> Result<Self, AtomError> {
        let mut atoms = Vec::with_capacity(config.atoms.len());
        for (i, spec) in config.atoms.iter().enumerate() {
            let position = Vector3::from(spec.position);
            let mut atom = build_atom(
                AtomId(i),
                &spec.symbol,
                position,
                config.sampler.bohr_base,
                config.trail_length,
            )?;
            atom.nucleus.color = config.color_for(atom.nucleus.symbol);
            atoms.push(atom);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let state = SimulationState {
            atoms,
            sampler: OrbitalSampler::new(&config.sampler),
            rng,
            frame: 0,
            width: config.window.width,
            height: config.window.height,
        };
        info!(
            "simulation ready: {} atoms, {} electrons",
            state.atoms.len(),
            state.electron_count()
        );
        Ok(state)
    }

    /// Advance one frame: every electron gets a fresh position.
    pub fn tick(&mut self) {
        for atom in &mut self.atoms {
            atom.update(&self.sampler, &mut self.rng);
        }
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.0)
    }

    /// Non-owning view over every electron of every atom.
    pub fn electrons(&self) -> impl Iterator<Item = &Electron> {
        self.atoms.iter().flat_map(|a| a.electrons.iter())
    }

    pub fn electron_count(&self) -> usize {
        self.atoms.iter().map(|a| a.electrons.len()).sum()
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let atoms = self
            .atoms
            .iter()
            .map(|atom| AtomFrame {
                symbol: atom.nucleus.symbol.to_string(),
                atomic_number: atom.nucleus.atomic_number,
                position: atom.nucleus.position.to_array(),
                color: atom.nucleus.color,
                electrons: atom
                    .electrons
                    .iter()
                    .map(|e| ElectronFrame {
                        shell: e.shell(),
                        orbital: e.orbital(),
                        position: e.position().to_array(),
                        trail: e.trail().iter().copied().collect(),
                    })
                    .collect(),
            })
            .collect();

        FrameSnapshot {
            frame: self.frame,
            width: self.width,
            height: self.height,
            atoms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtomSpec;

    fn seeded(seed: u64) -> AppConfig {
        AppConfig {
            seed: Some(seed),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_scene() {
        let state = SimulationState::new(&seeded(1)).unwrap();
        // H + Be + O
        assert_eq!(state.atoms().len(), 3);
        assert_eq!(state.electron_count(), 1 + 4 + 8);
        assert_eq!(state.electrons().count(), 13);
        assert_eq!(state.atom(AtomId(1)).unwrap().nucleus.symbol, "Be");
        assert!(state.atom(AtomId(3)).is_none());
        for atom in state.atoms() {
            assert!(atom.electrons.iter().all(|e| e.atom() == atom.id));
        }
    }

    #[test]
    fn test_unknown_symbol_fails_construction() {
        let mut config = seeded(1);
        config.atoms.push(AtomSpec::new("Xy", 0.0, 0.0));
        assert!(matches!(
            SimulationState::new(&config),
            Err(AtomError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_tick_fills_trails() {
        let mut state = SimulationState::new(&seeded(2)).unwrap();
        for _ in 0..12 {
            state.tick();
        }
        assert_eq!(state.frame(), 12);
        assert!(state.electrons().all(|e| e.trail().len() == 10));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = SimulationState::new(&seeded(5)).unwrap();
        let mut b = SimulationState::new(&seeded(5)).unwrap();
        for _ in 0..3 {
            a.tick();
            b.tick();
        }
        let pa: Vec<_> = a.electrons().map(|e| e.position()).collect();
        let pb: Vec<_> = b.electrons().map(|e| e.position()).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut config = seeded(3);
        config.colors.insert("H".to_string(), [1, 2, 3]);
        let mut state = SimulationState::new(&config).unwrap();
        state.tick();
        state.tick();
        let snap = state.snapshot();
        assert_eq!(snap.frame, 2);
        assert_eq!(snap.width, 1100);
        assert_eq!(snap.atoms.len(), 3);
        assert_eq!(snap.atoms[0].color, [1, 2, 3]);
        assert_eq!(snap.atoms[2].symbol, "O");
        assert_eq!(snap.atoms[2].electrons.len(), 8);
        let e = &snap.atoms[2].electrons[3];
        assert_eq!(e.orbital, OrbitalKind::P);
        assert_eq!(e.shell, 2);
        assert_eq!(e.trail.len(), 2);
        assert_eq!(e.trail[1], [e.position[0], e.position[1]]);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["atoms"][1]["symbol"], "Be");
        assert_eq!(json["atoms"][2]["electrons"][3]["orbital"], "p");
    }
}
