/// Coarse orbital shapes used to bias angular sampling.
///
/// These are visual approximations, not real spherical harmonics: the
/// acceptance weights below only evoke the s sphere, the p dumbbell and the
/// four-lobed d cloverleaf.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitalKind {
    S,
    P,
    D,
}

const SHELL_1: [OrbitalKind; 1] = [OrbitalKind::S];
const SHELL_2: [OrbitalKind; 2] = [OrbitalKind::S, OrbitalKind::P];
const SHELL_N: [OrbitalKind; 3] = [OrbitalKind::S, OrbitalKind::P, OrbitalKind::D];

impl OrbitalKind {
    /// Orbital sequence cycled through when assigning electrons in a shell.
    /// Shell 1 only has s, shell 2 adds p, every later shell adds d.
    pub fn cycle_for_shell(shell: u32) -> &'static [OrbitalKind] {
        match shell {
            0 | 1 => &SHELL_1,
            2 => &SHELL_2,
            _ => &SHELL_N,
        }
    }

    /// Orbital for the `slot`-th electron (0-based) within `shell`.
    pub fn for_slot(shell: u32, slot: usize) -> OrbitalKind {
        let cycle = Self::cycle_for_shell(shell);
        cycle[slot % cycle.len()]
    }

    /// Probability in [0, 1] of keeping a direction drawn uniformly over the
    /// sphere.
    ///
    /// - s: always 1, isotropic.
    /// - p: |cos θ|, concentrates density toward the poles.
    /// - d: sin²θ · cos²(2φ), four lobes in the equatorial plane.
    pub fn acceptance_weight(self, theta: f32, phi: f32) -> f32 {
        match self {
            OrbitalKind::S => 1.0,
            OrbitalKind::P => theta.cos().abs(),
            OrbitalKind::D => {
                let s = theta.sin();
                let c = (2.0 * phi).cos();
                s * s * c * c
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrbitalKind::S => "s",
            OrbitalKind::P => "p",
            OrbitalKind::D => "d",
        }
    }
}

impl std::fmt::Display for OrbitalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
