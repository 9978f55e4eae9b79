/// Stochastic position sampling for electron particles.
///
/// Radial distance and direction are drawn independently by rejection
/// sampling. Every rejection loop is capped; on exhaustion the regular entry
/// points fall back to a best-effort value so a frame never stalls.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{SamplingError, SamplingStage};
use crate::orbital::OrbitalKind;
use crate::vector::Vector3;

/// Tunable sampling constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Base Bohr radius in pixels; an atom's a0 is `bohr_base / sqrt(Z)`.
    pub bohr_base: f32,
    /// Hard truncation radius as a multiple of the shell's effective a0.
    pub cutoff_factor: f32,
    /// Exponential proposal scale as a multiple of the shell's effective a0.
    pub proposal_factor: f32,
    pub max_radial_attempts: u32,
    pub max_angular_attempts: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            bohr_base: 25.0,
            cutoff_factor: 5.0,
            proposal_factor: 0.5,
            max_radial_attempts: 1000,
            max_angular_attempts: 1000,
        }
    }
}

/// Polar angle theta in [0, π] and azimuth phi in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub theta: f32,
    pub phi: f32,
}

/// Draws distances from the nucleus.
///
/// Proposal: r = -s·ln(u) with s = proposal_factor·a0·shell.
/// Target: proposals beyond r_max = cutoff_factor·a0·shell are discarded,
/// the rest are kept with probability (r / r_max)².
#[derive(Debug, Clone, PartialEq)]
pub struct RadialSampler {
    pub cutoff_factor: f32,
    pub proposal_factor: f32,
    pub max_attempts: u32,
}

impl RadialSampler {
    /// Heavier shells sample proportionally farther out.
    pub fn effective_a0(a0_scale: f32, shell: u32) -> f32 {
        a0_scale * shell.max(1) as f32
    }

    pub fn max_radius(&self, a0_scale: f32, shell: u32) -> f32 {
        self.cutoff_factor * Self::effective_a0(a0_scale, shell)
    }

    pub fn try_sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        a0_scale: f32,
        shell: u32,
    ) -> Result<f32, SamplingError> {
        let a0 = Self::effective_a0(a0_scale, shell);
        let r_max = self.cutoff_factor * a0;
        let scale = self.proposal_factor * a0;

        for _ in 0..self.max_attempts {
            // u in (0, 1] keeps ln(u) finite
            let u = 1.0 - rng.gen::<f32>();
            let r = -scale * u.ln();
            if r > r_max {
                continue;
            }
            let accept_prob = (r / r_max).powi(2);
            if rng.gen::<f32>() < accept_prob {
                return Ok(r);
            }
        }

        Err(SamplingError::Exhausted {
            stage: SamplingStage::Radial,
            attempts: self.max_attempts,
        })
    }

    /// Like [`try_sample`](Self::try_sample) but clamps to `r_max` when the
    /// attempt cap is hit.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, a0_scale: f32, shell: u32) -> f32 {
        match self.try_sample(rng, a0_scale, shell) {
            Ok(r) => r,
            Err(e) => {
                let r_max = self.max_radius(a0_scale, shell);
                warn!("{e} (a0={a0_scale}, shell={shell}); using r_max={r_max}");
                r_max
            }
        }
    }
}

/// Draws directions, shaped by the orbital's acceptance weight.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularSampler {
    pub max_attempts: u32,
}

impl AngularSampler {
    /// Direction uniform over the sphere's surface.
    ///
    /// theta comes from acos of a uniform cosine; drawing theta itself
    /// uniformly would cluster points at the poles.
    pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        let cos_theta: f32 = rng.gen_range(-1.0..=1.0);
        let theta = cos_theta.clamp(-1.0, 1.0).acos();
        let phi = rng.gen_range(0.0..TAU);
        Direction { theta, phi }
    }

    /// Returns the accepted direction and, if the cap was hit, the last
    /// rejected candidate alongside the error.
    fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        orbital: OrbitalKind,
    ) -> (Direction, Option<SamplingError>) {
        let attempts = self.max_attempts.max(1);
        let mut candidate = Self::uniform(rng);
        for attempt in 1..=attempts {
            let weight = orbital.acceptance_weight(candidate.theta, candidate.phi);
            if weight >= 1.0 || rng.gen::<f32>() <= weight {
                return (candidate, None);
            }
            if attempt < attempts {
                candidate = Self::uniform(rng);
            }
        }
        let err = SamplingError::Exhausted {
            stage: SamplingStage::Angular,
            attempts,
        };
        (candidate, Some(err))
    }

    pub fn try_sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        orbital: OrbitalKind,
    ) -> Result<Direction, SamplingError> {
        match self.draw(rng, orbital) {
            (dir, None) => Ok(dir),
            (_, Some(e)) => Err(e),
        }
    }

    /// Falls back to the last rejected candidate when the cap is hit.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, orbital: OrbitalKind) -> Direction {
        let (dir, err) = self.draw(rng, orbital);
        if let Some(e) = err {
            warn!("{e} ({orbital} orbital); keeping last candidate");
        }
        dir
    }
}

/// Radial and angular samplers combined into one position draw.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSampler {
    pub radial: RadialSampler,
    pub angular: AngularSampler,
}

impl OrbitalSampler {
    pub fn new(config: &SamplerConfig) -> Self {
        OrbitalSampler {
            radial: RadialSampler {
                cutoff_factor: config.cutoff_factor,
                proposal_factor: config.proposal_factor,
                max_attempts: config.max_radial_attempts,
            },
            angular: AngularSampler {
                max_attempts: config.max_angular_attempts,
            },
        }
    }

    /// Offset from the nucleus for one electron tick.
    pub fn sample_offset<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        a0_scale: f32,
        shell: u32,
        orbital: OrbitalKind,
    ) -> Vector3 {
        let r = self.radial.sample(rng, a0_scale, shell);
        let dir = self.angular.sample(rng, orbital);
        Vector3::from_spherical(r, dir.theta, dir.phi)
    }
}

impl Default for OrbitalSampler {
    fn default() -> Self {
        OrbitalSampler::new(&SamplerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    const TRIALS: usize = 10_000;

    #[test]
    fn test_radius_within_cutoff_without_exhaustion() {
        let sampler = OrbitalSampler::default().radial;
        let mut rng = StdRng::seed_from_u64(7);
        for shell in 1..=4 {
            for a0 in [25.0 / 8.0_f32.sqrt(), 5.0, 25.0] {
                let r_max = sampler.max_radius(a0, shell);
                for _ in 0..TRIALS / 4 {
                    let r = sampler
                        .try_sample(&mut rng, a0, shell)
                        .expect("cap should not be hit with default constants");
                    assert!(r >= 0.0 && r <= r_max, "r={r} r_max={r_max}");
                }
            }
        }
    }

    #[test]
    fn test_radius_distribution_mean() {
        // kept density is r² e^(-r/s) on [0, 10s]; its mean is close to 3s
        let sampler = OrbitalSampler::default().radial;
        let mut rng = StdRng::seed_from_u64(11);
        let a0 = 4.0;
        let shell = 2;
        let s = 0.5 * RadialSampler::effective_a0(a0, shell);
        let mean: f32 =
            (0..TRIALS).map(|_| sampler.sample(&mut rng, a0, shell)).sum::<f32>() / TRIALS as f32;
        assert!((mean / s - 3.0).abs() < 0.2, "mean/s = {}", mean / s);
    }

    #[test]
    fn test_outer_shells_sample_farther() {
        let sampler = OrbitalSampler::default().radial;
        let mut rng = StdRng::seed_from_u64(3);
        let mean = |rng: &mut StdRng, shell| {
            (0..2000).map(|_| sampler.sample(rng, 5.0, shell)).sum::<f32>() / 2000.0
        };
        let m1 = mean(&mut rng, 1);
        let m3 = mean(&mut rng, 3);
        assert!(m3 > 2.0 * m1, "m1={m1} m3={m3}");
    }

    #[test]
    fn test_radial_exhaustion_falls_back_to_cutoff() {
        let sampler = RadialSampler {
            cutoff_factor: 5.0,
            proposal_factor: 0.5,
            max_attempts: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = sampler.try_sample(&mut rng, 10.0, 2).unwrap_err();
        assert_eq!(
            err,
            SamplingError::Exhausted {
                stage: SamplingStage::Radial,
                attempts: 0
            }
        );
        assert_eq!(sampler.sample(&mut rng, 10.0, 2), 100.0);
    }

    #[test]
    fn test_direction_ranges() {
        let sampler = OrbitalSampler::default().angular;
        let mut rng = StdRng::seed_from_u64(5);
        for kind in [OrbitalKind::S, OrbitalKind::P, OrbitalKind::D] {
            for _ in 0..TRIALS {
                let d = sampler.try_sample(&mut rng, kind).unwrap();
                assert!((0.0..=PI).contains(&d.theta), "theta={}", d.theta);
                assert!((0.0..TAU).contains(&d.phi), "phi={}", d.phi);
            }
        }
    }

    #[test]
    fn test_s_is_isotropic() {
        let sampler = OrbitalSampler::default().angular;
        let mut rng = StdRng::seed_from_u64(21);
        // uniform over the sphere: E[cos θ] = 0, E[|cos θ|] = 1/2
        let (mut sum, mut sum_abs) = (0.0_f32, 0.0_f32);
        for _ in 0..TRIALS {
            let d = sampler.sample(&mut rng, OrbitalKind::S);
            sum += d.theta.cos();
            sum_abs += d.theta.cos().abs();
        }
        assert!((sum / TRIALS as f32).abs() < 0.05);
        assert!((sum_abs / TRIALS as f32 - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_p_biased_toward_poles() {
        let sampler = OrbitalSampler::default().angular;
        let mut rng = StdRng::seed_from_u64(22);
        // weighting by |cos θ| lifts E[|cos θ|] from 1/2 to 2/3
        let mean: f32 = (0..TRIALS)
            .map(|_| sampler.sample(&mut rng, OrbitalKind::P).theta.cos().abs())
            .sum::<f32>()
            / TRIALS as f32;
        assert!((mean - 2.0 / 3.0).abs() < 0.03, "mean |cos θ| = {mean}");
    }

    #[test]
    fn test_d_biased_toward_equatorial_lobes() {
        let sampler = OrbitalSampler::default().angular;
        let mut rng = StdRng::seed_from_u64(23);
        let (mut sin2, mut cos2phi) = (0.0_f32, 0.0_f32);
        for _ in 0..TRIALS {
            let d = sampler.sample(&mut rng, OrbitalKind::D);
            sin2 += d.theta.sin().powi(2);
            cos2phi += (2.0 * d.phi).cos().powi(2);
        }
        // uniform would give 2/3 and 1/2
        assert!((sin2 / TRIALS as f32 - 0.8).abs() < 0.03);
        assert!((cos2phi / TRIALS as f32 - 0.75).abs() < 0.03);
    }

    #[test]
    fn test_angular_exhaustion_keeps_last_candidate() {
        let sampler = AngularSampler { max_attempts: 1 };
        let mut rng = StdRng::seed_from_u64(9);
        let mut exhausted = 0;
        for _ in 0..200 {
            match sampler.try_sample(&mut rng, OrbitalKind::D) {
                Ok(_) => {}
                Err(SamplingError::Exhausted { stage, attempts }) => {
                    assert_eq!(stage, SamplingStage::Angular);
                    assert_eq!(attempts, 1);
                    exhausted += 1;
                }
            }
            let d = sampler.sample(&mut rng, OrbitalKind::D);
            assert!((0.0..=PI).contains(&d.theta));
            assert!((0.0..TAU).contains(&d.phi));
        }
        assert!(exhausted > 0);
    }

    #[test]
    fn test_sample_offset_within_cutoff() {
        let sampler = OrbitalSampler::default();
        let mut rng = StdRng::seed_from_u64(4);
        let r_max = sampler.radial.max_radius(6.0, 2);
        for _ in 0..1000 {
            let v = sampler.sample_offset(&mut rng, 6.0, 2, OrbitalKind::P);
            assert!(v.length() <= r_max + 1e-3);
        }
    }
}
