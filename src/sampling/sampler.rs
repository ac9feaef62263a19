//! Uniform sampling of poses and joint configurations.

use std::f64::consts::TAU;

use nalgebra::{UnitQuaternion, Vector3};
use rand::distr::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{Error, Result};
use crate::types::{check_interval, AxisBounds, JointConfiguration, Pose};

/// Generator of random benchmark inputs.
///
/// The sampler owns its random number generator. Two samplers built with the
/// same seed produce identical sequences; [`RandomSampler::new`] seeds from
/// the thread-local entropy source instead.
///
/// # Example
///
/// ```
/// use motion_bench::{AxisBounds, RandomSampler};
///
/// let mut sampler = RandomSampler::with_seed(7);
/// let poses = sampler.generate_poses(100, &AxisBounds::cube(2.0)).unwrap();
/// assert_eq!(poses.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSampler<R = Xoshiro256PlusPlus> {
    rng: R,
}

impl RandomSampler<Xoshiro256PlusPlus> {
    /// Create a sampler seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        }
    }

    /// Create a deterministic sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler<Xoshiro256PlusPlus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSampler<R> {
    /// Wrap an existing generator.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` poses with translations uniform in `bounds`.
    ///
    /// Each translation axis has its own closed-interval distribution. The
    /// rotation is built from three independent angles in `[0, 2π)` read as a
    /// scaled-axis vector. That is not a Haar-uniform draw over SO(3), but it
    /// matches the distribution used by existing benchmark datasets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] before drawing anything if an axis is
    /// inverted or non-finite.
    pub fn generate_poses(&mut self, count: usize, bounds: &AxisBounds) -> Result<Vec<Pose>> {
        bounds.validate()?;

        let [x, y, z] = bounds.axes().map(|(lo, hi)| closed_interval(lo, hi));
        let (x, y, z) = (x?, y?, z?);
        let angle = Uniform::new(0.0, TAU).map_err(|e| Error::InvalidBounds(e.to_string()))?;

        let mut poses = Vec::with_capacity(count);
        for _ in 0..count {
            let translation = Vector3::new(
                x.sample(&mut self.rng),
                y.sample(&mut self.rng),
                z.sample(&mut self.rng),
            );
            let axis_angle = Vector3::new(
                angle.sample(&mut self.rng),
                angle.sample(&mut self.rng),
                angle.sample(&mut self.rng),
            );
            poses.push(Pose::new(
                translation,
                UnitQuaternion::from_scaled_axis(axis_angle),
            ));
        }
        Ok(poses)
    }

    /// Generate `count` joint configurations, joint `i` uniform in `[lower[i], upper[i]]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if the limit vectors differ in length
    /// or any joint has `lower > upper` or a non-finite limit.
    pub fn generate_joint_configurations(
        &mut self,
        count: usize,
        lower: &[f64],
        upper: &[f64],
    ) -> Result<Vec<JointConfiguration>> {
        if lower.len() != upper.len() {
            return Err(Error::InvalidBounds(format!(
                "{} lower limits but {} upper limits",
                lower.len(),
                upper.len()
            )));
        }
        for (i, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
            check_interval(&format!("joint {i}"), lo, hi)?;
        }

        let joints = lower
            .iter()
            .zip(upper)
            .map(|(&lo, &hi)| closed_interval(lo, hi))
            .collect::<Result<Vec<_>>>()?;

        let configurations: Vec<JointConfiguration> = (0..count)
            .map(|_| {
                JointConfiguration::from(
                    joints
                        .iter()
                        .map(|dist| dist.sample(&mut self.rng))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Ok(configurations)
    }
}

/// Uniform distribution over a closed interval.
///
/// Spans wider than `f64::MAX / 2` overflow the uniform sampler's internal
/// scale, so they are drawn over `[lo/4, hi/4]` and multiplied back by 4.
#[derive(Debug, Clone)]
struct ClosedInterval {
    inner: Uniform<f64>,
    scale: f64,
}

impl Distribution<f64> for ClosedInterval {
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> f64 {
        self.inner.sample(rng) * self.scale
    }
}

/// Uniform distribution over `[lo, hi]`; a degenerate interval yields `lo`.
fn closed_interval(lo: f64, hi: f64) -> Result<ClosedInterval> {
    let (lo_s, hi_s, scale) = if hi - lo <= f64::MAX / 2.0 {
        (lo, hi, 1.0)
    } else {
        (lo / 4.0, hi / 4.0, 4.0)
    };
    let inner = Uniform::new_inclusive(lo_s, hi_s)
        .map_err(|e| Error::InvalidBounds(format!("[{lo}, {hi}]: {e}")))?;
    Ok(ClosedInterval { inner, scale })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_count_and_bounds() {
        let bounds = AxisBounds::new(-1.0, 1.0, 0.0, 0.5, 2.0, 3.0);
        let poses = RandomSampler::with_seed(1).generate_poses(500, &bounds).unwrap();
        assert_eq!(poses.len(), 500);
        for pose in &poses {
            assert!(bounds.contains(&pose.translation, 1e-12));
            assert!((pose.rotation.quaternion().norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_count() {
        let mut sampler = RandomSampler::with_seed(1);
        assert!(sampler.generate_poses(0, &AxisBounds::cube(1.0)).unwrap().is_empty());
        assert!(sampler
            .generate_joint_configurations(0, &[0.0], &[1.0])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_degenerate_axis_collapses() {
        let bounds = AxisBounds::new(0.0, 1.0, 0.25, 0.25, 0.0, 1.0);
        let poses = RandomSampler::with_seed(3).generate_poses(50, &bounds).unwrap();
        assert!(poses.iter().all(|p| p.translation.y == 0.25));
    }

    #[test]
    fn test_axes_are_independent() {
        // z must follow its own range, not x's
        let bounds = AxisBounds::new(0.0, 1.0, 0.0, 1.0, 10.0, 11.0);
        let poses = RandomSampler::with_seed(5).generate_poses(200, &bounds).unwrap();
        assert!(poses.iter().all(|p| p.translation.z >= 10.0));
    }

    #[test]
    fn test_invalid_pose_bounds() {
        let bounds = AxisBounds::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);
        let res = RandomSampler::with_seed(1).generate_poses(10, &bounds);
        assert!(matches!(res, Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_joint_configurations() {
        let lower = [-1.0, 0.0, 2.0, 5.0];
        let upper = [1.0, 0.1, 2.0, 6.0];
        let configs = RandomSampler::with_seed(9)
            .generate_joint_configurations(300, &lower, &upper)
            .unwrap();
        assert_eq!(configs.len(), 300);
        for config in &configs {
            assert_eq!(config.dof(), 4);
            for (i, v) in config.iter().enumerate() {
                assert!(*v >= lower[i] && *v <= upper[i]);
            }
            assert_eq!(config[2], 2.0);
        }
    }

    #[test]
    fn test_joint_length_mismatch() {
        let res = RandomSampler::with_seed(1).generate_joint_configurations(1, &[0.0, 0.0], &[1.0]);
        assert!(matches!(res, Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_joint_inverted_limit() {
        let res = RandomSampler::with_seed(1).generate_joint_configurations(1, &[0.0, 2.0], &[1.0, 1.0]);
        match res {
            Err(Error::InvalidBounds(msg)) => assert!(msg.contains("joint 1")),
            other => panic!("expected InvalidBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_seed_determinism() {
        let bounds = AxisBounds::cube(3.0);
        let a = RandomSampler::with_seed(42).generate_poses(20, &bounds).unwrap();
        let b = RandomSampler::with_seed(42).generate_poses(20, &bounds).unwrap();
        assert_eq!(a, b);

        let c = RandomSampler::with_seed(43).generate_poses(20, &bounds).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_joint_seed_determinism() {
        let lower = [-2.0, 0.0, 1.0];
        let upper = [2.0, 0.5, 3.0];
        let a = RandomSampler::with_seed(42)
            .generate_joint_configurations(20, &lower, &upper)
            .unwrap();
        let b = RandomSampler::with_seed(42)
            .generate_joint_configurations(20, &lower, &upper)
            .unwrap();
        assert_eq!(a, b);

        let c = RandomSampler::with_seed(43)
            .generate_joint_configurations(20, &lower, &upper)
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_full_range_bounds() {
        let bounds = AxisBounds::new(-1e308, 1e308, -f64::MAX, f64::MAX, 0.0, 1.0);
        let poses = RandomSampler::with_seed(11).generate_poses(200, &bounds).unwrap();
        assert_eq!(poses.len(), 200);
        for pose in &poses {
            assert!(pose.translation.iter().all(|v| v.is_finite()));
            assert!(bounds.contains(&pose.translation, 0.0));
        }
        assert!(poses.iter().any(|p| p.translation.x < 0.0));
        assert!(poses.iter().any(|p| p.translation.x > 0.0));

        let configs = RandomSampler::with_seed(11)
            .generate_joint_configurations(50, &[-f64::MAX], &[f64::MAX])
            .unwrap();
        assert!(configs.iter().all(|c| c[0].is_finite()));
    }

    #[test]
    fn test_zero_dof() {
        let configs = RandomSampler::with_seed(1)
            .generate_joint_configurations(3, &[], &[])
            .unwrap();
        assert_eq!(configs.len(), 3);
        assert!(configs.iter().all(|c| c.dof() == 0));
    }
}
