//! Core data types: sampling bounds, poses, joint configurations and timed samples.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Axis-aligned box that bounds pose sampling.
///
/// Construction does not validate; [`AxisBounds::validate`] is called by the
/// sampler before any value is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Minimum x value.
    pub xmin: f64,
    /// Maximum x value.
    pub xmax: f64,
    /// Minimum y value.
    pub ymin: f64,
    /// Maximum y value.
    pub ymax: f64,
    /// Minimum z value.
    pub zmin: f64,
    /// Maximum z value.
    pub zmax: f64,
}

impl AxisBounds {
    /// Create bounds from per-axis extremes.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, zmin: f64, zmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        }
    }

    /// Cube `[0, extent]` on every axis.
    pub fn cube(extent: f64) -> Self {
        Self::new(0.0, extent, 0.0, extent, 0.0, extent)
    }

    /// `(min, max)` pairs in x, y, z order.
    pub fn axes(&self) -> [(f64, f64); 3] {
        [
            (self.xmin, self.xmax),
            (self.ymin, self.ymax),
            (self.zmin, self.zmax),
        ]
    }

    /// Check that every axis is finite with `min <= max`.
    ///
    /// A degenerate axis (`min == max`) is valid and samples a constant.
    pub fn validate(&self) -> Result<()> {
        for ((lo, hi), name) in self.axes().into_iter().zip(["x", "y", "z"]) {
            check_interval(name, lo, hi)?;
        }
        Ok(())
    }

    /// True if the point lies inside the closed box (within `eps`).
    pub fn contains(&self, p: &Vector3<f64>, eps: f64) -> bool {
        self.axes()
            .iter()
            .zip(p.iter())
            .all(|(&(lo, hi), &v)| v >= lo - eps && v <= hi + eps)
    }
}

/// Validate one closed interval. Shared by pose and joint sampling.
pub(crate) fn check_interval(axis: &str, lo: f64, hi: f64) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::InvalidBounds(format!(
            "axis {axis} has non-finite bounds [{lo}, {hi}]"
        )));
    }
    if lo > hi {
        return Err(Error::InvalidBounds(format!(
            "axis {axis} has min {lo} greater than max {hi}"
        )));
    }
    Ok(())
}

/// Rigid transform: translation plus unit-quaternion rotation.
///
/// On the wire a pose is a flat list `[tx, ty, tz, qw, qx, qy, qz]`, the
/// layout used by existing benchmark logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Translation in world coordinates.
    pub translation: Vector3<f64>,
    /// Orientation.
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    /// Create a pose from its parts.
    pub fn new(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), UnitQuaternion::identity())
    }

    /// Flat `[tx, ty, tz, qw, qx, qy, qz]` representation.
    pub fn to_array(&self) -> [f64; 7] {
        let t = &self.translation;
        let q = self.rotation.quaternion();
        [t.x, t.y, t.z, q.w, q.i, q.j, q.k]
    }

    /// Build a pose from the flat representation, normalizing the quaternion.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != 7 {
            return Err(Error::InvalidParameters(format!(
                "transform needs 7 values, got {}",
                values.len()
            )));
        }
        let q = Quaternion::new(values[3], values[4], values[5], values[6]);
        let norm = q.norm();
        if !norm.is_finite() || norm < f64::EPSILON {
            return Err(Error::InvalidParameters(format!(
                "transform quaternion has invalid norm {norm}"
            )));
        }
        Ok(Self::new(
            Vector3::new(values[0], values[1], values[2]),
            UnitQuaternion::from_quaternion(q),
        ))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Serialize for Pose {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Pose::from_slice(&values).map_err(de::Error::custom)
    }
}

/// Joint values of a kinematic chain, one per degree of freedom.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointConfiguration(pub Vec<f64>);

impl JointConfiguration {
    /// Number of degrees of freedom.
    pub fn dof(&self) -> usize {
        self.0.len()
    }

    /// Consume into the raw values.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for JointConfiguration {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for JointConfiguration {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Input types that can be recorded in a [`TimedSample`].
///
/// `FIELD` is the key the input is stored under in result documents.
pub trait SampleInput: Serialize + DeserializeOwned + Clone {
    /// Document key for this input kind.
    const FIELD: &'static str;
}

impl SampleInput for Pose {
    const FIELD: &'static str = "transform";
}

impl SampleInput for JointConfiguration {
    const FIELD: &'static str = "pose";
}

/// One benchmark iteration: the input, how long the operation took, and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSample<T> {
    input: T,
    elapsed_ms: f64,
    collision: bool,
}

impl<T> TimedSample<T> {
    /// Record a measured iteration.
    pub fn new(input: T, elapsed_ms: f64, collision: bool) -> Self {
        Self {
            input,
            elapsed_ms,
            collision,
        }
    }

    /// The input the operation was run on.
    pub fn input(&self) -> &T {
        &self.input
    }

    /// Wall-clock duration of the operation in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Outcome reported by the operation (true = in collision).
    pub fn collision(&self) -> bool {
        self.collision
    }

    /// Drop the measurement, keeping the input.
    pub fn into_input(self) -> T {
        self.input
    }
}

impl<T: SampleInput> Serialize for TimedSample<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TimedSample", 3)?;
        state.serialize_field(T::FIELD, &self.input)?;
        state.serialize_field("elapsed_ms", &self.elapsed_ms)?;
        state.serialize_field("collision", &self.collision)?;
        state.end()
    }
}

impl<'de, T: SampleInput> Deserialize<'de> for TimedSample<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SampleVisitor<T>(PhantomData<T>);

        impl<'de, T: SampleInput> Visitor<'de> for SampleVisitor<T> {
            type Value = TimedSample<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map with {}, elapsed_ms and collision", T::FIELD)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut input = None;
                let mut elapsed_ms = None;
                let mut collision = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        k if k == T::FIELD => input = Some(map.next_value::<T>()?),
                        "elapsed_ms" => elapsed_ms = Some(map.next_value::<f64>()?),
                        "collision" => collision = Some(map.next_value::<bool>()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(TimedSample {
                    input: input.ok_or_else(|| de::Error::missing_field(T::FIELD))?,
                    elapsed_ms: elapsed_ms.ok_or_else(|| de::Error::missing_field("elapsed_ms"))?,
                    collision: collision.ok_or_else(|| de::Error::missing_field("collision"))?,
                })
            }
        }

        deserializer.deserialize_map(SampleVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounds() {
        let b = AxisBounds::cube(2.0);
        assert_eq!(b.axes(), [(0.0, 2.0); 3]);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_degenerate_axis_is_valid() {
        let b = AxisBounds::new(1.0, 1.0, 0.0, 1.0, -1.0, -1.0);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_inverted_axis_rejected() {
        let b = AxisBounds::new(0.0, 1.0, 2.0, 1.0, 0.0, 1.0);
        let err = b.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidBounds(ref m) if m.contains("axis y")));
    }

    #[test]
    fn test_nan_bound_rejected() {
        let b = AxisBounds::new(0.0, f64::NAN, 0.0, 1.0, 0.0, 1.0);
        assert!(matches!(b.validate(), Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_pose_wire_layout() {
        let pose = Pose::new(
            Vector3::new(1.0, 2.0, 3.0),
            UnitQuaternion::identity(),
        );
        assert_eq!(pose.to_array(), [1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pose_from_slice_normalizes() {
        let pose = Pose::from_slice(&[0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0]).unwrap();
        assert!((pose.rotation.quaternion().norm() - 1.0).abs() < 1e-12);
        assert!((pose.rotation.quaternion().w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pose_from_slice_rejects_bad_input() {
        assert!(Pose::from_slice(&[0.0; 6]).is_err());
        assert!(Pose::from_slice(&[0.0; 7]).is_err());
    }

    #[test]
    fn test_timed_sample_keys() {
        let pose_sample = TimedSample::new(Pose::identity(), 0.5, true);
        let json = serde_json::to_string(&pose_sample).unwrap();
        assert!(json.contains("\"transform\":[0.0,0.0,0.0,1.0,0.0,0.0,0.0]"));
        assert!(json.contains("\"elapsed_ms\":0.5"));
        assert!(json.contains("\"collision\":true"));

        let joint_sample = TimedSample::new(JointConfiguration(vec![0.1, 0.2]), 1.0, false);
        let json = serde_json::to_string(&joint_sample).unwrap();
        assert!(json.contains("\"pose\":[0.1,0.2]"));
    }

    #[test]
    fn test_timed_sample_ignores_unknown_keys() {
        let json = r#"{"pose":[1.0],"elapsed_ms":2.0,"collision":false,"note":"x"}"#;
        let sample: TimedSample<JointConfiguration> = serde_json::from_str(json).unwrap();
        assert_eq!(sample.input().0, vec![1.0]);
        assert_eq!(sample.elapsed_ms(), 2.0);
        assert!(!sample.collision());
    }

    #[test]
    fn test_timed_sample_missing_input() {
        let json = r#"{"elapsed_ms":2.0,"collision":false}"#;
        let res: std::result::Result<TimedSample<Pose>, _> = serde_json::from_str(json);
        assert!(res.unwrap_err().to_string().contains("transform"));
    }
}
