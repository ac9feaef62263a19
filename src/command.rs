//! Text command payloads, as sent by scripting front ends.
//!
//! A payload is a YAML mapping (flow style such as
//! `{'body': 'herb', 'random': 1000, 'extent': 2.0}` works too). Parsing
//! checks required keys, then names are resolved through an [`Environment`]
//! and the matching [`Benchmark`] driver runs.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use crate::benchmark::Benchmark;
use crate::error::{Error, Result};
use crate::host::{Environment, Robot};
use crate::result::{CollisionReport, ForwardKinematicsReport, JacobianReport};
use crate::types::{JointConfiguration, Pose};

#[derive(Debug, Deserialize)]
struct RawCollisionParams {
    body: Option<String>,
    #[serde(default)]
    random: usize,
    datafile: Option<PathBuf>,
    extent: Option<f64>,
    outfile: Option<PathBuf>,
    #[serde(default, rename = "self")]
    self_collision: bool,
    seed: Option<u64>,
}

/// Parameters of a collision benchmark command.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionParams {
    /// Body to check.
    pub body: String,
    /// Number of random inputs (ignored with `datafile`).
    pub random: usize,
    /// Replay inputs from this result document.
    pub datafile: Option<PathBuf>,
    /// Pose sampling cube `[0, extent]^3`. Required unless `self_collision`.
    pub extent: Option<f64>,
    /// Write the report here.
    pub outfile: Option<PathBuf>,
    /// Run self collision instead of environment collision.
    pub self_collision: bool,
    /// Seed for reproducible inputs.
    pub seed: Option<u64>,
}

impl CollisionParams {
    /// Parse and check a YAML payload.
    pub fn from_yaml(payload: &str) -> Result<Self> {
        let raw: RawCollisionParams = serde_yaml::from_str(payload)?;
        let body = raw.body.ok_or(Error::MissingParameter("body"))?;
        if !raw.self_collision && raw.extent.is_none() {
            return Err(Error::MissingParameter("extent"));
        }
        Ok(Self {
            body,
            random: raw.random,
            datafile: raw.datafile,
            extent: raw.extent,
            outfile: raw.outfile,
            self_collision: raw.self_collision,
            seed: raw.seed,
        })
    }

    /// A benchmark configured from these parameters.
    pub fn benchmark(&self) -> Benchmark {
        let mut bench = Benchmark::new().samples(self.random);
        if let Some(extent) = self.extent {
            bench = bench.extent(extent);
        }
        if let Some(path) = &self.datafile {
            bench = bench.datafile(path);
        }
        if let Some(path) = &self.outfile {
            bench = bench.outfile(path);
        }
        if let Some(seed) = self.seed {
            bench = bench.seed(seed);
        }
        bench
    }
}

#[derive(Debug, Deserialize)]
struct RawKinematicsParams {
    robot: Option<String>,
    manip: Option<String>,
    #[serde(default)]
    random: usize,
    outfile: Option<PathBuf>,
    seed: Option<u64>,
}

/// Parameters of a kinematics benchmark command.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicsParams {
    /// Robot to query.
    pub robot: String,
    /// Manipulator to activate.
    pub manip: String,
    /// Number of random configurations.
    pub random: usize,
    /// Write the report here.
    pub outfile: Option<PathBuf>,
    /// Seed for reproducible inputs.
    pub seed: Option<u64>,
}

impl KinematicsParams {
    /// Parse and check a YAML payload.
    pub fn from_yaml(payload: &str) -> Result<Self> {
        let raw: RawKinematicsParams = serde_yaml::from_str(payload)?;
        Ok(Self {
            robot: raw.robot.ok_or(Error::MissingParameter("robot"))?,
            manip: raw.manip.ok_or(Error::MissingParameter("manip"))?,
            random: raw.random,
            outfile: raw.outfile,
            seed: raw.seed,
        })
    }

    /// A benchmark configured from these parameters.
    pub fn benchmark(&self) -> Benchmark {
        let mut bench = Benchmark::new().samples(self.random);
        if let Some(path) = &self.outfile {
            bench = bench.outfile(path);
        }
        if let Some(seed) = self.seed {
            bench = bench.seed(seed);
        }
        bench
    }
}

/// Report of a collision command; which kind depends on the `self` key.
#[derive(Debug, Clone)]
pub enum CollisionOutcome {
    /// Body against environment at sampled poses.
    Environment(CollisionReport<Pose>),
    /// Body against itself at sampled joint values.
    SelfCollision(CollisionReport<JointConfiguration>),
}

impl CollisionOutcome {
    /// Number of checks run.
    pub fn checks(&self) -> usize {
        match self {
            CollisionOutcome::Environment(r) => r.checks,
            CollisionOutcome::SelfCollision(r) => r.checks,
        }
    }

    /// Number of checks that found a collision.
    pub fn collisions(&self) -> usize {
        match self {
            CollisionOutcome::Environment(r) => r.collisions,
            CollisionOutcome::SelfCollision(r) => r.collisions,
        }
    }
}

/// Run a collision benchmark described by a YAML payload.
pub fn run_collision_command<E: Environment>(env: &mut E, payload: &str) -> Result<CollisionOutcome> {
    let params = CollisionParams::from_yaml(payload)?;
    let bench = params.benchmark();
    let body = env
        .kin_body_mut(&params.body)
        .ok_or_else(|| Error::UnknownBody(params.body.clone()))?;
    info!(body = %params.body, self_collision = params.self_collision, "running collision checking");

    if params.self_collision {
        Ok(CollisionOutcome::SelfCollision(bench.run_self_collision(body)?))
    } else {
        Ok(CollisionOutcome::Environment(bench.run_collision(body)?))
    }
}

/// Run a forward kinematics benchmark described by a YAML payload.
pub fn run_forward_kinematics_command<E: Environment>(
    env: &mut E,
    payload: &str,
) -> Result<ForwardKinematicsReport> {
    let params = KinematicsParams::from_yaml(payload)?;
    let robot = activate(env, &params)?;
    params.benchmark().run_forward_kinematics(robot)
}

/// Run a Jacobian benchmark described by a YAML payload.
pub fn run_jacobian_command<E: Environment>(env: &mut E, payload: &str) -> Result<JacobianReport> {
    let params = KinematicsParams::from_yaml(payload)?;
    let robot = activate(env, &params)?;
    params.benchmark().run_jacobian(robot)
}

fn activate<'e, E: Environment>(env: &'e mut E, params: &KinematicsParams) -> Result<&'e mut E::Robot> {
    let robot = env
        .robot_mut(&params.robot)
        .ok_or_else(|| Error::UnknownRobot(params.robot.clone()))?;
    if !robot.set_active_manipulator(&params.manip) {
        return Err(Error::UnknownManipulator(params.manip.clone()));
    }
    info!(robot = %params.robot, manip = %params.manip, "activated manipulator");
    Ok(robot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_params_flow_mapping() {
        let params =
            CollisionParams::from_yaml("{'body': 'herb', 'random': 100, 'extent': 2.0}").unwrap();
        assert_eq!(params.body, "herb");
        assert_eq!(params.random, 100);
        assert_eq!(params.extent, Some(2.0));
        assert!(!params.self_collision);
        assert!(params.outfile.is_none());
    }

    #[test]
    fn test_collision_params_defaults() {
        let params = CollisionParams::from_yaml("body: herb\nself: true\n").unwrap();
        assert_eq!(params.random, 0);
        assert!(params.self_collision);
        assert!(params.extent.is_none());
    }

    #[test]
    fn test_collision_params_missing_body() {
        let err = CollisionParams::from_yaml("random: 10\nextent: 1.0\n").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("body")));
    }

    #[test]
    fn test_collision_params_missing_extent() {
        let err = CollisionParams::from_yaml("body: herb\nrandom: 10\n").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("extent")));
    }

    #[test]
    fn test_collision_params_benchmark() {
        let params = CollisionParams::from_yaml(
            "body: herb\nrandom: 5\nextent: 1.5\noutfile: out.yaml\nseed: 3\n",
        )
        .unwrap();
        let config = params.benchmark().config().clone();
        assert_eq!(config.samples, 5);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.bounds, crate::types::AxisBounds::cube(1.5));
        assert_eq!(config.outfile, Some(PathBuf::from("out.yaml")));
    }

    #[test]
    fn test_kinematics_params() {
        let params =
            KinematicsParams::from_yaml("{robot: herb, manip: right, random: 20}").unwrap();
        assert_eq!(params.robot, "herb");
        assert_eq!(params.manip, "right");
        assert_eq!(params.random, 20);

        let err = KinematicsParams::from_yaml("{robot: herb}").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("manip")));
        let err = KinematicsParams::from_yaml("{manip: right}").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("robot")));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            CollisionParams::from_yaml("body: [unclosed"),
            Err(Error::Yaml(_))
        ));
    }
}
