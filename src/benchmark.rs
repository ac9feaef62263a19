//! Main `Benchmark` entry point and builder.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::{KinBody, Robot};
use crate::measurement::{black_box, Collector, Operation, PhasedOperation};
use crate::output::{load_inputs, terminal, write_report};
use crate::result::{CollisionReport, ForwardKinematicsReport, JacobianReport, Summary};
use crate::sampling::RandomSampler;
use crate::types::{AxisBounds, JointConfiguration, Pose, SampleInput};

/// Runs collision and kinematics benchmarks against a host engine.
///
/// Inputs are either drawn from a [`RandomSampler`] or replayed from a
/// previous result document, then timed one by one with a [`Collector`].
///
/// # Example
///
/// ```ignore
/// use motion_bench::Benchmark;
///
/// let report = Benchmark::new()
///     .samples(10_000)
///     .extent(2.0)
///     .seed(42)
///     .outfile("ode_herb.yaml")
///     .run_collision(&mut herb)?;
///
/// println!("{:.2} checks/s", report.summary("collision").queries_per_sec().unwrap_or(0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Benchmark {
    config: Config,
}

impl Benchmark {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with a small sample count for smoke tests.
    ///
    /// Settings:
    /// - 1,000 samples (vs 50,000 default)
    pub fn quick() -> Self {
        Self {
            config: Config {
                samples: 1_000,
                ..Config::default()
            },
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the number of random inputs.
    pub fn samples(mut self, n: usize) -> Self {
        self.config.samples = n;
        self
    }

    /// Set the number of untimed warmup iterations.
    pub fn warmup(mut self, n: usize) -> Self {
        self.config.warmup = n;
        self
    }

    /// Seed input generation for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the pose sampling volume.
    pub fn bounds(mut self, bounds: AxisBounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    /// Sample poses from the cube `[0, extent]^3`.
    pub fn extent(self, extent: f64) -> Self {
        self.bounds(AxisBounds::cube(extent))
    }

    /// Replay the inputs of a previous result document instead of sampling.
    pub fn datafile(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.datafile = Some(path.into());
        self
    }

    /// Write the report to this file after the run.
    pub fn outfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.outfile = Some(path.into());
        self
    }

    /// A sampler honoring the configured seed.
    pub fn sampler(&self) -> RandomSampler {
        match self.config.seed {
            Some(seed) => RandomSampler::with_seed(seed),
            None => RandomSampler::new(),
        }
    }

    fn collector(&self) -> Collector {
        Collector::new(self.config.warmup)
    }

    /// Time an arbitrary operation over the given inputs.
    ///
    /// This is the generic loop behind every collision benchmark: any
    /// `FnMut(&T) -> bool` works as the operation.
    pub fn time<T, O>(&self, inputs: Vec<T>, op: &mut O) -> Result<CollisionReport<T>>
    where
        O: Operation<T> + ?Sized,
    {
        let run = self.collector().collect(inputs, op)?;
        Ok(CollisionReport::from_run(run))
    }

    /// Benchmark environment collision checks of `body` at random or replayed poses.
    pub fn run_collision<B: KinBody + ?Sized>(&self, body: &mut B) -> Result<CollisionReport<Pose>> {
        debug!(body = body.name(), "running environment collision benchmark");
        let inputs = match self.replayed_inputs::<Pose>()? {
            Some(inputs) => inputs,
            None => {
                info!(count = self.config.samples, "generating transforms");
                self.sampler()
                    .generate_poses(self.config.samples, &self.config.bounds)?
            }
        };

        let report = self.time(inputs, &mut EnvironmentCollision { body })?;
        self.finish(&report, report.summary("environment collision"))?;
        Ok(report)
    }

    /// Benchmark self-collision checks of `body` at random or replayed joint values.
    ///
    /// Random configurations are drawn within the body's DOF limits.
    pub fn run_self_collision<B: KinBody + ?Sized>(
        &self,
        body: &mut B,
    ) -> Result<CollisionReport<JointConfiguration>> {
        debug!(body = body.name(), "running self collision benchmark");
        let (lower, upper) = body.dof_limits();
        let inputs = self.joint_inputs(&lower, &upper)?;

        let report = self.time(inputs, &mut SelfCollision { body })?;
        self.finish(&report, report.summary("self collision"))?;
        Ok(report)
    }

    /// Benchmark forward kinematics of the robot's active manipulator.
    ///
    /// Each query is timed as two phases: setting the active joint values and
    /// reading the end-effector transform.
    pub fn run_forward_kinematics<R: Robot + ?Sized>(
        &self,
        robot: &mut R,
    ) -> Result<ForwardKinematicsReport> {
        debug!(robot = robot.name(), "running forward kinematics benchmark");
        let (lower, upper) = robot.active_dof_limits();
        let inputs = self.joint_inputs(&lower, &upper)?;

        let run = self
            .collector()
            .collect_phases(&inputs, &mut ForwardKinematics { robot })?;
        let report = ForwardKinematicsReport::from_run(&run);
        self.finish(&report, report.summary())?;
        Ok(report)
    }

    /// Benchmark translational and rotational Jacobians of the active manipulator.
    ///
    /// Joint values are set untimed before each query.
    pub fn run_jacobian<R: Robot + ?Sized>(&self, robot: &mut R) -> Result<JacobianReport> {
        debug!(robot = robot.name(), "running jacobian benchmark");
        let (lower, upper) = robot.active_dof_limits();
        let inputs = self.joint_inputs(&lower, &upper)?;

        let run = self
            .collector()
            .collect_phases(&inputs, &mut Jacobian { robot })?;
        let report = JacobianReport::from_run(&run);
        self.finish(&report, report.summary())?;
        Ok(report)
    }

    /// Inputs from the configured datafile, if any.
    fn replayed_inputs<T: SampleInput>(&self) -> Result<Option<Vec<T>>> {
        let Some(path) = &self.config.datafile else {
            return Ok(None);
        };
        info!(path = %path.display(), "loading inputs from file");
        let inputs = load_inputs::<T>(path)?;
        info!(count = inputs.len(), "loaded inputs");
        Ok(Some(inputs))
    }

    fn joint_inputs(&self, lower: &[f64], upper: &[f64]) -> Result<Vec<JointConfiguration>> {
        match self.replayed_inputs::<JointConfiguration>()? {
            Some(inputs) => {
                if let Some(bad) = inputs.iter().find(|c| c.dof() != lower.len()) {
                    return Err(Error::InvalidParameters(format!(
                        "datafile configuration has {} values but the chain has {} DOFs",
                        bad.dof(),
                        lower.len()
                    )));
                }
                Ok(inputs)
            }
            None => {
                info!(count = self.config.samples, dof = lower.len(), "generating configurations");
                self.sampler()
                    .generate_joint_configurations(self.config.samples, lower, upper)
            }
        }
    }

    /// Record the report if requested and log the summary.
    fn finish<R: Serialize>(&self, report: &R, summary: Summary) -> Result<()> {
        if let Some(path) = &self.config.outfile {
            info!(path = %path.display(), "recording results");
            write_report(path, report)?;
        }
        log_summary(&summary);
        Ok(())
    }
}

fn log_summary(summary: &Summary) {
    info!(
        benchmark = %summary.title,
        queries = summary.queries,
        collisions = ?summary.collisions,
        elapsed_s = summary.elapsed_secs(),
        secs_per_query = ?summary.secs_per_query(),
        queries_per_sec = ?summary.queries_per_sec(),
        "benchmark finished"
    );
    for (phase, ms) in &summary.phases {
        debug!(benchmark = %summary.title, phase = %phase, elapsed_ms = ms, "phase total");
    }
    debug!("\n{}", terminal::format_summary(summary));
}

struct EnvironmentCollision<'a, B: ?Sized> {
    body: &'a mut B,
}

impl<B: KinBody + ?Sized> Operation<Pose> for EnvironmentCollision<'_, B> {
    fn prepare(&mut self, pose: &Pose) {
        self.body.set_transform(pose);
    }

    fn run(&mut self, _pose: &Pose) -> bool {
        self.body.check_collision()
    }
}

struct SelfCollision<'a, B: ?Sized> {
    body: &'a mut B,
}

impl<B: KinBody + ?Sized> Operation<JointConfiguration> for SelfCollision<'_, B> {
    fn prepare(&mut self, config: &JointConfiguration) {
        self.body.set_dof_values(config);
    }

    fn run(&mut self, _config: &JointConfiguration) -> bool {
        self.body.check_self_collision()
    }
}

struct ForwardKinematics<'a, R: ?Sized> {
    robot: &'a mut R,
}

impl<R: Robot + ?Sized> PhasedOperation<JointConfiguration> for ForwardKinematics<'_, R> {
    fn first(&mut self, config: &JointConfiguration) {
        self.robot.set_active_dof_values(config);
    }

    fn second(&mut self, _config: &JointConfiguration) {
        black_box(self.robot.end_effector_transform());
    }
}

struct Jacobian<'a, R: ?Sized> {
    robot: &'a mut R,
}

impl<R: Robot + ?Sized> PhasedOperation<JointConfiguration> for Jacobian<'_, R> {
    fn prepare(&mut self, config: &JointConfiguration) {
        self.robot.set_active_dof_values(config);
    }

    fn first(&mut self, _config: &JointConfiguration) {
        black_box(self.robot.calculate_jacobian());
    }

    fn second(&mut self, _config: &JointConfiguration) {
        black_box(self.robot.calculate_angular_velocity_jacobian());
    }
}
