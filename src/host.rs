//! Interfaces to the simulation engine being benchmarked.
//!
//! The engine owns all collision and kinematics algorithms; this crate only
//! drives and times it. Bindings to a concrete engine implement these traits.

use nalgebra::DMatrix;

use crate::types::Pose;

/// A rigid or articulated body that can be placed and collision checked.
pub trait KinBody {
    /// Body name in the environment.
    fn name(&self) -> &str;

    /// Place the body in the world.
    fn set_transform(&mut self, pose: &Pose);

    /// Check the body against the rest of the environment.
    fn check_collision(&mut self) -> bool;

    /// Joint limits as `(lower, upper)`, one entry per DOF.
    fn dof_limits(&self) -> (Vec<f64>, Vec<f64>);

    /// Set every joint value of the body.
    fn set_dof_values(&mut self, values: &[f64]);

    /// Check the body against itself.
    fn check_self_collision(&mut self) -> bool;
}

/// A robot with selectable manipulators.
///
/// DOF-related calls act on the active DOFs, which are the arm joints of the
/// active manipulator once [`Robot::set_active_manipulator`] succeeded.
pub trait Robot {
    /// Robot name in the environment.
    fn name(&self) -> &str;

    /// Activate a manipulator and its arm DOFs. Returns false if the robot has
    /// no manipulator with that name.
    fn set_active_manipulator(&mut self, name: &str) -> bool;

    /// Limits of the active DOFs as `(lower, upper)`.
    fn active_dof_limits(&self) -> (Vec<f64>, Vec<f64>);

    /// Set the active DOF values (runs forward kinematics in most engines).
    fn set_active_dof_values(&mut self, values: &[f64]);

    /// Transform of the active manipulator's end effector.
    fn end_effector_transform(&self) -> Pose;

    /// Translational Jacobian of the active manipulator (3 x DOF).
    fn calculate_jacobian(&self) -> DMatrix<f64>;

    /// Angular-velocity Jacobian of the active manipulator (3 x DOF).
    fn calculate_angular_velocity_jacobian(&self) -> DMatrix<f64>;
}

/// Name lookup of bodies and robots.
pub trait Environment {
    /// Body handle type.
    type Body: KinBody;
    /// Robot handle type.
    type Robot: Robot;

    /// Find a body by name.
    fn kin_body_mut(&mut self, name: &str) -> Option<&mut Self::Body>;

    /// Find a robot by name.
    fn robot_mut(&mut self, name: &str) -> Option<&mut Self::Robot>;
}

/// Direct access to an environment's collision checker, for replaying logged
/// checks.
///
/// Handles are resolved by name before timing, so only the check call itself
/// falls inside the timed region.
pub trait CollisionChecker {
    /// Resolved body handle.
    type Body;
    /// Resolved link handle.
    type Link;

    /// Look up a body by name.
    fn body(&self, name: &str) -> Option<Self::Body>;

    /// Look up a link of a body.
    fn link(&self, body: &Self::Body, link: &str) -> Option<Self::Link>;

    /// Body against the environment.
    fn check_body(&mut self, body: &Self::Body) -> bool;

    /// Body against body.
    fn check_body_pair(&mut self, a: &Self::Body, b: &Self::Body) -> bool;

    /// Body against itself, with the environment's self-collision settings.
    fn check_self(&mut self, body: &Self::Body) -> bool;

    /// Link against the environment.
    fn check_link(&mut self, link: &Self::Link) -> bool;

    /// Link against link.
    fn check_link_pair(&mut self, a: &Self::Link, b: &Self::Link) -> bool;

    /// Link against a body.
    fn check_link_body(&mut self, link: &Self::Link, body: &Self::Body) -> bool;

    /// Link against the environment, ignoring the excluded bodies and links.
    fn check_link_excluding(
        &mut self,
        link: &Self::Link,
        bodies: &[Self::Body],
        links: &[Self::Link],
    ) -> bool;

    /// Body against the environment, ignoring the excluded bodies and links.
    fn check_body_excluding(
        &mut self,
        body: &Self::Body,
        bodies: &[Self::Body],
        links: &[Self::Link],
    ) -> bool;

    /// Self collision of a body in isolation.
    fn check_standalone_self(&mut self, body: &Self::Body) -> bool;

    /// Self collision of a body in isolation using precomputed geometry.
    fn check_standalone_self_baked(&mut self, body: &Self::Body) -> bool {
        self.check_standalone_self(body)
    }
}
