//! In-memory host engine used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use motion_bench::host::{CollisionChecker, Environment, KinBody, Robot};
use motion_bench::Pose;
use nalgebra::{DMatrix, UnitQuaternion, Vector3};

/// Body that collides whenever it is placed beyond `x = 1`, and self-collides
/// when its joint values sum above zero.
#[derive(Debug, Clone)]
pub struct MockBody {
    pub name: String,
    pub pose: Pose,
    pub values: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub checks: usize,
}

impl MockBody {
    pub fn new(name: &str, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            pose: Pose::identity(),
            values: vec![0.0; lower.len()],
            lower,
            upper,
            checks: 0,
        }
    }
}

impl KinBody for MockBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_transform(&mut self, pose: &Pose) {
        self.pose = *pose;
    }

    fn check_collision(&mut self) -> bool {
        self.checks += 1;
        self.pose.translation.x > 1.0
    }

    fn dof_limits(&self) -> (Vec<f64>, Vec<f64>) {
        (self.lower.clone(), self.upper.clone())
    }

    fn set_dof_values(&mut self, values: &[f64]) {
        self.values = values.to_vec();
    }

    fn check_self_collision(&mut self) -> bool {
        self.checks += 1;
        self.values.iter().sum::<f64>() > 0.0
    }
}

/// Robot whose end effector sits at its first three joint values.
#[derive(Debug, Clone)]
pub struct MockRobot {
    pub name: String,
    pub manipulators: Vec<String>,
    pub active: Option<String>,
    pub values: Vec<f64>,
    pub dof: usize,
    pub fk_calls: usize,
    pub jacobian_calls: usize,
}

impl MockRobot {
    pub fn new(name: &str, dof: usize) -> Self {
        Self {
            name: name.to_string(),
            manipulators: vec!["left".to_string(), "right".to_string()],
            active: None,
            values: vec![0.0; dof],
            dof,
            fk_calls: 0,
            jacobian_calls: 0,
        }
    }
}

impl Robot for MockRobot {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_active_manipulator(&mut self, name: &str) -> bool {
        if self.manipulators.iter().any(|m| m == name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    fn active_dof_limits(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-1.0; self.dof], vec![1.0; self.dof])
    }

    fn set_active_dof_values(&mut self, values: &[f64]) {
        self.values = values.to_vec();
    }

    fn end_effector_transform(&self) -> Pose {
        let v = |i: usize| self.values.get(i).copied().unwrap_or(0.0);
        Pose::new(Vector3::new(v(0), v(1), v(2)), UnitQuaternion::identity())
    }

    fn calculate_jacobian(&self) -> DMatrix<f64> {
        DMatrix::from_element(3, self.dof, 1.0)
    }

    fn calculate_angular_velocity_jacobian(&self) -> DMatrix<f64> {
        DMatrix::zeros(3, self.dof)
    }
}

#[derive(Debug, Default)]
pub struct MockEnvironment {
    pub bodies: HashMap<String, MockBody>,
    pub robots: HashMap<String, MockRobot>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        let mut env = Self::default();
        env.bodies.insert(
            "herb".to_string(),
            MockBody::new("herb", vec![-1.0, -1.0], vec![1.0, 1.0]),
        );
        env.robots.insert("herb".to_string(), MockRobot::new("herb", 7));
        env
    }
}

impl Environment for MockEnvironment {
    type Body = MockBody;
    type Robot = MockRobot;

    fn kin_body_mut(&mut self, name: &str) -> Option<&mut MockBody> {
        self.bodies.get_mut(name)
    }

    fn robot_mut(&mut self, name: &str) -> Option<&mut MockRobot> {
        self.robots.get_mut(name)
    }
}

/// Checker that records every call. Only body `table` is "in collision"
/// with anything.
#[derive(Debug, Default)]
pub struct MockChecker {
    pub links: HashMap<String, Vec<String>>,
    pub calls: Vec<String>,
}

impl MockChecker {
    pub fn new() -> Self {
        let mut links = HashMap::new();
        links.insert(
            "herb".to_string(),
            vec!["hand".to_string(), "palm".to_string()],
        );
        links.insert("table".to_string(), vec!["top".to_string()]);
        Self {
            links,
            calls: Vec::new(),
        }
    }
}

impl CollisionChecker for MockChecker {
    type Body = String;
    type Link = (String, String);

    fn body(&self, name: &str) -> Option<String> {
        self.links.contains_key(name).then(|| name.to_string())
    }

    fn link(&self, body: &String, link: &str) -> Option<(String, String)> {
        self.links
            .get(body)
            .filter(|links| links.iter().any(|l| l == link))
            .map(|_| (body.clone(), link.to_string()))
    }

    fn check_body(&mut self, body: &String) -> bool {
        self.calls.push(format!("body {body}"));
        body == "table"
    }

    fn check_body_pair(&mut self, a: &String, b: &String) -> bool {
        self.calls.push(format!("body_pair {a} {b}"));
        a == "table" || b == "table"
    }

    fn check_self(&mut self, body: &String) -> bool {
        self.calls.push(format!("self {body}"));
        false
    }

    fn check_link(&mut self, link: &(String, String)) -> bool {
        self.calls.push(format!("link {} {}", link.1, link.0));
        link.0 == "table"
    }

    fn check_link_pair(&mut self, a: &(String, String), b: &(String, String)) -> bool {
        self.calls.push(format!("link_pair {} {}", a.1, b.1));
        a.0 == "table" || b.0 == "table"
    }

    fn check_link_body(&mut self, link: &(String, String), body: &String) -> bool {
        self.calls.push(format!("link_body {} {body}", link.1));
        body == "table"
    }

    fn check_link_excluding(
        &mut self,
        link: &(String, String),
        bodies: &[String],
        links: &[(String, String)],
    ) -> bool {
        self.calls.push(format!(
            "link_excluding {} {} {}",
            link.1,
            bodies.len(),
            links.len()
        ));
        !bodies.iter().any(|b| b == "table")
    }

    fn check_body_excluding(
        &mut self,
        body: &String,
        bodies: &[String],
        links: &[(String, String)],
    ) -> bool {
        self.calls.push(format!(
            "body_excluding {body} {} {}",
            bodies.len(),
            links.len()
        ));
        !bodies.iter().any(|b| b == "table")
    }

    fn check_standalone_self(&mut self, body: &String) -> bool {
        self.calls.push(format!("standalone {body}"));
        true
    }
}
