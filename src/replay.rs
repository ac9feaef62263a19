//! Replay of logged collision-checker calls.
//!
//! A stub checker in a planning session logs every call it receives as a JSON
//! record. Replaying a record re-issues the same call against a real checker
//! and times it. Bodies are referenced by name, links as `"<link> <body>"`.
//!
//! ```text
//! {"methodname": "CheckCollision_link_body", "link": "hand herb", "body": "table"}
//! ```

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::host::CollisionChecker;
use crate::measurement::Timer;

/// Method names a replay record may carry.
pub const METHODS: [&str; 10] = [
    "CheckCollision_body_env",
    "CheckCollision_body1_body2",
    "CheckSelfCollision",
    "CheckCollision_link_env",
    "CheckCollision_link1_link2",
    "CheckCollision_link_body",
    "CheckCollision_link_with_exclusions",
    "CheckCollision_body_with_exclusions",
    "CheckStandaloneSelfCollision",
    "CheckStandaloneSelfCollisionBaked",
];

/// A link named together with its owning body, written `"<link> <body>"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LinkRef(String);

impl LinkRef {
    /// Reference `link` of `body`.
    pub fn new(link: &str, body: &str) -> Self {
        Self(format!("{link} {body}"))
    }

    /// Split into `(link, body)` at the first space.
    pub fn parts(&self) -> Result<(&str, &str)> {
        match self.0.split_once(' ') {
            Some((link, body)) if !link.is_empty() && !body.is_empty() => Ok((link, body)),
            _ => Err(Error::InvalidLinkRef(self.0.clone())),
        }
    }
}

impl fmt::Display for LinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged checker call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "methodname")]
pub enum CheckRequest {
    /// Body against environment.
    #[serde(rename = "CheckCollision_body_env")]
    BodyEnv {
        /// Body name.
        body: String,
    },
    /// Body against body.
    #[serde(rename = "CheckCollision_body1_body2")]
    BodyPair {
        /// First body.
        body1: String,
        /// Second body.
        body2: String,
    },
    /// Body against itself.
    #[serde(rename = "CheckSelfCollision")]
    SelfCollision {
        /// Body name.
        body: String,
    },
    /// Link against environment.
    #[serde(rename = "CheckCollision_link_env")]
    LinkEnv {
        /// Link reference.
        link: LinkRef,
    },
    /// Link against link.
    #[serde(rename = "CheckCollision_link1_link2")]
    LinkPair {
        /// First link.
        link1: LinkRef,
        /// Second link.
        link2: LinkRef,
    },
    /// Link against body.
    #[serde(rename = "CheckCollision_link_body")]
    LinkBody {
        /// Link reference.
        link: LinkRef,
        /// Body name.
        body: String,
    },
    /// Link against environment with exclusions.
    #[serde(rename = "CheckCollision_link_with_exclusions")]
    LinkExcluding {
        /// Link reference.
        link: LinkRef,
        /// Bodies to ignore.
        bodies_excluded: Vec<String>,
        /// Links to ignore.
        links_excluded: Vec<LinkRef>,
    },
    /// Body against environment with exclusions.
    #[serde(rename = "CheckCollision_body_with_exclusions")]
    BodyExcluding {
        /// Body name.
        body: String,
        /// Bodies to ignore.
        bodies_excluded: Vec<String>,
        /// Links to ignore.
        links_excluded: Vec<LinkRef>,
    },
    /// Standalone self collision.
    #[serde(rename = "CheckStandaloneSelfCollision")]
    StandaloneSelf {
        /// Body name.
        body: String,
    },
    /// Standalone self collision on baked geometry.
    #[serde(rename = "CheckStandaloneSelfCollisionBaked")]
    StandaloneSelfBaked {
        /// Body name.
        body: String,
    },
}

impl CheckRequest {
    /// Parse a JSON record.
    ///
    /// # Errors
    ///
    /// [`Error::MissingParameter`] without a `methodname`,
    /// [`Error::UnknownMethod`] for a name outside [`METHODS`], and
    /// [`Error::Json`] for malformed records.
    pub fn from_json(record: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(record)?;
        let method = value
            .get("methodname")
            .and_then(|m| m.as_str())
            .ok_or(Error::MissingParameter("methodname"))?;
        if !METHODS.contains(&method) {
            return Err(Error::UnknownMethod(method.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve names, then time the check against `checker`.
    pub fn evaluate<C: CollisionChecker>(&self, checker: &mut C) -> Result<CheckOutcome> {
        let resolved = self.resolve(checker)?;
        let (collision, elapsed) = Timer::new().measure(|| resolved.run(checker));
        let outcome = CheckOutcome {
            collision,
            elapsed_s: elapsed.as_secs_f64(),
        };
        debug!(request = ?self, %outcome, "replayed check");
        Ok(outcome)
    }

    fn resolve<C: CollisionChecker>(&self, checker: &C) -> Result<Resolved<C::Body, C::Link>> {
        let resolved = match self {
            CheckRequest::BodyEnv { body } => Resolved::Body(body_of(checker, body)?),
            CheckRequest::BodyPair { body1, body2 } => {
                Resolved::BodyPair(body_of(checker, body1)?, body_of(checker, body2)?)
            }
            CheckRequest::SelfCollision { body } => Resolved::SelfCollision(body_of(checker, body)?),
            CheckRequest::LinkEnv { link } => Resolved::Link(link_of(checker, link)?),
            CheckRequest::LinkPair { link1, link2 } => {
                Resolved::LinkPair(link_of(checker, link1)?, link_of(checker, link2)?)
            }
            CheckRequest::LinkBody { link, body } => {
                Resolved::LinkBody(link_of(checker, link)?, body_of(checker, body)?)
            }
            CheckRequest::LinkExcluding {
                link,
                bodies_excluded,
                links_excluded,
            } => Resolved::LinkExcluding(
                link_of(checker, link)?,
                bodies_of(checker, bodies_excluded)?,
                links_of(checker, links_excluded)?,
            ),
            CheckRequest::BodyExcluding {
                body,
                bodies_excluded,
                links_excluded,
            } => Resolved::BodyExcluding(
                body_of(checker, body)?,
                bodies_of(checker, bodies_excluded)?,
                links_of(checker, links_excluded)?,
            ),
            CheckRequest::StandaloneSelf { body } => {
                Resolved::StandaloneSelf(body_of(checker, body)?)
            }
            CheckRequest::StandaloneSelfBaked { body } => {
                Resolved::StandaloneSelfBaked(body_of(checker, body)?)
            }
        };
        Ok(resolved)
    }
}

/// Result of one replayed check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOutcome {
    /// True if the checker reported a collision.
    pub collision: bool,
    /// Duration of the check in seconds.
    pub elapsed_s: f64,
}

/// Formats as `"<0|1> <seconds>"`.
impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", u8::from(self.collision), self.elapsed_s)
    }
}

/// Parse a JSON record and time it against `checker`.
pub fn evaluate_check<C: CollisionChecker>(checker: &mut C, record: &str) -> Result<CheckOutcome> {
    CheckRequest::from_json(record)?.evaluate(checker)
}

enum Resolved<B, L> {
    Body(B),
    BodyPair(B, B),
    SelfCollision(B),
    Link(L),
    LinkPair(L, L),
    LinkBody(L, B),
    LinkExcluding(L, Vec<B>, Vec<L>),
    BodyExcluding(B, Vec<B>, Vec<L>),
    StandaloneSelf(B),
    StandaloneSelfBaked(B),
}

impl<B, L> Resolved<B, L> {
    fn run<C>(&self, checker: &mut C) -> bool
    where
        C: CollisionChecker<Body = B, Link = L>,
    {
        match self {
            Resolved::Body(b) => checker.check_body(b),
            Resolved::BodyPair(a, b) => checker.check_body_pair(a, b),
            Resolved::SelfCollision(b) => checker.check_self(b),
            Resolved::Link(l) => checker.check_link(l),
            Resolved::LinkPair(a, b) => checker.check_link_pair(a, b),
            Resolved::LinkBody(l, b) => checker.check_link_body(l, b),
            Resolved::LinkExcluding(l, bodies, links) => checker.check_link_excluding(l, bodies, links),
            Resolved::BodyExcluding(b, bodies, links) => checker.check_body_excluding(b, bodies, links),
            Resolved::StandaloneSelf(b) => checker.check_standalone_self(b),
            Resolved::StandaloneSelfBaked(b) => checker.check_standalone_self_baked(b),
        }
    }
}

fn body_of<C: CollisionChecker>(checker: &C, name: &str) -> Result<C::Body> {
    checker
        .body(name)
        .ok_or_else(|| Error::UnknownBody(name.to_string()))
}

fn link_of<C: CollisionChecker>(checker: &C, link_ref: &LinkRef) -> Result<C::Link> {
    let (link, body) = link_ref.parts()?;
    let owner = body_of(checker, body)?;
    checker.link(&owner, link).ok_or_else(|| Error::UnknownLink {
        link: link.to_string(),
        body: body.to_string(),
    })
}

fn bodies_of<C: CollisionChecker>(checker: &C, names: &[String]) -> Result<Vec<C::Body>> {
    names.iter().map(|n| body_of(checker, n)).collect()
}

fn links_of<C: CollisionChecker>(checker: &C, refs: &[LinkRef]) -> Result<Vec<C::Link>> {
    refs.iter().map(|r| link_of(checker, r)).collect()
}
