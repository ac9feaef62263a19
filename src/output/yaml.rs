//! YAML serialization for benchmark reports and payloads.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Serialize a report to a YAML document.
pub fn to_yaml<R: Serialize + ?Sized>(report: &R) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

/// Parse a YAML document.
pub fn from_yaml<D: DeserializeOwned>(text: &str) -> Result<D> {
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CollisionReport;
    use crate::types::{Pose, TimedSample};

    #[test]
    fn test_collision_report_yaml() {
        let report = CollisionReport {
            elapsed_ms: 0.75,
            checks: 1,
            mean_ms: 0.75,
            variance_ms: 0.0,
            collisions: 0,
            data: vec![TimedSample::new(Pose::identity(), 0.75, false)],
        };
        let text = to_yaml(&report).unwrap();
        assert!(text.contains("elapsed_ms: 0.75"));
        assert!(text.contains("checks: 1"));
        assert!(text.contains("transform:"));

        let back: CollisionReport<Pose> = from_yaml(&text).unwrap();
        assert_eq!(back.checks, 1);
        assert_eq!(*back.data[0].input(), Pose::identity());
        assert!(!back.data[0].collision());
    }

    #[test]
    fn test_flow_style_document() {
        let text = "{elapsed_ms: 1.0, checks: 1, data: [{transform: [1, 2, 3, 1, 0, 0, 0], elapsed_ms: 1.0, collision: true}]}";
        let report: CollisionReport<Pose> = from_yaml(text).unwrap();
        assert_eq!(report.data[0].input().translation.z, 3.0);
    }

    #[test]
    fn test_malformed_yaml() {
        let res: Result<CollisionReport<Pose>> = from_yaml("checks: [");
        assert!(matches!(res, Err(crate::Error::Yaml(_))));
    }
}
