//! Errors raised while planning commands

use thiserror::Error;

/// Result type alias for planning operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// Joint genotyping needs at least one gVCF
    #[error("Joint genotyping needs at least one sample gVCF, got none")]
    EmptyCohort,

    /// Interval parts don't describe a region
    #[error("Invalid interval {parts:?}: {reason}")]
    InvalidInterval {
        /// The positional parts as supplied
        parts: Vec<String>,
        /// Explanation of why they were rejected
        reason: String,
    },

    /// A derived intermediate would overwrite, then delete, one of the caller's files
    #[error("Intermediate {path} would overwrite the caller's file of the same name")]
    IntermediateCollision {
        /// The colliding path
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_interval_message_names_parts() {
        let err = PlanError::InvalidInterval {
            parts: vec!["chr1".to_string(), "x".to_string()],
            reason: "start is not a position".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("chr1"));
        assert!(msg.contains("start is not a position"));
    }

    #[test]
    fn test_collision_message_names_path() {
        let err = PlanError::IntermediateCollision { path: "cohort.g.vcf".to_string() };
        assert!(err.to_string().contains("cohort.g.vcf"));
    }
}
