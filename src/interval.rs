//! Genomic regions used to restrict calling and genotyping

use std::fmt;

use crate::error::{PlanError, Result};

/// A genomic region rendered as a single `-L` token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interval {
    /// No restriction
    #[default]
    Genome,
    /// A single token passed through unchanged (a contig, or an interval file)
    Region(String),
    /// `contig:start`
    RegionStart { contig: String, start: u64 },
    /// `contig:start-end`
    RegionStartEnd { contig: String, start: u64, end: u64 },
}

impl Interval {
    /// Build an interval from up to three positional parts
    ///
    /// Zero parts means the whole genome. Anything above three parts is rejected.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Result<Interval> {
        let owned: Vec<String> = parts.iter().map(|p| p.as_ref().to_string()).collect();
        let invalid = |reason: &str| PlanError::InvalidInterval {
            parts: owned.clone(),
            reason: reason.to_string(),
        };

        // tokens are emitted unquoted after -L
        let check_contig = |contig: &str| -> Result<()> {
            if contig.is_empty() {
                Err(invalid("contig is empty"))
            } else if contig.chars().any(char::is_whitespace) {
                Err(invalid("contig contains whitespace"))
            } else if contig.contains(':') {
                Err(invalid("contig contains ':'"))
            } else {
                Ok(())
            }
        };

        match owned.as_slice() {
            [] => Ok(Interval::Genome),
            [region] => {
                if region.is_empty() {
                    return Err(invalid("region is empty"));
                }
                if region.chars().any(char::is_whitespace) {
                    return Err(invalid("region contains whitespace"));
                }
                Ok(Interval::Region(region.clone()))
            }
            [contig, start] => {
                check_contig(contig.as_str())?;
                let start = start.parse::<u64>().map_err(|_| invalid("start is not a position"))?;
                Ok(Interval::RegionStart { contig: contig.clone(), start })
            }
            [contig, start, end] => {
                check_contig(contig.as_str())?;
                let start = start.parse::<u64>().map_err(|_| invalid("start is not a position"))?;
                let end = end.parse::<u64>().map_err(|_| invalid("end is not a position"))?;
                if end < start {
                    return Err(invalid("end is before start"));
                }
                Ok(Interval::RegionStartEnd { contig: contig.clone(), start, end })
            }
            _ => Err(invalid("expected at most 3 parts (contig, start, end)")),
        }
    }

    pub fn is_genome(&self) -> bool {
        matches!(self, Interval::Genome)
    }

    /// The `-L` value, or None when the whole genome is requested
    pub fn token(&self) -> Option<String> {
        match self {
            Interval::Genome => None,
            region => Some(region.to_string()),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Interval::Genome => write!(f, ""),
            Interval::Region(region) => write!(f, "{}", region),
            Interval::RegionStart { contig, start } => write!(f, "{}:{}", contig, start),
            Interval::RegionStartEnd { contig, start, end } => write!(f, "{}:{}-{}", contig, start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parts_is_whole_genome() {
        let interval = Interval::from_parts::<&str>(&[]).unwrap();
        assert!(interval.is_genome());
        assert_eq!(interval.token(), None);
    }

    #[test]
    fn test_single_token_unchanged() {
        let interval = Interval::from_parts(&["chr20"]).unwrap();
        assert_eq!(interval.token().as_deref(), Some("chr20"));

        let interval = Interval::from_parts(&["targets.interval_list"]).unwrap();
        assert_eq!(interval.token().as_deref(), Some("targets.interval_list"));
    }

    #[test]
    fn test_contig_and_start() {
        let interval = Interval::from_parts(&["chr1", "100"]).unwrap();
        assert_eq!(interval, Interval::RegionStart { contig: "chr1".to_string(), start: 100 });
        assert_eq!(interval.to_string(), "chr1:100");
    }

    #[test]
    fn test_contig_start_end() {
        let interval = Interval::from_parts(&["chr1", "100", "200"]).unwrap();
        assert_eq!(interval.token().as_deref(), Some("chr1:100-200"));
    }

    #[test]
    fn test_too_many_parts_rejected() {
        let err = Interval::from_parts(&["chr1", "100", "200", "300"]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInterval { ref parts, .. } if parts.len() == 4));
    }

    #[test]
    fn test_bad_positions_rejected() {
        assert!(Interval::from_parts(&["chr1", "start"]).is_err());
        assert!(Interval::from_parts(&["chr1", "100", "-5"]).is_err());
        assert!(Interval::from_parts(&["chr1", "200", "100"]).is_err());
        assert!(Interval::from_parts(&[""]).is_err());
    }

    #[test]
    fn test_whitespace_tokens_rejected() {
        let err = Interval::from_parts(&["chr1 rm -rf /"]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInterval { ref reason, .. } if reason.contains("whitespace")));
        assert!(Interval::from_parts(&["chr1\t"]).is_err());
        assert!(Interval::from_parts(&["chr 1", "100"]).is_err());
        assert!(Interval::from_parts(&["chr1 ", "100", "200"]).is_err());
    }

    #[test]
    fn test_contig_with_colon_rejected() {
        assert!(Interval::from_parts(&["chr1:5", "100"]).is_err());
        assert!(Interval::from_parts(&["chr1:5", "100", "200"]).is_err());
        // a single region token may already be a full region
        assert_eq!(Interval::from_parts(&["chr1:100-200"]).unwrap().token().as_deref(), Some("chr1:100-200"));
    }
}
