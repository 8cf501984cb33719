//! Structured shell steps that only become strings at the boundary
//!
//! A [`Plan`] is an ordered list of [`Step`]s. Each step assumes the previous ones succeeded, so a
//! plan renders as its steps joined with ` && `.

use std::fmt;

/// GATK tools the planner knows how to invoke
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GatkTool {
    MarkDuplicates,
    BaseRecalibrator,
    ApplyBqsr,
    HaplotypeCaller,
    CombineGvcfs,
    GenomicsDbImport,
    GenotypeGvcfs,
    VariantRecalibrator,
    ApplyVqsr,
}

impl fmt::Display for GatkTool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GatkTool::MarkDuplicates => write!(f, "MarkDuplicates"),
            GatkTool::BaseRecalibrator => write!(f, "BaseRecalibrator"),
            GatkTool::ApplyBqsr => write!(f, "ApplyBQSR"),
            GatkTool::HaplotypeCaller => write!(f, "HaplotypeCaller"),
            GatkTool::CombineGvcfs => write!(f, "CombineGVCFs"),
            GatkTool::GenomicsDbImport => write!(f, "GenomicsDBImport"),
            GatkTool::GenotypeGvcfs => write!(f, "GenotypeGVCFs"),
            GatkTool::VariantRecalibrator => write!(f, "VariantRecalibrator"),
            GatkTool::ApplyVqsr => write!(f, "ApplyVQSR"),
        }
    }
}

/// One argument of a tool invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// `flag value`
    Pair { flag: String, value: String },
    /// Passed through verbatim, e.g. user supplied tool options
    Raw(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Pair { flag, value } => write!(f, "{} {}", flag, value),
            Arg::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// A timed GATK invocation: `time <gatk> [--java-options "..."] <Tool> <args>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatkCommand {
    pub executable: String,
    pub java_options: Vec<String>,
    pub tool: GatkTool,
    pub args: Vec<Arg>,
}

impl GatkCommand {
    pub fn new(executable: &str, java_options: &[String], tool: GatkTool) -> GatkCommand {
        GatkCommand {
            executable: executable.to_string(),
            java_options: java_options.to_vec(),
            tool,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, flag: &str, value: impl Into<String>) -> GatkCommand {
        self.args.push(Arg::Pair { flag: flag.to_string(), value: value.into() });
        self
    }

    /// Append a flag only when a value is present
    pub fn arg_opt(self, flag: &str, value: Option<String>) -> GatkCommand {
        match value {
            Some(value) => self.arg(flag, value),
            None => self,
        }
    }

    /// Repeat a flag once per value, keeping order
    pub fn args<I, S>(mut self, flag: &str, values: I) -> GatkCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(flag, value);
        }
        self
    }

    /// Append verbatim options, skipping empty ones
    pub fn raw(mut self, options: &[String]) -> GatkCommand {
        self.args.extend(options.iter().filter(|o| !o.trim().is_empty()).map(|o| Arg::Raw(o.clone())));
        self
    }

    /// Every value bound to `flag`, in order
    pub fn values(&self, flag: &str) -> Vec<&str> {
        self.args
            .iter()
            .filter_map(|arg| match arg {
                Arg::Pair { flag: f, value } if f == flag => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The first value bound to `flag`
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.values(flag).into_iter().next()
    }
}

impl fmt::Display for GatkCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "time {}", self.executable)?;
        if !self.java_options.is_empty() {
            write!(f, " --java-options \"{}\"", self.java_options.join(" "))?;
        }
        write!(f, " {}", self.tool)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// `rm -f` or `rm -rf` over a list of paths
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remove {
    pub recursive: bool,
    pub paths: Vec<String>,
}

impl Remove {
    pub fn files(paths: Vec<String>) -> Remove {
        Remove { recursive: false, paths }
    }

    pub fn recursive(paths: Vec<String>) -> Remove {
        Remove { recursive: true, paths }
    }
}

impl fmt::Display for Remove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flags = if self.recursive { "-rf" } else { "-f" };
        write!(f, "rm {} {}", flags, self.paths.join(" "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Gatk(GatkCommand),
    Remove(Remove),
}

impl Step {
    pub fn as_gatk(&self) -> Option<&GatkCommand> {
        match self {
            Step::Gatk(cmd) => Some(cmd),
            Step::Remove(_) => None,
        }
    }

    pub fn as_remove(&self) -> Option<&Remove> {
        match self {
            Step::Remove(rm) => Some(rm),
            Step::Gatk(_) => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Gatk(cmd) => write!(f, "{}", cmd),
            Step::Remove(rm) => write!(f, "{}", rm),
        }
    }
}

impl From<GatkCommand> for Step {
    fn from(cmd: GatkCommand) -> Step {
        Step::Gatk(cmd)
    }
}

impl From<Remove> for Step {
    fn from(rm: Remove) -> Step {
        Step::Remove(rm)
    }
}

/// Ordered steps for one pipeline stage
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn new() -> Plan {
        Plan::default()
    }

    pub fn then(mut self, step: impl Into<Step>) -> Plan {
        self.steps.push(step.into());
        self
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.steps.push(step.into());
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// GATK invocations only, skipping removals
    pub fn gatk_commands(&self) -> impl Iterator<Item = &GatkCommand> {
        self.steps.iter().filter_map(Step::as_gatk)
    }

    /// Tool names in execution order
    pub fn tools(&self) -> Vec<GatkTool> {
        self.gatk_commands().map(|cmd| cmd.tool).collect()
    }

    /// Each step rendered on its own
    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lines().join(" && "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_without_java_options() {
        let cmd = GatkCommand::new("gatk", &[], GatkTool::MarkDuplicates)
            .arg("-I", "in.bam")
            .arg("-O", "out.bam");
        assert_eq!(cmd.to_string(), "time gatk MarkDuplicates -I in.bam -O out.bam");
    }

    #[test]
    fn test_command_with_java_options() {
        let opts = vec!["-Xmx4G".to_string(), "-Djava.io.tmpdir=/tmp".to_string()];
        let cmd = GatkCommand::new("/opt/gatk", &opts, GatkTool::ApplyBqsr).arg("-I", "a.bam");
        assert_eq!(
            cmd.to_string(),
            "time /opt/gatk --java-options \"-Xmx4G -Djava.io.tmpdir=/tmp\" ApplyBQSR -I a.bam"
        );
    }

    #[test]
    fn test_raw_options_skip_blank() {
        let opts = vec!["--reader-threads 4".to_string(), " ".to_string()];
        let cmd = GatkCommand::new("gatk", &[], GatkTool::GenomicsDbImport).raw(&opts);
        assert_eq!(cmd.args, vec![Arg::Raw("--reader-threads 4".to_string())]);
    }

    #[test]
    fn test_values_lookup() {
        let cmd = GatkCommand::new("gatk", &[], GatkTool::CombineGvcfs)
            .args("-V", ["a.g.vcf.gz", "b.g.vcf.gz"])
            .arg("-O", "c.g.vcf")
            .arg_opt("-L", None);
        assert_eq!(cmd.values("-V"), vec!["a.g.vcf.gz", "b.g.vcf.gz"]);
        assert_eq!(cmd.value("-O"), Some("c.g.vcf"));
        assert_eq!(cmd.value("-L"), None);
    }

    #[test]
    fn test_plan_joins_with_and() {
        let plan = Plan::new()
            .then(GatkCommand::new("gatk", &[], GatkTool::GenotypeGvcfs).arg("-V", "x"))
            .then(Remove::recursive(vec!["x".to_string(), "x.tbi".to_string()]));
        assert_eq!(plan.to_string(), "time gatk GenotypeGVCFs -V x && rm -rf x x.tbi");
        assert_eq!(plan.tools(), vec![GatkTool::GenotypeGvcfs]);
        assert_eq!(plan.len(), 2);
    }
}
