use std::fmt;
use clap::ValueEnum;

/// How a plan is printed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// One line, steps joined with `&&`
    #[default]
    Line,
    /// One step per line
    Steps,
    /// A bash job script
    Script,
}

impl fmt::Display for OutputFormat {
      fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Line => write!(f, "line"),
            OutputFormat::Steps => write!(f, "steps"),
            OutputFormat::Script => write!(f, "script")
        }
    }
}
