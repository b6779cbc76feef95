use std::fmt;

/// Stages of one pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Authenticating,
    Fetching,
    Extracting,
    Rendering,
    Publishing,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStage::Authenticating => write!(f, "authenticating"),
            RunStage::Fetching => write!(f, "fetching"),
            RunStage::Extracting => write!(f, "extracting"),
            RunStage::Rendering => write!(f, "rendering"),
            RunStage::Publishing => write!(f, "publishing"),
        }
    }
}

/// Summary of a completed run, returned to the caller and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub animal_count: usize,
    pub object_key: String,
}
