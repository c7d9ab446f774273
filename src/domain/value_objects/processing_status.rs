use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// Any record may be (re)processed; only a running job can finish.
    pub fn can_transition_to(&self, new_status: &ProcessingStatus) -> bool {
        match (self, new_status) {
            (_, ProcessingStatus::Processing) => true,
            (ProcessingStatus::Processing, ProcessingStatus::Completed) => true,
            (ProcessingStatus::Processing, ProcessingStatus::Failed) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processing" => Ok(ProcessingStatus::Processing),
            "completed" => Ok(ProcessingStatus::Completed),
            "failed" => Ok(ProcessingStatus::Failed),
            _ => Err(format!("Invalid processing status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let processing = ProcessingStatus::Processing;
        let completed = ProcessingStatus::Completed;
        let failed = ProcessingStatus::Failed;

        assert!(completed.can_transition_to(&processing));
        assert!(failed.can_transition_to(&processing));
        assert!(processing.can_transition_to(&completed));
        assert!(processing.can_transition_to(&failed));

        assert!(!completed.can_transition_to(&failed));
        assert!(!failed.can_transition_to(&completed));
    }

    #[test]
    fn test_string_conversion() {
        for status in [
            ProcessingStatus::Processing,
            ProcessingStatus::Completed,
            ProcessingStatus::Failed,
        ] {
            let parsed: ProcessingStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
        assert_eq!("COMPLETED".parse::<ProcessingStatus>(), Ok(ProcessingStatus::Completed));
    }

    #[test]
    fn test_invalid_string_parsing() {
        assert!("pending".parse::<ProcessingStatus>().is_err());
    }
}
