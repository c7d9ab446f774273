/// Where a job currently is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Starting,
    Extracting,
    ChunkingAndEmbedding,
    Finalizing,
    Completed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Starting => "starting",
            PipelineStage::Extracting => "extracting",
            PipelineStage::ChunkingAndEmbedding => "chunking+embedding",
            PipelineStage::Finalizing => "finalizing",
            PipelineStage::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_used_in_logs() {
        assert_eq!(PipelineStage::Starting.to_string(), "starting");
        assert_eq!(
            PipelineStage::ChunkingAndEmbedding.to_string(),
            "chunking+embedding"
        );
        assert_eq!(PipelineStage::Completed.to_string(), "completed");
    }
}
