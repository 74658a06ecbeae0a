//! Pipeline configuration types

use crate::image_pipeline::reconstruct::ReconstructConfig;
use crate::image_pipeline::render::RenderConfig;

/// What happens when one query cannot be turned into an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing query; no output is written
    #[default]
    Abort,
    /// Log the failure and leave that query out of the composite
    Skip,
}

/// Configuration for the query-to-composite pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub reconstruct: ReconstructConfig,
    pub render: RenderConfig,
    pub failure_policy: FailurePolicy,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    reconstruct: Option<ReconstructConfig>,
    render: Option<RenderConfig>,
    failure_policy: Option<FailurePolicy>,
}

impl PipelineConfigBuilder {
    pub fn reconstruct(mut self, config: ReconstructConfig) -> Self {
        self.reconstruct = Some(config);
        self
    }

    pub fn render(mut self, config: RenderConfig) -> Self {
        self.render = Some(config);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            reconstruct: self.reconstruct.unwrap_or(default.reconstruct),
            render: self.render.unwrap_or(default.render),
            failure_policy: self.failure_policy.unwrap_or(default.failure_policy),
        }
    }
}
