//! Reconstruction configuration types

/// What to do with records whose channel code is not 0, 1 or 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    /// Exclude the record without logging
    Drop,
    /// Exclude the record and log a warning with the number dropped
    #[default]
    Warn,
    /// Fail the whole result set
    Reject,
}

/// How intensities outside 0-255 are mapped to 8 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntensityPolicy {
    /// Keep the low 8 bits (300 becomes 44, -1 becomes 255)
    #[default]
    Wrap,
    /// Saturate to the nearest bound
    Clamp,
    /// Fail the whole result set
    Reject,
}

/// Configuration for turning a result set into an image
#[derive(Debug, Clone, Default)]
pub struct ReconstructConfig {
    pub channel_policy: ChannelPolicy,
    pub intensity_policy: IntensityPolicy,
}

impl ReconstructConfig {
    pub fn builder() -> ReconstructConfigBuilder {
        ReconstructConfigBuilder::default()
    }
}

/// Builder for ReconstructConfig
#[derive(Default)]
pub struct ReconstructConfigBuilder {
    channel_policy: Option<ChannelPolicy>,
    intensity_policy: Option<IntensityPolicy>,
}

impl ReconstructConfigBuilder {
    pub fn channel_policy(mut self, policy: ChannelPolicy) -> Self {
        self.channel_policy = Some(policy);
        self
    }

    pub fn intensity_policy(mut self, policy: IntensityPolicy) -> Self {
        self.intensity_policy = Some(policy);
        self
    }

    pub fn build(self) -> ReconstructConfig {
        let default = ReconstructConfig::default();
        ReconstructConfig {
            channel_policy: self.channel_policy.unwrap_or(default.channel_policy),
            intensity_policy: self.intensity_policy.unwrap_or(default.intensity_policy),
        }
    }
}
