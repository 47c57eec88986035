//! Text report options

/// Timestamp layout used on the `Generated:` line
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for rendering text reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReportOptions {
    /// First banner line
    pub heading: String,
    /// Second banner line
    pub subheading: String,
    /// chrono format string for the generation time
    pub timestamp_format: String,
}

impl Default for TextReportOptions {
    fn default() -> Self {
        Self {
            heading: "THERMODYNAMIC CALCULATION REPORT".to_string(),
            subheading: "Solar Energy-Based Binary Vapor Power Cycle (SSBVP)".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}
