/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("LEDGER_STATS_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("LEDGER_STATS_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("LEDGER_STATS_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("LEDGER_STATS_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    pub fn summary(&self) -> String {
        format!(
            "ledger_stats {} ({} {}, {} build, {})",
            self.version, self.git_hash, self.target, self.profile, self.timestamp
        )
    }
}
