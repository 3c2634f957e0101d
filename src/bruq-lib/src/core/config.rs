use std::time::Duration;

pub const DEFAULT_EXECUTABLE: &str = "bru";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_DISCOVERY_DEPTH: usize = 3;

/// Per-namespace time-to-live for [`crate::cache::CollectionCache`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub request_ttl: Duration,
    pub discovery_ttl: Duration,
    pub environment_ttl: Duration,
    pub file_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            request_ttl: Duration::from_secs(60),
            // Directory layout changes far less often than file content.
            discovery_ttl: Duration::from_secs(300),
            environment_ttl: Duration::from_secs(60),
            file_ttl: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub executable: String,
    pub timeout: Duration,
    pub default_depth: usize,
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_depth: DEFAULT_DISCOVERY_DEPTH,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_ttl_is_longest() {
        let cfg = CacheConfig::default();
        assert!(cfg.discovery_ttl > cfg.request_ttl);
        assert!(cfg.discovery_ttl > cfg.environment_ttl);
        assert!(cfg.discovery_ttl > cfg.file_ttl);
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = EngineConfig::default()
            .with_executable("/opt/bru")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.executable, "/opt/bru");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.default_depth, DEFAULT_DISCOVERY_DEPTH);
    }
}
