/// Metadata captured by the build script.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("KAKEIBO_BUILD_HASH"),
        timestamp: env!("KAKEIBO_BUILD_TIMESTAMP"),
        profile: env!("KAKEIBO_BUILD_PROFILE"),
    }
}
