#![allow(dead_code)]

pub use chronicler_launcher_test_utils::init_tracing;

#[cfg(unix)]
pub use chronicler_launcher_test_utils::FakeBundle;

/// The launcher binary built for this test run.
pub const LAUNCHER_BIN: &str = env!("CARGO_BIN_EXE_chronicler-launcher");

/// Fresh bundle with the launcher copied in and no interpreter yet.
#[cfg(unix)]
pub fn bundle() -> FakeBundle {
    FakeBundle::new(LAUNCHER_BIN).expect("creating fake bundle")
}

/// `path` with symlinks resolved, for comparing against what a child reports.
pub fn canonical(path: impl AsRef<std::path::Path>) -> std::path::PathBuf {
    std::fs::canonicalize(path.as_ref())
        .unwrap_or_else(|e| panic!("canonicalize {:?}: {e}", path.as_ref()))
}
