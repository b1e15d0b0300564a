// src/lib.rs

pub mod bundle;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, info};

use crate::bundle::{BundleLayout, BundlePaths};
use crate::config::LauncherConfig;
use crate::errors::Result;
use crate::exec::{ChildEnvironment, LaunchCommand};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::PythonVersion;

/// Everything decided before the child starts, derived from one self path.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub paths: BundlePaths,
    pub command: LaunchCommand,
}

impl LaunchPlan {
    /// Build the plan for a launcher at `self_path`.
    ///
    /// `launcher_args` are the launcher's own arguments without `argv[0]`.
    /// They reach the child only when `forward_args` is set.
    pub fn prepare(
        self_path: &Path,
        config: &LauncherConfig,
        fs: &dyn FileSystem,
        launcher_args: Vec<OsString>,
    ) -> Self {
        let mut paths = BundlePaths::derive(self_path, &BundleLayout::from(config));

        if config.python_version == PythonVersion::Auto {
            if let Some(found) = bundle::discover_site_packages(fs, &paths.venv_dir) {
                paths.package_search_path = found;
            }
        }

        let mut args = vec![paths.script_path.clone().into_os_string()];
        if config.forward_args {
            args.extend(launcher_args);
        } else if !launcher_args.is_empty() {
            debug!(count = launcher_args.len(), "discarding launcher arguments");
        }

        let command = LaunchCommand {
            program: paths.interpreter_path.clone(),
            args,
            env: ChildEnvironment::new(&paths.venv_dir, &paths.package_search_path),
            forward_signals: config.forward_signals,
        };

        Self { paths, command }
    }
}

/// High-level entry point used by `main.rs`.
///
/// locate self → load config → derive paths → set `VIRTUAL_ENV` /
/// `PYTHONPATH` → `chdir` into the bundle dir → spawn and wait.
///
/// Returns the code the launcher should exit with. Must be called while the
/// process is single-threaded; the async runtime is only started for the
/// final spawn-and-wait.
pub fn run(launcher_args: Vec<OsString>) -> Result<i32> {
    let self_path = bundle::locate_self()?;
    let fs = RealFileSystem;

    let config_path = config::config_path_for(&bundle::bundle_dir_of(&self_path));
    let (config, source) = config::load_or_default(&fs, &config_path)?;
    logging::init_logging(config.log_level)?;

    // Both steps above run before the subscriber exists; report them now.
    debug!(path = %self_path.display(), "resolved launcher executable");
    debug!(path = %config_path.display(), ?source, "launcher config");

    let plan = LaunchPlan::prepare(&self_path, &config, &fs, launcher_args);
    info!(
        launcher = %self_path.display(),
        bundle_dir = %plan.paths.bundle_dir.display(),
        interpreter = %plan.paths.interpreter_path.display(),
        script = %plan.paths.script_path.display(),
        "prepared launch"
    );

    // SAFETY: no runtime or other thread exists yet.
    unsafe { plan.command.env.apply_to_process() };
    exec::change_working_directory(&plan.paths.bundle_dir, config.working_dir_policy)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let exit = runtime.block_on(exec::spawn_and_wait(&plan.command))?;
    Ok(exit.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use std::path::PathBuf;

    const SELF: &str = "/Apps/Chronicler.app/Contents/MacOS/Chronicler";

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn default_plan_discards_launcher_args() {
        let plan = LaunchPlan::prepare(
            Path::new(SELF),
            &LauncherConfig::default(),
            &MockFileSystem::new(),
            args(&["-psn_0_1234", "--verbose"]),
        );

        assert_eq!(
            plan.command.program,
            PathBuf::from("/Apps/Chronicler.app/Contents/MacOS/ChroniclerPython")
        );
        assert_eq!(
            plan.command.args,
            args(&["/Apps/Chronicler.app/Contents/MacOS/chronicler.py"])
        );
        assert_eq!(plan.command.env.virtual_env, plan.paths.venv_dir);
        assert_eq!(plan.command.env.python_path, plan.paths.package_search_path);
        assert!(plan.command.forward_signals);
    }

    #[test]
    fn forward_args_appends_after_script() {
        let config = LauncherConfig {
            forward_args: true,
            ..LauncherConfig::default()
        };
        let plan = LaunchPlan::prepare(
            Path::new(SELF),
            &config,
            &MockFileSystem::new(),
            args(&["a", "b c"]),
        );
        assert_eq!(
            plan.command.args,
            args(&["/Apps/Chronicler.app/Contents/MacOS/chronicler.py", "a", "b c"])
        );
    }

    #[test]
    fn auto_version_uses_discovered_site_packages() {
        let fs = MockFileSystem::new();
        let venv = "/Apps/Chronicler.app/Contents/MacOS/../Resources/venv";
        fs.add_dir(format!("{venv}/lib/python3.13/site-packages"));

        let config = LauncherConfig {
            python_version: PythonVersion::Auto,
            ..LauncherConfig::default()
        };
        let plan = LaunchPlan::prepare(Path::new(SELF), &config, &fs, Vec::new());
        assert_eq!(
            plan.command.env.python_path,
            PathBuf::from(format!("{venv}/lib/python3.13/site-packages"))
        );
    }

    #[test]
    fn auto_version_falls_back_to_pin_when_nothing_found() {
        let config = LauncherConfig {
            python_version: PythonVersion::Auto,
            ..LauncherConfig::default()
        };
        let plan = LaunchPlan::prepare(Path::new(SELF), &config, &MockFileSystem::new(), Vec::new());
        assert!(plan
            .paths
            .package_search_path
            .ends_with("lib/python3.14/site-packages"));
    }
}
