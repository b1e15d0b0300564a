//! A throwaway `Chronicler.app` in a temp dir.
//!
//! ```text
//! <tmp>/Chronicler.app/Contents/MacOS/Chronicler          copied launcher
//! <tmp>/Chronicler.app/Contents/MacOS/ChroniclerPython    /bin/sh stub
//! <tmp>/Chronicler.app/Contents/MacOS/chronicler.py
//! <tmp>/Chronicler.app/Contents/Resources/venv/lib/python3.14/site-packages/
//! <tmp>/out.txt                                           stub output ($CHRONICLER_TEST_OUT)
//! ```

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tempfile::TempDir;

use chronicler_launcher::config::{CONFIG_FILE_NAME, DEFAULT_INTERPRETER, DEFAULT_SCRIPT};

/// Env var the stubs write their observations to.
pub const OUT_ENV_VAR: &str = "CHRONICLER_TEST_OUT";

/// `ETXTBSY`: another thread forked while the copied launcher was still open
/// for writing. Same value on Linux and macOS.
const ETXTBSY: i32 = 26;

pub struct FakeBundle {
    root: TempDir,
    pub macos_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub launcher: PathBuf,
}

impl FakeBundle {
    /// Lay out a bundle and copy `launcher_bin` into `Contents/MacOS/`.
    pub fn new(launcher_bin: impl AsRef<Path>) -> Result<Self> {
        let root = TempDir::new().context("creating temp dir")?;
        let contents = root.path().join("Chronicler.app").join("Contents");
        let macos_dir = contents.join("MacOS");
        let resources_dir = contents.join("Resources");

        fs::create_dir_all(&macos_dir)?;
        fs::create_dir_all(
            resources_dir
                .join("venv")
                .join("lib")
                .join("python3.14")
                .join("site-packages"),
        )?;

        let launcher = macos_dir.join("Chronicler");
        fs::copy(launcher_bin.as_ref(), &launcher)
            .with_context(|| format!("copying launcher {:?}", launcher_bin.as_ref()))?;
        fs::write(macos_dir.join(DEFAULT_SCRIPT), "print('chronicler')\n")?;

        Ok(Self {
            root,
            macos_dir,
            resources_dir,
            launcher,
        })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Where stubs write via `$CHRONICLER_TEST_OUT`.
    pub fn out_file(&self) -> PathBuf {
        self.root.path().join("out.txt")
    }

    pub fn read_out(&self) -> Result<String> {
        fs::read_to_string(self.out_file()).context("reading stub output")
    }

    /// Install `ChroniclerPython` as a `/bin/sh` script with `body`.
    pub fn write_interpreter(&self, body: &str) -> Result<PathBuf> {
        self.write_executable(DEFAULT_INTERPRETER, body)
    }

    pub fn write_executable(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.macos_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    pub fn write_config(&self, toml: &str) -> Result<()> {
        fs::write(self.resources_dir.join(CONFIG_FILE_NAME), toml)?;
        Ok(())
    }

    /// Launcher command started from the temp root (not the bundle dir).
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.launcher);
        cmd.args(args)
            .current_dir(self.root.path())
            .env(OUT_ENV_VAR, self.out_file())
            .env_remove(chronicler_launcher::logging::LOG_ENV_VAR);
        cmd
    }

    /// Run the launcher to completion, capturing stdout/stderr.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.run_with_env(args, &[])
    }

    /// [`FakeBundle::run`] with extra environment variables for the launcher.
    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> Result<Output> {
        retry_busy(|| {
            self.command(args)
                .envs(vars.iter().copied())
                .output()
        })
    }

    /// Start the launcher in the background.
    pub fn spawn(&self, args: &[&str]) -> Result<Child> {
        retry_busy(|| {
            self.command(args)
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()
        })
    }

    /// Poll until the stub has written its output file.
    pub fn wait_for_out(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while !self.out_file().exists() {
            if Instant::now() > deadline {
                bail!("stub did not write {:?} within {:?}", self.out_file(), timeout);
            }
            sleep(Duration::from_millis(20));
        }
        Ok(())
    }
}

fn retry_busy<T>(mut f: impl FnMut() -> std::io::Result<T>) -> Result<T> {
    let mut attempts = 0;
    loop {
        match f() {
            Err(err) if err.raw_os_error() == Some(ETXTBSY) && attempts < 10 => {
                attempts += 1;
                sleep(Duration::from_millis(50));
            }
            other => return other.context("starting launcher"),
        }
    }
}
