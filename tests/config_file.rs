#![cfg(unix)]

mod common;

use std::error::Error;
use std::fs;

use chronicler_launcher::logging::LOG_ENV_VAR;

use crate::common::{bundle, canonical};

type TestResult = Result<(), Box<dyn Error>>;

const PRINT_ENV: &str =
    r#"printf '%s\n%s\n' "$VIRTUAL_ENV" "$PYTHONPATH" > "$CHRONICLER_TEST_OUT""#;

#[test]
fn child_sees_venv_variables() -> TestResult {
    let bundle = bundle();
    bundle.write_interpreter(PRINT_ENV)?;

    let output = bundle.run(&[])?;
    assert!(output.status.success());

    let recorded = bundle.read_out()?;
    let mut lines = recorded.lines();
    let venv = lines.next().unwrap_or_default();
    let pythonpath = lines.next().unwrap_or_default();

    assert!(venv.ends_with("/MacOS/../Resources/venv"), "{venv}");
    assert!(
        pythonpath.ends_with("/MacOS/../Resources/venv/lib/python3.14/site-packages"),
        "{pythonpath}"
    );
    assert_eq!(canonical(venv), canonical(bundle.resources_dir.join("venv")));
    Ok(())
}

#[test]
fn auto_version_picks_the_venv_interpreter_dir() -> TestResult {
    let bundle = bundle();
    let venv_lib = bundle.resources_dir.join("venv").join("lib");
    fs::remove_dir_all(venv_lib.join("python3.14"))?;
    fs::create_dir_all(venv_lib.join("python3.13").join("site-packages"))?;

    bundle.write_interpreter(PRINT_ENV)?;
    bundle.write_config("[launcher]\npython_version = \"auto\"\n")?;

    let output = bundle.run(&[])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let recorded = bundle.read_out()?;
    let pythonpath = recorded.lines().nth(1).unwrap_or_default();
    assert_eq!(
        canonical(pythonpath),
        canonical(venv_lib.join("python3.13").join("site-packages"))
    );
    Ok(())
}

#[test]
fn custom_interpreter_and_script_names() -> TestResult {
    let bundle = bundle();
    bundle.write_executable("python3", r#"basename "$1" > "$CHRONICLER_TEST_OUT"; exit 3"#)?;
    bundle.write_config("[launcher]\ninterpreter = \"python3\"\nscript = \"main.py\"\n")?;

    let output = bundle.run(&[])?;

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(bundle.read_out()?.trim(), "main.py");
    assert!(!bundle.macos_dir.join("ChroniclerPython").exists());
    Ok(())
}

#[test]
fn invalid_config_aborts_before_spawn() -> TestResult {
    let bundle = bundle();
    bundle.write_interpreter(r#"echo ran > "$CHRONICLER_TEST_OUT""#)?;
    bundle.write_config("[launcher]\nscript = \"../escape.py\"\n")?;

    let output = bundle.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("chronicler-launcher: Configuration error"), "{stderr}");
    assert!(!bundle.out_file().exists());
    Ok(())
}

#[test]
fn log_level_from_config_reaches_stderr() -> TestResult {
    let bundle = bundle();
    bundle.write_interpreter("exit 0")?;
    bundle.write_config("[launcher]\nlog_level = \"info\"\n")?;

    let output = bundle.run(&[])?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("prepared launch"), "{stderr}");
    assert!(stderr.contains("child exited"), "{stderr}");
    Ok(())
}

#[test]
fn debug_env_level_shows_self_path_and_config_resolution() -> TestResult {
    let bundle = bundle();
    bundle.write_interpreter("exit 0")?;

    let output = bundle.run_with_env(&[], &[(LOG_ENV_VAR, "debug")])?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("resolved launcher executable"), "{stderr}");
    assert!(stderr.contains("Chronicler.app/Contents/MacOS/Chronicler"), "{stderr}");
    assert!(stderr.contains("launcher config"), "{stderr}");
    assert!(stderr.contains("Defaults"), "{stderr}");
    Ok(())
}
