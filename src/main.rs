// src/main.rs

fn main() {
    let args = std::env::args_os().skip(1).collect();

    match chronicler_launcher::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("chronicler-launcher: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
