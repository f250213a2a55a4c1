use focusflow::cli::{exit_code, run};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("FOCUSFLOW_LOG", "warn"),
    )
    .init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        let code = exit_code(&e);
        if code == 2 {
            eprintln!("Internal error: {}", e);
            // Show error chain if available
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut indent = 1;
                while let Some(err) = source {
                    eprintln!("{:indent$}  {}", "", err);
                    source = err.source();
                    indent += 1;
                }
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(code);
    }
}
