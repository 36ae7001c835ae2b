use std::io::Write;
use tracing::warn;

use rustyhash::cli;
use rustyhash::config::load_settings;
use rustyhash::telemetry::{init_tracing, TelemetryConfig};

fn main() {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            println!("{}", e.user_message());
            std::process::exit(e.exit_code());
        }
    };

    init_tracing(&TelemetryConfig::from(&settings));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut code = cli::run(std::env::args_os(), &settings, &mut out);
    if let Err(e) = out.flush() {
        warn!(error = %e, "Failed to flush stdout");
        code = 1;
    }
    std::process::exit(code);
}
