//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lpdc_core` linkage, configuration and storage bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lpdc_core ping={}", lpdc_core::ping());
    println!("lpdc_core version={}", lpdc_core::core_version());

    let config = match lpdc_core::CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("lpdc_core config=error error={err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = lpdc_core::init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("lpdc_core logging=error error={err}");
            return ExitCode::FAILURE;
        }
    }

    match lpdc_core::open_db_with_config(&config) {
        Ok(conn) => match lpdc_core::SqliteRepositories::try_new(&conn) {
            Ok(_) => {
                println!("lpdc_core storage=ok");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("lpdc_core storage=error error={err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("lpdc_core storage=error error={err}");
            ExitCode::FAILURE
        }
    }
}
