//! # Voxelize Entry Point
//!
//! Native entry point. It calls into the library's `run()` function and turns
//! a fatal error into a non-zero exit code.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxelize::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            eprintln!("voxelize: {error}");
            ExitCode::FAILURE
        }
    }
}
