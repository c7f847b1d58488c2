//! # Chunk Sandbox Entry Point
//!
//! Runs the scripted headless session from the library's `run()` function.
//! Set `RUST_LOG=info` to see the debug panel and `CHUNK_SANDBOX_CONFIG` to
//! point at a JSON config file.
//!
//! For the browser build, see `WebSandbox` in the library.

#[cfg(not(target_family = "wasm"))]
fn main() {
    if chunk_sandbox::run().is_err() {
        std::process::exit(1);
    }
}

#[cfg(target_family = "wasm")]
fn main() {}
