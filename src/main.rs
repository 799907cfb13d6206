//! Spritegrid - command-line tool for inspecting and slicing spritesheet textures

use std::process::ExitCode;

use spritegrid::cli;

fn main() -> ExitCode {
    cli::run()
}
