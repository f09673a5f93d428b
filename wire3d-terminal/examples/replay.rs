/// Example: Replay an input script without a terminal session
///
/// Usage: cargo run --example replay -- path/to/script.txt
///
/// With no argument a short built-in script rotates the cube and scales it.

use std::env;
use std::fs;
use std::io;
use wire3d_core::{script, Viewer};
use wire3d_terminal::format_frame;

const BUILTIN: &str = "\
mode r
move 40
down left
move 49
up left
tick
mode s
down middle
move 53
up middle
tick
";

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let text = match args.get(1) {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("Failed to read script: {}", e)))?,
        None => {
            eprintln!("No script provided, using the built-in one...");
            BUILTIN.to_string()
        }
    };

    let commands = script::parse_script(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse script: {}", e)))?;

    let mut viewer = Viewer::default();
    viewer
        .run_script(&commands, |frame, buffer| print!("{}", format_frame(frame, buffer)))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    println!("Final mode: {}", viewer.mode().name());
    Ok(())
}
