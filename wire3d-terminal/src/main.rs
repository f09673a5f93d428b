/// wire3d Terminal Viewer - Interactive Wireframe Cube
///
/// Controls:
///   - O / N: Orbit / truck the camera
///   - P: Field of view (left), near (middle), far (right)
///   - R / T / S: Rotate / translate / scale the cube
///   - Drag horizontally with left, middle or right button for x, y or z
///   - Q/ESC: Quit

use clap::{Arg, ArgAction, Command};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wire3d_core::{config, script, DepthClipper, Viewer};
use wire3d_terminal::{format_frame, TerminalApp};

fn main() -> io::Result<()> {
    let matches = Command::new("wire3d-terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive wireframe cube viewer for the terminal.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .value_name("FILE")
                .help("Replay an input script headlessly and print each frame"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Write logs to this file (set RUST_LOG to change the level)"),
        )
        .arg(
            Arg::new("depth-clip")
                .long("depth-clip")
                .action(ArgAction::SetTrue)
                .help("Clip segments to the near/far planes instead of keeping them all"),
        )
        .get_matches();

    let script_path = matches.get_one::<String>("script");
    init_logging(matches.get_one::<String>("log-file"), script_path.is_some())?;

    let config = config::load_config_or_default(matches.get_one::<String>("config").map(Path::new));
    let mut viewer = Viewer::new(&config);
    if matches.get_flag("depth-clip") {
        viewer = viewer.with_clipper(DepthClipper);
    }

    if let Some(path) = script_path {
        return run_script(&mut viewer, path);
    }

    let mut app = TerminalApp::new(viewer)?;
    app.run()
}

/// The alternate screen owns stdout, so interactive sessions only log when
/// a file is given. Headless runs log to stderr.
fn init_logging(log_file: Option<&String>, headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run_script(viewer: &mut Viewer, path: &str) -> io::Result<()> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("Failed to read script: {}", e)))?;

    let commands = script::parse_script(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse script: {}", e)))?;

    viewer
        .run_script(&commands, |frame, buffer| print!("{}", format_frame(frame, buffer)))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
