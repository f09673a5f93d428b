/// Terminal front end for the wireframe viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use wire3d_core::{Button, InputEvent, LineBuffer, Mode, Viewer};

pub mod renderer;

pub use renderer::LineRenderer;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    renderer: LineRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer,
            renderer: LineRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        info!("terminal session started");

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        info!("terminal session ended");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so drags stay in step with the pointer
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            // Update + render
            if self.viewer.tick().is_err() {
                // Overflow is already logged by the viewer; draw what fit.
                debug!("frame truncated");
            }
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                for input in translate_mouse(mouse) {
                    self.viewer.handle_event(input);
                }
            }
            Event::Resize(width, height) => {
                self.renderer = LineRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        // Mode keys are edge triggered: ignore repeats and releases.
        if kind != KeyEventKind::Press {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(c) => {
                if let Some(mode) = Mode::from_key(c) {
                    self.viewer.handle_event(InputEvent::SelectMode(mode));
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render this frame's lines
        self.renderer.render_lines(self.viewer.line_buffer());

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status_line(&self.viewer, self.fps)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Map a crossterm mouse event to core input events
///
/// The pointer position is reported before a press and before a release,
/// so the stored x is current when the button state changes.
pub fn translate_mouse(mouse: MouseEvent) -> Vec<InputEvent> {
    let moved = InputEvent::PointerMoved {
        x: f64::from(mouse.column),
        y: f64::from(mouse.row),
    };

    match mouse.kind {
        MouseEventKind::Down(button) => vec![moved, InputEvent::ButtonDown(map_button(button))],
        MouseEventKind::Up(button) => vec![moved, InputEvent::ButtonUp(map_button(button))],
        MouseEventKind::Drag(_) | MouseEventKind::Moved => vec![moved],
        _ => Vec::new(),
    }
}

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Middle => Button::Middle,
        MouseButton::Right => Button::Right,
    }
}

/// One-line summary of the viewer state for the overlay
pub fn status_line(viewer: &Viewer, fps: f32) -> String {
    let params = viewer.scene().params();
    let mode = viewer.mode();
    format!(
        "wire3d | FPS: {:.1} | Mode: {} ({}) | FOV: {:.1} Near: {:.1} Far: {:.1} | Vertices: {} | O N P R T S V=Mode Q=Quit",
        fps,
        mode.name(),
        mode.key().to_ascii_uppercase(),
        params.fov_degrees(),
        params.near(),
        params.far(),
        viewer.line_buffer().len(),
    )
}

/// Text dump of one frame's line list for headless runs
pub fn format_frame(frame: usize, buffer: &LineBuffer) -> String {
    let mut out = format!("frame {}: {} vertices\n", frame, buffer.len());
    for (start, end, color) in buffer.lines() {
        let _ = writeln!(
            out,
            "  ({:.4}, {:.4}) -> ({:.4}, {:.4}) rgb({:.2}, {:.2}, {:.2})",
            start.x, start.y, end.x, end.y, color.r, color.g, color.b
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_translate_mouse_press() {
        let events = translate_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 12));
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMoved { x: 12.0, y: 3.0 },
                InputEvent::ButtonDown(Button::Right),
            ]
        );
    }

    #[test]
    fn test_translate_mouse_drag_and_scroll() {
        let events = translate_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 7));
        assert_eq!(events, vec![InputEvent::PointerMoved { x: 7.0, y: 3.0 }]);
        assert!(translate_mouse(mouse(MouseEventKind::ScrollUp, 7)).is_empty());
    }

    #[test]
    fn test_mouse_drag_rotates_object() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::SelectMode(Mode::RotateObject));
        let sequence = [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Drag(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ];
        for (kind, column) in sequence.into_iter().zip([10, 12, 12]) {
            for input in translate_mouse(mouse(kind, column)) {
                viewer.handle_event(input);
            }
        }

        let expected = wire3d_core::Transform::rotation(wire3d_core::Axis::X, 10.0);
        assert!((viewer.scene().model() - expected).norm() < 1e-5);
        assert!(!viewer.interaction().pointer().is_held(Button::Left));
    }

    #[test]
    fn test_status_line() {
        let viewer = Viewer::default();
        let line = status_line(&viewer, 29.5);
        assert!(line.contains("Mode: orbit (O)"));
        assert!(line.contains("FOV: 60.0"));
        assert!(line.contains("Near: -2.0"));
        assert!(line.contains("Vertices: 0"));
    }

    #[test]
    fn test_bundled_script_replays() {
        let commands = wire3d_core::script::parse_script(include_str!("../scripts/rotate_cube.txt")).unwrap();
        let mut viewer = Viewer::default();
        let mut frames = 0;
        viewer.run_script(&commands, |_, _| frames += 1).unwrap();

        assert_eq!(frames, 2);
        assert_eq!(viewer.mode(), Mode::TruckCamera);
    }

    #[test]
    fn test_format_frame() {
        let mut viewer = Viewer::default();
        viewer.tick().unwrap();
        let text = format_frame(1, viewer.line_buffer());
        assert!(text.starts_with("frame 1: 36 vertices\n"));
        assert_eq!(text.lines().count(), 19);
    }
}
