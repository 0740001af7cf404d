/// Terminal-based viewer for point cloud scenes with box wireframes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use pcvis_core::Scene;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod demo;
pub mod renderer;

pub use camera::OrbitCamera;
pub use renderer::{AsciiRenderer, TerminalRenderer};

/// Interactive terminal application orbiting a scene
pub struct TerminalApp {
    scene: Scene,
    camera: OrbitCamera,
    renderer: AsciiRenderer,
    spin: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let camera = OrbitCamera::framing(&scene);
        log::debug!(
            "viewer {}x{} framing {} points and {} lines",
            width,
            height,
            scene.points().len(),
            scene.lines().len()
        );

        Ok(Self {
            scene,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            spin: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.camera.orbit(0.0, 0.1),
                KeyCode::Char('s') | KeyCode::Down => self.camera.orbit(0.0, -0.1),
                KeyCode::Char('a') | KeyCode::Left => self.camera.orbit(-0.1, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.camera.orbit(0.1, 0.0),
                KeyCode::Char('+') | KeyCode::Char('=') => self.camera.zoom(0.9),
                KeyCode::Char('-') => self.camera.zoom(1.1),
                KeyCode::Char(' ') => self.spin = !self.spin,
                KeyCode::Char('r') => self.camera = OrbitCamera::framing(&self.scene),
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self) {
        if self.spin {
            self.camera.orbit(0.01, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_scene(&self.scene, &self.camera)?;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "PCVIS | FPS: {:.1} | {} pts {} lines | WASD/Arrows=Orbit +/-=Zoom Space=Spin R=Reset Q=Quit",
                self.fps,
                self.scene.points().len(),
                self.scene.lines().len()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
