/// PCVIS Terminal Demo - Room scan with box annotations
///
/// Renders a synthetic point cloud with wireframe boxes.
/// Controls:
///   - WASD / Arrow Keys: Orbit
///   - +/-: Zoom
///   - Space: Toggle spin
///   - Q/ESC: Quit

use argh::FromArgs;
use pcvis_core::{BoxFormat, Color, NamedColor, Scene, SceneConfig, SceneRenderer};
use pcvis_terminal::{demo, TerminalApp, TerminalRenderer};

#[derive(FromArgs)]
/// Show a point cloud scene with box wireframes in the terminal
struct Args {
    /// box layout fed to the scene: corners or center
    #[argh(option, default = "BoxFormat::Center")]
    format: BoxFormat,

    /// box color name or #rrggbb
    #[argh(option, default = "NamedColor::Red.into()")]
    box_color: Color,

    /// point color, used with --no-rgb
    #[argh(option, default = "NamedColor::Green.into()")]
    point_color: Color,

    /// ignore the per-point colors of the scan
    #[argh(switch)]
    no_rgb: bool,

    /// extra yaw (radians) added to every box
    #[argh(option, default = "0.0")]
    yaw: f64,

    /// length of the axis gizmo, 0 to hide it
    #[argh(option, default = "1.0")]
    axes: f64,

    /// print a single frame instead of the interactive viewer
    #[argh(switch)]
    once: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = SceneConfig::default()
        .with_point_color(args.point_color)
        .with_box_color(args.box_color);
    let boxes = demo::box_buffer(args.format, args.yaw);

    let mut scene = Scene::with_config(&demo::point_buffer(), !args.no_rgb, &config)?;
    scene.append_boxes(&boxes, args.format, &config.box_color)?;
    if args.axes > 0.0 {
        scene.add_axes(args.axes);
    }
    log::info!(
        "scene has {} points and {} line segments",
        scene.points().len(),
        scene.lines().len()
    );

    if args.once {
        let (width, height) = crossterm::terminal::size().unwrap_or((100, 32));
        let rows = (height as usize).saturating_sub(1);
        let mut renderer = TerminalRenderer::new(std::io::stdout(), width as usize, rows);
        renderer.render(&scene)?;
        return Ok(());
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()?;
    Ok(())
}
