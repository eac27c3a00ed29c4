//! Overhead view of the tile world with a walkable camera.
//!
//! Controls  W/S/↑/↓ = forward/back  A/D/←/→ = strafe  Q/E = pan
//!           R/F = pitch  left-drag = mouse look  Esc = quit
//!           Shift+click = place wall ahead  Ctrl+click = clear tile ahead
//!
//! ```bash
//! cargo run --release --bin walk_view -- --map level.txt
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::{Vec2, Vec3Swizzles};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use tile_walker::sim::{Camera, Command, Goal, MouseLook, Session, WalkConfig};
use tile_walker::world::{MAP_SIZE, Pose, TileCoord, TileMap};

const W: usize = 960;
const H: usize = 720;

const BACKGROUND: u32 = 0x00_202020;
const GRID: u32 = 0x00_404040;
const WALL: u32 = 0x00_4F6B31;
const TALL: u32 = 0x00_7A5CC0;
const HIT: u32 = 0x00_D04040;
const EYE: u32 = 0x00_FFFFFF;
const LOOK: u32 = 0x00_FFD040;
const GOAL: u32 = 0x00_40C0F0;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map in text form (8 rows of `.`, `%`, `8` or digits); stock map if omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// World units per move / strafe event
    #[arg(long, default_value_t = 0.2)]
    speed: f32,

    /// Collision radius of the eye
    #[arg(long, default_value_t = 0.2)]
    radius: f32,

    /// Degrees per pan / pitch key press
    #[arg(long, default_value_t = 5.0)]
    angle: f32,

    /// Degrees of mouse look per pixel dragged
    #[arg(long, default_value_t = 0.3)]
    sensitivity: f32,

    /// Walk freely, without a goal to reach
    #[arg(long)]
    no_goal: bool,
}

/// Key → command table, checked once per frame with key repeat.
const BINDINGS: [(Key, Command); 12] = [
    (Key::W, Command::MoveForward(None)),
    (Key::Up, Command::MoveForward(None)),
    (Key::S, Command::MoveBackward(None)),
    (Key::Down, Command::MoveBackward(None)),
    (Key::A, Command::StrafeLeft(None)),
    (Key::Left, Command::StrafeLeft(None)),
    (Key::D, Command::StrafeRight(None)),
    (Key::Right, Command::StrafeRight(None)),
    (Key::Q, Command::PanLeft(None)),
    (Key::E, Command::PanRight(None)),
    (Key::R, Command::PitchUp(None)),
    (Key::F, Command::PitchDown(None)),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let map = match &opts.map {
        Some(path) => TileMap::load(path)?,
        None => TileMap::default(),
    };
    let config = WalkConfig {
        move_speed: opts.speed,
        collision_radius: opts.radius,
        turn_angle: opts.angle,
        drag_sensitivity: opts.sensitivity,
        ..WalkConfig::default()
    };
    let mouse = MouseLook::new(config.drag_sensitivity);

    let mut session = Session::new(Camera::new(Pose::default(), config), map);
    if !opts.no_goal {
        session = session.with_goal(Goal::default());
    }

    let view = Viewport::fit(session.goal());

    let mut win = Window::new("tile walker", W, H, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut frame = vec![BACKGROUND; W * H];
    let mut last_mouse: Option<(f32, f32)> = None;
    let mut was_down = false;
    let mut last_title = Instant::now() - Duration::from_secs(1);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- keyboard: one command per press / repeat ------ */
        for (key, cmd) in BINDINGS {
            if win.is_key_pressed(key, KeyRepeat::Yes) {
                session.apply(cmd);
            }
        }

        /* --------------- modifier click → edit tile ahead -------------- */
        let down = win.get_mouse_down(MouseButton::Left);
        if down && !was_down {
            let shift = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
            let ctrl = win.is_key_down(Key::LeftCtrl) || win.is_key_down(Key::RightCtrl);
            if shift {
                session.edit_block(true);
            } else if ctrl {
                session.edit_block(false);
            }
        }
        was_down = down;

        /* --------------- mouse drag → pan / pitch --------------------- */
        let pos = win.get_mouse_pos(MouseMode::Discard);
        if down {
            if let (Some((x0, y0)), Some((x1, y1))) = (last_mouse, pos) {
                for cmd in mouse.commands(x1 - x0, y1 - y0) {
                    session.apply(cmd);
                }
            }
            last_mouse = pos;
        } else {
            last_mouse = None;
        }

        draw(&mut frame, &view, &session);
        win.update_with_buffer(&frame, W, H)?;

        if last_title.elapsed() >= Duration::from_millis(250) {
            let pose = session.camera().pose();
            let eye = pose.eye();
            let status = if session.is_won() { "  GOAL REACHED" } else { "" };
            win.set_title(&format!(
                "tile walker  eye ({:.2}, {:.2}, {:.2})  yaw {:.0}°  pitch {:.0}°{status}",
                eye.x,
                eye.y,
                eye.z,
                pose.yaw(),
                pose.pitch()
            ));
            last_title = Instant::now();
        }
    }
    Ok(())
}

/*──────────────────────── world → screen ───────────────────────────*/

struct Viewport {
    min: Vec2,
    scale: f32,
    offset: Vec2,
}

impl Viewport {
    /// Fit the grid (and the goal, if any) with a 10 % margin.
    fn fit(goal: Option<&Goal>) -> Self {
        let half = (MAP_SIZE / 2) as f32;
        let (mut min, mut max) = (Vec2::splat(-half), Vec2::splat(half));
        if let Some(g) = goal {
            min = min.min(g.centre - Vec2::splat(g.radius));
            max = max.max(g.centre + Vec2::splat(g.radius));
        }
        let span = max - min;
        let scale = (W as f32 / span.x).min(H as f32 / span.y) * 0.9;
        let offset = (Vec2::new(W as f32, H as f32) - span * scale) / 2.0;
        Self { min, scale, offset }
    }

    /// Invert Z so +Z points up the screen.
    fn to_screen(&self, p: Vec2) -> (i32, i32) {
        let s = (p - self.min) * self.scale + self.offset;
        (s.x as i32, H as i32 - s.y as i32)
    }
}

fn draw(frame: &mut [u32], view: &Viewport, session: &Session) {
    frame.fill(BACKGROUND);
    let map = session.map();
    let camera = session.camera();
    let blockers = camera.probe(map).blockers;

    for x in 0..MAP_SIZE as i32 {
        for z in 0..MAP_SIZE as i32 {
            let c = TileCoord::new(x, z);
            let fp = c.footprint();
            let (x0, y1) = view.to_screen(fp.min);
            let (x1, y0) = view.to_screen(fp.max);
            let colour = match map.height_class_at(c) {
                _ if blockers.contains(&c) => HIT,
                Some(t) if t.height() >= 3 => TALL,
                Some(t) if t.is_solid() => WALL,
                _ => GRID,
            };
            if colour == GRID {
                draw_rect(frame, x0, y0, x1, y1, GRID);
            } else {
                fill_rect(frame, x0, y0, x1, y1, colour);
            }
        }
    }

    if let Some(goal) = session.goal() {
        draw_circle(frame, view, goal.centre, goal.radius, GOAL);
    }

    let pose = camera.pose();
    let eye = pose.eye().xz();
    draw_circle(frame, view, eye, camera.config().collision_radius, EYE);
    let tip = eye + pose.forward().xz().normalize_or_zero() * 0.6;
    let (ex, ey) = view.to_screen(eye);
    let (tx, ty) = view.to_screen(tip);
    draw_line(frame, ex, ey, tx, ty, LOOK);
}

/*──────────────────────── raster helpers ───────────────────────────*/

fn plot(buf: &mut [u32], x: i32, y: i32, colour: u32) {
    if (0..W as i32).contains(&x) && (0..H as i32).contains(&y) {
        buf[y as usize * W + x as usize] = colour;
    }
}

fn fill_rect(buf: &mut [u32], x0: i32, y0: i32, x1: i32, y1: i32, colour: u32) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            plot(buf, x, y, colour);
        }
    }
}

fn draw_rect(buf: &mut [u32], x0: i32, y0: i32, x1: i32, y1: i32, colour: u32) {
    draw_line(buf, x0, y0, x1, y0, colour);
    draw_line(buf, x1, y0, x1, y1, colour);
    draw_line(buf, x1, y1, x0, y1, colour);
    draw_line(buf, x0, y1, x0, y0, colour);
}

fn draw_circle(buf: &mut [u32], view: &Viewport, centre: Vec2, radius: f32, colour: u32) {
    const SEGMENTS: usize = 32;
    let point = |i: usize| {
        let a = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        view.to_screen(centre + Vec2::from_angle(a) * radius)
    };
    for i in 0..SEGMENTS {
        let (x0, y0) = point(i);
        let (x1, y1) = point(i + 1);
        draw_line(buf, x0, y0, x1, y1, colour);
    }
}

/// Integer Bresenham line‑drawing algorithm.
fn draw_line(buf: &mut [u32], mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: u32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(buf, x0, y0, colour);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
