//! walk_trace - replay a command script against a map and print the pose
//! after every event.
//!
//! USAGE:
//! ```bash
//! cargo run --bin walk_trace -- --map level.txt --script "w w w q:90 d s r:10"
//! ```
//!
//! Tokens: `w s a d` move / strafe, `q e` pan, `r f` pitch, each optionally
//! suffixed with `:amount`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tile_walker::sim::{Applied, Camera, Command, Goal, Session, WalkConfig};
use tile_walker::world::{Pose, TileMap};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map in text form; stock map if omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Whitespace-separated command tokens
    #[arg(long, conflicts_with = "script_file")]
    script: Option<String>,

    /// File holding command tokens
    #[arg(long, value_name = "FILE")]
    script_file: Option<PathBuf>,

    /// World units per move / strafe event
    #[arg(long, default_value_t = 0.2)]
    speed: f32,

    /// Collision radius of the eye
    #[arg(long, default_value_t = 0.2)]
    radius: f32,

    /// Degrees per pan / pitch event without an explicit amount
    #[arg(long, default_value_t = 5.0)]
    angle: f32,

    /// Stop accepting commands once the default goal is reached
    #[arg(long)]
    goal: bool,

    /// Print the map before replaying
    #[arg(long)]
    show_map: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let map = match &opts.map {
        Some(path) => TileMap::load(path)?,
        None => TileMap::default(),
    };
    if opts.show_map {
        print!("{map}");
    }

    let script = match (&opts.script, &opts.script_file) {
        (Some(s), _) => s.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        (None, None) => String::new(),
    };
    let commands = script
        .split_whitespace()
        .map(str::parse::<Command>)
        .collect::<Result<Vec<_>, _>>()?;

    let config = WalkConfig {
        move_speed: opts.speed,
        collision_radius: opts.radius,
        turn_angle: opts.angle,
        ..WalkConfig::default()
    };
    let mut session = Session::new(Camera::new(Pose::default(), config), map);
    if opts.goal {
        session = session.with_goal(Goal::default());
    }

    print_pose(0, "start", session.camera().pose());
    for (i, cmd) in commands.into_iter().enumerate() {
        let label = match session.apply(cmd) {
            Applied::Moved(outcome) => format!("{cmd:?} -> {outcome:?}"),
            Applied::Turned => format!("{cmd:?}"),
            Applied::Locked => format!("{cmd:?} (goal reached, ignored)"),
        };
        print_pose(i + 1, &label, session.camera().pose());
    }
    Ok(())
}

fn print_pose(n: usize, label: &str, pose: &Pose) {
    let (e, a) = (pose.eye(), pose.at());
    println!(
        "{n:>4}  {label:<32} eye ({:>7.3}, {:>7.3}, {:>7.3})  at ({:>7.3}, {:>7.3}, {:>7.3})  yaw {:>7.2}  pitch {:>6.2}",
        e.x,
        e.y,
        e.z,
        a.x,
        a.y,
        a.z,
        pose.yaw(),
        pose.pitch()
    );
}
