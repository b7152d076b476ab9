use std::io::{self, BufRead};
use std::{env, fs};

use glam::{Mat4, Vec3};
use ik_chain_rs::*;
use log::{info, trace, warn};

const FRAMES_PER_LINE: usize = 60;

/// Renderer that only reports what it would draw.
#[derive(Default)]
struct LogRenderer {
    drawn: usize,
}

impl JointRenderer for LogRenderer {
    type Shader = str;

    fn draw_joint(&mut self, view_proj: &Mat4, shader: &str, joint: &JointDraw<'_>) {
        let clip = view_proj.project_point3(joint.world.transform_point3(Vec3::ZERO));
        trace!(
            "[{}] joint {} at {:?}, {} triangles",
            shader,
            joint.index,
            clip,
            joint.mesh.indices().len() / 3
        );
        self.drawn += 1;
    }
}

fn load_config(path: Option<String>) -> ChainConfig {
    let Some(path) = path else {
        return ChainConfig::default();
    };
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            warn!("Can't read {}: {}, using defaults", path, err);
            return ChainConfig::default();
        }
    };
    return match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!("Can't parse {}: {}, using defaults", path, err);
            ChainConfig::default()
        }
    };
}

fn apply_key(tracker: &mut Tracker, key: char) {
    let nudge = match key {
        'w' => TargetNudge::Forward,
        's' => TargetNudge::Backward,
        'a' => TargetNudge::Left,
        'd' => TargetNudge::Right,
        'e' => TargetNudge::Up,
        'q' => TargetNudge::Down,
        ' ' | 'p' => {
            let paused = tracker.toggle_pause();
            info!("{}", if paused { "Paused" } else { "Resumed" });
            return;
        }
        _ => return,
    };
    tracker.nudge(nudge);
}

fn main() {
    env_logger::init();

    let config = load_config(env::args().nth(1));
    let mut chain = match Chain::from_config(&config, Vec3::new(0.0, -3.0, 0.0)) {
        Ok(chain) => chain,
        Err(err) => {
            eprintln!("Invalid chain config: {}", err);
            std::process::exit(1);
        }
    };
    let mut tracker = Tracker::new(Vec3::new(0.0, 3.0, 0.0));
    let mut renderer = LogRenderer::default();
    let view_proj = Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0)
        * Mat4::look_at_rh(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, Vec3::Y);

    info!("Keys: w/s/a/d/e/q move the target, space or p pauses. One line runs {} frames.", FRAMES_PER_LINE);
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("stdin: {}", err);
                break;
            }
        };
        line.chars().for_each(|key| apply_key(&mut tracker, key));

        let mut last = None;
        for _ in 0..FRAMES_PER_LINE {
            last = tracker.frame(&mut chain).or(last);
            chain.draw(&view_proj, "basic", &mut renderer);
        }

        let tip = chain.tip_location();
        match last {
            Some(step) if step.is_converged() => info!("Converged, tip {:?}", tip),
            Some(step) => info!("Tracking, distance {:.4}, tip {:?}", step.distance(), tip),
            None => info!("Paused, tip {:?}", tip),
        }
    }
    info!("{} joint draws", renderer.drawn);
}
