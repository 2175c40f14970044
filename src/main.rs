use anyhow::Result;
use clap::Parser;

use pipes::chain::WorldTransforms;
use pipes::cli::Cli;
use pipes::core::{Clock, FixedHz};
use pipes::script::Script;
use pipes::types::{cube_vertex_bytes, CUBE_VERTEX_COUNT};
use pipes::{Scene, SceneConfig};

// === Constants ===

/// Simulated seconds between progress reports
const REPORT_INTERVAL: f32 = 1.0;

/// Headless session: a scene driven by a script instead of a window
struct App {
    scene: Scene,
    script: Script,
    report: FixedHz,
    quiet: bool,
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };
        let script = match &cli.script {
            Some(path) => Script::load(path)?,
            None => Script::default(),
        };
        log::info!("loaded {} scripted action(s)", script.len());
        log::debug!(
            "cube batch: {} vertices, {} bytes",
            CUBE_VERTEX_COUNT,
            cube_vertex_bytes().len()
        );

        Ok(Self {
            scene: Scene::seeded(config, cli.seed),
            script,
            report: FixedHz::new(1.0 / REPORT_INTERVAL),
            quiet: cli.quiet,
        })
    }

    fn frame(&mut self, index: u32, dt: f32) -> usize {
        self.script.apply_due(index, &mut self.scene);
        self.scene.advance(dt);

        let mut world = WorldTransforms::new();
        let cubes = self.scene.render(&mut world);

        if self.report.tick(dt) > 0 && !self.quiet {
            let camera = self.scene.camera();
            println!(
                "frame {:>5}: {} pipe(s), {} cube(s), camera at {:.2} facing {:.2}",
                index,
                self.scene.pipes().len(),
                cubes,
                camera.position(),
                camera.forward()
            );
        }
        cubes
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = App::new(&cli)?;
    let clock = Clock::new();

    let mut cubes = 0;
    for index in 0..cli.frames {
        cubes = app.frame(index, cli.dt);
    }

    if app.script.remaining() > 0 {
        log::warn!(
            "{} scripted action(s) scheduled after the last frame were skipped",
            app.script.remaining()
        );
    }

    println!(
        "{} frames ({:.1}s simulated) in {:.2?}: {} pipe(s), {} cube(s), orbit {}",
        cli.frames,
        cli.frames as f32 * cli.dt,
        clock.elapsed(),
        app.scene.pipes().len(),
        cubes,
        if app.scene.is_orbiting() { "on" } else { "off" }
    );
    log::debug!("final state: {:?}", app.scene);

    Ok(())
}
