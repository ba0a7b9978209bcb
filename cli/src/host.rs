use std::ops::ControlFlow;
use std::time::Duration;

use rand::prelude::*;
use rgb_quiz_core::*;
use web_time::Instant;

use crate::render::{self, Banner};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Terminal stand-in for the module's rendering, audio and input hardware.
///
/// Stdin is read synchronously, so elapsed time is converted into timer ticks
/// whenever a command arrives.
pub struct Host {
    engine: QuizEngine,
    rng: SmallRng,
    ticking: Option<(TimerId, Instant)>,
}

impl Host {
    pub fn new(engine: QuizEngine, seed: u64) -> Self {
        Self {
            engine,
            rng: SmallRng::seed_from_u64(seed.rotate_left(17)),
            ticking: None,
        }
    }

    pub fn handle(&mut self, line: &str) -> anyhow::Result<ControlFlow<()>> {
        self.catch_up();

        let mut words = line.split_whitespace();
        let verb = words.next().map(str::to_ascii_lowercase);
        match verb.as_deref() {
            None => {}
            Some("quit" | "exit") => return Ok(ControlFlow::Break(())),
            Some("help") => println!("{COMMAND_HELP} Also: toggle <cells>, solve, state, quit."),
            Some("state") => {
                println!("{}", serde_json::to_string_pretty(&self.engine.snapshot())?);
                return Ok(ControlFlow::Continue(()));
            }
            Some("toggle") => {
                for word in words {
                    let result = CellCoords::parse(word)
                        .ok_or(QuizError::InvalidCell)
                        .and_then(|coords| self.engine.toggle_cell(coords.index()));
                    if let Err(err) = result {
                        println!("{word}: {err}");
                    }
                }
            }
            Some("solve") => {
                let steps = ForcedSolve::begin(&mut self.engine).run_to_completion();
                log::debug!("Forced solve took {steps} steps");
                if steps > 0 {
                    self.announce(Banner::Solve);
                }
            }
            Some(_) => match Command::parse(line).and_then(|cmd| cmd.execute(&mut self.engine)) {
                Ok(outcome) => self.report(outcome),
                Err(err) => println!("{err}"),
            },
        }

        self.catch_up();
        self.render();
        Ok(ControlFlow::Continue(()))
    }

    /// Feeds every whole second elapsed since the last tick into the engine.
    fn catch_up(&mut self) {
        let now = Instant::now();
        let Some(id) = self.engine.timer_id() else {
            self.ticking = None;
            return;
        };

        let mut last = match self.ticking {
            Some((tracked, last)) if tracked == id => last,
            _ => now,
        };
        while now.duration_since(last) >= ONE_SECOND {
            last += ONE_SECOND;
            match self.engine.tick(id) {
                TickOutcome::Ticked(_) => {}
                TickOutcome::Expired => {
                    println!("Ran out of time.");
                    self.announce(Banner::Strike);
                    break;
                }
                TickOutcome::Stale | TickOutcome::ExpirySuppressed => break,
            }
        }

        self.ticking = self.engine.timer_id().map(|id| (id, last));
    }

    fn report(&mut self, outcome: ActivateOutcome) {
        match outcome {
            ActivateOutcome::Strike => self.announce(Banner::Strike),
            ActivateOutcome::Solved => self.announce(Banner::Solve),
            ActivateOutcome::StageCleared { cleared, .. } => {
                println!("Stage {} correct.", cleared + 1);
            }
            _ => {}
        }
    }

    fn announce(&mut self, banner: Banner) {
        if let Some(message) = banner.messages().choose(&mut self.rng) {
            println!("*** {message} ***");
        }
        if banner == Banner::Strike {
            println!("Strike! A new puzzle was generated.");
        }
    }

    pub fn render(&self) {
        match self.engine.phase() {
            Phase::Idle => println!("Press go to start."),
            Phase::Showing(stage) => {
                println!("Stage {} of {}:", stage + 1, STAGE_COUNT);
                if let Some(grid) = self.engine.visible_grid() {
                    render::color_grid_lines(grid)
                        .iter()
                        .for_each(|line| println!("{line}"));
                }
                println!("Memorize the grid, then press go.");
            }
            Phase::Input(stage) => {
                if let Some(reference) = self.engine.visible_reference() {
                    println!("Stage {} screen: {reference}", stage + 1);
                }
                render::selection_lines(self.engine.selection())
                    .iter()
                    .for_each(|line| println!("{line}"));
            }
            Phase::Solved => {
                println!("Module solved with {} strike(s).", self.engine.strikes());
                return;
            }
        }

        if self.engine.timer_id().is_some() {
            println!("Time left: {}s", self.engine.remaining_secs());
        }
    }
}
