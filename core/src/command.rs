use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use crate::*;

pub const COMMAND_HELP: &str =
    "Press the 'GO' button with \"go\". Submit a group of cells with \"submit a1 b2 c3 d1 e2\".";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verb {
    Go,
    Submit,
}

/// A remote command, expressed in terms of the same interactions a player has.
///
/// Arguments are kept as text until the command runs, so phase rejections
/// take precedence over malformed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    arguments: Vec<String>,
}

impl Command {
    pub fn go() -> Self {
        Self {
            verb: Verb::Go,
            arguments: Vec::new(),
        }
    }

    pub fn submit(cells: impl IntoIterator<Item = CellIndex>) -> Self {
        Self {
            verb: Verb::Submit,
            arguments: cells
                .into_iter()
                .map(|index| {
                    CellCoords::from_index(index)
                        .map_or_else(|_| index.to_string(), |coords| coords.to_string())
                })
                .collect(),
        }
    }

    pub fn parse(text: &str) -> core::result::Result<Self, CommandError> {
        let text = text.to_ascii_lowercase();
        let mut words = text.split_whitespace();

        let verb = match words.next() {
            None => return Err(CommandError::Empty),
            Some("go") => Verb::Go,
            Some("submit") => Verb::Submit,
            Some(verb) => return Err(CommandError::UnknownCommand(String::from(verb))),
        };
        Ok(Self {
            verb,
            arguments: words.map(String::from).collect(),
        })
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Resolves the submitted coordinates into distinct cell indices.
    pub fn cells(&self) -> core::result::Result<Vec<CellIndex>, CommandError> {
        let mut seen = CellMask::empty();
        let mut cells = Vec::with_capacity(self.arguments.len());
        for word in &self.arguments {
            let index = CellCoords::parse(word)
                .ok_or_else(|| CommandError::InvalidCoordinate(word.clone()))?
                .index();
            if !seen.toggle(index) {
                return Err(CommandError::DuplicateCells);
            }
            cells.push(index);
        }
        Ok(cells)
    }

    /// Runs the command against `engine`: each listed cell is toggled once,
    /// followed by a single activation.
    ///
    /// The phase is checked before the arguments are looked at.
    pub fn execute<G: PuzzleGenerator>(
        &self,
        engine: &mut QuizEngine<G>,
    ) -> core::result::Result<ActivateOutcome, CommandError> {
        let answering = engine.phase().is_input();
        match self.verb {
            Verb::Go if answering => Err(CommandError::GoDuringInput),
            Verb::Submit if !answering => Err(CommandError::SubmitOutsideInput),
            Verb::Go if !self.arguments.is_empty() => Err(CommandError::UnexpectedArguments),
            Verb::Go => Ok(engine.activate()),
            Verb::Submit => {
                for index in self.cells()? {
                    // indices come from parsed coordinates and the phase was checked above
                    let _ = engine.toggle_cell(index);
                }
                Ok(engine.activate())
            }
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ForcedStep {
    Toggled(CellIndex),
    Activated(ActivateOutcome),
    Finished,
}

/// Drives an engine to the solved state without player input.
///
/// Timer expiry is suppressed while this exists; dropping it restores normal
/// timing.
pub struct ForcedSolve<'a, G: PuzzleGenerator> {
    engine: &'a mut QuizEngine<G>,
}

impl<'a, G: PuzzleGenerator> ForcedSolve<'a, G> {
    pub fn begin(engine: &'a mut QuizEngine<G>) -> Self {
        log::info!(
            "[RGB Quiz #{}] Force solve requested.",
            engine.config().module_id
        );
        engine.set_forced_completion(true);
        Self { engine }
    }

    pub fn engine(&mut self) -> &mut QuizEngine<G> {
        &mut *self.engine
    }

    /// Fixes one wrong cell if answering, otherwise activates.
    pub fn step(&mut self) -> ForcedStep {
        if self.engine.is_solved() {
            return ForcedStep::Finished;
        }

        if let Phase::Input(stage) = self.engine.phase() {
            let solution = self.engine.puzzle().stage(stage).solution();
            let selection = self.engine.selection();
            let wrong = (0..CELL_COUNT as CellIndex)
                .find(|&index| selection[index] != solution[index]);
            if let Some(index) = wrong
                && self.engine.toggle_cell(index).is_ok()
            {
                return ForcedStep::Toggled(index);
            }
        }

        ForcedStep::Activated(self.engine.activate())
    }

    /// Steps until solved and returns how many steps it took.
    pub fn run_to_completion(mut self) -> usize {
        let mut steps = 0;
        while self.step() != ForcedStep::Finished {
            steps += 1;
        }
        steps
    }
}

impl<G: PuzzleGenerator> Drop for ForcedSolve<'_, G> {
    fn drop(&mut self) {
        self.engine.set_forced_completion(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{ScriptedGenerator, sample_puzzle};
    use alloc::vec;

    fn engine() -> QuizEngine<ScriptedGenerator> {
        QuizEngine::new(
            QuizConfig::default(),
            ScriptedGenerator::new(vec![sample_puzzle()]),
        )
    }

    fn submit_for(mask: &CellMask) -> Command {
        Command::submit(mask.iter_set())
    }

    #[test]
    fn out_of_range_cells_fail_as_coordinates() {
        let mut engine = engine();
        enter_input(&mut engine);

        assert_eq!(
            Command::submit([15]).execute(&mut engine),
            Err(CommandError::InvalidCoordinate("15".to_string()))
        );
    }

    fn enter_input(engine: &mut QuizEngine<ScriptedGenerator>) {
        Command::go().execute(engine).unwrap();
        Command::go().execute(engine).unwrap();
        assert_eq!(engine.phase(), Phase::Input(0));
    }

    #[test]
    fn parse_go_and_submit() {
        assert_eq!(Command::parse("GO"), Ok(Command::go()));
        assert_eq!(Command::parse("submit a1 c2 e3"), Ok(Command::submit([0, 7, 14])));
        assert_eq!(Command::parse("  submit  ").unwrap().cells(), Ok(vec![]));
        assert_eq!("go".parse::<Command>(), Ok(Command::go()));
        assert_eq!(
            Command::parse("submit A1 b2").unwrap().cells(),
            Ok(vec![0, 6])
        );
    }

    #[test]
    fn parse_rejects_unknown_verbs() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("press a1"),
            Err(CommandError::UnknownCommand("press".to_string()))
        );
    }

    #[test]
    fn malformed_arguments_are_rejected_while_answering() {
        let mut engine = engine();
        enter_input(&mut engine);

        let run = |engine: &mut QuizEngine<ScriptedGenerator>, text: &str| {
            Command::parse(text).and_then(|command| command.execute(engine))
        };

        assert_eq!(
            run(&mut engine, "submit a1 f4"),
            Err(CommandError::InvalidCoordinate("f4".to_string()))
        );
        assert_eq!(
            run(&mut engine, "submit a1 b2 A1"),
            Err(CommandError::DuplicateCells)
        );
        assert!(engine.selection().is_empty());
        assert_eq!(engine.phase(), Phase::Input(0));
    }

    #[test]
    fn extra_go_arguments_are_rejected_outside_input() {
        let mut engine = engine();

        let result = Command::parse("go now").and_then(|command| command.execute(&mut engine));

        assert_eq!(result, Err(CommandError::UnexpectedArguments));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn submit_outside_input_is_rejected() {
        let mut engine = engine();

        let result = Command::submit([0]).execute(&mut engine);

        assert_eq!(result, Err(CommandError::SubmitOutsideInput));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn phase_is_checked_before_duplicates() {
        let mut engine = engine();

        let idle = Command::parse("submit a1 a1").and_then(|command| command.execute(&mut engine));
        assert_eq!(idle, Err(CommandError::SubmitOutsideInput));

        Command::go().execute(&mut engine).unwrap();
        let showing =
            Command::parse("submit b2 b2 zz").and_then(|command| command.execute(&mut engine));
        assert_eq!(showing, Err(CommandError::SubmitOutsideInput));
        assert_eq!(engine.phase(), Phase::Showing(0));
    }

    #[test]
    fn go_during_input_is_rejected() {
        let mut engine = engine();
        enter_input(&mut engine);

        assert_eq!(
            Command::go().execute(&mut engine),
            Err(CommandError::GoDuringInput)
        );
        assert_eq!(
            Command::parse("go now").and_then(|command| command.execute(&mut engine)),
            Err(CommandError::GoDuringInput)
        );
        assert_eq!(engine.phase(), Phase::Input(0));
    }

    #[test]
    fn submit_toggles_cells_then_activates() {
        let mut engine = engine();
        enter_input(&mut engine);
        let solution = *engine.stage().unwrap().solution();

        let outcome = submit_for(&solution).execute(&mut engine).unwrap();

        assert_eq!(outcome, ActivateOutcome::StageCleared { cleared: 0, next: 1 });
    }

    #[test]
    fn wrong_submission_strikes() {
        let mut engine = engine();
        enter_input(&mut engine);

        let outcome = Command::parse("submit").unwrap().execute(&mut engine).unwrap();

        assert_eq!(outcome, ActivateOutcome::Strike);
        assert_eq!(engine.strikes(), 1);
    }

    #[test]
    fn forced_solve_finishes_from_idle() {
        let mut engine = engine();

        let steps = ForcedSolve::begin(&mut engine).run_to_completion();

        assert!(steps > 0);
        assert!(engine.is_solved());
        assert_eq!(engine.strikes(), 0);
        assert!(!engine.is_forced_completion());
    }

    #[test]
    fn forced_solve_corrects_a_partial_selection() {
        let mut engine = engine();
        engine.activate();
        engine.activate();
        engine.toggle_cell(0).unwrap();
        engine.toggle_cell(14).unwrap();

        ForcedSolve::begin(&mut engine).run_to_completion();

        assert!(engine.is_solved());
        assert_eq!(engine.strikes(), 0);
    }

    #[test]
    fn forced_solve_survives_timer_expiry() {
        let mut engine = QuizEngine::new(
            QuizConfig::new(2, 1),
            ScriptedGenerator::new(vec![sample_puzzle()]),
        );
        let mut forced = ForcedSolve::begin(&mut engine);
        forced.step();
        let id = forced.engine().timer_id().unwrap();

        assert_eq!(forced.engine().tick(id), TickOutcome::ExpirySuppressed);
        while forced.step() != ForcedStep::Finished {}
        drop(forced);

        assert!(engine.is_solved());
        assert_eq!(engine.strikes(), 0);
    }

    #[test]
    fn forced_solve_on_solved_engine_does_nothing() {
        let mut engine = engine();
        ForcedSolve::begin(&mut engine).run_to_completion();

        let mut forced = ForcedSolve::begin(&mut engine);

        assert_eq!(forced.step(), ForcedStep::Finished);
    }
}
