/// Session controller: the prompt-driven outer and inner loops.
///
/// ## Flow
///
///   size prompt ─► generate ─► turn loop ─┬─ Won ──► "play again?" ─ yes ─► replay same board
///        ▲                                │                          └ no ──► exit
///        ├──────────── Restarted ─────────┤
///        └─ yes ◄─ "play again?" ◄─ Lost ─┘                          (no ──► exit)
///
/// Quit (confirmed) and end of input exit from anywhere.
/// Every normal exit is `Ok(())`; only terminal I/O failures are errors.

use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::config::GameConfig;
use crate::domain::rules::{Command, INVALID_COMMAND_NOTICE};
use crate::error::Result;
use crate::sim::event::GameEvent;
use crate::sim::generate::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::sim::random::{self, RandomSource};
use crate::sim::session::{GameSession, Status};
use crate::ui::input::InputSource;
use crate::ui::renderer::Renderer;

const PROMPT_SIZE: &str = "Enter the grid size: ";
const PROMPT_SIZE_RETRY: &str =
    "Invalid input. Please enter a positive integer value greater than or equal to 2: ";
const PROMPT_MOVE: &str = "Enter a move (W/A/S/D to move, Q to quit, R to restart): ";
const PROMPT_QUIT: &str = "Are you sure you want to quit? (Y/N): ";
const PROMPT_AGAIN: &str = "Do you want to play again? (Y/N): ";

/// How a single round ended, from the outer loop's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RoundEnd {
    Exit,
    Restart,
    Lost,
}

pub struct Controller<'a, R: Renderer, I: InputSource, G: RandomSource> {
    renderer: &'a mut R,
    input: &'a mut I,
    rng: &'a mut G,
    config: &'a GameConfig,
    /// Answer for the first size prompt, from the command line.
    preset_size: Option<usize>,
}

impl<'a, R: Renderer, I: InputSource, G: RandomSource> Controller<'a, R, I, G> {
    pub fn new(renderer: &'a mut R, input: &'a mut I, rng: &'a mut G, config: &'a GameConfig) -> Self {
        Controller { renderer, input, rng, config, preset_size: None }
    }

    pub fn with_preset_size(mut self, size: Option<usize>) -> Self {
        self.preset_size = size.filter(|s| (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(s));
        self
    }

    /// Run until the player leaves.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let size = match self.preset_size.take() {
                Some(s) => s,
                None => match self.prompt_grid_size()? {
                    Some(s) => s,
                    None => return Ok(()),
                },
            };

            let mut session = GameSession::generate(
                size,
                self.config.item_count,
                &mut *self.rng,
                random::player_color(),
            );
            info!("new {size}x{size} game");

            match self.play(&mut session)? {
                RoundEnd::Exit => return Ok(()),
                RoundEnd::Restart => continue,
                RoundEnd::Lost => {
                    if !self.ask_play_again()? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Prompt until a whole-number size in `MIN_GRID_SIZE..=MAX_GRID_SIZE`
    /// arrives. `None` at end of input.
    fn prompt_grid_size(&mut self) -> Result<Option<usize>> {
        self.renderer.clear()?;
        self.renderer.prompt(PROMPT_SIZE)?;
        loop {
            let token = match self.input.read_token()? {
                Some(t) => t,
                None => return Ok(None),
            };
            match token.parse::<usize>() {
                Ok(size) if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) => {
                    self.input.discard_line();
                    return Ok(Some(size));
                }
                _ => {
                    debug!("rejected grid size {token:?}");
                    self.renderer.prompt(PROMPT_SIZE_RETRY)?;
                    self.input.discard_line();
                }
            }
        }
    }

    /// Turn loop for one board.
    fn play(&mut self, session: &mut GameSession) -> Result<RoundEnd> {
        let mut notice: Option<String> = None;

        loop {
            self.renderer.draw(&session.snapshot(notice.as_deref()))?;
            self.renderer.prompt(PROMPT_MOVE)?;

            let key = match self.input.read_key()? {
                Some(k) => k,
                None => return Ok(RoundEnd::Exit),
            };

            notice = None;
            for event in session.apply(Command::parse(key)) {
                match event {
                    GameEvent::QuitRequested => {
                        if self.confirm_quit()? {
                            info!("quit confirmed");
                            return Ok(RoundEnd::Exit);
                        }
                    }
                    GameEvent::PlayerMoved { from, to } => {
                        debug!("moved ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y);
                    }
                    GameEvent::ItemCollected { at, total } => {
                        debug!("item at ({}, {}), {total} collected", at.x, at.y);
                    }
                    GameEvent::GoalReached { items } => debug!("goal reached, {items} items"),
                    GameEvent::MoveBlocked(e) => notice = Some(e.notice().to_string()),
                    GameEvent::InvalidCommand(key) => {
                        debug!("invalid command {key:?}");
                        notice = Some(INVALID_COMMAND_NOTICE.to_string());
                    }
                    GameEvent::BombTriggered { at, items } => {
                        debug!("bomb at ({}, {})", at.x, at.y);
                        self.renderer.draw(&session.snapshot(None))?;
                        self.renderer.message(&format!(
                            "Game over! You triggered a bomb and collected {items} items."
                        ))?;
                    }
                    GameEvent::Restarted => {}
                }
            }

            self.pause();

            match session.status() {
                Status::Playing => {}
                Status::Restarted => return Ok(RoundEnd::Restart),
                Status::Lost => return Ok(RoundEnd::Lost),
                Status::Won => {
                    self.renderer.clear()?;
                    self.renderer.message(&format!(
                        "Congratulations! You reached the goal with {} items collected!",
                        session.items_collected()
                    ))?;
                    if !self.ask_play_again()? {
                        return Ok(RoundEnd::Exit);
                    }
                    session.replay();
                }
            }
        }
    }

    /// Single-key confirmation; only `Y`/`y` confirms.
    fn confirm_quit(&mut self) -> Result<bool> {
        self.renderer.prompt(PROMPT_QUIT)?;
        Ok(match self.input.read_key()? {
            Some(c) => c.eq_ignore_ascii_case(&'y'),
            None => true,
        })
    }

    /// Word answer; exactly `Y` or `y` means yes.
    fn ask_play_again(&mut self) -> Result<bool> {
        self.renderer.prompt(PROMPT_AGAIN)?;
        let answer = self.input.read_token()?;
        Ok(matches!(answer.as_deref(), Some("Y") | Some("y")))
    }

    fn pause(&self) {
        if self.config.turn_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.turn_delay_ms));
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use crate::domain::cell::Cell;
    use crate::domain::grid::Position;
    use crate::sim::random::GameRng;
    use crate::sim::session::Snapshot;
    use crate::ui::input::LineInput;

    /// Records everything instead of drawing it.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<String>,
        notices: Vec<Option<String>>,
        lines: Vec<String>,
    }

    impl Recorder {
        fn prompted(&self, text: &str) -> usize {
            self.lines.iter().filter(|l| *l == text).count()
        }
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Snapshot<'_>) -> io::Result<()> {
            self.frames.push(frame.grid.to_string());
            self.notices.push(frame.notice.map(str::to_string));
            Ok(())
        }
        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn message(&mut self, text: &str) -> io::Result<()> {
            self.lines.push(text.to_string());
            Ok(())
        }
        fn prompt(&mut self, text: &str) -> io::Result<()> {
            self.lines.push(text.to_string());
            Ok(())
        }
    }

    fn quiet_config() -> GameConfig {
        GameConfig { turn_delay_ms: 0, ..GameConfig::default() }
    }

    fn run_script(script: &str, seed: u64) -> Recorder {
        let mut rec = Recorder::default();
        let mut input = LineInput::new(script.as_bytes());
        let mut rng = GameRng::new(Some(seed));
        let config = quiet_config();
        Controller::new(&mut rec, &mut input, &mut rng, &config).run().unwrap();
        rec
    }

    #[test]
    fn bad_sizes_reprompt_then_end_of_input_exits() {
        let rec = run_script("abc\n1\n-4\n", 1);
        assert_eq!(rec.prompted(PROMPT_SIZE), 1);
        assert_eq!(rec.prompted(PROMPT_SIZE_RETRY), 3);
        assert!(rec.frames.is_empty());
    }

    #[test]
    fn oversized_grid_reprompts() {
        let rec = run_script("3000000000\n4\nq\ny\n", 1);
        assert_eq!(rec.prompted(PROMPT_SIZE_RETRY), 1);
        assert_eq!(rec.frames.len(), 1);
        assert_eq!(rec.frames[0].lines().count(), 4);
    }

    #[test]
    fn largest_grid_is_accepted() {
        let script = format!("{}\n{}\nq\ny\n", MAX_GRID_SIZE + 1, MAX_GRID_SIZE);
        let rec = run_script(&script, 1);
        assert_eq!(rec.prompted(PROMPT_SIZE_RETRY), 1);
        assert_eq!(rec.frames[0].lines().count(), MAX_GRID_SIZE);
    }

    #[test]
    fn quit_cancelled_then_confirmed() {
        let rec = run_script("5\nq\nn\nq\ny\n", 2);
        assert_eq!(rec.prompted(PROMPT_QUIT), 2);
        // board unchanged between the two frames around the cancelled quit
        assert_eq!(rec.frames.len(), 2);
        assert_eq!(rec.frames[0], rec.frames[1]);
        assert_eq!(rec.notices[1], None);
    }

    #[test]
    fn invalid_key_sets_notice() {
        let rec = run_script("5\nx\nq\ny\n", 3);
        assert_eq!(rec.frames[0], rec.frames[1]);
        assert_eq!(rec.notices[1].as_deref(), Some(INVALID_COMMAND_NOTICE));
    }

    #[test]
    fn edge_move_sets_bounds_notice() {
        let rec = run_script("4\na\nq\ny\n", 4);
        assert_eq!(
            rec.notices[1].as_deref(),
            Some("Invalid move! You can't go outside the grid.")
        );
    }

    #[test]
    fn restart_goes_back_to_size_prompt() {
        let rec = run_script("5\nr\n3\nq\ny\n", 5);
        assert_eq!(rec.prompted(PROMPT_SIZE), 2);
        assert_eq!(rec.frames.len(), 2);
        assert_eq!(rec.frames[1].lines().count(), 3);
    }

    #[test]
    fn preset_size_skips_first_prompt() {
        let mut rec = Recorder::default();
        let mut input = LineInput::new("q\ny\n".as_bytes());
        let mut rng = GameRng::new(Some(6));
        let config = quiet_config();
        Controller::new(&mut rec, &mut input, &mut rng, &config)
            .with_preset_size(Some(7))
            .run()
            .unwrap();
        assert_eq!(rec.prompted(PROMPT_SIZE), 0);
        assert_eq!(rec.frames[0].lines().count(), 7);
    }

    #[test]
    fn oversized_preset_size_falls_back_to_prompt() {
        let mut rec = Recorder::default();
        let mut input = LineInput::new("3\nq\ny\n".as_bytes());
        let mut rng = GameRng::new(Some(6));
        let config = quiet_config();
        Controller::new(&mut rec, &mut input, &mut rng, &config)
            .with_preset_size(Some(MAX_GRID_SIZE + 1))
            .run()
            .unwrap();
        assert_eq!(rec.prompted(PROMPT_SIZE), 1);
        assert_eq!(rec.frames[0].lines().count(), 3);
    }

    /// Search seeds for a 2x2 board where the goal is one step right
    /// of the start and the cell below is free, then script a win.
    fn winnable_seed() -> u64 {
        (0..10_000)
            .find(|&seed| {
                let mut rng = GameRng::new(Some(seed));
                let s = GameSession::generate(2, 10, &mut rng, 0);
                s.goal().x == 1 && s.goal().y == 0
            })
            .expect("some seed puts the goal at (1,0)")
    }

    #[test]
    fn win_then_replay_same_board_then_decline() {
        let seed = winnable_seed();
        let rec = run_script("2\nd\nY\nd\nn\n", seed);
        assert_eq!(rec.prompted(PROMPT_AGAIN), 2);
        assert_eq!(
            rec.lines.iter().filter(|l| l.starts_with("Congratulations!")).count(),
            2
        );
        // the replayed board is the generated one
        assert_eq!(rec.frames[0], rec.frames[1]);
        assert!(rec.frames[0].starts_with(&format!("{} {}", Cell::Player.glyph(), Cell::Goal.glyph())));
        assert_eq!(rec.prompted(PROMPT_SIZE), 1);
    }

    #[test]
    fn win_replay_answer_is_case_sensitive_word() {
        let seed = winnable_seed();
        let rec = run_script("2\nd\nyes\n", seed);
        assert_eq!(rec.prompted(PROMPT_AGAIN), 1);
        assert_eq!(rec.frames.len(), 1);
    }

    /// Seed whose 8x8 board has a bomb directly below the start.
    fn bomb_seed() -> u64 {
        (0..100_000)
            .find(|&seed| {
                let mut rng = GameRng::new(Some(seed));
                let s = GameSession::generate(8, 10, &mut rng, 0);
                s.grid().get(Position::new(0, 1)) == Cell::Bomb
            })
            .expect("some seed puts a bomb at (0,1)")
    }

    #[test]
    fn bomb_loss_offers_new_game_with_new_size() {
        let seed = bomb_seed();
        let rec = run_script("8\ns\ny\n3\nq\ny\n", seed);
        assert!(rec
            .lines
            .iter()
            .any(|l| l == "Game over! You triggered a bomb and collected 0 items."));
        assert_eq!(rec.prompted(PROMPT_AGAIN), 1);
        assert_eq!(rec.prompted(PROMPT_SIZE), 2);
    }

    #[test]
    fn bomb_loss_then_decline_exits() {
        let seed = bomb_seed();
        let rec = run_script("8\ns\nn\n", seed);
        assert_eq!(rec.prompted(PROMPT_SIZE), 1);
    }
}
