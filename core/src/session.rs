use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
/// - Won | Lost -> Playing, on restart
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

/// What one batch of released buttons did.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    pub moved: bool,
    pub restarted: bool,
    pub reveal: Option<RevealOutcome>,
    pub mark: Option<MarkOutcome>,
}

impl TurnReport {
    pub fn has_update(&self) -> bool {
        self.moved
            || self.restarted
            || self.reveal.is_some_and(RevealOutcome::has_update)
            || self.mark.is_some_and(MarkOutcome::has_update)
    }
}

/// Everything one game owns: both maps, the cursor, and where the game stands.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    truth: TruthMap,
    visible: VisibleMap,
    cursor: Coord2,
    state: GameState,
}

impl<G: BoardGenerator> GameSession<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let truth = Self::deal(&config, &mut generator)?;
        Ok(Self {
            visible: VisibleMap::new(config.size),
            cursor: config.start_cursor(),
            state: GameState::Playing,
            config,
            generator,
            truth,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn truth(&self) -> &TruthMap {
        &self.truth
    }

    pub fn visible(&self) -> &VisibleMap {
        &self.visible
    }

    pub fn size(&self) -> Coord2 {
        self.truth.size()
    }

    /// Bombs minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.truth.bomb_count()) - i32::from(self.visible.flag_count())
    }

    /// Handles one tick's released buttons: moves first, then primary, then secondary.
    pub fn apply(&mut self, released: Buttons) -> Result<TurnReport> {
        let mut report = TurnReport::default();

        for direction in Direction::ALL {
            if released.contains(direction.button()) {
                report.moved |= self.move_cursor(direction);
            }
        }

        if released.contains(Buttons::A) {
            if self.state.is_finished() {
                self.restart()?;
                report.restarted = true;
            } else {
                report.reveal = Some(self.reveal_at_cursor());
            }
        }

        if released.contains(Buttons::B) {
            report.mark = Some(self.mark_at_cursor());
        }

        Ok(report)
    }

    /// Moves the cursor one cell, returning whether it actually moved.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let next = direction.step(self.cursor, self.size());
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    /// Primary action while playing.
    pub fn reveal_at_cursor(&mut self) -> RevealOutcome {
        use RevealOutcome::*;

        if self.state.is_finished() || self.visible[self.cursor] != TileKind::Hidden {
            return NoChange;
        }

        let coords = self.cursor;
        match self.truth[coords] {
            TileKind::Bomb => {
                log::debug!("Player hit bomb at {:?}, revealing board", coords);
                self.visible = VisibleMap::reveal_all(&self.truth);
                self.state = GameState::Lost;
                HitBomb
            }
            tile if tile.is_zero() => {
                Revealed(flood_reveal(&self.truth, &mut self.visible, coords))
            }
            _ => {
                self.visible.reveal_from(&self.truth, coords);
                log::debug!("Open tile at {:?}: {:?}", coords, self.visible[coords]);
                Revealed(1)
            }
        }
    }

    /// Secondary action while playing: hidden -> flagged -> hidden, with a question-mark stop
    /// when enabled.
    pub fn mark_at_cursor(&mut self) -> MarkOutcome {
        use TileKind::*;

        if self.state.is_finished() {
            return MarkOutcome::NoChange;
        }

        let tile = &mut self.visible[self.cursor];
        let next = match *tile {
            Hidden => Flagged,
            Flagged if self.config.question_marks => QuestionMark,
            Flagged | QuestionMark => Hidden,
            _ => return MarkOutcome::NoChange,
        };
        *tile = next;
        log::debug!("Mark {:?} at {:?}", next, self.cursor);
        MarkOutcome::Changed(next)
    }

    /// A fresh truth map, rejected when its shape disagrees with the config.
    fn deal(config: &GameConfig, generator: &mut G) -> Result<TruthMap> {
        let truth = generator.generate(config)?;
        if truth.size() != config.size {
            log::error!(
                "Generator dealt a {:?} board, expected {:?}",
                truth.size(),
                config.size
            );
            return Err(GameError::InvalidBoardShape);
        }
        Ok(truth)
    }

    /// Moves to [`GameState::Won`] when every safe cell is uncovered. Returns whether that just
    /// happened.
    pub fn evaluate(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        if check_win(&self.visible, self.truth.bomb_count()) {
            log::debug!("Player won");
            self.state = GameState::Won;
            true
        } else {
            false
        }
    }

    /// Fresh maps, cursor back at the start.
    pub fn restart(&mut self) -> Result<()> {
        self.truth = Self::deal(&self.config, &mut self.generator)?;
        self.visible = VisibleMap::new(self.config.size);
        self.cursor = self.config.start_cursor();
        self.state = GameState::Playing;
        log::debug!("New game started");
        Ok(())
    }
}
