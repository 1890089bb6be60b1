use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Counters kept in lock-step with the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Mines minus flags placed, goes negative when the player over-flags.
    pub remaining_mines: CellCount,
    pub revealed_cells: CellCount,
    pub total_cells: CellCount,
    pub flagged_cells: CellCount,
}

impl GameStats {
    pub const fn new(config: &GameConfig) -> Self {
        Self {
            remaining_mines: config.mines,
            revealed_cells: 0,
            total_cells: config.total_cells(),
            flagged_cells: 0,
        }
    }

    /// Safe cells that still have to be revealed to win.
    pub const fn cells_to_reveal(&self) -> CellCount {
        let mines = self.remaining_mines + self.flagged_cells;
        self.total_cells - mines - self.revealed_cells
    }
}

/// A single game session, from the first click to a win or a loss.
///
/// Mines are placed lazily on the first reveal so the clicked cell and its neighbors are always
/// safe. Start a new game by building a new engine.
pub struct Engine {
    config: GameConfig,
    grid: Array2<Cell>,
    stats: GameStats,
    state: GameState,
    mines_placed: bool,
    triggered_mine: Option<Position>,
    generator: Option<Box<dyn MineGenerator>>,
}

impl Engine {
    /// New game with mines drawn from process entropy.
    pub fn new(config: GameConfig) -> Result<Self> {
        let generator = RandomMineGenerator::from_entropy();
        log::debug!("Mine placement seed: {}", generator.seed());
        Self::with_generator(config, generator)
    }

    /// New game whose board is fully determined by `seed` and the first click.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }

    pub fn with_generator<G>(config: GameConfig, generator: G) -> Result<Self>
    where
        G: MineGenerator + 'static,
    {
        config.validate()?;
        log::debug!(
            "New {}x{} game with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Ok(Self::build(config, Some(Box::new(generator))))
    }

    /// Game on a known board, mines already in place. The first click gets no safe zone.
    pub fn from_layout(layout: MineLayout) -> Self {
        let mut engine = Self::build(layout.game_config(), None);
        engine.apply_layout(&layout);
        engine
    }

    fn build(config: GameConfig, generator: Option<Box<dyn MineGenerator>>) -> Self {
        let (rows, cols) = config.size();
        Self {
            config,
            grid: Array2::default([rows as usize, cols as usize]),
            stats: GameStats::new(&config),
            state: GameState::default(),
            mines_placed: false,
            triggered_mine: None,
            generator,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.config.size()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn cell(&self, pos: Position) -> Result<Cell> {
        let pos = self.config.validate_position(pos)?;
        Ok(self.cell_at(pos))
    }

    /// Every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.config.positions().map(|pos| (pos, self.cell_at(pos)))
    }

    /// Reveals the cell at `pos`, or chords when it is already revealed.
    ///
    /// Returns the positions whose state changed; an empty set means nothing happened.
    pub fn left_click(&mut self, pos: Position) -> Result<BTreeSet<Position>> {
        let pos = self.config.validate_position(pos)?;

        if !self.state.is_playing() {
            log::trace!("Ignoring reveal at {} on finished game", pos);
            return Ok(BTreeSet::new());
        }

        if self.cell_at(pos).is_flagged() {
            log::trace!("Ignoring reveal on flagged cell {}", pos);
            return Ok(BTreeSet::new());
        }

        self.ensure_mines_placed(pos)?;

        if self.cell_at(pos).is_revealed() {
            return Ok(self.chord(pos));
        }

        Ok(self.reveal_hidden(pos))
    }

    /// Toggles a flag on a hidden cell. Returns whether anything changed.
    pub fn right_click(&mut self, pos: Position) -> Result<bool> {
        let pos = self.config.validate_position(pos)?;

        if !self.state.is_playing() {
            return Ok(false);
        }

        let cell = &mut self.grid[pos.to_nd_index()];
        Ok(match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                self.stats.flagged_cells += 1;
                self.stats.remaining_mines -= 1;
                log::trace!("Flagged {}", pos);
                true
            }
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                self.stats.flagged_cells -= 1;
                self.stats.remaining_mines += 1;
                log::trace!("Unflagged {}", pos);
                true
            }
            CellState::Revealed => false,
        })
    }

    /// Exposes every mine, flagged or not, and returns their positions row by row.
    ///
    /// Meant for showing the board after a loss; neither the game state nor the stats change.
    pub fn reveal_all_mines(&mut self) -> Vec<Position> {
        let mut mines = Vec::new();
        for pos in self.config.positions() {
            let cell = &mut self.grid[pos.to_nd_index()];
            if cell.is_mine() {
                cell.state = CellState::Revealed;
                mines.push(pos);
            }
        }
        mines
    }

    fn ensure_mines_placed(&mut self, start: Position) -> Result<()> {
        if self.mines_placed {
            return Ok(());
        }

        let Some(generator) = self.generator.as_mut() else {
            self.mines_placed = true;
            return Ok(());
        };

        let exclude = safe_zone(&self.config, start);
        let layout = generator.generate(&self.config, &exclude)?;

        if layout.size() != self.config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        if layout.mine_count() != self.config.mines {
            log::warn!(
                "Generated mine count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                self.config.mines
            );
        }

        self.apply_layout(&layout);
        self.generator = None;
        log::debug!("Placed {} mines, first click at {}", layout.mine_count(), start);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        let (rows, cols) = self.config.size();

        for pos in layout.iter() {
            self.grid[pos.to_nd_index()].value = MINE_VALUE;
        }

        for pos in layout.iter() {
            for neighbor in pos.neighbors(rows, cols) {
                let cell = &mut self.grid[neighbor.to_nd_index()];
                if !cell.is_mine() {
                    cell.value += 1;
                }
            }
        }

        self.mines_placed = true;
    }

    /// Reveals a hidden cell: a mine ends the game, a zero floods outward, a number opens alone.
    fn reveal_hidden(&mut self, pos: Position) -> BTreeSet<Position> {
        let mut changed = BTreeSet::new();
        let cell = self.cell_at(pos);

        if cell.is_mine() {
            self.grid[pos.to_nd_index()].state = CellState::Revealed;
            self.triggered_mine = Some(pos);
            self.state = GameState::Lost;
            log::debug!("Hit mine at {}, game lost", pos);
            changed.insert(pos);
            return changed;
        }

        if cell.is_empty() {
            self.flood_reveal(pos, &mut changed);
        } else {
            self.open_cell(pos);
            changed.insert(pos);
        }

        self.check_win();
        changed
    }

    fn flood_reveal(&mut self, start: Position, changed: &mut BTreeSet<Position>) {
        let (rows, cols) = self.config.size();
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(pos) = to_visit.pop_front() {
            if !visited.insert(pos) {
                continue;
            }

            let cell = self.cell_at(pos);
            if cell.is_revealed() || cell.is_flagged() {
                log::trace!("Skipping cell at {}", pos);
                continue;
            }

            self.open_cell(pos);
            changed.insert(pos);

            // numbered cells border the region but do not extend it
            if cell.is_empty() {
                to_visit.extend(
                    pos.neighbors(rows, cols)
                        .filter(|neighbor| !visited.contains(neighbor)),
                );
            }
        }

        log::trace!("Flood from {} opened {} cells", start, changed.len());
    }

    /// Reveals every hidden neighbor when the flag count around `pos` matches its number exactly.
    fn chord(&mut self, pos: Position) -> BTreeSet<Position> {
        let Some(count) = self.cell_at(pos).adjacent_mines().filter(|&count| count > 0) else {
            return BTreeSet::new();
        };

        if self.count_flagged_neighbors(pos) != count {
            log::trace!("Chord at {} skipped, flag count does not match {}", pos, count);
            return BTreeSet::new();
        }

        let (rows, cols) = self.config.size();
        let mut changed = BTreeSet::new();
        for neighbor in pos.neighbors(rows, cols) {
            if !self.state.is_playing() {
                break;
            }
            if self.cell_at(neighbor).is_hidden() {
                changed.extend(self.reveal_hidden(neighbor));
            }
        }
        changed
    }

    fn open_cell(&mut self, pos: Position) {
        self.grid[pos.to_nd_index()].state = CellState::Revealed;
        self.stats.revealed_cells += 1;
    }

    fn check_win(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        if self
            .grid
            .iter()
            .all(|cell| cell.is_mine() || cell.is_revealed())
        {
            self.state = GameState::Won;
            log::debug!("Game won, {} cells revealed", self.stats.revealed_cells);
        }
    }

    fn count_flagged_neighbors(&self, pos: Position) -> u8 {
        let (rows, cols) = self.config.size();
        pos.neighbors(rows, cols)
            .filter(|&neighbor| self.cell_at(neighbor).is_flagged())
            .count() as u8
    }

    fn cell_at(&self, pos: Position) -> Cell {
        self.grid[pos.to_nd_index()]
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .field("state", &self.state)
            .field("mines_placed", &self.mines_placed)
            .field("triggered_mine", &self.triggered_mine)
            .finish_non_exhaustive()
    }
}
