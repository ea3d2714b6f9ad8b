// Grid engine: cell storage, mine placement and open/flag mutation
// Pure state machine, no terminal I/O lives here

use rand::Rng;

/// Board height of the reference configuration
pub const ROWS: usize = 10;
/// Board width of the reference configuration
pub const COLS: usize = 10;

/// What a cell holds; fixed once the grid is initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Mine,
}

/// A single board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub kind: CellKind, // Empty or Mine
    pub open: bool,     // Revealed to the player, never re-hidden
    pub flagged: bool,  // Player marker, only shown while closed
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.kind == CellKind::Mine
    }
}

/// Rectangular board of cells, row-major
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    mine_count: usize,
    open_count: usize,
}

impl Grid {
    /// Create an all-empty, all-closed board; call `initialize` to lay mines
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            mine_count: 0,
            open_count: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells on the board
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Reset every cell and lay `mines` mines at random distinct positions
    /// The request is clamped to the board size so placement always terminates
    pub fn initialize<R: Rng + ?Sized>(&mut self, mines: usize, rng: &mut R) {
        let mines = mines.min(self.len());
        self.cells.fill(Cell::default());
        self.open_count = 0;
        self.mine_count = mines;

        let mut placed = 0;
        while placed < mines {
            // rejection sampling: redraw until we land on a cell without a mine
            let row = rng.gen_range(0..self.rows);
            let col = rng.gen_range(0..self.cols);
            let idx = row * self.cols + col;
            if !self.cells[idx].is_mine() {
                self.cells[idx].kind = CellKind::Mine;
                placed += 1;
            }
        }
        tracing::info!(rows = self.rows, cols = self.cols, mines, "grid initialized");
    }

    /// Bounds-checked lookup
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Snapshot of the cell at (row, col)
    /// Panics when out of bounds; callers keep coordinates inside the board
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        match self.get(row, col) {
            Some(cell) => *cell,
            None => panic!(
                "cell ({}, {}) outside {}x{} grid",
                row, col, self.rows, self.cols
            ),
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let (rows, cols) = (self.rows, self.cols);
        match self.index(row, col) {
            Some(i) => &mut self.cells[i],
            None => panic!("cell ({}, {}) outside {}x{} grid", row, col, rows, cols),
        }
    }

    /// Count mines among the up to 8 adjacent cells, clipped at the edges
    pub fn neighbor_mine_count(&self, row: usize, col: usize) -> usize {
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                if (r, c) == (row, col) {
                    continue;
                }
                if self.cell_at(r, c).is_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Open one cell; opening a mine opens the whole board
    /// Only closed→open transitions count towards `open_count`
    pub fn open_cell(&mut self, row: usize, col: usize) {
        let cell = self.cell_mut(row, col);
        let newly_opened = !cell.open;
        cell.open = true;
        let hit_mine = cell.is_mine();
        if newly_opened {
            self.open_count += 1;
        }

        if hit_mine {
            tracing::warn!(row, col, "mine opened, revealing board");
            for cell in self.cells.iter_mut().filter(|c| !c.open) {
                cell.open = true;
                self.open_count += 1;
            }
        } else if newly_opened && self.all_safe_open() {
            tracing::info!(open = self.open_count, "every safe cell is open");
        }
    }

    /// Flip the flag bit; open cells keep whatever bit they hold
    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        let cell = self.cell_mut(row, col);
        cell.flagged = !cell.flagged;
    }

    /// True once every non-mine cell has been opened
    pub fn all_safe_open(&self) -> bool {
        self.iter().all(|(_, c)| c.open || c.is_mine())
    }

    /// Iterate cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / cols, i % cols), cell))
    }

    #[cfg(test)]
    pub fn set_kind(&mut self, row: usize, col: usize, kind: CellKind) {
        let before = self.cell_at(row, col).kind;
        self.cell_mut(row, col).kind = kind;
        match (before, kind) {
            (CellKind::Empty, CellKind::Mine) => self.mine_count += 1,
            (CellKind::Mine, CellKind::Empty) => self.mine_count -= 1,
            _ => {}
        }
    }
}
