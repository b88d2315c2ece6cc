use std::fmt;
use std::str::FromStr;

/// Direction the blank travels. The neighbouring tile slides the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// (dx, dy) applied to the blank; y grows downwards.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Errors raised while building a board from external input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("empty input")]
    EmptyInput,
    #[error("malformed header '{0}', expected \"<width> <height>\"")]
    MalformedHeader(String),
    #[error("board dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("board {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },
    #[error("cell '{0}' is not a non-negative integer")]
    BadCell(String),
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("value {value} out of range, cells must lie in 0..{limit}")]
    ValueOutOfRange { value: u32, limit: usize },
    #[error("value {0} appears more than once")]
    DuplicateValue(u32),
}

/// A W x H sliding tile grid holding each of 0..W*H exactly once.
///
/// Cells are stored row-major. The blank (0) position is cached and kept in
/// sync by [`Board::apply_move`], the only mutator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<u32>,
    blank_x: usize,
    blank_y: usize,
}

impl Board {
    /// Builds a board from row-major cells, rejecting anything that is not a
    /// permutation of 0..width*height.
    pub fn new(width: usize, height: usize, cells: Vec<u32>) -> Result<Self, BoardError> {
        let limit = Self::cell_count(width, height)?;
        if cells.len() != limit {
            return Err(BoardError::CellCount {
                expected: limit,
                found: cells.len(),
            });
        }

        let mut seen = vec![false; limit];
        let mut blank = 0;
        for (index, &value) in cells.iter().enumerate() {
            let slot = value as usize;
            if slot >= limit {
                return Err(BoardError::ValueOutOfRange { value, limit });
            }
            if seen[slot] {
                return Err(BoardError::DuplicateValue(value));
            }
            seen[slot] = true;
            if value == 0 {
                blank = index;
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            blank_x: blank % width,
            blank_y: blank / width,
        })
    }

    /// Checked `width * height`; also rejects empty boards and sizes whose
    /// values would not fit a cell.
    fn cell_count(width: usize, height: usize) -> Result<usize, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        match width.checked_mul(height) {
            Some(count) if count <= u32::MAX as usize => Ok(count),
            _ => Err(BoardError::TooLarge { width, height }),
        }
    }

    /// The canonical goal for the given dimensions: 1..W*H-1 then the blank.
    ///
    /// Both dimensions must be positive.
    pub fn solved(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "empty {width}x{height} board");
        let count = width * height;
        let mut cells: Vec<u32> = (1..count as u32).collect();
        cells.push(0);

        Self {
            width,
            height,
            cells,
            blank_x: width - 1,
            blank_y: height - 1,
        }
    }

    /// Goal configuration with the same dimensions as `self`.
    pub fn solved_reference(&self) -> Self {
        Self::solved(self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x]
    }

    pub fn blank(&self) -> (usize, usize) {
        (self.blank_x, self.blank_y)
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Slides the blank one step. Returns false, leaving the board
    /// untouched, when the blank sits on the edge in that direction.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        let (dx, dy) = movement.as_offset();

        let new_x = self.blank_x as isize + dx;
        let new_y = self.blank_y as isize + dy;

        if new_x >= 0 && new_x < self.width as isize && new_y >= 0 && new_y < self.height as isize
        {
            let new_x = new_x as usize;
            let new_y = new_y as usize;
            let from = new_y * self.width + new_x;
            let to = self.blank_y * self.width + self.blank_x;

            self.cells.swap(from, to);

            self.blank_x = new_x;
            self.blank_y = new_y;
            true
        } else {
            false
        }
    }

    /// Clone-and-move; `None` for an edge move.
    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let mut next = self.clone();
        if next.apply_move(movement) {
            Some(next)
        } else {
            None
        }
    }

    pub fn is_solved(&self) -> bool {
        let last = self.cells.len() - 1;
        self.cells
            .iter()
            .enumerate()
            .all(|(i, &value)| if i == last { value == 0 } else { value == i as u32 + 1 })
    }

    /// Polynomial hash (seed 17, base 31) over the cells in row-major order.
    pub fn fingerprint(&self) -> u64 {
        self.cells.iter().fold(17u64, |hash, &value| {
            hash.wrapping_mul(31).wrapping_add(u64::from(value))
        })
    }

    /// Whether the goal is reachable at all.
    ///
    /// On a single row or column tiles can never pass each other, so only
    /// boards whose tiles are already in order qualify. Otherwise a
    /// horizontal move never changes the inversion count, and a vertical move
    /// jumps a tile over W-1 others: with odd W the inversion parity is
    /// invariant, with even W it flips together with the blank row.
    pub fn is_solvable(&self) -> bool {
        if self.width == 1 || self.height == 1 {
            return self
                .cells
                .iter()
                .filter(|&&value| value != 0)
                .zip(1u32..)
                .all(|(&value, expected)| value == expected);
        }

        let inversions = Self::count_inversions(&self.cells);

        if self.width % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank_y) % 2 == (self.height - 1) % 2
        }
    }

    fn count_inversions(flattened: &[u32]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses `"<width> <height>"` followed by `height` rows of `width`
    /// whitespace separated values.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = lines.next().ok_or(BoardError::EmptyInput)?;
        let dims: Vec<usize> = header
            .split_whitespace()
            .map(|t| t.parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| BoardError::MalformedHeader(header.to_string()))?;
        let (width, height) = match dims.as_slice() {
            [w, h] => (*w, *h),
            _ => return Err(BoardError::MalformedHeader(header.to_string())),
        };
        Self::cell_count(width, height)?;

        let mut cells = Vec::new();
        let mut rows = 0;
        for line in lines {
            let before = cells.len();
            for token in line.split_whitespace() {
                let value = token
                    .parse::<u32>()
                    .map_err(|_| BoardError::BadCell(token.to_string()))?;
                cells.push(value);
            }
            let found = cells.len() - before;
            if found != width {
                return Err(BoardError::RowWidth {
                    row: rows,
                    expected: width,
                    found,
                });
            }
            rows += 1;
        }
        if rows != height {
            return Err(BoardError::RowCount {
                expected: height,
                found: rows,
            });
        }

        Self::new(width, height, cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
