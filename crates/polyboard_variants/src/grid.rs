//! Square names such as `B2`: a column letter from `A` and a rank counted
//! from 1 at the bottom of the board.

use polyboard_core::Move;

/// Encoding of the passing move shared by every variant that allows it.
pub(crate) const PASS: Move = Move::from_raw(1 << 40);

/// A named square, possibly off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Square {
    pub(crate) file: u8,
    pub(crate) rank: u8,
}

impl Square {
    /// Square at a grid position, row 0 being the top row.
    pub(crate) fn from_grid(row: usize, column: usize, rows: usize) -> Self {
        Self {
            file: column as u8,
            rank: (rows - row) as u8,
        }
    }

    /// Grid position on a board of the given size.
    pub(crate) fn to_grid(self, rows: usize, columns: usize) -> Option<(usize, usize)> {
        let (file, rank) = (usize::from(self.file), usize::from(self.rank));
        (file < columns && (1..=rows).contains(&rank)).then(|| (rows - rank, file))
    }

    pub(crate) fn name(self) -> String {
        format!("{}{}", char::from(b'A' + self.file), self.rank)
    }

    pub(crate) fn code(self) -> u64 {
        (u64::from(self.file) << 4) | u64::from(self.rank)
    }

    pub(crate) fn from_code(code: u64) -> Self {
        Self {
            file: ((code >> 4) & 0xff) as u8,
            rank: (code & 0xf) as u8,
        }
    }

    /// Reads one square from the front of `text`.
    fn take(text: &[u8]) -> Option<(Self, &[u8])> {
        let (&letter, rest) = text.split_first()?;
        let (&digit, rest) = rest.split_first()?;
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || !(b'1'..=b'9').contains(&digit) {
            return None;
        }
        Some((
            Self {
                file: letter - b'A',
                rank: digit - b'0',
            },
            rest,
        ))
    }
}

/// Whether the text asks to pass.
pub(crate) fn is_pass(text: &str) -> bool {
    text.eq_ignore_ascii_case("pass")
}

/// Parses `B2` or a source and target pair `B2C3`.
pub(crate) fn parse_squares(text: &str) -> Option<(Square, Option<Square>)> {
    let (first, rest) = Square::take(text.as_bytes())?;
    if rest.is_empty() {
        return Some((first, None));
    }
    let (second, rest) = Square::take(rest)?;
    rest.is_empty().then_some((first, Some(second)))
}

/// Parses a placement, given as one square or as a pair whose second
/// square is the one released on.
pub(crate) fn parse_target(text: &str) -> Option<Square> {
    let (first, second) = parse_squares(text)?;
    Some(second.unwrap_or(first))
}

/// Parses a source and target pair.
pub(crate) fn parse_pair(text: &str) -> Option<(Square, Square)> {
    match parse_squares(text)? {
        (from, Some(to)) => Some((from, to)),
        (_, None) => None,
    }
}

/// The eight compass directions as row and column steps.
pub(crate) const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Steps from a grid position, staying on a board of the given size.
pub(crate) fn step(
    row: usize,
    column: usize,
    (dr, dc): (isize, isize),
    rows: usize,
    columns: usize,
) -> Option<(usize, usize)> {
    let row = row.checked_add_signed(dr)?;
    let column = column.checked_add_signed(dc)?;
    (row < rows && column < columns).then_some((row, column))
}
