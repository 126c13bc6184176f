use crate::engine::{Board, CellKind};
use crate::error::GridError;
use crate::solver::Path;
use std::io::{BufRead, Read};
use tracing::debug;

/// Which numbering `format_path` uses for rows and columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordinateBase {
    /// Rows and columns start at 1.
    #[default]
    OneBased,
    /// Rows and columns start at 0, matching the library's own indices.
    ZeroBased,
}

impl CoordinateBase {
    fn offset(self) -> usize {
        match self {
            CoordinateBase::OneBased => 1,
            CoordinateBase::ZeroBased => 0,
        }
    }
}

/// Maps a single grid token to the kind of cell it describes.
///
/// Only the first character matters and it is compared case-insensitively:
/// - `s` is the start, `g` the goal.
/// - `w` or `#` is a wall.
/// - anything else is free space. Suffixes such as the `1` in `s1` or the `5` in
///   `+5` are ignored.
///
/// # Examples
/// ```
/// use gridpath_solver::engine::CellKind;
/// use gridpath_solver::utils::cell_kind_from_token;
/// assert_eq!(cell_kind_from_token("S1"), CellKind::Start);
/// assert_eq!(cell_kind_from_token("w0"), CellKind::Wall);
/// assert_eq!(cell_kind_from_token("+5"), CellKind::Free);
/// ```
pub fn cell_kind_from_token(token: &str) -> CellKind {
    match token.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('s') => CellKind::Start,
        Some('g') => CellKind::Goal,
        Some('w') | Some('#') => CellKind::Wall,
        _ => CellKind::Free,
    }
}

fn parse_row(line: &str) -> Vec<CellKind> {
    line.split_whitespace().map(cell_kind_from_token).collect()
}

fn parse_header(line: &str) -> Result<(usize, usize), GridError> {
    let malformed = || {
        GridError::MalformedGrid(format!(
            "header `{}` must be two positive integers: rows columns",
            line.trim()
        ))
    };

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(malformed());
    }
    let rows: usize = parts[0].parse().map_err(|_| malformed())?;
    let cols: usize = parts[1].parse().map_err(|_| malformed())?;
    if rows == 0 || cols == 0 {
        return Err(malformed());
    }
    Ok((rows, cols))
}

/// Parses a complete grid description into a `Board`.
///
/// The first non-blank line holds the row and column counts. The next `rows`
/// non-blank lines each hold exactly `columns` whitespace-separated tokens (see
/// [`cell_kind_from_token`]). Blank lines are ignored anywhere.
///
/// Sentinels are not checked here; see [`Board::endpoints`].
///
/// # Errors
/// `GridError::MalformedGrid` if the header is missing or invalid, a row has the
/// wrong number of tokens, there are fewer rows than declared, or non-blank lines
/// follow the last declared row.
///
/// # Examples
/// ```
/// use gridpath_solver::utils::board_from_str;
/// let board = board_from_str("2 3\ns . w\n. . g\n").unwrap();
/// assert_eq!((board.rows(), board.cols()), (2, 3));
///
/// assert!(board_from_str("2 3\ns . w\n").is_err()); // missing a row
/// assert!(board_from_str("2 3\ns . w\n. g\n").is_err()); // short row
/// ```
pub fn board_from_str(input: &str) -> Result<Board, GridError> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| GridError::MalformedGrid("input is empty".to_string()))?;
    let (rows, cols) = parse_header(header)?;

    // The header is untrusted, so the buffer grows with the rows actually read.
    let mut grid = Vec::new();
    for r in 0..rows {
        let line = lines.next().ok_or_else(|| {
            GridError::MalformedGrid(format!("expected {} rows, found {}", rows, r))
        })?;
        let row = parse_row(line);
        if row.len() != cols {
            return Err(GridError::MalformedGrid(format!(
                "row {} has {} cells, expected {}",
                r,
                row.len(),
                cols
            )));
        }
        grid.push(row);
    }

    if let Some(extra) = lines.next() {
        return Err(GridError::MalformedGrid(format!(
            "unexpected input after {} rows: `{}`",
            rows,
            extra.trim()
        )));
    }

    let board = Board::from_kinds(grid)?;
    debug!(rows, cols, "parsed grid");
    Ok(board)
}

/// Reads everything from `reader` and parses it with [`board_from_str`].
///
/// # Errors
/// `GridError::Io` if reading fails, otherwise whatever `board_from_str` returns.
pub fn board_from_reader<R: BufRead>(mut reader: R) -> Result<Board, GridError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    board_from_str(&input)
}

/// Parses header-less rows into a `Board`, one string slice per row.
///
/// Every row must hold the same number of tokens. Mostly handy for tests and
/// small hand-written boards.
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, GridError> {
    Board::from_kinds(rows.iter().map(|line| parse_row(line)).collect())
}

/// Formats a path as its cell count followed by one `row col` line per cell.
///
/// # Examples
/// ```
/// use gridpath_solver::solver::{solve_bfs, SearchDirection};
/// use gridpath_solver::utils::{board_from_str_array, format_path, CoordinateBase};
///
/// let board = board_from_str_array(&["s g"]).unwrap();
/// let report = solve_bfs(&board, SearchDirection::Forward).unwrap();
/// let path = report.outcome.path().unwrap();
/// assert_eq!(format_path(path, CoordinateBase::OneBased), "2\n1 1\n1 2\n");
/// assert_eq!(format_path(path, CoordinateBase::ZeroBased), "2\n0 0\n0 1\n");
/// ```
pub fn format_path(path: &Path, base: CoordinateBase) -> String {
    let offset = base.offset();
    let mut output = format!("{}\n", path.len());
    for cell in path {
        output.push_str(&format!("{} {}\n", cell.row() + offset, cell.col() + offset));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Sentinel;
    use std::io::{self, Cursor, Read};

    #[test]
    fn test_cell_kind_from_token() {
        assert_eq!(cell_kind_from_token("s"), CellKind::Start);
        assert_eq!(cell_kind_from_token("G10"), CellKind::Goal);
        assert_eq!(cell_kind_from_token("W"), CellKind::Wall);
        assert_eq!(cell_kind_from_token("#"), CellKind::Wall);
        assert_eq!(cell_kind_from_token("."), CellKind::Free);
        assert_eq!(cell_kind_from_token("a3"), CellKind::Free);
        assert_eq!(cell_kind_from_token("-1"), CellKind::Free);
    }

    #[test]
    fn test_board_from_str_valid() {
        let board = board_from_str("3 4\ns . . .\n. w w .\n. . . g\n").unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.get_cell(1, 1).unwrap().kind(), CellKind::Wall);
        let (start, goal) = board.endpoints().unwrap();
        assert_eq!(start.position(), (0, 0));
        assert_eq!(goal.position(), (2, 3));
    }

    #[test]
    fn test_board_from_str_tolerates_blank_lines_and_spacing() {
        let board = board_from_str("\n  2   2 \n\ns   g\n\n.\t.\n\n").unwrap();
        assert_eq!((board.rows(), board.cols()), (2, 2));
    }

    #[test]
    fn test_board_from_str_suffixed_tokens() {
        let board = board_from_str("2 3\ns1 +2 w0\n*3 a1 g9\n").unwrap();
        assert_eq!(board.get_cell(0, 1).unwrap().kind(), CellKind::Free);
        assert_eq!(board.get_cell(0, 2).unwrap().kind(), CellKind::Wall);
        assert!(board.endpoints().is_ok());
    }

    #[test]
    fn test_board_from_str_empty_input() {
        let result = board_from_str("   \n\n");
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("empty")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_bad_header() {
        for input in ["3\n", "a b\n", "0 3\n", "2 -1\n", "2 2 2\n"] {
            let result = board_from_str(input);
            assert!(
                matches!(result, Err(GridError::MalformedGrid(ref msg)) if msg.contains("header")),
                "input {:?} gave {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_board_from_str_too_few_rows() {
        let result = board_from_str("3 2\ns .\n. g\n");
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("expected 3 rows, found 2")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_huge_header() {
        let result = board_from_str("18446744073709551615 2\ns g\n");
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("found 1")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_wrong_row_length() {
        let result = board_from_str("2 3\ns . .\n. g . .\n");
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("row 1 has 4 cells")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_trailing_rows() {
        let result = board_from_str("1 2\ns g\n. .\n");
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("unexpected input")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_does_not_check_sentinels() {
        let board = board_from_str("1 2\n. .\n").unwrap();
        assert!(matches!(
            board.start(),
            Err(GridError::MissingSentinel(Sentinel::Start))
        ));
    }

    #[test]
    fn test_board_from_reader() {
        let board = board_from_reader(Cursor::new("1 3\ns w g\n")).unwrap();
        assert_eq!(board.cols(), 3);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_board_from_reader_io_error() {
        let result = board_from_reader(io::BufReader::new(FailingReader));
        assert!(matches!(result, Err(GridError::Io(_))));
    }

    #[test]
    fn test_board_from_str_array_ragged() {
        assert!(matches!(
            board_from_str_array(&["s .", "g"]),
            Err(GridError::MalformedGrid(_))
        ));
    }
}
