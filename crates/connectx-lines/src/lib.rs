#![no_std]

//! Line geometry for drop-board games.
//!
//! Everything here works on board dimensions and `(row, column)` coordinates
//! only; no cell contents are ever read. Row 0 is the bottom of the board.

/// Size of a rectangular board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Returns true if `(row, column)` lies on the board
    pub const fn contains(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows && (column as usize) < self.columns
    }
}

/// One of the four alignment directions.
///
/// Each direction is a unit step `(row_delta, column_delta)`. Only the
/// "forward" half of each line is listed; the opposite half is walked by
/// negating the delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Row and column increase together
    DiagonalAscending,
    /// Row increases while column decreases
    DiagonalDescending,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalAscending,
        Direction::DiagonalDescending,
    ];

    /// Unit step `(row_delta, column_delta)` of this direction
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalAscending => (1, 1),
            Direction::DiagonalDescending => (1, -1),
        }
    }
}

/// Number of `delta` steps that can be taken from `pos` while staying in `[0, extent)`.
/// A zero delta never leaves the range.
fn steps_within(pos: usize, delta: isize, extent: usize) -> usize {
    match delta {
        0 => usize::MAX,
        d if d > 0 => extent - 1 - pos,
        _ => pos,
    }
}

/// A straight run of `len` cells starting at `start` and stepping along `direction`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub start: (usize, usize),
    pub direction: Direction,
    pub len: usize,
}

impl Window {
    /// Cell at offset `t` from the start of the window
    pub fn cell(&self, t: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.delta();
        let row = self.start.0 as isize + dr * t as isize;
        let column = self.start.1 as isize + dc * t as isize;
        (row as usize, column as usize)
    }

    /// Iterates the cells of the window from its start
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len).map(move |t| self.cell(t))
    }

    /// Last cell of the window
    pub fn end(&self) -> (usize, usize) {
        self.cell(self.len.saturating_sub(1))
    }
}

/// The part of a line through `origin` that could host a K-length window
/// containing `origin`, clipped to the board.
///
/// `back` and `forward` count steps against and along the direction's delta.
/// For oblique directions the clipping honours whichever board edge (row or
/// column) is reached first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub origin: (usize, usize),
    pub direction: Direction,
    pub back: usize,
    pub forward: usize,
    pub run_length: usize,
}

impl Span {
    /// Number of cells covered by the span
    pub fn cell_count(&self) -> usize {
        self.back + self.forward + 1
    }

    /// Number of distinct K-length windows inside the span: `cells - (K - 1)`, or zero
    /// when the span is shorter than K.
    pub fn window_count(&self) -> usize {
        (self.cell_count() + 1).saturating_sub(self.run_length)
    }

    /// Iterates the K-length windows of the span, from the one reaching
    /// furthest back to the one reaching furthest forward.
    pub fn windows(self) -> impl Iterator<Item = Window> {
        let (dr, dc) = self.direction.delta();
        (0..self.window_count()).map(move |i| {
            let back = (self.back - i) as isize;
            let start = (
                (self.origin.0 as isize - dr * back) as usize,
                (self.origin.1 as isize - dc * back) as usize,
            );
            Window {
                start,
                direction: self.direction,
                len: self.run_length,
            }
        })
    }
}

/// Computes the span of cells along `direction` through `origin` in which every
/// K-length window containing `origin` must lie.
///
/// # Arguments
/// * `dims` - Board dimensions
/// * `origin` - The `(row, column)` the windows must contain; must be on the board
/// * `direction` - Alignment direction
/// * `run_length` - K, the number of aligned cells needed
pub fn span_through(dims: Dimensions, origin: (usize, usize), direction: Direction, run_length: usize) -> Span {
    let (row, column) = origin;
    let (dr, dc) = direction.delta();
    let reach = run_length.saturating_sub(1);

    let back = reach
        .min(steps_within(row, -dr, dims.rows))
        .min(steps_within(column, -dc, dims.columns));
    let forward = reach
        .min(steps_within(row, dr, dims.rows))
        .min(steps_within(column, dc, dims.columns));

    Span {
        origin,
        direction,
        back,
        forward,
        run_length,
    }
}

/// Enumerates every K-length window of `direction` on the whole board,
/// row-major by start cell.
pub fn windows_across(dims: Dimensions, direction: Direction, run_length: usize) -> impl Iterator<Item = Window> {
    let (dr, dc) = direction.delta();
    let reach = run_length.saturating_sub(1) as isize;
    (0..dims.rows)
        .flat_map(move |row| (0..dims.columns).map(move |column| (row, column)))
        .filter(move |&(row, column)| {
            run_length > 0 && dims.contains(row as isize + dr * reach, column as isize + dc * reach)
        })
        .map(move |start| Window {
            start,
            direction,
            len: run_length,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: Dimensions = Dimensions::new(6, 7);

    #[test]
    fn test_horizontal_span_is_clipped_by_columns() {
        let span = span_through(CLASSIC, (3, 1), Direction::Horizontal, 4);
        assert_eq!(span.back, 1);
        assert_eq!(span.forward, 3);
        assert_eq!(span.window_count(), 2);
    }

    #[test]
    fn test_vertical_span_in_the_middle() {
        let span = span_through(CLASSIC, (3, 5), Direction::Vertical, 4);
        assert_eq!(span.back, 3);
        assert_eq!(span.forward, 2);
        assert_eq!(span.window_count(), 3);
    }

    #[test]
    fn test_oblique_span_is_clipped_by_nearest_edge() {
        // Row 4 allows one step up, column 1 allows one step left.
        let span = span_through(CLASSIC, (4, 1), Direction::DiagonalAscending, 4);
        assert_eq!(span.back, 1);
        assert_eq!(span.forward, 1);
        assert_eq!(span.window_count(), 0);

        let span = span_through(CLASSIC, (0, 3), Direction::DiagonalDescending, 4);
        assert_eq!(span.back, 0);
        assert_eq!(span.forward, 3);
        assert_eq!(span.window_count(), 1);
    }

    #[test]
    fn test_span_windows_contain_origin() {
        for direction in Direction::ALL {
            let span = span_through(CLASSIC, (2, 3), direction, 4);
            for window in span.windows() {
                assert!(window.cells().any(|c| c == (2, 3)));
                assert!(window.cells().all(|(r, c)| CLASSIC.contains(r as isize, c as isize)));
            }
        }
    }

    fn first_window_through(origin: (usize, usize), direction: Direction) -> Option<Window> {
        span_through(CLASSIC, origin, direction, 4).windows().next()
    }

    #[test]
    fn test_windows_of_a_temporary_span() {
        let window = first_window_through((0, 0), Direction::Horizontal).unwrap();
        assert_eq!(window.start, (0, 0));
        assert_eq!(window.end(), (0, 3));
        assert!(first_window_through((5, 6), Direction::Vertical).is_some());
        assert!(first_window_through((0, 6), Direction::DiagonalAscending).is_none());
    }

    #[test]
    fn test_window_counts_across_classic_board() {
        assert_eq!(windows_across(CLASSIC, Direction::Horizontal, 4).count(), 24);
        assert_eq!(windows_across(CLASSIC, Direction::Vertical, 4).count(), 21);
        assert_eq!(windows_across(CLASSIC, Direction::DiagonalAscending, 4).count(), 12);
        assert_eq!(windows_across(CLASSIC, Direction::DiagonalDescending, 4).count(), 12);
    }

    #[test]
    fn test_descending_window_walks_left() {
        let window = windows_across(CLASSIC, Direction::DiagonalDescending, 4)
            .next()
            .unwrap();
        assert_eq!(window.start, (0, 3));
        assert_eq!(window.end(), (3, 0));
    }
}
