use generic_array::{ArrayLength, GenericArray};
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

/// Index struct to access elements in the [`Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridIndex {
    x: usize,
    y: usize,
    z: usize,
}

impl From<(usize, usize, usize)> for GridIndex {
    fn from(value: (usize, usize, usize)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<GridIndex> for [usize; 3] {
    fn from(value: GridIndex) -> Self {
        [value.x, value.y, value.z]
    }
}

impl Display for GridIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl GridIndex {
    /// Constructs a new [`GridIndex`].
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn z(&self) -> usize {
        self.z
    }

    /// Returns `true` if every coordinate is less than `size`.
    pub fn is_within(&self, size: usize) -> bool {
        self.x < size && self.y < size && self.z < size
    }

    /// Returns the index moved one step along `direction`,
    /// or [`None`] if any coordinate would become negative.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add_signed(direction[0])?,
            self.y.checked_add_signed(direction[1])?,
            self.z.checked_add_signed(direction[2])?,
        ))
    }
}

/// Per-axis step of a [`Line`], each component is -1, 0 or 1.
pub type Direction = [isize; 3];

/// A maximal straight run of cells that one player has to fill to win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    start: GridIndex,
    direction: Direction,
    len: usize,
}

impl Line {
    pub fn new(start: GridIndex, direction: Direction, len: usize) -> Self {
        Self {
            start,
            direction,
            len,
        }
    }

    pub fn start(&self) -> GridIndex {
        self.start
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the indices of the line, starting with `self.start`.
    pub fn iter(&self) -> LineIterator {
        LineIterator {
            current: Some(self.start),
            direction: self.direction,
            remaining: self.len,
        }
    }
}

/// An iterator along a [`Line`].
/// On each step it's moving the underlying [`GridIndex`] by the line direction.
/// Stops after `len` cells or when the index would leave the positive octant.
pub struct LineIterator {
    current: Option<GridIndex>,
    direction: Direction,
    remaining: usize,
}

impl Iterator for LineIterator {
    type Item = GridIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current?;
        self.remaining -= 1;
        self.current = current.step(self.direction);
        Some(current)
    }
}

/// Iterates over all coordinates of a cube with side `size`, `x` outermost and `z` innermost.
pub fn indices(size: usize) -> impl Iterator<Item = GridIndex> {
    (0..size).flat_map(move |x| {
        (0..size).flat_map(move |y| (0..size).map(move |z| GridIndex::new(x, y, z)))
    })
}

/// Enumerates every winning line of a cube with side `size`:
/// axis lines (rows, columns, aisles), diagonals inside each z-layer,
/// the four space diagonals and diagonals crossing the layers at fixed x or fixed y.
///
/// Yields `3 * size^2 + 6 * size + 4` lines.
pub fn lines(size: usize) -> Vec<Line> {
    if size == 0 {
        return Vec::new();
    }
    let last = size - 1;
    let mut lines = Vec::with_capacity(3 * size * size + 6 * size + 4);

    for a in 0..size {
        for b in 0..size {
            lines.push(Line::new(GridIndex::new(b, 0, a), [0, 1, 0], size));
            lines.push(Line::new(GridIndex::new(0, b, a), [1, 0, 0], size));
            lines.push(Line::new(GridIndex::new(a, b, 0), [0, 0, 1], size));
        }
    }

    for z in 0..size {
        lines.push(Line::new(GridIndex::new(0, 0, z), [1, 1, 0], size));
        lines.push(Line::new(GridIndex::new(last, 0, z), [-1, 1, 0], size));
    }

    lines.push(Line::new(GridIndex::new(0, 0, 0), [1, 1, 1], size));
    lines.push(Line::new(GridIndex::new(last, 0, 0), [-1, 1, 1], size));
    lines.push(Line::new(GridIndex::new(0, last, 0), [1, -1, 1], size));
    lines.push(Line::new(GridIndex::new(last, last, 0), [-1, -1, 1], size));

    for x in 0..size {
        lines.push(Line::new(GridIndex::new(x, 0, 0), [0, 1, 1], size));
        lines.push(Line::new(GridIndex::new(x, last, 0), [0, -1, 1], size));
    }

    for y in 0..size {
        lines.push(Line::new(GridIndex::new(0, y, 0), [1, 0, 1], size));
        lines.push(Line::new(GridIndex::new(last, y, 0), [-1, 0, 1], size));
    }

    lines
}

type Row<T, N> = GenericArray<T, N>;
type Layer<T, N> = GenericArray<Row<T, N>, N>;

/// Three-dimensional fixed-length cube that stores values and allows to mutate them.
/// Side length is defined by generic parameter `N`, elements are addressed as `[x][y][z]`.
#[derive(Clone, Debug)]
pub struct Grid<T, N: ArrayLength> {
    contents: GenericArray<Layer<T, N>, N>,
}

impl<T: Default, N: ArrayLength> Default for Grid<T, N> {
    fn default() -> Self {
        Self {
            contents: Default::default(),
        }
    }
}

impl<T: Display, N: ArrayLength> Display for Grid<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let size = Self::size();
        for z in 0..size {
            writeln!(f, "layer {}:", z)?;
            for y in 0..size {
                for x in 0..size {
                    write!(f, "{}", self[GridIndex::new(x, y, z)])?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T, N: ArrayLength> Index<GridIndex> for Grid<T, N> {
    type Output = T;

    fn index(&self, index: GridIndex) -> &Self::Output {
        &self.contents[index.x()][index.y()][index.z()]
    }
}

impl<T, N: ArrayLength> IndexMut<GridIndex> for Grid<T, N> {
    fn index_mut(&mut self, index: GridIndex) -> &mut Self::Output {
        &mut self.contents[index.x()][index.y()][index.z()]
    }
}

impl<T, N: ArrayLength> Grid<T, N> {
    /// Side length of the cube.
    pub fn size() -> usize {
        N::to_usize()
    }

    pub fn get(&self, index: GridIndex) -> Option<&T> {
        index.is_within(Self::size()).then(|| &self[index])
    }

    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        if index.is_within(Self::size()) {
            Some(&mut self[index])
        } else {
            None
        }
    }

    /// Returns an iterator to indexed grid elements, `x` outermost and `z` innermost.
    pub fn all_indexed(&self) -> impl Iterator<Item = (GridIndex, &T)> {
        self.contents.iter().enumerate().flat_map(|(x, layer)| {
            layer.iter().enumerate().flat_map(move |(y, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(z, val)| (GridIndex::new(x, y, z), val))
            })
        })
    }

    /// Returns an iterator over the elements of `line`.
    pub fn line_iter(&self, line: Line) -> impl Iterator<Item = &T> {
        line.iter().map(move |index| &self[index])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use generic_array::typenum;
    use std::collections::HashSet;

    #[test]
    fn test_step() {
        let index = GridIndex::new(1, 0, 2);
        assert_eq!(index.step([1, 1, -1]), Some(GridIndex::new(2, 1, 1)));
        assert_eq!(index.step([0, -1, 0]), None);
    }

    #[test]
    fn test_line_iter() {
        let line = Line::new(GridIndex::new(3, 3, 0), [-1, -1, 1], 4);
        itertools::assert_equal(
            line.iter(),
            [
                GridIndex::new(3, 3, 0),
                GridIndex::new(2, 2, 1),
                GridIndex::new(1, 1, 2),
                GridIndex::new(0, 0, 3),
            ],
        );
    }

    #[test]
    fn test_lines_count() {
        assert_eq!(lines(3).len(), 49);
        assert_eq!(lines(4).len(), 76);
        assert_eq!(lines(5).len(), 109);
    }

    #[test]
    fn test_lines_are_unique_and_inside() {
        for size in 3..=5 {
            let mut seen = HashSet::new();
            for line in lines(size) {
                let cells: Vec<_> = line.iter().collect();
                assert_eq!(cells.len(), size);
                assert!(cells.iter().all(|index| index.is_within(size)));

                let mut key = cells.clone();
                key.sort_by_key(|index| <[usize; 3]>::from(*index));
                assert!(seen.insert(key), "line {:?} is enumerated twice", line);
            }
        }
    }

    #[test]
    fn test_every_cell_is_covered() {
        let size = 4;
        let covered: HashSet<_> = lines(size).iter().flat_map(|line| line.iter()).collect();
        assert_eq!(covered.len(), size * size * size);
    }

    #[test]
    fn test_all_indexed() {
        let mut grid = Grid::<usize, typenum::U2>::default();
        grid[GridIndex::new(1, 0, 1)] = 1;
        itertools::assert_equal(
            grid.all_indexed(),
            [
                (GridIndex::new(0, 0, 0), &0usize),
                (GridIndex::new(0, 0, 1), &0usize),
                (GridIndex::new(0, 1, 0), &0usize),
                (GridIndex::new(0, 1, 1), &0usize),
                (GridIndex::new(1, 0, 0), &0usize),
                (GridIndex::new(1, 0, 1), &1usize),
                (GridIndex::new(1, 1, 0), &0usize),
                (GridIndex::new(1, 1, 1), &0usize),
            ],
        );
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::<usize, typenum::U3>::default();
        assert_eq!(grid.get(GridIndex::new(2, 2, 2)), Some(&0));
        assert_eq!(grid.get(GridIndex::new(0, 3, 0)), None);
    }
}
