//! Fixed-size character canvas.

use std::fmt;

/// Row-major `width × height` glyph buffer. Dimensions never change after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// A grid filled with `fill`.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: char) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    /// Row `y` as a slice; empty when out of range.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[char] {
        if y < self.height {
            &self.cells[y * self.width..(y + 1) * self.width]
        } else {
            &[]
        }
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[char]> + '_ {
        // chunks_exact(0) panics, zero-width grids have no rows to show anyway
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Owned text of each row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|r| r.iter().collect()).collect()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [char] {
        &mut self.cells
    }

    /// Count of cells holding `c`.
    #[must_use]
    pub fn count(&self, c: char) -> usize {
        self.cells.iter().filter(|&&g| g == c).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                fmt::Write::write_char(f, *c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_bounds() {
        let mut g = Grid::new(4, 3, '.');
        g.set(3, 2, '#');
        g.set(4, 0, 'x');
        g.set(0, 3, 'x');
        assert_eq!(g.get(3, 2), Some('#'));
        assert_eq!(g.get(4, 0), None);
        assert_eq!(g.count('x'), 0);
        assert_eq!(g.count('.'), 11);
    }

    #[test]
    fn rows_are_row_major() {
        let mut g = Grid::new(3, 2, ' ');
        g.set(1, 0, 'a');
        g.set(2, 1, 'b');
        assert_eq!(g.lines(), vec![" a ".to_owned(), "  b".to_owned()]);
        assert_eq!(g.row(1), &[' ', ' ', 'b']);
        assert!(g.row(2).is_empty());
        assert_eq!(g.rows().len(), 2);
        assert_eq!(g.to_string(), " a \n  b");
    }
}
