//! The debug floor grid drawn through the gizmos every frame.
use glam::{Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub start: Vec3,
    pub end: Vec3,
    pub colour: Vec4,
}

/// A square grid of lines on the y = 0 plane, one unit apart.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    /// Lines run from `-half_extent` to `half_extent` on both axes.
    pub half_extent: i32,
    pub colour: Vec4,
    /// Colour of the two lines crossing the origin.
    pub centre_colour: Vec4,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            half_extent: 10,
            colour: Vec4::new(0.0, 0.0, 0.0, 1.0),
            centre_colour: Vec4::ONE,
        }
    }
}

impl Grid {
    /// Largest half extent drawn; larger values are clamped to it.
    pub const MAX_HALF_EXTENT: i32 = i32::MAX / 2;

    /// -1 for negative extents, which makes the line range empty.
    fn clamped_extent(&self) -> i32 {
        self.half_extent.clamp(-1, Self::MAX_HALF_EXTENT)
    }

    /// Number of lines [`Grid::lines`] yields.
    pub fn line_count(&self) -> usize {
        let per_axis = 2 * self.clamped_extent() + 1;
        usize::try_from(per_axis).map_or(0, |per_axis| 2 * per_axis)
    }

    /// Every line of the grid, alternating one parallel to Z and one parallel to X.
    pub fn lines(&self) -> impl Iterator<Item = GridLine> + '_ {
        let n = self.clamped_extent();
        let extent = n as f32;
        (0..=2 * n).flat_map(move |i| {
            let offset = (i - n) as f32;
            let colour = if i == n {
                self.centre_colour
            } else {
                self.colour
            };
            [
                GridLine {
                    start: Vec3::new(offset, 0.0, extent),
                    end: Vec3::new(offset, 0.0, -extent),
                    colour,
                },
                GridLine {
                    start: Vec3::new(extent, 0.0, offset),
                    end: Vec3::new(-extent, 0.0, offset),
                    colour,
                },
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_42_lines() {
        let grid = Grid::default();
        assert_eq!(grid.lines().count(), 42);
        assert_eq!(grid.line_count(), 42);
    }

    #[test]
    fn only_centre_lines_are_highlighted() {
        let grid = Grid::default();
        let centre: Vec<_> = grid
            .lines()
            .filter(|line| line.colour == grid.centre_colour)
            .collect();
        assert_eq!(centre.len(), 2);
        assert_eq!(centre[0].start, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(centre[1].start, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn lines_lie_on_the_floor() {
        for line in Grid::default().lines() {
            assert_eq!(line.start.y, 0.0);
            assert_eq!(line.end.y, 0.0);
            assert_eq!(line.start.distance(line.end), 20.0);
        }
    }

    #[test]
    fn negative_extent_is_empty() {
        let grid = Grid {
            half_extent: -1,
            ..Grid::default()
        };
        assert_eq!(grid.lines().count(), 0);
        assert_eq!(grid.line_count(), 0);
    }

    #[test]
    fn huge_extent_is_clamped() {
        let far = Grid::MAX_HALF_EXTENT as f32;
        for half_extent in [Grid::MAX_HALF_EXTENT + 1, i32::MAX] {
            let grid = Grid {
                half_extent,
                ..Grid::default()
            };
            let first = grid.lines().next().unwrap();
            assert_eq!(first.start, Vec3::new(-far, 0.0, far));
            assert_eq!(first.end, Vec3::new(-far, 0.0, -far));
            assert_eq!(grid.line_count(), 2 * (i32::MAX as usize));
        }
    }

    #[test]
    fn most_negative_extent_is_empty() {
        let grid = Grid {
            half_extent: i32::MIN,
            ..Grid::default()
        };
        assert_eq!(grid.lines().next(), None);
        assert_eq!(grid.line_count(), 0);
    }
}
