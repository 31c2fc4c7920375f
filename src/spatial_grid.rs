/*
 * Spatial Grid
 *
 * Buckets particle indices into square cells the size of the link distance,
 * so any pair closer than that distance sits in the same or an adjacent cell.
 * Only used for large fields; the default field is small enough for the
 * plain pairwise pass.
 */

use vecmath::Vector2;

pub struct SpatialGrid {
    pub cell_size: f64,
    pub columns: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let columns = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        SpatialGrid {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        }
    }

    // Grid for linking `count` particles. Cells never get smaller than
    // max(width, height) / sqrt(count), which keeps the cell count near the
    // particle count however small the link distance is.
    pub fn for_field(link_distance: f64, width: f64, height: f64, count: usize) -> Self {
        let floor = width.max(height) / (count.max(1) as f64).sqrt();
        let cell_size = if floor > link_distance { floor } else { link_distance };
        SpatialGrid::new(cell_size, width, height)
    }

    // Particles that overshoot the surface are clamped into the border cells
    #[inline]
    fn cell_coords(&self, pos: Vector2<f64>) -> (usize, usize) {
        let column = (pos[0] / self.cell_size)
            .floor()
            .max(0.0)
            .min((self.columns - 1) as f64) as usize;
        let row = (pos[1] / self.cell_size)
            .floor()
            .max(0.0)
            .min((self.rows - 1) as f64) as usize;
        (column, row)
    }

    pub fn insert(&mut self, index: usize, pos: Vector2<f64>) {
        let (column, row) = self.cell_coords(pos);
        self.cells[row * self.columns + column].push(index);
    }

    // Indices greater than `index` found in the 3x3 block of cells around `pos`,
    // in ascending order
    pub fn later_neighbors(&self, index: usize, pos: Vector2<f64>, out: &mut Vec<usize>) {
        out.clear();
        let (column, row) = self.cell_coords(pos);
        let row_range = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        for check_row in row_range {
            let column_range = column.saturating_sub(1)..=(column + 1).min(self.columns - 1);
            for check_column in column_range {
                let cell = &self.cells[check_row * self.columns + check_column];
                out.extend(cell.iter().copied().filter(|&other| other > index));
            }
        }
        out.sort_unstable();
    }
}
