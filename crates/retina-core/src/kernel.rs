use anyhow::{Context, Result};

/// Row-major 3x3 convolution kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel3x3(pub [[f32; 3]; 3]);

impl Kernel3x3 {
    pub fn identity() -> Self {
        Self([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])
    }

    /// Build a kernel from nine text cells, row-major.
    ///
    /// Cells are trimmed and accept integers or decimals. The error names
    /// the first offending cell as `row N, column M` (1-based).
    pub fn parse(cells: &[String; 9]) -> Result<Self> {
        let mut k = [[0.0_f32; 3]; 3];
        for (i, cell) in cells.iter().enumerate() {
            let (row, col) = (i / 3, i % 3);
            let trimmed = cell.trim();
            anyhow::ensure!(
                !trimmed.is_empty(),
                "kernel cell at row {}, column {} is empty",
                row + 1,
                col + 1
            );
            let value: f32 = trimmed.parse().with_context(|| {
                format!(
                    "kernel cell at row {}, column {} is not a number: {trimmed:?}",
                    row + 1,
                    col + 1
                )
            })?;
            anyhow::ensure!(
                value.is_finite(),
                "kernel cell at row {}, column {} is not finite",
                row + 1,
                col + 1
            );
            k[row][col] = value;
        }
        Ok(Self(k))
    }

    /// Flat row-major coefficients.
    pub fn as_slice(&self) -> [f32; 9] {
        let [a, b, c] = self.0;
        [a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]]
    }

    /// Text rendering used to seed the entry grid.
    pub fn to_cells(&self) -> [String; 9] {
        self.as_slice().map(|v| format!("{v}"))
    }
}

impl Default for Kernel3x3 {
    fn default() -> Self {
        Self::identity()
    }
}
