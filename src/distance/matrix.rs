//! Dense travel-cost matrix.

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Entries are non-negative travel costs between location indices in
/// `[0, n)`. The matrix need not be symmetric — `get(a, b)` and
/// `get(b, a)` may differ — and `get(i, i)` is defined (conventionally
/// `0.0`). The matrix is immutable for the lifetime of a solve: callers
/// build it once (applying whatever unit conversion, stay-time penalty,
/// or correction factor they need) and hand it to [`crate::ga::GaSolver`]
/// read-only.
///
/// # Examples
///
/// ```
/// use stsp_ga::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 5.0, 8.0,
///     5.0, 0.0, 4.0,
///     8.0, 4.0, 0.0,
/// ]).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 1), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a `size`×`size` matrix initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit n×n grid in row-major order.
    ///
    /// Returns `None` if `data.len() != size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the travel cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel cost from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Returns the full outbound row for `from`, i.e. `get(from, j)` for
    /// every `j`. Used by the mutation operator's candidate ordering and
    /// by the population initializers' candidate filtering.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.size;
        &self.data[start..start + self.size]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given
    /// tolerance. Symmetry is not required by the solver; this is a
    /// diagnostic for callers.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sums travel cost along consecutive pairs of `path`.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
