//! Optional per-location preference weights.

/// A length-`n` vector of non-negative preference weights, one per
/// location index. Absent (`None`, at the call site) means "equal
/// weight" — the solver falls back to rewarding path length alone.
///
/// # Examples
///
/// ```
/// use stsp_ga::distance::ProfitVector;
///
/// let w = ProfitVector::from_values(vec![0.0, 5.0, 5.0]).unwrap();
/// assert_eq!(w.get(1), 5.0);
/// assert_eq!(w.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ProfitVector {
    weights: Vec<f64>,
}

impl ProfitVector {
    /// Creates a profit vector from explicit weights.
    ///
    /// Returns `None` if any weight is negative or non-finite.
    pub fn from_values(weights: Vec<f64>) -> Option<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        Some(Self { weights })
    }

    /// Returns the weight of location `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.weights[index]
    }

    /// Number of locations this vector covers.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if this vector covers zero locations.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sums the weights of every location index in `path`, duplicates
    /// counted once per occurrence.
    pub fn sum_over(&self, path: &[usize]) -> f64 {
        path.iter().map(|&i| self.weights[i]).sum()
    }
}
