// Normal equations for ridge-penalised least squares, solved by Cholesky decomposition.

const PIVOT_TOLERANCE: f64 = 1e-12;

/// Accumulates `XᵀX` and `Xᵀy` one design row at a time.
#[derive(Debug, Clone)]
pub struct SymmetricSystem {
    size: usize,
    // Row-major `size × size`.
    gram: Vec<f64>,
    rhs: Vec<f64>,
}

impl SymmetricSystem {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            gram: vec![0.0; size * size],
            rhs: vec![0.0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn add_row(&mut self, x: &[f64], y: f64) {
        debug_assert_eq!(x.len(), self.size);
        for i in 0..self.size {
            if x[i] == 0.0 {
                continue;
            }
            self.rhs[i] += x[i] * y;
            // Lower triangle only; mirrored in `solve`.
            for j in 0..=i {
                self.gram[i * self.size + j] += x[i] * x[j];
            }
        }
    }

    /// Adds `penalty` to the diagonal entry of coefficient `index`.
    pub fn add_ridge(&mut self, index: usize, penalty: f64) {
        self.gram[index * self.size + index] += penalty;
    }

    /// Solves `(XᵀX + Λ) β = Xᵀy`. `None` when the matrix is not positive definite.
    pub fn solve(&self) -> Option<Vec<f64>> {
        let n = self.size;
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.gram[i * n + j];
                for k in 0..j {
                    sum -= l[i * n + k] * l[j * n + k];
                }
                if i == j {
                    // Pivots that vanish relative to the diagonal mean collinear columns.
                    let floor = self.gram[i * n + i].abs() * PIVOT_TOLERANCE;
                    if !(sum > floor) || !sum.is_finite() {
                        return None;
                    }
                    l[i * n + i] = sum.sqrt();
                } else {
                    l[i * n + j] = sum / l[j * n + j];
                }
            }
        }

        // Forward substitution: L z = b
        let mut z = vec![0.0; n];
        for i in 0..n {
            let mut sum = self.rhs[i];
            for k in 0..i {
                sum -= l[i * n + k] * z[k];
            }
            z[i] = sum / l[i * n + i];
        }

        // Back substitution: Lᵀ β = z
        let mut beta = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = z[i];
            for k in (i + 1)..n {
                sum -= l[k * n + i] * beta[k];
            }
            beta[i] = sum / l[i * n + i];
        }

        Some(beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_line() {
        let mut system = SymmetricSystem::new(2);
        for i in 0..10 {
            let x = i as f64;
            system.add_row(&[1.0, x], 3.0 + 2.0 * x);
        }
        let beta = system.solve().unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-9);
        assert!((beta[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ridge_shrinks_coefficient() {
        let mut plain = SymmetricSystem::new(1);
        let mut ridged = SymmetricSystem::new(1);
        for _ in 0..4 {
            plain.add_row(&[1.0], 1.0);
            ridged.add_row(&[1.0], 1.0);
        }
        ridged.add_ridge(0, 4.0);
        assert!((plain.solve().unwrap()[0] - 1.0).abs() < 1e-12);
        assert!((ridged.solve().unwrap()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_singular_system_is_rejected() {
        let mut system = SymmetricSystem::new(2);
        // Second column duplicates the first.
        system.add_row(&[1.0, 1.0], 1.0);
        system.add_row(&[2.0, 2.0], 2.0);
        assert!(system.solve().is_none());
    }
}
