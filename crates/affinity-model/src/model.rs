use crate::error::{ModelError, Result};

/// Dense row-major input matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// A single-row matrix of shape (1, row.len()).
    pub fn single(row: Vec<f64>) -> Self {
        Self { cols: row.len(), data: row }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ModelError::ShapeMismatch { expected: cols, actual: row.len() });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { cols, data })
    }

    pub fn n_rows(&self) -> usize {
        if self.cols == 0 { 0 } else { self.data.len() / self.cols }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols.max(1))
    }
}

/// A pre-trained regressor from fingerprint bits to pKi.
///
/// Implementations are immutable after loading and shared across request
/// handlers, so they must be `Send + Sync`.
pub trait AffinityModel: Send + Sync {
    fn n_features(&self) -> usize;

    fn kind(&self) -> &str;

    /// One prediction per input row.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Predict a single row.
    fn predict_one(&self, row: Vec<f64>) -> Result<f64> {
        self.predict(&FeatureMatrix::single(row))?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Inference("model returned no prediction".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sum;

    impl AffinityModel for Sum {
        fn n_features(&self) -> usize {
            3
        }

        fn kind(&self) -> &str {
            "sum"
        }

        fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
            Ok(features.rows().map(|r| r.iter().sum()).collect())
        }
    }

    #[test]
    fn test_matrix_shapes() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!((m.n_rows(), m.cols()), (2, 2));
        assert_eq!(m.rows().nth(1).unwrap(), &[3.0, 4.0]);
        assert!(FeatureMatrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_err());
        assert_eq!(FeatureMatrix::single(vec![0.0; 1024]).cols(), 1024);
    }

    #[test]
    fn test_predict_one_uses_first_row() {
        assert_eq!(Sum.predict_one(vec![1.0, 2.0, 3.0]).unwrap(), 6.0);
    }
}
