//! Fixed-dimension term and item vectors

use serde::{Deserialize, Serialize};

/// Raw embedding vector. Unlike query-side unit vectors, the components are
/// kept as composed so SUM and MEAN magnitudes survive persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
	pub fn new(data: Vec<f32>) -> Self {
		Self(data)
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.0
	}

	pub fn dimension(&self) -> usize {
		self.0.len()
	}

	pub fn dot(&self, other: &Self) -> f32 {
		self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
	}

	/// Euclidean (L2) length, accumulated in f64 so large components
	/// cannot overflow the sum of squares
	pub fn norm(&self) -> f64 {
		self.0
			.iter()
			.map(|&x| f64::from(x) * f64::from(x))
			.sum::<f64>()
			.sqrt()
	}

	/// Unit-length copy, `None` for a zero vector
	pub fn normalized(&self) -> Option<Self> {
		let norm = self.norm();
		if norm > 0.0 && norm.is_finite() {
			Some(Self(self.0.iter().map(|&x| (f64::from(x) / norm) as f32).collect()))
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dot_of_orthogonal_and_parallel() {
		let x = Embedding::new(vec![1.0, 0.0]);
		let y = Embedding::new(vec![0.0, 3.0]);
		let x2 = Embedding::new(vec![4.0, 0.0]);

		assert_eq!(x.dot(&y), 0.0);
		assert_eq!(x.dot(&x2), 4.0);
	}

	#[test]
	fn zero_vector_has_no_direction() {
		let zero = Embedding::new(vec![0.0, 0.0]);
		assert_eq!(zero.norm(), 0.0);
		assert!(zero.normalized().is_none());
	}

	#[test]
	fn large_components_still_normalize() {
		let big = Embedding::new(vec![1e20, 1e20]);
		assert!(big.norm().is_finite());

		let unit = big.normalized().unwrap();
		let expected = std::f32::consts::FRAC_1_SQRT_2;
		assert!(unit.as_slice().iter().all(|v| (v - expected).abs() < 1e-6));
	}

	#[test]
	fn normalized_has_unit_length() {
		let v = Embedding::new(vec![3.0, 4.0]).normalized().unwrap();
		assert!((v.norm() - 1.0).abs() < 1e-6);
		assert_eq!(v.as_slice(), &[0.6, 0.8]);
	}
}
