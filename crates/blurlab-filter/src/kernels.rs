use std::fmt;

/// A dense 2D Gaussian kernel: `size * size` weights summing to 1.0.
///
/// The center tap sits at `(size/2, size/2)` with integer division, so an even
/// `size` is accepted and yields the slightly off-center kernel that
/// convention implies. Weights are fixed at construction; there are no
/// mutators.
#[derive(Debug, Clone)]
pub struct Kernel2d {
    weights: Vec<f32>,
    size: usize,
    sigma: f32,
}

impl Kernel2d {
    /// Builds a normalized 2D Gaussian kernel.
    ///
    /// The weight at offset `(dx, dy)` from the center is
    /// `exp(-(dx^2 + dy^2) / (2 * sigma^2))`; the amplitude coefficient
    /// cancels under sum-normalization and is omitted.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use blurlab_filter::Kernel2d;
    ///
    /// let kernel = Kernel2d::gaussian(3, 1.0);
    /// let sum = kernel.weights().iter().sum::<f32>();
    /// assert!((sum - 1.0).abs() < 1e-4);
    /// ```
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        assert!(size > 0, "kernel size must be positive");
        let center = (size / 2) as isize;
        let sigma_sq = sigma * sigma;
        let mut weights = Vec::with_capacity(size * size);
        for y in 0..size {
            let dy = (y as isize - center) as f32;
            for x in 0..size {
                let dx = (x as isize - center) as f32;
                weights.push((-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp());
            }
        }
        let norm = weights.iter().sum::<f32>();
        weights.iter_mut().for_each(|w| *w /= norm);
        Self {
            weights,
            size,
            sigma,
        }
    }

    /// Kernel side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sigma the kernel was built with.
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Flattened row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Index of the center tap along either axis.
    pub fn half(&self) -> usize {
        self.size / 2
    }
}

impl fmt::Display for Kernel2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "gaussian {}x{} sigma {}", self.size, self.size, self.sigma)?;
        for row in self.weights.chunks_exact(self.size) {
            for w in row {
                write!(f, " {w:.6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A 1D Gaussian kernel for the separable engine: `size` weights summing
/// to 1.0.
///
/// The 2D Gaussian is the outer product of this vector with itself, which is
/// what makes the two-pass decomposition exact.
#[derive(Debug, Clone)]
pub struct Kernel1d {
    weights: Vec<f32>,
    size: usize,
}

impl Kernel1d {
    /// Builds a normalized 1D Gaussian kernel, centered at `size/2`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        assert!(size > 0, "kernel size must be positive");
        let center = (size / 2) as isize;
        let sigma_sq = sigma * sigma;
        let mut weights = Vec::with_capacity(size);
        for x in 0..size {
            let dx = (x as isize - center) as f32;
            weights.push((-(dx * dx) / (2.0 * sigma_sq)).exp());
        }
        let norm = weights.iter().sum::<f32>();
        weights.iter_mut().for_each(|w| *w /= norm);
        Self { weights, size }
    }

    /// Kernel length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Normalized weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Index of the center tap.
    pub fn half(&self) -> usize {
        self.size / 2
    }
}

impl fmt::Display for Kernel1d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gaussian 1x{}", self.size)?;
        for w in &self.weights {
            write!(f, " {w:.6}")?;
        }
        Ok(())
    }
}
