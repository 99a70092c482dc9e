//! Subject-level resampling with counter-based seeding.
//!
//! A bootstrap draw selects whole subjects, so a subject's minuend,
//! subtrahend and difference always travel together. Each replicate gets
//! its own generator seeded from `(seed, replicate index)`, which makes the
//! replicate sequence independent of how work is split across threads.

use rand::Rng;

use crate::types::SeriesView;

/// Derive a well-mixed seed for stream `counter` of a run seeded with `seed`.
///
/// Uses the SplitMix64 finalizer, so neighbouring counters map to
/// uncorrelated seeds.
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed ^ counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fill `indices` with subject indices drawn uniformly with replacement from `0..n`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn resample_indices_into<R: Rng + ?Sized>(n: usize, rng: &mut R, indices: &mut [usize]) {
    assert!(n > 0, "Cannot resample from an empty series");
    for slot in indices.iter_mut() {
        *slot = rng.random_range(0..n);
    }
}

/// Reusable scratch space for building resampled or leave-one-out series.
#[derive(Debug, Clone)]
pub(crate) struct ResampleBuffers {
    indices: Vec<usize>,
    differences: Vec<f64>,
    minuend: Vec<f64>,
    subtrahend: Vec<f64>,
    has_raw: bool,
}

impl ResampleBuffers {
    /// Allocate buffers for series of length `n`.
    pub(crate) fn new(n: usize, has_raw: bool) -> Self {
        let raw_len = if has_raw { n } else { 0 };
        Self {
            indices: vec![0; n],
            differences: Vec::with_capacity(n),
            minuend: Vec::with_capacity(raw_len),
            subtrahend: Vec::with_capacity(raw_len),
            has_raw,
        }
    }

    /// Draw a bootstrap resample of `source` into the buffers.
    pub(crate) fn draw<R: Rng + ?Sized>(&mut self, source: &SeriesView<'_>, rng: &mut R) {
        let n = source.len();
        self.indices.resize(n, 0);
        resample_indices_into(n, rng, &mut self.indices);

        self.differences.clear();
        self.differences
            .extend(self.indices.iter().map(|&i| source.differences[i]));

        if let (true, Some((a, b))) = (self.has_raw, source.raw) {
            self.minuend.clear();
            self.minuend.extend(self.indices.iter().map(|&i| a[i]));
            self.subtrahend.clear();
            self.subtrahend.extend(self.indices.iter().map(|&i| b[i]));
        }
    }

    /// Copy `source` without subject `left_out` into the buffers.
    pub(crate) fn leave_one_out(&mut self, source: &SeriesView<'_>, left_out: usize) {
        fn skip_into(dst: &mut Vec<f64>, src: &[f64], left_out: usize) {
            dst.clear();
            dst.extend_from_slice(&src[..left_out]);
            dst.extend_from_slice(&src[left_out + 1..]);
        }

        skip_into(&mut self.differences, source.differences, left_out);
        if let (true, Some((a, b))) = (self.has_raw, source.raw) {
            skip_into(&mut self.minuend, a, left_out);
            skip_into(&mut self.subtrahend, b, left_out);
        }
    }

    /// View of the current buffer contents.
    pub(crate) fn view(&self) -> SeriesView<'_> {
        SeriesView {
            differences: &self.differences,
            raw: self
                .has_raw
                .then(|| (self.minuend.as_slice(), self.subtrahend.as_slice())),
        }
    }
}
