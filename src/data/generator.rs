use crate::data::frame::{Bar, HistoryFrame};

/// One batch of flattened windows.
///
/// `inputs` holds `len * timesteps * FEATURE_DIM` values in row-major
/// `[sample][timestep][feature]` order; `targets` holds `len` values.
pub struct Batch {
    pub inputs: Vec<f32>,
    pub targets: Vec<f32>,
    pub len: usize,
}

struct Sample {
    features: Vec<f32>,
    target: f32,
}

/// Builds fixed-length training windows from a (filtered) frame.
///
/// For each code, every run of `timesteps` consecutive bars forms one input
/// window; the target is the relative close change `predict_days` bars after
/// the window end. Windows never cross code boundaries. Batches are yielded
/// synchronously and in a fixed order; the last batch may be partial.
pub struct BatchGenerator {
    samples: Vec<Sample>,
    batch_size: usize,
    timesteps: usize,
}

impl BatchGenerator {
    pub fn new(
        frame: &HistoryFrame,
        timesteps: usize,
        predict_days: usize,
        batch_size: usize,
    ) -> Self {
        let mut samples = Vec::new();
        for run in code_runs(frame.bars()) {
            let horizon = timesteps + predict_days;
            if run.len() < horizon {
                continue;
            }
            for start in 0..=(run.len() - horizon) {
                let window = &run[start..start + timesteps];
                let mut features = Vec::with_capacity(timesteps * Bar::FEATURE_DIM);
                for bar in window {
                    features.extend_from_slice(&bar.features());
                }
                let anchor = run[start + timesteps - 1].close;
                let future = run[start + horizon - 1].close;
                // A zero anchor close yields a non-finite target.
                let target = (future - anchor) / anchor;
                samples.push(Sample { features, target });
            }
        }
        BatchGenerator {
            samples,
            batch_size,
            timesteps,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_batches(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        self.samples.len().div_ceil(self.batch_size)
    }

    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// Restartable pass over all batches. Every call yields the same batches
    /// in the same order.
    pub fn batches(&self) -> impl Iterator<Item = Batch> + '_ {
        self.samples.chunks(self.batch_size.max(1)).map(|chunk| {
            let mut inputs = Vec::with_capacity(chunk.len() * self.timesteps * Bar::FEATURE_DIM);
            let mut targets = Vec::with_capacity(chunk.len());
            for sample in chunk {
                inputs.extend_from_slice(&sample.features);
                targets.push(sample.target);
            }
            Batch {
                inputs,
                targets,
                len: chunk.len(),
            }
        })
    }
}

/// Maximal runs of consecutive rows sharing one code.
fn code_runs(bars: &[Bar]) -> Vec<&[Bar]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=bars.len() {
        if i == bars.len() || bars[i].code != bars[start].code {
            runs.push(&bars[start..i]);
            start = i;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_per_code() {
        // 20 bars, timesteps 4, predict 2 -> 20 - 6 + 1 = 15 windows.
        let frame = HistoryFrame::synthetic(1, 20, 7);
        let gen = BatchGenerator::new(&frame, 4, 2, 8);
        assert_eq!(gen.n_samples(), 15);
        assert_eq!(gen.n_batches(), 2); // 8 + 7
    }

    #[test]
    fn test_windows_do_not_cross_codes() {
        let frame = HistoryFrame::synthetic(3, 10, 7);
        let gen = BatchGenerator::new(&frame, 4, 2, 4);
        // Per code: 10 - 6 + 1 = 5 windows, never spanning two codes.
        assert_eq!(gen.n_samples(), 15);
    }

    #[test]
    fn test_short_code_yields_no_samples() {
        let frame = HistoryFrame::synthetic(1, 5, 7);
        let gen = BatchGenerator::new(&frame, 4, 2, 4);
        assert_eq!(gen.n_samples(), 0);
        assert_eq!(gen.n_batches(), 0);
        assert_eq!(gen.batches().count(), 0);
    }

    #[test]
    fn test_batch_shapes() {
        let frame = HistoryFrame::synthetic(1, 20, 7);
        let gen = BatchGenerator::new(&frame, 4, 2, 8);
        let batches: Vec<Batch> = gen.batches().collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len, 8);
        assert_eq!(batches[0].inputs.len(), 8 * 4 * Bar::FEATURE_DIM);
        assert_eq!(batches[0].targets.len(), 8);
        assert_eq!(batches[1].len, 7); // partial final batch
    }

    #[test]
    fn test_batches_are_restartable_and_stable() {
        let frame = HistoryFrame::synthetic(2, 15, 7);
        let gen = BatchGenerator::new(&frame, 4, 2, 4);
        let first: Vec<f32> = gen.batches().flat_map(|b| b.targets).collect();
        let second: Vec<f32> = gen.batches().flat_map(|b| b.targets).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_is_relative_close_change() {
        let mut frame = HistoryFrame::synthetic(1, 8, 7);
        // Rebuild with known closes 1..=8.
        let bars: Vec<Bar> = frame
            .bars()
            .iter()
            .enumerate()
            .map(|(i, b)| Bar {
                close: (i + 1) as f32,
                ..b.clone()
            })
            .collect();
        frame = HistoryFrame::new(bars);

        let gen = BatchGenerator::new(&frame, 3, 2, 1);
        let first = gen.batches().next().unwrap();
        // First window covers closes [1, 2, 3]; future close is 5.
        assert!((first.targets[0] - (5.0 - 3.0) / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_anchor_close_gives_non_finite_target() {
        let mut frame = HistoryFrame::synthetic(1, 3, 7);
        let closes = [1.0, 0.0, 5.0];
        let bars: Vec<Bar> = frame
            .bars()
            .iter()
            .zip(closes)
            .map(|(b, close)| Bar {
                close,
                ..b.clone()
            })
            .collect();
        frame = HistoryFrame::new(bars);

        // Window closes [1, 0], anchor 0, future 5: the division propagates.
        let gen = BatchGenerator::new(&frame, 2, 1, 1);
        let first = gen.batches().next().unwrap();
        assert!(!first.targets[0].is_finite());
    }
}
