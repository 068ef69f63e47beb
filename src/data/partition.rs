use std::collections::HashSet;

use crate::data::frame::HistoryFrame;

/// Entity codes split into a training and a validation subset.
#[derive(Debug, Clone)]
pub struct CodePartition {
    pub train: Vec<String>,
    pub validation: Vec<String>,
}

/// Deterministically split `codes` by a fractional `split` in `[0, 1]`.
///
/// The first `round(split * n)` codes in the given order become the
/// validation subset, the remainder the training subset; exact halves round
/// to even. No shuffling: the same ordering and split always produce the
/// same partition. A split that rounds to zero validation codes is legal.
pub fn split_codes(codes: &[String], split: f32) -> CodePartition {
    let n_valid = (f64::from(split) * codes.len() as f64).round_ties_even() as usize;
    let n_valid = n_valid.min(codes.len());
    CodePartition {
        train: codes[n_valid..].to_vec(),
        validation: codes[..n_valid].to_vec(),
    }
}

/// Partition a frame into `(train, validation)` tables by code membership.
pub fn partition_by_code(frame: &HistoryFrame, split: f32) -> (HistoryFrame, HistoryFrame) {
    let codes = frame.distinct_codes();
    let partition = split_codes(&codes, split);
    let train_set: HashSet<&str> = partition.train.iter().map(String::as_str).collect();
    let valid_set: HashSet<&str> = partition.validation.iter().map(String::as_str).collect();
    (
        frame.filter_by_codes(&train_set),
        frame.filter_by_codes(&valid_set),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::Bar;

    fn codes(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{:06}", 600000 + i)).collect()
    }

    #[test]
    fn test_split_counts_match_round() {
        let all = codes(10);
        let p = split_codes(&all, 0.3);
        assert_eq!(p.validation.len(), 3);
        assert_eq!(p.train.len(), 7);
    }

    #[test]
    fn test_split_half_rounds_to_even() {
        let all = codes(10);
        // 2.5 -> 2, 7.5 -> 8
        assert_eq!(split_codes(&all, 0.25).validation.len(), 2);
        assert_eq!(split_codes(&all, 0.75).validation.len(), 8);

        // 0.5 -> 0: an exact-half split on one code leaves validation empty.
        assert!(split_codes(&codes(1), 0.5).validation.is_empty());
    }

    #[test]
    fn test_split_is_disjoint_union_preserving_order() {
        let all = codes(7);
        let p = split_codes(&all, 0.4);
        assert_eq!(p.validation, all[..3]);
        assert_eq!(p.train, all[3..]);

        let mut rejoined = p.validation.clone();
        rejoined.extend(p.train.clone());
        assert_eq!(rejoined, all);
    }

    #[test]
    fn test_split_zero_gives_empty_validation() {
        let all = codes(5);
        let p = split_codes(&all, 0.0);
        assert!(p.validation.is_empty());
        assert_eq!(p.train, all);
    }

    #[test]
    fn test_split_one_gives_empty_train() {
        let all = codes(5);
        let p = split_codes(&all, 1.0);
        assert_eq!(p.validation, all);
        assert!(p.train.is_empty());
    }

    #[test]
    fn test_split_is_deterministic() {
        let all = codes(20);
        let a = split_codes(&all, 0.3);
        let b = split_codes(&all, 0.3);
        assert_eq!(a.validation, b.validation);
        assert_eq!(a.train, b.train);
    }

    #[test]
    fn test_partition_by_code_filters_rows() {
        let mut bars = Vec::new();
        for code in ["a", "b", "c", "d"] {
            for i in 0..3 {
                bars.push(Bar {
                    code: code.to_string(),
                    date: format!("day-{i}"),
                    open: 1.0,
                    high: 1.0,
                    low: 1.0,
                    close: 1.0,
                    volume: 1.0,
                });
            }
        }
        let frame = HistoryFrame::new(bars);

        // round(0.5 * 4) = 2 validation codes: "a" and "b".
        let (train, valid) = partition_by_code(&frame, 0.5);
        assert_eq!(train.len(), 6);
        assert_eq!(valid.len(), 6);
        assert_eq!(valid.distinct_codes(), vec!["a", "b"]);
        assert_eq!(train.distinct_codes(), vec!["c", "d"]);
    }
}
