//! Read-time estimation.
//!
//! Text is charged at 0.0036 minutes per word. Images are charged from a
//! budget that starts at 12 seconds and shrinks by one per image down to 3,
//! but only while ten or more images remain; the tail of the sequence is
//! charged 3 seconds each.

/// Seconds charged per word, scaled by 1000 (0.0036 min × 60 s = 0.216 s).
const MILLIS_PER_WORD: u64 = 216;

const IMAGE_BUDGET_START: u32 = 12;
const IMAGE_BUDGET_FLOOR: u32 = 3;
const IMAGE_TAIL_THRESHOLD: u32 = 10;

/// Estimated reading time in seconds for a document with the given counts.
pub fn estimate_read_time(word_count: u32, image_count: u32) -> u32 {
    content_seconds(word_count).saturating_add(image_seconds(image_count))
}

fn content_seconds(word_count: u32) -> u32 {
    // Fits: u32::MAX * 216 / 1000 < u32::MAX.
    (u64::from(word_count) * MILLIS_PER_WORD / 1000) as u32
}

fn image_seconds(image_count: u32) -> u32 {
    let mut budget = IMAGE_BUDGET_START;
    let mut total: u32 = 0;

    for seen in 0..image_count {
        let remaining = image_count - seen;
        if remaining < IMAGE_TAIL_THRESHOLD {
            total = total.saturating_add(IMAGE_BUDGET_FLOOR);
        } else {
            total = total.saturating_add(budget.max(IMAGE_BUDGET_FLOOR));
            budget = budget.saturating_sub(1).max(IMAGE_BUDGET_FLOOR);
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_document_reads_instantly() {
        assert_eq!(estimate_read_time(0, 0), 0);
    }

    #[test]
    fn test_content_seconds_truncate() {
        assert_eq!(estimate_read_time(1, 0), 0);
        assert_eq!(estimate_read_time(5, 0), 1);
        assert_eq!(estimate_read_time(130, 0), 28);
        assert_eq!(estimate_read_time(240, 0), 51);
        assert_eq!(estimate_read_time(1250, 0), 270);
    }

    #[test]
    fn test_few_images_cost_three_seconds_each() {
        assert_eq!(estimate_read_time(0, 1), 3);
        assert_eq!(estimate_read_time(0, 2), 6);
        assert_eq!(estimate_read_time(0, 9), 27);
    }

    #[test]
    fn test_ten_images_take_budget_branch_first() {
        // 12 for the first image, then nine images in the tail.
        assert_eq!(estimate_read_time(0, 10), 12 + 9 * 3);
        assert_eq!(estimate_read_time(0, 11), 12 + 11 + 9 * 3);
    }

    #[test]
    fn test_budget_never_drops_below_floor() {
        // Budget branch for 11 images: 12 down to 3, then one more at 3.
        let budget: u32 = (3..=12).sum::<u32>() + 3;
        assert_eq!(estimate_read_time(0, 20), budget + 9 * 3);
    }

    #[test]
    fn test_reference_publish_fixture() {
        assert_eq!(estimate_read_time(130, 2), 34);
    }

    #[test]
    fn test_huge_counts_saturate() {
        assert!(estimate_read_time(u32::MAX, 0) > 0);
        assert_eq!(content_seconds(u32::MAX), (u64::from(u32::MAX) * 216 / 1000) as u32);
    }

    proptest! {
        #[test]
        fn prop_read_time_is_monotonic(words in 0u32..100_000, images in 0u32..200) {
            let base = estimate_read_time(words, images);
            prop_assert!(estimate_read_time(words + 1, images) >= base);
            prop_assert!(estimate_read_time(words, images + 1) >= base);
        }
    }
}
