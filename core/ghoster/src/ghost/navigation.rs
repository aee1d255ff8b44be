use itertools::Itertools;

/// Deduplicates and sorts frames ascending
pub fn sorted_frames<I>(frames: I) -> Vec<i32> where I: IntoIterator<Item = i32> {
    frames
        .into_iter()
        .sorted()
        .dedup()
        .collect()
}

/// First frame after `current_frame`, wrapping to the earliest frame
pub fn next_frame(sorted: &[i32], current_frame: i32) -> Option<i32> {
    sorted
        .iter()
        .find(|f| **f > current_frame)
        .or_else(|| sorted.first())
        .copied()
}

/// Last frame before `current_frame`, wrapping to the latest frame
pub fn prev_frame(sorted: &[i32], current_frame: i32) -> Option<i32> {
    sorted
        .iter()
        .rev()
        .find(|f| **f < current_frame)
        .or_else(|| sorted.last())
        .copied()
}
