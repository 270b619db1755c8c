use crate::common::F32ArrayExt;

/// Applies a centered median filter of odd `size` to a frame pitch track.
///
/// Unvoiced frames stay unvoiced. A voiced frame is replaced by the median
/// of the voiced frames within `size / 2` frames on either side; the window
/// is truncated at the ends of the track.
pub fn median_filter(frames: &[Option<f32>], size: usize) -> Vec<Option<f32>> {
    let radius = size / 2;
    let mut neighbors: Vec<f32> = Vec::with_capacity(size);
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            frame.and_then(|_| {
                let start = i.saturating_sub(radius);
                let end = (i + radius + 1).min(frames.len());
                neighbors.clear();
                neighbors.extend(frames[start..end].iter().flatten());
                neighbors.median()
            })
        })
        .collect()
}
