//! Linear PCM mixing
//!
//! Mixes the frames contributed by one splitter side into a single frame for
//! the opposite side. Samples are widened to i32 for accumulation and clamped
//! back to the i16 range, so simultaneous loud contributors saturate instead
//! of wrapping.

use crate::media::frame::AudioFrame;

/// Mix a set of PCM frames into one output frame.
///
/// Returns `None` when there is nothing to mix. A single contributor passes
/// through untouched (same underlying buffer, no re-encode). Frames of
/// unequal length are mixed over the longest; missing samples count as
/// silence.
pub fn mix_frames(frames: &[AudioFrame]) -> Option<AudioFrame> {
    match frames.len() {
        0 => None,
        1 => Some(frames[0].clone()),
        _ => {
            let len = frames.iter().map(AudioFrame::sample_count).max()?;
            let mut acc = vec![0i32; len];

            for frame in frames {
                for (slot, sample) in acc.iter_mut().zip(frame.samples()) {
                    *slot += i32::from(sample);
                }
            }

            let mixed: Vec<i16> = acc
                .into_iter()
                .map(|s| s.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
                .collect();

            Some(AudioFrame::from_samples(frames[0].timestamp, &mixed))
        }
    }
}
