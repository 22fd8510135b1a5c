// Format conversion for CPAL output streams
//
// Everything is rendered in f32; the device may want f32, i16 or u16.
// cpal's FromSample does the conversion without allocating.

use cpal::{FromSample, Sample};

/// Write one mono sample to every channel of an interleaved frame
#[inline]
pub fn write_mono_to_interleaved_frame<T>(internal_sample: f32, output_frame: &mut [T])
where
    T: Sample + FromSample<f32>,
{
    for channel_sample in output_frame.iter_mut() {
        *channel_sample = Sample::from_sample::<f32>(internal_sample);
    }
}
