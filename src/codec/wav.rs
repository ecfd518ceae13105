//! Write wave files
//!
//! Buffers are written as 16-bit integer PCM with a plain 44 byte header.

use std::{
    fs::File,
    io::{BufWriter, Cursor, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::render::{AudioBuffer, MAX_CHANNELS};

pub use hound::Error as WaveError;

/// The size of the header written before the sample data
pub const HEADER_LEN: usize = 44;

/// Convert a normalized sample to 16-bit PCM
///
/// Negative samples scale by 32768 and the rest by 32767, so both ends of
/// [-1, 1] reach the ends of the integer range. Samples outside that range
/// are clamped.
pub fn to_pcm16(sample: f32) -> i16 {
    let sample = sample.clamp(-1.0, 1.0);
    if sample < 0.0 {
        (sample * 32768.0) as i16
    } else {
        (sample * 32767.0) as i16
    }
}

/// Get the header spec for a buffer
pub fn spec(buffer: &AudioBuffer) -> WavSpec {
    WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write a buffer as a WAV stream
///
/// Only mono and stereo buffers are written, since other channel counts
/// need an extended header.
pub fn write_buffer<W>(writer: W, buffer: &AudioBuffer) -> Result<(), WaveError>
where
    W: Write + Seek,
{
    if !(1..=MAX_CHANNELS as usize).contains(&buffer.channels()) {
        return Err(WaveError::Unsupported);
    }
    let mut writer = WavWriter::new(writer, spec(buffer))?;
    for sample in buffer.interleaved() {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()
}

/// Encode a buffer as the bytes of a WAV file
pub fn encode(buffer: &AudioBuffer) -> Result<Vec<u8>, WaveError> {
    let mut bytes = Cursor::new(Vec::with_capacity(
        HEADER_LEN + buffer.frames() * buffer.channels() * 2,
    ));
    write_buffer(&mut bytes, buffer)?;
    Ok(bytes.into_inner())
}

/// Write a buffer to a WAV file at `path`
pub fn write_file(path: impl AsRef<Path>, buffer: &AudioBuffer) -> crate::Result<()> {
    let file = BufWriter::new(File::create(path.as_ref())?);
    write_buffer(file, buffer)?;
    log::info!(
        "wrote {:.2}s of audio to {}",
        buffer.duration(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use hound::WavReader;

    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn sign_dependent_scaling() {
        assert_eq!(to_pcm16(-1.0), -32768);
        assert_eq!(to_pcm16(1.0), 32767);
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(0.5), 16383);
        assert_eq!(to_pcm16(-0.5), -16384);
        assert_eq!(to_pcm16(3.0), 32767);
        assert_eq!(to_pcm16(-3.0), -32768);
    }

    #[test]
    fn header_sizes() {
        let frames = 1000;
        let buffer = AudioBuffer::new(2, frames, 22050);
        let bytes = encode(&buffer).unwrap();
        let data = (frames * 2 * 2) as u32;
        assert_eq!(bytes.len(), HEADER_LEN + data as usize);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + data);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 24), 22050);
        assert_eq!(u32_at(&bytes, 28), 22050 * 2 * 2);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), data);
    }

    #[test]
    fn mono_and_stereo_headers_are_plain() {
        for channels in 1..=2 {
            let bytes = encode(&AudioBuffer::new(channels, 100, 8000)).unwrap();
            let data = 100 * channels as usize * 2;
            assert_eq!(bytes.len(), HEADER_LEN + data);
            assert_eq!(u32_at(&bytes, 16), 16);
            assert_eq!(u32_at(&bytes, 40), data as u32);
        }
    }

    #[test]
    fn other_channel_counts_are_rejected() {
        assert!(matches!(
            encode(&AudioBuffer::new(4, 100, 8000)),
            Err(WaveError::Unsupported)
        ));
        assert!(matches!(
            encode(&AudioBuffer::new(0, 100, 8000)),
            Err(WaveError::Unsupported)
        ));
    }

    #[test]
    fn samples_are_interleaved() {
        let buffer = AudioBuffer::from_channels(vec![vec![1.0, -1.0], vec![0.5, 0.0]], 8000);
        let bytes = encode(&buffer).unwrap();
        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec(), spec(&buffer));
        let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(samples, [32767, 16383, -32768, 0]);
    }
}
