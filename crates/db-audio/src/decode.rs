use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AudioError;

/// Piste entièrement décodée en mémoire.
///
/// `samples` est entrelacé sur `channels` canaux (1 ou 2).
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedTrack {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedTrack {
    /// Nombre de frames (un échantillon par canal).
    #[must_use]
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate.max(1))
    }

    /// Frame `index` en stéréo. Le mono est dupliqué sur les deux canaux.
    #[inline]
    #[must_use]
    pub fn stereo_frame(&self, index: usize) -> (f32, f32) {
        if self.channels >= 2 {
            let base = index * 2;
            (self.samples[base], self.samples[base + 1])
        } else {
            let s = self.samples[index];
            (s, s)
        }
    }
}

/// Réduit un bloc entrelacé à au plus deux canaux.
///
/// Les canaux au-delà du deuxième (centre, LFE, surround) sont ignorés.
///
/// # Example
/// ```
/// use db_audio::decode::keep_front_channels;
/// let mut out = Vec::new();
/// keep_front_channels(&[0.1, 0.2, 0.9, 0.3, 0.4, 0.9], 3, &mut out);
/// assert_eq!(out, vec![0.1, 0.2, 0.3, 0.4]);
/// ```
pub fn keep_front_channels(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 2 {
        out.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks_exact(channels) {
        out.extend_from_slice(&frame[..2]);
    }
}

/// Decode an audio file into interleaved f32 samples, mono or stereo.
///
/// Supports WAV, MP3, FLAC, OGG, AAC via symphonia.
///
/// # Errors
/// Returns an error if the file cannot be opened, probed or decoded, or if
/// it contains no samples.
///
/// # Example
/// ```no_run
/// use db_audio::decode::decode_file;
/// let track = decode_file("desert-byte.mp3").unwrap();
/// println!("{:.1}s", track.duration_secs());
/// ```
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedTrack> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Cannot open audio file: {}", path.display()))?;
    let mss = MediaSourceStream::new(
        Box::new(file),
        symphonia::core::io::MediaSourceStreamOptions::default(),
    );

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Failed to probe audio format")?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .context("No default audio track found")?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let source_channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);
    let channels: u16 = if source_channels >= 2 { 2 } else { 1 };

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let track_id = track.id;
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut max_sample_frames: usize = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("Audio decode packet error: {e}");
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Audio decode frame error: {e}");
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.capacity();
        if sample_buf.is_none() || num_frames > max_sample_frames {
            sample_buf = Some(SampleBuffer::<f32>::new(num_frames as u64, spec));
            max_sample_frames = num_frames;
        }
        let Some(buf) = sample_buf.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(decoded);
        keep_front_channels(buf.samples(), spec.channels.count(), &mut samples);
    }

    if samples.is_empty() {
        return Err(AudioError::EmptyTrack(path.to_path_buf()).into());
    }

    let decoded = DecodedTrack {
        samples,
        sample_rate,
        channels,
    };
    log::info!(
        "Decoded {:.1}s @ {}Hz, {} canal(aux) from {}",
        decoded.duration_secs(),
        sample_rate,
        channels,
        path.display()
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// WAV PCM 16 bits minimal.
    fn wav_bytes(channels: u16, sample_rate: u32, frames: &[i16]) -> Vec<u8> {
        let data_len = (frames.len() * 2) as u32;
        let block_align = channels * 2;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in frames {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    fn temp_wav(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn decodes_stereo_wav() {
        let pcm: Vec<i16> = (0..400).map(|i| if i % 2 == 0 { 16384 } else { -16384 }).collect();
        let file = temp_wav(&wav_bytes(2, 8000, &pcm));
        let track = decode_file(file.path()).unwrap();

        assert_eq!(track.channels, 2);
        assert_eq!(track.sample_rate, 8000);
        assert_eq!(track.frames(), 200);
        let (l, r) = track.stereo_frame(10);
        assert!((l - 0.5).abs() < 1e-3);
        assert!((r + 0.5).abs() < 1e-3);
    }

    #[test]
    fn mono_is_duplicated_on_both_sides() {
        let track = DecodedTrack {
            samples: vec![0.25, -0.75],
            sample_rate: 22050,
            channels: 1,
        };
        assert_eq!(track.frames(), 2);
        assert_eq!(track.stereo_frame(1), (-0.75, -0.75));
    }

    #[test]
    fn duration_from_frames() {
        let track = DecodedTrack {
            samples: vec![0.0; 88200],
            sample_rate: 44100,
            channels: 2,
        };
        assert!((track.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_wav_is_rejected() {
        let file = temp_wav(&wav_bytes(1, 8000, &[]));
        assert!(decode_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = decode_file("/nonexistent/desert-byte.mp3").unwrap_err();
        assert!(format!("{err:#}").contains("Cannot open audio file"));
    }
}
