//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::Path;

/// Write a mono 16-bit WAV made of `(seconds, amplitude)` sections of a
/// 440 Hz tone. Amplitude 0 gives digital silence.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn write_tone_sections(path: &Path, sample_rate: u32, sections: &[(f64, f32)]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();

    let mut n: u64 = 0;
    for &(seconds, amplitude) in sections {
        let count = (seconds * f64::from(sample_rate)).round() as u64;
        for _ in 0..count {
            let t = n as f32 / sample_rate as f32;
            let value = amplitude * (2.0 * std::f32::consts::PI * 440.0 * t).sin();
            writer
                .write_sample((value * f32::from(i16::MAX)) as i16)
                .unwrap();
            n += 1;
        }
    }
    writer.finalize().unwrap();
}

/// One second of silence, three seconds of tone, two seconds of silence.
pub fn write_talk_fixture(path: &Path, sample_rate: u32) {
    write_tone_sections(path, sample_rate, &[(1.0, 0.0), (3.0, 0.5), (2.0, 0.0)]);
}
