//! Segment selection over hand-built loudness series.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use ezcut::audio::AudioChunks;
use ezcut::selector::{
    ClipInterval, MaskStream, NoProgress, Parameters, TrailingRun, select_from_loudness,
    select_segments, window_mask,
};

fn scenario_a_loudness() -> Vec<f32> {
    vec![0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 0.0, 0.0, 0.0]
}

#[test]
fn test_scenario_a_single_run() {
    let params = Parameters::new(1.0, 0.0, 1.0, 3.0).unwrap();
    let selection = select_from_loudness(scenario_a_loudness(), &params).unwrap();
    assert_eq!(
        selection.intervals,
        vec![ClipInterval {
            start: 3.0,
            end: 9.0
        }]
    );
}

#[test]
fn test_scenario_b_run_too_short() {
    let params = Parameters::new(1.0, 0.0, 1.0, 10.0).unwrap();
    let selection = select_from_loudness(scenario_a_loudness(), &params).unwrap();
    assert!(selection.intervals.is_empty());
}

#[test]
fn test_scenario_c_all_loud_drops_trailing_run() {
    let params = Parameters::new(1.0, 0.0, 1.0, 0.0).unwrap();
    let selection = select_from_loudness(vec![5.0; 20], &params).unwrap();
    assert!(selection.intervals.is_empty());
}

#[test]
fn test_scenario_c_all_loud_closes_with_keep_tail() {
    let params = Parameters::new(1.0, 0.0, 1.0, 0.0)
        .unwrap()
        .with_trailing(TrailingRun::Close);
    let selection = select_from_loudness(vec![5.0; 20], &params).unwrap();
    assert_eq!(
        selection.intervals,
        vec![ClipInterval {
            start: 0.0,
            end: 19.0
        }]
    );
}

#[test]
fn test_silent_signal_selects_nothing() {
    let params = Parameters::default();
    let selection = select_from_loudness(vec![0.0; 1_000], &params).unwrap();
    assert!(selection.intervals.is_empty());
}

#[test]
fn test_window_widens_run() {
    // Window of two chunks on each side pulls the start back and the end out.
    let params = Parameters::new(1.0, 2.0, 1.0, 0.0).unwrap();
    let selection = select_from_loudness(scenario_a_loudness(), &params).unwrap();
    assert_eq!(selection.mask[1], 0.0);
    assert_eq!(selection.mask[2], 5.0);
    assert_eq!(selection.mask[11], 5.0);
    assert_eq!(selection.mask[12], 0.0);
    assert_eq!(
        selection.intervals,
        vec![ClipInterval {
            start: 2.0,
            end: 11.0
        }]
    );
}

#[test]
fn test_intervals_ordered_and_disjoint() {
    let mut loudness = Vec::new();
    for i in 0..40 {
        let loud = (i / 5) % 2 == 1;
        loudness.extend(std::iter::repeat_n(if loud { 0.4 } else { 0.0 }, 7));
    }
    let params = Parameters::new(0.1, 0.1, 0.1, 0.2).unwrap();
    let selection = select_from_loudness(loudness, &params).unwrap();

    assert!(!selection.intervals.is_empty());
    for clip in &selection.intervals {
        assert!(clip.end > clip.start);
        assert!(clip.duration() >= params.min_clip());
    }
    for pair in selection.intervals.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
}

#[test]
fn test_selection_is_deterministic() {
    let loudness: Vec<f32> = (0..500u16)
        .map(|i| f32::from(i % 37) / 100.0)
        .collect();
    let params = Parameters::new(0.01, 0.05, 0.2, 0.03).unwrap();
    let first = select_from_loudness(loudness.clone(), &params).unwrap();
    let second = select_from_loudness(loudness, &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_streaming_mask_matches_eager_mask() {
    let loudness: Vec<f32> = (0..300u16)
        .map(|i| f32::from((i * 7919) % 101) / 100.0)
        .collect();
    for window_size in [0, 1, 3, 25, 400] {
        let mut stream = MaskStream::new(window_size);
        let mut streamed: Vec<f32> = loudness.iter().filter_map(|&v| stream.push(v)).collect();
        streamed.extend(stream.finish());
        assert_eq!(streamed, window_mask(&loudness, window_size), "ws={window_size}");
    }
}

#[test]
fn test_select_segments_reports_progress() {
    let chunks = vec![vec![0.0_f32; 8]; 5];
    let mut seen = Vec::new();
    let mut observer = |done: usize, total: Option<usize>| seen.push((done, total));
    let _ = select_segments(chunks, &Parameters::default(), &mut observer).unwrap();
    assert_eq!(seen.last(), Some(&(5, Some(5))));

    assert!(
        select_segments(Vec::<Vec<f32>>::new(), &Parameters::default(), &mut NoProgress).is_err()
    );
}

#[test]
fn test_fractional_chunk_length_keeps_cut_times_aligned() {
    // 12.5 samples per chunk at 1 kHz; loud from 100 s to 105 s.
    let rate = 1_000;
    let mut samples = vec![0.0_f32; 100_000];
    samples.extend(vec![0.5_f32; 5_000]);
    samples.extend(vec![0.0_f32; 5_000]);

    let params = Parameters::new(0.0125, 0.0, 0.1, 1.0).unwrap();
    let chunks = AudioChunks::new(&samples, rate, params.chunk_length());
    assert_eq!(chunks.len(), 8_800);

    let selection = select_segments(chunks, &params, &mut NoProgress).unwrap();
    assert_eq!(selection.intervals.len(), 1);
    let clip = selection.intervals[0];
    assert!((clip.start - 100.0).abs() < params.chunk_length(), "start {}", clip.start);
    assert!((clip.end - 105.0).abs() <= params.chunk_length(), "end {}", clip.end);
}

#[test]
fn test_window_wider_than_signal_masks_everything_with_the_peak() {
    let mut loudness = vec![0.0_f32; 10];
    loudness[7] = 0.5;

    for (chunk, window) in [(0.01, 1e300), (0.001, 1e6)] {
        let params = Parameters::new(chunk, window, 0.1, 0.0).unwrap();
        let selection = select_from_loudness(loudness.clone(), &params).unwrap();
        assert_eq!(selection.mask, vec![0.5; 10]);
        assert!(selection.intervals.is_empty());
    }

    let params = Parameters::new(1.0, 1e300, 0.1, 0.0)
        .unwrap()
        .with_trailing(TrailingRun::Close);
    let selection = select_from_loudness(loudness, &params).unwrap();
    assert_eq!(
        selection.intervals,
        vec![ClipInterval {
            start: 0.0,
            end: 9.0
        }]
    );
}
