use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, TimeZone};
use gitpaint_core::config::defaults::default_params;
use gitpaint_core::encode::driver::{MemoryDriver, RepoDriver};
use gitpaint_core::encode::{encode, replay, CommitRequest, Encoder};
use gitpaint_core::error::GpError;
use gitpaint_core::graph::{Graph, PixelRecord};
use gitpaint_core::palette::quantize::quantize;
use gitpaint_core::{ContentMode, EncodeParams};
use image::{DynamicImage, GrayImage, Luma};

fn sunday_afternoon() -> DateTime<FixedOffset> {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    tz.with_ymd_and_hms(2026, 10, 18, 15, 30, 0).unwrap()
}

fn params(multiplier: u32, mode: ContentMode) -> EncodeParams {
    EncodeParams {
        multiplier,
        content_mode: mode,
        ..default_params()
    }
}

fn graph_from_gray(gray: GrayImage, weeks_ago: u32, weekday: u32) -> Graph {
    let q = quantize(&DynamicImage::ImageLuma8(gray), 5).unwrap();
    Graph::build(&q, weeks_ago, weekday).unwrap()
}

/// Five distinct grays so the darkest pixel ranks at intensity 4.
fn five_level_column() -> GrayImage {
    let shades = [0u8, 255, 192, 128, 64, 255, 255];
    GrayImage::from_fn(1, 7, |_, y| Luma([shades[y as usize]]))
}

#[test]
fn all_white_emits_nothing() {
    let g = graph_from_gray(GrayImage::from_pixel(3, 7, Luma([255])), 0, 0);
    let p = default_params();
    let reqs = encode(&g, &p, sunday_afternoon()).unwrap();
    assert!(reqs.is_empty());
}

#[test]
fn darkest_pixel_at_origin() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let first = g.records()[0];
    assert_eq!(first.intensity, 4);
    assert_eq!(first.days_ago, 7);

    let p = params(2, ContentMode::History);
    let reqs = encode(&g, &p, sunday_afternoon()).unwrap();
    let origin: Vec<&CommitRequest> = reqs.iter().filter(|r| r.index == 0).collect();
    assert_eq!(origin.len(), 8);

    let expected = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 11, 15, 30, 0)
        .unwrap();
    assert!(origin.iter().all(|r| r.date == expected));

    let order: Vec<(u8, u32)> = origin.iter().map(|r| (r.level, r.amplify)).collect();
    assert_eq!(
        order,
        vec![(1, 2), (1, 1), (2, 2), (2, 1), (3, 2), (3, 1), (4, 2), (4, 1)]
    );

    let distinct: HashSet<&str> = origin.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(distinct.len(), 8);
}

#[test]
fn per_record_count_is_intensity_times_multiplier() {
    let gray = GrayImage::from_fn(6, 7, |x, y| Luma([((x * 3 + y) % 5 * 50) as u8]));
    for m in 1..=4u32 {
        let g = graph_from_gray(gray.clone(), 0, 5);
        let p = params(m, ContentMode::History);
        let reqs = encode(&g, &p, sunday_afternoon()).unwrap();

        for (i, r) in g.records().iter().enumerate() {
            let n = reqs.iter().filter(|q| q.index == i).count() as u64;
            assert_eq!(n, r.intensity as u64 * m as u64, "record {i} m={m}");
        }
        assert_eq!(reqs.len() as u64, g.commit_count(m));
    }
}

#[test]
fn content_is_unique_across_the_whole_encode() {
    let gray = GrayImage::from_fn(9, 7, |x, y| Luma([((x * 7 + y * 3) % 5 * 60) as u8]));
    for mode in [ContentMode::History, ContentMode::Sequence] {
        for m in 1..=5u32 {
            let g = graph_from_gray(gray.clone(), 1, 3);
            let p = params(m, mode);
            let reqs = encode(&g, &p, sunday_afternoon()).unwrap();
            let distinct: HashSet<&str> = reqs.iter().map(|r| r.content.as_str()).collect();
            assert_eq!(distinct.len(), reqs.len(), "mode={mode:?} m={m}");
        }
    }
}

#[test]
fn history_content_accumulates_completed_glyphs() {
    // 2x1 grid: a dark cell then a light one.
    let records = vec![
        PixelRecord { x: 0, y: 0, days_ago: 14, intensity: 1 },
        PixelRecord { x: 1, y: 0, days_ago: 7, intensity: 1 },
    ];
    let g = Graph::from_records(2, 1, records).unwrap();
    let p = params(2, ContentMode::History);
    let reqs = encode(&g, &p, sunday_afternoon()).unwrap();

    let contents: Vec<&str> = reqs.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "```\n░░ <\n```\n",
            "```\n░░ \n```\n",
            "```\n░░ ░░ <\n```\n",
            "```\n░░ ░░ \n```\n",
        ]
    );
    assert!(reqs.iter().all(|r| r.path == "README.md"));
}

#[test]
fn sequence_numbers_are_monotonic() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let p = params(3, ContentMode::Sequence);
    let reqs = encode(&g, &p, sunday_afternoon()).unwrap();
    for (i, r) in reqs.iter().enumerate() {
        assert_eq!(r.seq, i as u64);
        assert!(r.content.ends_with(&format!("{}\n", i)));
    }
}

#[test]
fn scan_order_is_preserved() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let p = default_params();
    let reqs = encode(&g, &p, sunday_afternoon()).unwrap();
    let indices: Vec<usize> = reqs.iter().map(|r| r.index).collect();
    let mut sorted = indices.clone();
    sorted.sort();
    assert_eq!(indices, sorted);
}

#[test]
fn future_record_fails_before_any_request() {
    let records = vec![
        PixelRecord { x: 0, y: 0, days_ago: 3, intensity: 2 },
        PixelRecord { x: 1, y: 0, days_ago: -1, intensity: 0 },
    ];
    let g = Graph::from_records(2, 1, records).unwrap();
    let p = default_params();

    match Encoder::new(&g, &p, sunday_afternoon()) {
        Err(GpError::FutureDate { index, days_ago, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(days_ago, -1);
        }
        other => panic!("expected FutureDate, got {other:?}"),
    }
}

#[test]
fn invalid_multiplier_is_rejected() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let p = params(0, ContentMode::History);
    assert!(matches!(
        Encoder::new(&g, &p, sunday_afternoon()),
        Err(GpError::Validation(_))
    ));
}

#[derive(Debug)]
struct DiskFull;

impl std::fmt::Display for DiskFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk full")
    }
}

impl std::error::Error for DiskFull {}

/// Accepts `budget` commits, then fails.
struct FlakyDriver {
    inner: MemoryDriver,
    budget: usize,
}

impl RepoDriver for FlakyDriver {
    type Error = DiskFull;

    fn commit(&mut self, req: &CommitRequest<'_>) -> Result<(), Self::Error> {
        if self.inner.commits.len() == self.budget {
            return Err(DiskFull);
        }
        self.inner.commit(req).map_err(|e| match e {})
    }
}

#[test]
fn replay_applies_everything_in_order() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let p = default_params();
    let enc = Encoder::new(&g, &p, sunday_afternoon()).unwrap();
    let total = enc.total_commits();

    let mut driver = MemoryDriver::new();
    let applied = replay(enc, &mut driver).unwrap();

    assert_eq!(applied, total);
    assert_eq!(driver.commits.len() as u64, total);
    let expected = encode(&g, &p, sunday_afternoon()).unwrap();
    for (c, r) in driver.commits.iter().zip(&expected) {
        assert_eq!(c.content, r.content);
        assert_eq!(c.date, r.date);
    }
}

#[test]
fn replay_aborts_on_first_driver_error() {
    let g = graph_from_gray(five_level_column(), 0, 0);
    let p = default_params();
    let enc = Encoder::new(&g, &p, sunday_afternoon()).unwrap();

    let mut driver = FlakyDriver { inner: MemoryDriver::new(), budget: 3 };
    let err = replay(enc, &mut driver).unwrap_err();

    match err {
        GpError::Driver { index, level, amplify, .. } => {
            assert_eq!(index, 0);
            assert_eq!((level, amplify), (2, 1));
        }
        other => panic!("expected Driver error, got {other:?}"),
    }
    // already-applied commits are left alone
    assert_eq!(driver.inner.commits.len(), 3);
}

#[test]
fn more_levels_than_the_palette_are_rejected() {
    // Nine grays built by hand rank up to intensity 8.
    let gray = GrayImage::from_fn(9, 7, |x, _| Luma([(x * 30) as u8]));
    let q = gitpaint_core::QuantizedImage::from_gray(gray);
    let g = Graph::build(&q, 0, 0).unwrap();
    let p = params(1, ContentMode::History);

    assert!(matches!(
        Encoder::new(&g, &p, sunday_afternoon()),
        Err(GpError::Validation(_))
    ));
}

#[test]
fn unrepresentable_date_reports_the_cell() {
    let records = vec![PixelRecord { x: 0, y: 0, days_ago: i64::MAX, intensity: 1 }];
    let g = Graph::from_records(1, 1, records).unwrap();
    let p = default_params();

    let err = encode(&g, &p, sunday_afternoon()).unwrap_err();
    match err {
        GpError::DateOutOfRange { index, x, y, days_ago } => {
            assert_eq!((index, x, y), (0, 0, 0));
            assert_eq!(days_ago, i64::MAX);
        }
        other => panic!("expected DateOutOfRange, got {other:?}"),
    }
}
