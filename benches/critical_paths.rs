//! Criterion benchmarks for Glyphsnap critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Registry: emoji registry text parsing
//! - Diff: pixel differencing and preview composition
//! - Terminal: ANSI preview rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glyphsnap::diff;
use glyphsnap::pipeline::GlyphFrame;
use glyphsnap::registry::{parse_registry, sanitize_name, RegistryParser};
use glyphsnap::terminal;
use image::{Rgba, RgbaImage};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a registry with n single-scalar fully-qualified records
fn make_registry_text(records: usize) -> String {
    (0..records)
        .map(|i| {
            let code = 0x1F300 + (i as u32 % 0x2FF);
            let scalar = char::from_u32(code).unwrap_or('\u{1F600}');
            format!("{:04X} ; fully-qualified # {} E1.0 bench glyph {}\n", code, scalar, i)
        })
        .collect()
}

/// Generate registry text with the real file's shape: group comments,
/// skipped statuses, and skin-tone variant lines between the records
fn make_real_shape_registry(groups: usize) -> String {
    let mut text = String::new();
    for g in 0..groups {
        text.push_str(&format!("# group: bench group {}\n# subgroup: faces\n\n", g));
        for i in 0..8 {
            let code = 0x1F400 + ((g * 8 + i) as u32 % 0x1FF);
            let scalar = char::from_u32(code).unwrap_or('\u{1F600}');
            text.push_str(&format!(
                "{:04X} ; fully-qualified # {} E2.0 bench item {} of group {}\n",
                code, scalar, i, g
            ));
            text.push_str(&format!(
                "{:04X} ; unqualified # {} E2.0 bench item {} of group {}\n",
                code, scalar, i, g
            ));
        }
        text.push_str(
            "1F44B 1F3FB ; fully-qualified # \u{1F44B}\u{1F3FB} E1.0 waving hand: light skin tone\n",
        );
    }
    text
}

/// Generate a registry of six-group ZWJ sequences
fn make_zwj_registry(records: usize) -> String {
    (0..records)
        .map(|i| {
            format!(
                "1F468 200D 2764 FE0F 200D 1F46{:X} ; fully-qualified # x E2.0 bench couple {}\n",
                i % 16,
                i
            )
        })
        .collect()
}

/// Generate a deterministic non-uniform image
fn gradient_image(side: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(side, side, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, seed, 255])
    })
}

// =============================================================================
// Registry Parsing Benchmarks
// =============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    // Benchmark different record counts (the real file has ~3700)
    for count in [100, 500, 1000, 4000].iter() {
        let text = make_registry_text(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("parse_records", count), &text, |b, text| {
            b.iter(|| parse_registry(black_box(text)))
        });
    }

    // Reusing a parser skips the grammar compile
    let text = make_registry_text(1000);
    let parser = RegistryParser::new();
    group.bench_function("parse_1000_reused_parser", |b| {
        b.iter(|| parser.parse(black_box(&text)))
    });

    // Comment, skipped, and skin-tone lines exercise the coarse filters
    let mixed = make_real_shape_registry(64);
    group.throughput(Throughput::Bytes(mixed.len() as u64));
    group.bench_function("parse_real_shape", |b| {
        b.iter(|| parse_registry(black_box(&mixed)))
    });

    // Multi-group sequences stress the hex decode path
    let zwj = make_zwj_registry(1000);
    group.throughput(Throughput::Elements(1000));
    group.bench_function("parse_zwj_sequences", |b| {
        b.iter(|| parse_registry(black_box(&zwj)))
    });

    // Batch sanitizing (every record name goes through this)
    let names = [
        "couple with heart: man, man",
        "Japanese \u{201C}here\u{201D} button",
        "women's room",
        "Cocos (Keeling) Islands",
    ];
    group.bench_function("sanitize_4_names", |b| {
        b.iter(|| {
            for name in &names {
                let _ = sanitize_name(black_box(*name));
            }
        })
    });

    group.finish();
}

// =============================================================================
// Diff and Preview Benchmarks
// =============================================================================

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    // Benchmark different snapshot sizes (164 is the default glyph canvas)
    for size in [64u32, 164, 256, 512].iter() {
        let baseline = gradient_image(*size, 0);
        let candidate = gradient_image(*size, 128);

        group.throughput(Throughput::Elements(u64::from(*size) * u64::from(*size)));
        group.bench_with_input(
            BenchmarkId::new("difference_image", format!("{}x{}", size, size)),
            &(baseline, candidate),
            |b, (baseline, candidate)| {
                b.iter(|| diff::difference_image(black_box(baseline), black_box(candidate)))
            },
        );
    }

    // Full three-panel composition
    for size in [64u32, 164, 256].iter() {
        let baseline = gradient_image(*size, 0);
        let candidate = gradient_image(*size, 128);
        let difference =
            diff::difference_image(&baseline, &candidate).expect("dimensions match");

        group.throughput(Throughput::Elements(u64::from(*size) * u64::from(*size)));
        group.bench_with_input(
            BenchmarkId::new("compose_preview", format!("{}x{}", size, size)),
            &(baseline, candidate, difference),
            |b, (baseline, candidate, difference)| {
                b.iter(|| {
                    diff::compose_preview(
                        black_box(baseline),
                        black_box(candidate),
                        black_box(difference),
                    )
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// Terminal Rendering Benchmarks
// =============================================================================

fn bench_terminal(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    // Downscaling a default-size canvas for display
    let canvas = gradient_image(164, 40);
    group.bench_function("fit_canvas_164", |b| {
        b.iter(|| terminal::fit_for_terminal(black_box(&canvas), 48))
    });

    // Half-block art over the fitted size
    let fitted = terminal::fit_for_terminal(&canvas, 48);
    group.throughput(Throughput::Elements(48 * 48));
    group.bench_function("render_ansi_48x48", |b| {
        b.iter(|| terminal::render_image_ansi(black_box(&fitted)))
    });

    // Full frame path: banner, fit, and art
    let frame = GlyphFrame {
        index: 0,
        total: 3664,
        name: "grinning_face".to_string(),
        image: gradient_image(164, 40),
    };
    group.bench_function("render_frame_164", |b| {
        b.iter(|| terminal::render_frame(black_box(&frame)))
    });

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_registry, bench_diff, bench_terminal);

criterion_main!(benches);
