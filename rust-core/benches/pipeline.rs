use criterion::{black_box, criterion_group, criterion_main, Criterion};
use note_finder::filters::{design_lowpass_fir, FirFilter, LowpassSpec};
use note_finder::{DetectorConfig, NoteProcessor, PitchEstimator};
use std::f64::consts::PI;

fn tone(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| 0.8 * (2.0 * PI * 440.0 * n as f64 / 44100.0).sin())
        .collect()
}

fn run_filter_benchmark(id: &str, c: &mut Criterion, order: usize, block_size: usize) {
    let coefficients = design_lowpass_fir(&LowpassSpec::new(44100, 1000.0, order)).unwrap();
    let mut filter = FirFilter::new(coefficients);
    let mut buffer = tone(block_size);

    c.bench_function(id, |b| {
        b.iter(|| filter.process_block_inplace(black_box(&mut buffer[..])))
    });
}

fn filter_benchmarks(c: &mut Criterion) {
    run_filter_benchmark("FIR 64 taps, block 2048", c, 64, 2048);
    run_filter_benchmark("FIR 127 taps, block 2048", c, 127, 2048);
}

fn run_estimator_benchmark(id: &str, c: &mut Criterion, block_size: usize) {
    let mut estimator = PitchEstimator::default();
    let block = tone(block_size);

    c.bench_function(id, |b| {
        b.iter(|| estimator.estimate(black_box(&block), 44100))
    });
}

fn estimator_benchmarks(c: &mut Criterion) {
    run_estimator_benchmark("Estimate, block 1024", c, 1024);
    run_estimator_benchmark("Estimate, block 2048", c, 2048);
    run_estimator_benchmark("Estimate, block 4096", c, 4096);
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let mut processor = NoteProcessor::new(DetectorConfig::default()).unwrap();
    let block = tone(2048);

    c.bench_function("Pipeline, block 2048", |b| {
        b.iter(|| processor.on_audio_block(black_box(&block), 44100, 1))
    });
}

criterion_group!(benches, filter_benchmarks, estimator_benchmarks, pipeline_benchmarks);
criterion_main!(benches);
