//! Pixel buffer regression test
//!
//! Covers construction, shared-ownership semantics, the statistics used by
//! the auto-parameter paths, luma reduction, and border replication.

use pixlab_core::{ChannelLayout, PixelBuffer};
use pixlab_test::{RegParams, fixtures};

#[test]
fn buffer_reg() {
    let mut rp = RegParams::new("buffer");

    // --- Test 1: construction round trip ---
    let buffer =
        PixelBuffer::from_vec(2, 2, ChannelLayout::Gray, vec![1, 2, 3, 4]).expect("from_vec");
    rp.compare_bool(buffer.shape() == (2, 2, 1), "shape from vec");
    rp.compare_bool(buffer.row(1) == [3, 4], "row access");
    rp.compare_bool(buffer.get(2, 0, 0).is_none(), "checked get rejects x overflow");

    let gradient = fixtures::gradient_gray(16, 4);
    rp.compare_values(0.0, gradient.get_unchecked(0, 0, 0) as f64, 0.0);
    rp.compare_values(255.0, gradient.get_unchecked(15, 3, 0) as f64, 0.0);
    eprintln!("  construction: ok");

    // --- Test 2: clones share, mutation copies ---
    let shared = gradient.clone();
    rp.compare_values(2.0, gradient.ref_count() as f64, 0.0);
    rp.compare_buffers(&gradient, &shared);

    let mut scratch = gradient.to_mut();
    scratch.fill(0);
    let blanked = scratch.freeze();
    rp.compare_values(0.0, blanked.max_sample() as f64, 0.0);
    rp.compare_values(255.0, gradient.max_sample() as f64, 0.0);

    // try_into_mut only succeeds once the handle is unique.
    let contended = gradient.try_into_mut();
    rp.compare_bool(contended.is_err(), "shared handle refuses mutation");
    let gradient = match contended {
        Err(original) => original,
        Ok(_) => unreachable!("handle was shared"),
    };
    drop(shared);
    rp.compare_bool(gradient.try_into_mut().is_ok(), "unique handle converts");
    eprintln!("  sharing: ok");

    // --- Test 3: statistics feeding the auto-parameter paths ---
    let gradient = fixtures::gradient_gray(16, 4);
    rp.compare_values(127.5, gradient.mean(), 1e-9);
    rp.compare_values(0.0, gradient.min_sample() as f64, 0.0);
    rp.compare_values(255.0, gradient.max_sample() as f64, 0.0);
    rp.compare_values(51.0, gradient.percentile(25.0) as f64, 0.0);
    rp.compare_values(119.0, gradient.percentile(50.0) as f64, 0.0);
    rp.compare_values(187.0, gradient.percentile(75.0) as f64, 0.0);

    let edge = fixtures::step_edge_gray(8, 2, 50, 200);
    rp.compare_values(125.0, edge.mean(), 1e-9);
    rp.compare_values(75.0, edge.std_dev(), 1e-9);

    let board = fixtures::checkerboard_gray(4, 4, 1, 10, 250);
    let hist = board.histogram();
    rp.compare_values(8.0, hist.count(10) as f64, 0.0);
    rp.compare_values(8.0, hist.count(250) as f64, 0.0);
    rp.compare_values(0.0, hist.count(0) as f64, 0.0);
    rp.compare_values(16.0, hist.total() as f64, 0.0);
    eprintln!("  statistics: ok");

    // --- Test 4: luma reduction ---
    let primaries = PixelBuffer::from_vec(
        4,
        1,
        ChannelLayout::Rgb,
        vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
    )
    .expect("primaries");
    let luma = primaries.to_luma();
    rp.compare_bool(luma.shape() == (4, 1, 1), "luma is single channel");
    rp.compare_values(76.0, luma.get_unchecked(0, 0, 0) as f64, 0.0);
    rp.compare_values(150.0, luma.get_unchecked(1, 0, 0) as f64, 0.0);
    rp.compare_values(29.0, luma.get_unchecked(2, 0, 0) as f64, 0.0);
    rp.compare_values(255.0, luma.get_unchecked(3, 0, 0) as f64, 0.0);

    let rgb = fixtures::gradient_rgb(12, 12);
    let luma = rgb.to_luma();
    rp.compare_values(15.0, luma.get_unchecked(0, 0, 0) as f64, 0.0);
    rp.compare_values(240.0, luma.get_unchecked(11, 11, 0) as f64, 0.0);
    eprintln!("  luma: ok");

    // --- Test 5: border replication for window filters ---
    let edge = fixtures::step_edge_gray(6, 4, 40, 210);
    let padded = edge.pad_replicate(2);
    rp.compare_bool(padded.shape() == (10, 8, 1), "padded shape");
    rp.compare_values(40.0, padded.get_unchecked(0, 0, 0) as f64, 0.0);
    rp.compare_values(210.0, padded.get_unchecked(9, 7, 0) as f64, 0.0);
    rp.compare_buffers(&edge, &edge.pad_replicate(0));

    assert!(rp.cleanup(), "buffer regression test failed");
}
