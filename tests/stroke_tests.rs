// Host-side tests for groove compositing.

mod support;

use glam::Vec2;
use sand_core::{
    ClearAnimator, ClearFlag, ClearParams, Layer, StrokeRenderer, StrokeStyle, GROOVE_PASSES,
};
use support::rng;

fn renderer() -> (StrokeRenderer, ClearAnimator) {
    let flag = ClearFlag::default();
    (
        StrokeRenderer::new(StrokeStyle::default(), flag.clone()),
        ClearAnimator::new(ClearParams::default(), flag),
    )
}

#[test]
fn particle_count_is_one_per_four_pixels() {
    let (strokes, _) = renderer();
    assert_eq!(strokes.particle_count(0.0), 0);
    assert_eq!(strokes.particle_count(3.99), 0);
    assert_eq!(strokes.particle_count(4.0), 1);
    assert_eq!(strokes.particle_count(53.85), 13);
    assert_eq!(strokes.particle_count(f32::NAN), 0);
}

#[test]
fn particles_land_in_a_ring_around_the_end_point() {
    let (strokes, _) = renderer();
    let to = Vec2::new(200.0, 100.0);
    let particles = strokes.scatter_particles(Vec2::new(100.0, 100.0), to, &mut rng(11));
    assert_eq!(particles.len(), 25);
    for p in &particles {
        let r = p.center.distance(to);
        assert!((13.99..=26.01).contains(&r), "radius {}", r);
        assert!((1.0..=2.5).contains(&p.dot));
        assert!((0.35..=0.7).contains(&p.paint.alpha));
        assert!((160.0..=190.0).contains(&p.paint.rgb[0]));
        assert!((145.0..=170.0).contains(&p.paint.rgb[1]));
        assert!((120.0..=140.0).contains(&p.paint.rgb[2]));
    }
}

#[test]
fn zero_length_segment_leaves_a_dimple_without_particles() {
    let (strokes, _) = renderer();
    let mut layer = Layer::new(100, 100).unwrap();
    let p = Vec2::new(50.0, 50.0);
    let report = strokes.render_segment(&mut layer, 1.0, p, p, &mut rng(1));
    assert!(report.drawn);
    assert_eq!(report.particles, 0);
    assert!(layer.get(50, 50).unwrap().a > 0);
    assert_eq!(layer.get(5, 5).unwrap().a, 0);
}

#[test]
fn segment_marks_pixels_along_the_path() {
    let (strokes, _) = renderer();
    let mut layer = Layer::new(300, 200).unwrap();
    layer.take_dirty();
    let report = strokes.render_segment(
        &mut layer,
        1.0,
        Vec2::new(50.0, 100.0),
        Vec2::new(250.0, 100.0),
        &mut rng(2),
    );
    assert_eq!(report.particles, 50);
    for x in [50, 100, 150, 200, 250] {
        assert!(layer.get(x, 100).unwrap().a > 100, "x={}", x);
    }
    // Far from both the trail and the particle ring.
    assert_eq!(layer.get(150, 20).unwrap().a, 0);
    let dirty = layer.dirty().expect("dirty");
    assert!(dirty.x <= 40 && dirty.right() >= 264);
}

#[test]
fn highlight_sits_up_left_of_the_depression() {
    let (strokes, _) = renderer();
    let mut layer = Layer::new(200, 200).unwrap();
    // Vertical stroke; particles only land near the end point.
    strokes.render_segment(
        &mut layer,
        1.0,
        Vec2::new(100.0, 20.0),
        Vec2::new(100.0, 21.0),
        &mut rng(3),
    );
    let top_edge = layer.get(98, 19).unwrap();
    let shadow_side = layer.get(108, 24).unwrap();
    assert!(top_edge.r > shadow_side.r, "{:?} vs {:?}", top_edge, shadow_side);
}

#[test]
fn dpr_scales_the_groove() {
    let (strokes, _) = renderer();
    let mut one = Layer::new(200, 200).unwrap();
    let mut two = Layer::new(400, 400).unwrap();
    let (a, b) = (Vec2::new(50.0, 50.0), Vec2::new(51.0, 50.0));
    strokes.render_segment(&mut one, 1.0, a, b, &mut rng(4));
    strokes.render_segment(&mut two, 2.0, a, b, &mut rng(4));
    assert!(two.covered_pixels() > one.covered_pixels() * 3);
}

#[test]
fn nothing_is_written_while_clearing() {
    let (strokes, mut clear) = renderer();
    let mut layer = Layer::new(120, 120).unwrap();
    strokes.render_segment(&mut layer, 1.0, Vec2::new(10.0, 10.0), Vec2::new(60.0, 60.0), &mut rng(5));
    assert!(clear.trigger(&layer));

    let before = layer.checksum();
    layer.take_dirty();
    let report = strokes.render_segment(
        &mut layer,
        1.0,
        Vec2::new(20.0, 90.0),
        Vec2::new(100.0, 90.0),
        &mut rng(6),
    );
    assert!(!report.drawn);
    assert_eq!(report.particles, 0);
    assert_eq!(layer.checksum(), before);
    assert_eq!(layer.dirty(), None);
}

#[test]
fn default_style_uses_the_five_groove_passes() {
    let style = StrokeStyle::default();
    assert_eq!(style.passes.len(), 5);
    assert_eq!(style.passes, GROOVE_PASSES.to_vec());
    // Back to front: widest shadow first, thin highlight last.
    assert_eq!(style.passes[0].width, 26.0);
    assert_eq!(style.passes[4].width, 3.0);
    assert!(style.passes[4].offset.x < 0.0 && style.passes[4].offset.y < 0.0);
}
