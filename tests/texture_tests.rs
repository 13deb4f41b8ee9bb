// Host-side tests for the sand texture and the surface that owns it.

mod support;

use sand_core::{Layer, SandError, Surface, TextureSynthesizer, Viewport};
use support::rng;

#[test]
fn texture_has_one_opaque_pixel_per_cell() {
    let synth = TextureSynthesizer::default();
    let layer = synth.generate(64, 48, &mut rng(1)).unwrap();
    assert_eq!(layer.pixels().len(), 64 * 48);
    assert_eq!(layer.as_bytes().len(), 64 * 48 * 4);
    assert!(layer.pixels().iter().all(|p| p.a == 255));
}

#[test]
fn texture_channels_stay_in_documented_ranges() {
    let synth = TextureSynthesizer::default();
    assert_eq!(synth.channel_range(0), (180, 230));
    assert_eq!(synth.channel_range(1), (160, 210));
    assert_eq!(synth.channel_range(2), (130, 180));

    let layer = synth.generate(200, 150, &mut rng(2)).unwrap();
    for p in layer.pixels() {
        assert!((180..=230).contains(&p.r), "r={}", p.r);
        assert!((160..=210).contains(&p.g), "g={}", p.g);
        assert!((130..=180).contains(&p.b), "b={}", p.b);
    }
}

#[test]
fn texture_offset_is_shared_across_channels() {
    // Without grains every pixel keeps the base colour's channel gaps.
    let synth = TextureSynthesizer {
        grain_probability: 0.0,
        ..TextureSynthesizer::default()
    };
    let layer = synth.generate(32, 32, &mut rng(3)).unwrap();
    for p in layer.pixels() {
        assert_eq!(p.r as i32 - p.g as i32, 20);
        assert_eq!(p.g as i32 - p.b as i32, 30);
    }
}

#[test]
fn grains_appear_at_roughly_the_configured_rate() {
    let synth = TextureSynthesizer {
        variation: 0.0,
        ..TextureSynthesizer::default()
    };
    let layer = synth.generate(100, 100, &mut rng(4)).unwrap();
    let darker = layer.pixels().iter().filter(|p| p.r < 215).count();
    // 3% of 10_000 with generous slack for the rng.
    assert!((150..=450).contains(&darker), "darker={}", darker);
}

#[test]
fn same_seed_gives_same_texture() {
    let synth = TextureSynthesizer::default();
    let a = synth.generate(40, 30, &mut rng(9)).unwrap();
    let b = synth.generate(40, 30, &mut rng(9)).unwrap();
    let c = synth.generate(40, 30, &mut rng(10)).unwrap();
    assert_eq!(a.checksum(), b.checksum());
    assert_ne!(a.checksum(), c.checksum());
}

#[test]
fn zero_sized_layers_are_rejected() {
    assert!(matches!(
        Layer::new(0, 10),
        Err(SandError::InvalidSize { width: 0, height: 10 })
    ));
    assert!(TextureSynthesizer::default()
        .generate(10, 0, &mut rng(1))
        .is_err());
}

#[test]
fn viewport_physical_size_scales_by_dpr() {
    assert_eq!(Viewport::new(800.0, 600.0, 2.0).physical_size(), (1600, 1200));
    assert_eq!(Viewport::new(100.5, 50.5, 1.5).physical_size(), (150, 75));
    // Degenerate input still yields a drawable surface.
    assert_eq!(Viewport::new(0.0, 0.0, 1.0).physical_size(), (1, 1));
    assert_eq!(Viewport::new(10.0, 10.0, f32::NAN).dpr, 1.0);
}

#[test]
fn surface_resize_regenerates_texture_and_discards_drawing() {
    let synth = TextureSynthesizer::default();
    let mut r = rng(5);
    let mut surface = Surface::new(Viewport::new(80.0, 60.0, 1.0), &synth, &mut r).unwrap();
    surface.drawing.pixels_mut()[0].a = 200;
    let before = surface.texture.checksum();

    assert!(!surface.resize(Viewport::new(80.0, 60.0, 1.0), &synth, &mut r).unwrap());
    assert_eq!(surface.drawing.pixels()[0].a, 200);

    assert!(surface.resize(Viewport::new(120.0, 80.0, 1.0), &synth, &mut r).unwrap());
    assert_eq!((surface.texture.width(), surface.texture.height()), (120, 80));
    assert_eq!((surface.drawing.width(), surface.drawing.height()), (120, 80));
    assert!(surface.drawing.is_clear());
    assert_ne!(surface.texture.checksum(), before);
    assert!(surface.texture.pixels().iter().all(|p| p.a == 255));
}
