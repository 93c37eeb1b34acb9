use alpha_matte::{
    chroma_key, codec, difference_matte, estimate_background_color, BackgroundSpec, Color, Error,
    RasterImage,
};

#[test]
fn fully_transparent_region_recovers_zero_alpha() {
    let white = RasterImage::filled(2, 2, [255, 255, 255, 255]).unwrap();
    let black = RasterImage::filled(2, 2, [0, 0, 0, 255]).unwrap();
    let out = difference_matte(&white, &black).unwrap();

    assert_eq!(out.dimensions(), (2, 2));
    for px in out.pixels().chunks_exact(4) {
        assert_eq!(px, &[0, 0, 0, 0]);
    }
}

#[test]
fn solid_color_recovers_opaque_foreground() {
    let white = RasterImage::filled(4, 4, [200, 100, 50, 255]).unwrap();
    let black = white.clone();
    let out = difference_matte(&white, &black).unwrap();

    for px in out.pixels().chunks_exact(4) {
        assert_eq!(px[3], 255);
        for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
            assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
        }
    }
}

#[test]
fn mismatched_passes_produce_no_output() {
    let white = RasterImage::filled(10, 10, [255; 4]).unwrap();
    let black = RasterImage::filled(10, 11, [0, 0, 0, 255]).unwrap();
    assert!(matches!(
        difference_matte(&white, &black),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn semi_transparent_foreground_round_trips() {
    // composite (40, 160, 220) at alpha 0.6 over white and over black
    let fg = [40.0_f64, 160.0, 220.0];
    let a = 0.6;
    let over = |bg: f64| fg.map(|c| (a * c + (1.0 - a) * bg).round() as u8);
    let w = over(255.0);
    let b = over(0.0);

    let white = RasterImage::filled(3, 3, [w[0], w[1], w[2], 255]).unwrap();
    let black = RasterImage::filled(3, 3, [b[0], b[1], b[2], 255]).unwrap();
    let px = difference_matte(&white, &black).unwrap().pixel(1, 1);

    assert!(px[3].abs_diff(153) <= 2, "alpha {}", px[3]);
    for (got, want) in px[..3].iter().zip(fg) {
        assert!(f64::from(*got) - want <= 4.0, "{got} vs {want}");
        assert!(want - f64::from(*got) <= 4.0, "{got} vs {want}");
    }
}

#[test]
fn auto_background_keys_out_green_corners() {
    let mut img = RasterImage::filled(10, 10, [0, 255, 0, 255]).unwrap();
    img.put_pixel(5, 5, [255, 0, 0, 255]);
    img.put_pixel(3, 3, [10, 240, 10, 255]);

    assert_eq!(estimate_background_color(&img), Color::new(0, 255, 0));

    let spec: BackgroundSpec = "auto".parse().unwrap();
    let out = chroma_key(&img, &spec, 30).unwrap();

    assert_eq!(out.pixel(0, 0), [0, 255, 0, 0]);
    assert_eq!(out.pixel(9, 9), [0, 255, 0, 0]);
    // distance sqrt(100 + 225 + 100) ~= 20.6
    assert_eq!(out.pixel(3, 3), [10, 240, 10, 0]);
    assert_eq!(out.pixel(5, 5), [255, 0, 0, 255]);
}

#[test]
fn invalid_inputs_fail_before_processing() {
    assert!(matches!(
        "#12345z".parse::<BackgroundSpec>(),
        Err(Error::InvalidColor(_))
    ));

    let img = RasterImage::filled(2, 2, [0; 4]).unwrap();
    assert!(matches!(
        chroma_key(&img, &BackgroundSpec::Fixed(Color::BLACK), -5),
        Err(Error::InvalidTolerance(-5))
    ));
}

#[test]
fn keyed_output_survives_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyed.png");

    let mut img = RasterImage::filled(6, 6, [255, 255, 255, 255]).unwrap();
    img.put_pixel(2, 2, [200, 200, 200, 255]);
    let keyed = chroma_key(&img, &BackgroundSpec::Fixed(Color::WHITE), 50).unwrap();
    codec::encode(&keyed, &path).unwrap();

    let decoded = codec::decode(&path).unwrap();
    assert_eq!(decoded, keyed);
    assert_eq!(
        chroma_key(&decoded, &BackgroundSpec::Fixed(Color::WHITE), 50).unwrap(),
        keyed
    );
}
