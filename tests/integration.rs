use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use tiled_watermark::{
    blending, composite, process_batch, scale_watermark, BatchOptions, Error, ImageSource,
    WatermarkParams,
};

fn black_base(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([0, 0, 0])))
}

fn white_logo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, 255]),
    ))
}

fn is_stamped(img: &RgbImage, x: u32, y: u32) -> bool {
    (25..=40).contains(&img.get_pixel(x, y)[0])
}

fn is_clear(img: &RgbImage, x: u32, y: u32) -> bool {
    *img.get_pixel(x, y) == Rgb([0, 0, 0])
}

#[test]
fn reference_scenario_lays_out_eight_staggered_rows() {
    // 1000x800 base, 200x100 logo: tile 100x50, spacing 50, row step 100
    let out = composite(
        &black_base(1000, 800),
        &white_logo(200, 100),
        &WatermarkParams::new(128, 0.05, 0.1),
    )
    .unwrap();

    assert_eq!(out.dimensions(), (1000, 800));

    for row in 0..8u32 {
        let y = row * 100 + 25;
        if row % 2 == 0 {
            // tiles at x = 0, 150, 300, ...
            assert!(is_stamped(&out, 50, y), "row {row}");
            assert!(is_clear(&out, 120, y), "row {row}");
            assert!(is_stamped(&out, 950, y), "row {row}");
        } else {
            // shifted by 75: tiles at x = -75, 75, 225, ...
            assert!(is_stamped(&out, 10, y), "row {row}");
            assert!(is_clear(&out, 50, y), "row {row}");
            assert!(is_stamped(&out, 120, y), "row {row}");
            assert!(is_stamped(&out, 990, y), "row {row}");
        }
        // vertical gap below each row
        assert!(is_clear(&out, 50, row * 100 + 75), "row {row}");
    }
}

#[test]
fn zero_opacity_output_equals_base() {
    let base = DynamicImage::ImageRgb8(RgbImage::from_fn(160, 90, |x, y| {
        Rgb([(x % 200) as u8, (y % 200) as u8, 128])
    }));
    let out = composite(
        &base,
        &white_logo(40, 40),
        &WatermarkParams::new(0, 0.05, 0.1),
    )
    .unwrap();
    assert_eq!(out, base.to_rgb8());
}

#[test]
fn full_opacity_keeps_scaled_watermark_alpha() {
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_fn(40, 20, |x, _| {
        Rgba([200, 100, 0, (x * 6) as u8])
    }));
    let scaled = scale_watermark(&logo, 400, 0.1).unwrap();
    let mut faded = scaled.clone();
    blending::apply_opacity(&mut faded, 255);
    assert_eq!(faded, scaled);
}

#[test]
fn geometry_error_is_reported_not_panicked() {
    let err = composite(
        &black_base(5, 5),
        &white_logo(200, 100),
        &WatermarkParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Geometry { .. }));
}

#[test]
fn batch_from_files_returns_paths_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<ImageSource> = [(300, 200), (240, 240), (500, 100)]
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| {
            let path = dir.path().join(format!("input_{i}.png"));
            black_base(w, h).save(&path).unwrap();
            ImageSource::from(path)
        })
        .collect();

    let logo_path = dir.path().join("logo.png");
    white_logo(60, 20).save(&logo_path).unwrap();

    let out_dir = dir.path().join("out");
    let paths = process_batch(
        &inputs,
        &ImageSource::from(logo_path),
        WatermarkParams::default(),
        BatchOptions {
            output_dir: out_dir.clone(),
            ..BatchOptions::default()
        },
    )
    .unwrap();

    assert_eq!(
        paths,
        vec![
            out_dir.join("watermarked_1.jpg"),
            out_dir.join("watermarked_2.jpg"),
            out_dir.join("watermarked_3.jpg"),
        ]
    );
    for (path, (w, h)) in paths.iter().zip([(300, 200), (240, 240), (500, 100)]) {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (w, h));
    }
}

#[test]
fn corrupt_watermark_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let base_path = dir.path().join("base.png");
    black_base(100, 100).save(&base_path).unwrap();

    let err = process_batch(
        &[ImageSource::from(base_path)],
        &ImageSource::Bytes(b"\x89PNG\r\n\x1a\ntruncated".to_vec()),
        WatermarkParams::default(),
        BatchOptions {
            output_dir: out_dir.clone(),
            ..BatchOptions::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert!(!out_dir.join("watermarked_1.jpg").exists());
}
