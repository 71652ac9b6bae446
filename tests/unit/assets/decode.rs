use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_dimensions_and_straight_alpha() {
    let mut img = image::RgbaImage::new(3, 2);
    img.put_pixel(1, 1, image::Rgba([100, 50, 200, 128]));

    let src = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((src.width(), src.height()), (3, 2));
    assert_eq!(src.alpha_at(1, 1), 128);
    assert_eq!(src.alpha_at(0, 0), 0);
    assert_eq!(&src.rgba8()[(3 + 1) * 4..(3 + 1) * 4 + 4], &[100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"definitely not a png").is_err());
}

#[test]
fn rasterize_svg_fills_shape_only() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect x="0" y="0" width="10" height="10" fill="black"/>
    </svg>"#;
    let src = rasterize_svg(svg).unwrap();
    assert_eq!((src.width(), src.height()), (20, 10));
    assert_eq!(src.alpha_at(5, 5), 255);
    assert_eq!(src.alpha_at(15, 5), 0);
}

#[test]
fn rasterize_svg_rejects_malformed_input() {
    assert!(rasterize_svg(br#"<svg"#).is_err());
}

#[test]
fn source_image_checks_buffer_shape() {
    assert!(SourceImage::new(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(
        SourceImage::new(2, 2, vec![0; 15]),
        Err(LivingError::Image(_))
    ));
    assert!(SourceImage::new(0, 2, Vec::new()).is_err());
}

#[test]
fn alpha_out_of_bounds_reads_transparent() {
    let src = SourceImage::new(1, 1, vec![1, 2, 3, 255]).unwrap();
    assert_eq!(src.alpha_at(0, 0), 255);
    assert_eq!(src.alpha_at(1, 0), 0);
    assert_eq!(src.alpha_at(0, 9), 0);
}

#[test]
fn load_image_reads_png_from_disk() {
    let dir = std::env::temp_dir().join("living_image_decode_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dot.png");
    std::fs::write(&path, png_bytes(image::RgbaImage::new(4, 4))).unwrap();

    let src = load_image(&path).unwrap();
    assert_eq!(src.size(), crate::foundation::core::Canvas::new(4, 4));
    assert!(load_image(&dir.join("missing.png")).is_err());
}
