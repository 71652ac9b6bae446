use super::*;

#[test]
fn filled_circle_covers_its_center_only() {
    let mut s = CpuSurface::new(Canvas::new(32, 32)).unwrap();
    s.clear();
    s.fill_circle(Point::new(8.0, 8.0), 4.0);
    s.present();

    let frame = s.to_frame();
    assert_eq!((frame.width, frame.height), (32, 32));
    assert_eq!(frame.data.len(), 32 * 32 * 4);
    assert_eq!(frame.alpha_at(8, 8), 255);
    assert_eq!(frame.alpha_at(24, 24), 0);
}

#[test]
fn transform_moves_and_scales_discs() {
    let mut s = CpuSurface::new(Canvas::new(32, 32)).unwrap();
    s.clear();
    s.save();
    s.translate(Vec2::new(16.0, 16.0));
    s.scale(2.0);
    s.fill_circle(Point::new(4.0, 4.0), 2.0);
    s.restore();
    s.present();

    let frame = s.to_frame();
    assert_eq!(frame.alpha_at(24, 24), 255);
    assert_eq!(frame.alpha_at(4, 4), 0);
}

#[test]
fn clear_color_fills_background() {
    let mut s = CpuSurface::new(Canvas::new(8, 8))
        .unwrap()
        .with_clear_rgba(Some([10, 20, 30, 255]));
    s.clear();
    s.present();
    let frame = s.to_frame();
    assert_eq!(&frame.data[..4], &[10, 20, 30, 255]);
}

#[test]
fn clear_discards_previous_frame() {
    let mut s = CpuSurface::new(Canvas::new(16, 16)).unwrap();
    s.clear();
    s.fill_circle(Point::new(8.0, 8.0), 6.0);
    s.present();
    assert_eq!(s.to_frame().alpha_at(8, 8), 255);

    s.clear();
    s.present();
    assert_eq!(s.to_frame().alpha_at(8, 8), 0);
}

#[test]
fn resize_reallocates_and_rejects_oversize() {
    let mut s = CpuSurface::new(Canvas::new(8, 8)).unwrap();
    s.resize(Canvas::new(20, 10)).unwrap();
    assert_eq!(s.size(), Canvas::new(20, 10));
    s.clear();
    s.present();
    assert_eq!(s.to_frame().data.len(), 20 * 10 * 4);

    assert!(matches!(
        s.resize(Canvas::new(70_000, 10)),
        Err(LivingError::Render(_))
    ));
}

#[test]
fn zero_sized_surface_is_usable_but_empty() {
    let mut s = CpuSurface::new(Canvas::new(0, 0)).unwrap();
    s.clear();
    s.fill_circle(Point::new(0.0, 0.0), 3.0);
    s.present();
    assert!(s.to_frame().data.is_empty());
}

#[test]
fn straight_conversion_keeps_opaque_pixels() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0x48, 0xA0, 0xDB, 0xFF],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![0x48, 0xA0, 0xDB, 0xFF]);
}
