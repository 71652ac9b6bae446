use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_quart_decelerates_harder_than_out_quad() {
    assert!(Ease::OutQuart.apply(0.25) > Ease::OutQuad.apply(0.25));
    assert_eq!(Ease::default(), Ease::OutQuad);
}

#[test]
fn input_outside_unit_interval_is_clamped() {
    assert_eq!(Ease::OutQuart.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(7.0), 1.0);
}
