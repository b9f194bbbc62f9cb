mod tests {
    use myrtio_strip_light::color::{
        CctMapping, MIREDS_COLDEST, Rgb, WarmColdAmber, blackbody_to_rgb, hsv_to_rgb,
        kelvin_to_wwa, mireds_to_kelvin, scale_color, xy_to_rgb,
    };
    use proptest::prelude::*;

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_hsv_boundaries() {
        assert_eq!(hsv_to_rgb(0, 0), WHITE);
        assert_eq!(hsv_to_rgb(0, 255), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(255, 255), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(255, 0), WHITE);
    }

    #[test]
    fn test_hsv_primary_sectors() {
        // 85/255 of the wheel is 120 degrees
        let green = hsv_to_rgb(85, 255);
        assert_eq!(green.g, 255);
        assert!(green.r <= 1 && green.b <= 1);

        let blue = hsv_to_rgb(170, 255);
        assert_eq!(blue.b, 255);
        assert!(blue.r <= 1 && blue.g <= 1);
    }

    #[test]
    fn test_xy_white_point() {
        // D65: x = 0.3127, y = 0.3290
        let white = xy_to_rgb(20493, 21561);
        assert!(white.r >= 250, "{white:?}");
        assert!(white.g >= 250, "{white:?}");
        assert!(white.b >= 250, "{white:?}");
    }

    #[test]
    fn test_xy_boundaries() {
        assert_eq!(xy_to_rgb(0, 65535), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(xy_to_rgb(65535, 0), Rgb::default());
        assert_eq!(xy_to_rgb(0, 0), Rgb::default());
    }

    #[test]
    fn test_mireds_to_kelvin() {
        assert!((mireds_to_kelvin(250) - 4000.0).abs() < 0.01);
        assert!((mireds_to_kelvin(0) - 1_000_000.0).abs() < 1.0);
    }

    #[test]
    fn test_wwa_saturates_outside_range() {
        let coldest = kelvin_to_wwa(mireds_to_kelvin(MIREDS_COLDEST));
        assert_eq!(
            coldest,
            WarmColdAmber {
                warm: 0,
                cold: 255,
                amber: 0
            }
        );
        assert_eq!(kelvin_to_wwa(20000.0), coldest);

        let warmest = kelvin_to_wwa(1000.0);
        assert_eq!(
            warmest,
            WarmColdAmber {
                warm: 255,
                cold: 0,
                amber: 255
            }
        );
        assert_eq!(kelvin_to_wwa(mireds_to_kelvin(500)), warmest);
    }

    #[test]
    fn test_wwa_amber_only_below_3000k() {
        assert_eq!(kelvin_to_wwa(3000.0).amber, 0);
        assert_eq!(kelvin_to_wwa(4000.0).amber, 0);
        assert!(kelvin_to_wwa(2600.0).amber > 100);
    }

    #[test]
    fn test_wwa_channel_wiring() {
        let channels = CctMapping::WarmColdAmber.mireds_to_channels(500);
        assert_eq!(channels, Rgb { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_blackbody() {
        assert_eq!(blackbody_to_rgb(6600.0), WHITE);
        let candle = blackbody_to_rgb(1000.0);
        assert_eq!(candle.r, 255);
        assert_eq!(candle.b, 0);
        assert!(candle.g < 100);
        let sky = blackbody_to_rgb(40000.0);
        assert_eq!(sky.b, 255);
        assert!(sky.r < sky.b);
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(WHITE, 0, 20), Rgb::default());
        assert_eq!(scale_color(WHITE, 20, 20), WHITE);
        assert_eq!(scale_color(WHITE, 10, 20), Rgb::new(127, 127, 127));
        assert_eq!(scale_color(WHITE, 5, 0), Rgb::default());
    }

    proptest! {
        #[test]
        fn prop_xy_never_panics(x in any::<u16>(), y in any::<u16>()) {
            let _ = xy_to_rgb(x, y);
        }

        #[test]
        fn prop_wwa_is_monotonic(a in 1u16..1000, b in 1u16..1000) {
            let (cold_mireds, warm_mireds) = if a <= b { (a, b) } else { (b, a) };
            let colder = kelvin_to_wwa(mireds_to_kelvin(cold_mireds));
            let warmer = kelvin_to_wwa(mireds_to_kelvin(warm_mireds));
            prop_assert!(colder.cold >= warmer.cold);
            prop_assert!(colder.warm <= warmer.warm);
            prop_assert!(colder.amber <= warmer.amber);
        }

        #[test]
        fn prop_hsv_full_saturation_has_a_dark_channel(hue in any::<u8>()) {
            let color = hsv_to_rgb(hue, 255);
            prop_assert_eq!(color.r.max(color.g).max(color.b), 255);
            prop_assert!(color.r.min(color.g).min(color.b) <= 1);
        }
    }
}
