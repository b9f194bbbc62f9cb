mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_strip_light::power::estimate_current_ma;
    use myrtio_strip_light::scheduler::earliest;
    use myrtio_strip_light::{
        ButtonConfig, Frame, LightConfig, PersistenceConfig, Rgb, SoftTimer, StorageError,
    };

    #[test]
    fn test_current_estimate() {
        let off = Frame::dark();
        assert!(estimate_current_ma(&off).abs() < f32::EPSILON);

        let red = Frame {
            lit_count: 10,
            color: Rgb::new(255, 0, 0),
        };
        assert!((estimate_current_ma(&red) - 200.0).abs() < 0.01);

        let white = Frame {
            lit_count: 60,
            color: Rgb::new(255, 255, 255),
        };
        assert!((estimate_current_ma(&white) - 3600.0).abs() < 0.1);
    }

    #[test]
    fn test_defaults_match_firmware() {
        let light = LightConfig::default();
        assert_eq!(light.fade.duration, Duration::from_millis(1000));
        assert_eq!(light.fade.frames, 20);
        assert_eq!(light.refresh_period, Duration::from_secs(3));
        assert_eq!(light.lock_timeout, Duration::from_millis(50));
        assert_eq!(LightConfig::new(144).led_count, 144);

        let button = ButtonConfig::default();
        assert_eq!(button.debounce, Duration::from_millis(50));
        assert_eq!(button.long_press, Duration::from_millis(400));
        assert_eq!(button.dim_interval, Duration::from_millis(150));
        assert_eq!(button.dim_step, 15);

        let persistence = PersistenceConfig::default();
        assert_eq!(persistence.namespace, "light");
        assert_eq!(persistence.delay, Duration::from_secs(10));
    }

    #[test]
    fn test_soft_timer_once() {
        let mut timer = SoftTimer::new();
        assert!(!timer.poll(Instant::from_millis(0)));

        timer.schedule_once(Instant::from_millis(0), Duration::from_millis(100));
        assert!(!timer.poll(Instant::from_millis(99)));
        assert!(timer.poll(Instant::from_millis(100)));
        assert!(!timer.poll(Instant::from_millis(200)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_soft_timer_periodic_and_cancel() {
        let mut timer = SoftTimer::new();
        timer.schedule_periodic(Instant::from_millis(0), Duration::from_millis(10));
        assert!(timer.poll(Instant::from_millis(12)));
        assert_eq!(timer.deadline(), Some(Instant::from_millis(20)));
        assert!(timer.poll(Instant::from_millis(55)));
        assert_eq!(timer.deadline(), Some(Instant::from_millis(65)));

        timer.cancel();
        assert!(!timer.poll(Instant::from_millis(100)));
    }

    #[test]
    fn test_earliest() {
        let a = Some(Instant::from_millis(5));
        let b = Some(Instant::from_millis(3));
        assert_eq!(earliest(a, b), b);
        assert_eq!(earliest(a, None), a);
        assert_eq!(earliest(None, None), None);
    }

    #[test]
    fn test_storage_error_display() {
        assert_eq!(StorageError::Write("level").to_string(), "write `level` failed");
    }
}
