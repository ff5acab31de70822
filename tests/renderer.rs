mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use globe_composer::filter::GAMMA_LUT;
    use globe_composer::{
        Color, DisplayState, FilterProcessorConfig, ModeId, Renderer, RendererConfig, Rgb,
    };

    fn wall(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn raw_config(led_count: usize) -> RendererConfig {
        RendererConfig {
            led_count,
            filters: FilterProcessorConfig {
                brightness: 255,
                gamma: false,
            },
            ..RendererConfig::default()
        }
    }

    fn state(mode: ModeId, color: Color, offset: i64) -> DisplayState {
        DisplayState {
            mode,
            color,
            offset,
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_frames() {
        let config = RendererConfig::default();
        for mode in ModeId::ALL {
            let state = state(mode, Color::new(0x12, 0x80, 0xf0), 0);
            let mut a = Renderer::new(&config);
            let mut b = Renderer::new(&config);
            let first = a.render(&state, wall(13, 37)).to_vec();
            assert_eq!(first, b.render(&state, wall(13, 37)), "{mode:?}");
            assert_eq!(first, a.render(&state, wall(13, 37)), "{mode:?}");
        }
    }

    #[test]
    fn test_offset_shifts_globe_time() {
        let config = RendererConfig::default();
        for mode in ModeId::ALL {
            let mut renderer = Renderer::new(&config);
            let shifted = renderer
                .render(&state(mode, Color::default(), 3_600), wall(10, 0))
                .to_vec();
            let plain = renderer
                .render(&state(mode, Color::default(), 0), wall(11, 0))
                .to_vec();
            assert_eq!(shifted, plain, "{mode:?}");
        }
    }

    #[test]
    fn test_topology_is_respected() {
        assert_eq!(Renderer::new(&raw_config(13)).led_count(), 13);
        assert_eq!(Renderer::new(&raw_config(0)).led_count(), 1);
        assert_eq!(Renderer::new(&raw_config(10_000)).led_count(), 256);

        let mut renderer = Renderer::new(&raw_config(42));
        let frame = renderer.render(&DisplayState::default(), wall(8, 0));
        assert_eq!(frame.len(), 42);
    }

    #[test]
    fn test_solid_shows_color() {
        let mut renderer = Renderer::new(&raw_config(13));
        let frame = renderer.render(
            &state(ModeId::Solid, Color::new(0xff, 0x00, 0xaa), 0),
            wall(8, 0),
        );
        assert!(frame.iter().all(|led| *led == Rgb { r: 0xff, g: 0, b: 0xaa }));

        let frame = renderer.render(
            &state(ModeId::Solid, Color::new(10, 20, 30).with_white(5), 0),
            wall(8, 0),
        );
        assert!(frame.iter().all(|led| *led == Rgb { r: 15, g: 25, b: 35 }));
    }

    #[test]
    fn test_filters_apply_to_frames() {
        let mut renderer = Renderer::new(&RendererConfig {
            led_count: 4,
            filters: FilterProcessorConfig {
                brightness: 255,
                gamma: true,
            },
            ..RendererConfig::default()
        });
        let frame = renderer.render(&state(ModeId::Solid, Color::new(128, 64, 0), 0), wall(8, 0));
        assert_eq!(
            frame[0],
            Rgb {
                r: GAMMA_LUT[128],
                g: GAMMA_LUT[64],
                b: 0
            }
        );

        let mut dimmed = Renderer::new(&RendererConfig {
            led_count: 4,
            filters: FilterProcessorConfig {
                brightness: 0,
                gamma: false,
            },
            ..RendererConfig::default()
        });
        let frame = dimmed.render(&state(ModeId::Solid, Color::default(), 0), wall(8, 0));
        assert!(frame.iter().all(|led| *led == Rgb::default()));
    }

    #[test]
    fn test_clock_hand_moves() {
        let mut renderer = Renderer::new(&raw_config(13));
        let clock = DisplayState::default();
        let morning = renderer.render(&clock, wall(9, 0)).to_vec();
        let evening = renderer.render(&clock, wall(21, 0)).to_vec();
        assert_ne!(morning, evening);

        let later = renderer
            .render(&clock, wall(9, 0) + TimeDelta::minutes(30))
            .to_vec();
        assert_ne!(morning, later);
    }

    #[test]
    fn test_fireworks_stay_in_bounds() {
        for led_count in [1, 2, 3, 13, 256] {
            let mut renderer = Renderer::new(&raw_config(led_count));
            for minute in 0..60 {
                let frame =
                    renderer.render(&state(ModeId::Fireworks, Color::default(), 0), wall(20, minute));
                assert_eq!(frame.len(), led_count);
            }
        }
    }
}
