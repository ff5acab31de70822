mod tests {
    use globe_composer::ValidationError;
    use globe_composer::color::{Color, Rgb, add_colors, blend_colors, scale_color};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_scale_and_add() {
        assert_eq!(scale_color(WHITE, 255), WHITE);
        assert_eq!(scale_color(WHITE, 0), BLACK);
        assert_eq!(add_colors(RED, BLUE), Rgb { r: 255, g: 0, b: 255 });
        assert_eq!(add_colors(WHITE, RED), WHITE);
    }

    #[test]
    fn test_parse_hex() {
        let color: Color = "ff00aa".parse().unwrap();
        assert_eq!(color, Color::new(0xff, 0x00, 0xaa));
        assert_eq!(color.white(), None);
        assert_eq!(color.to_string(), "ff00aa");

        let color: Color = "#FF00AA10".parse().unwrap();
        assert_eq!(color.white(), Some(0x10));
        assert_eq!(color.to_string(), "ff00aa10");
    }

    #[test]
    fn test_parse_channels() {
        assert_eq!(
            "255,0,170".parse::<Color>().unwrap(),
            Color::new(255, 0, 170)
        );
        assert_eq!(
            "255, 0, 170, 16".parse::<Color>().unwrap().to_string(),
            "ff00aa10"
        );
    }

    #[test]
    fn test_parse_rejects() {
        for input in ["", "ff00a", "ff00aa1", "gg0000", "#", "1,2", "1,2,3,4,5", "a,b,c"] {
            assert!(
                matches!(input.parse::<Color>(), Err(ValidationError::InvalidColor(_))),
                "{input:?}"
            );
        }
        assert_eq!(
            "256,0,0".parse::<Color>(),
            Err(ValidationError::ChannelOutOfRange {
                channel: 'r',
                value: 256
            })
        );
        assert_eq!(
            "0,0,0,-1".parse::<Color>(),
            Err(ValidationError::ChannelOutOfRange {
                channel: 'w',
                value: -1
            })
        );
    }

    #[test]
    fn test_white_is_mixed_into_rgb() {
        let color = Color::new(0x10, 0x20, 0xf0).with_white(0x20);
        assert_eq!(
            color.to_rgb(),
            Rgb {
                r: 0x30,
                g: 0x40,
                b: 0xff
            }
        );
        assert_eq!(Color::new(1, 2, 3).to_rgb(), Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Color::default().to_string(), "ffffff");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = Color::new(0x12, 0x34, 0x56).with_white(0x78);
        assert_eq!(serde_json::to_string(&color).unwrap(), r#""12345678""#);
        assert_eq!(
            serde_json::from_str::<Color>(r##""#123456""##).unwrap(),
            Color::new(0x12, 0x34, 0x56)
        );
        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());
    }
}
