mod tests {
    use globe_composer::math8::{blend8, ease_in_out_quad, hash32, progress8, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_progress8() {
        assert_eq!(progress8(0, 100), 0);
        assert_eq!(progress8(50, 100), 127);
        assert_eq!(progress8(100, 100), 255);
        assert_eq!(progress8(500, 100), 255);
        assert_eq!(progress8(10, 0), 0);
    }

    #[test]
    fn test_ease_in_out_quad() {
        assert_eq!(ease_in_out_quad(0), 0);
        assert_eq!(ease_in_out_quad(255), 255);
        for i in 0..255u8 {
            assert!(ease_in_out_quad(i) <= ease_in_out_quad(i + 1), "{i}");
        }
    }

    #[test]
    fn test_hash32_is_stable() {
        assert_eq!(hash32(42), hash32(42));
        assert_ne!(hash32(42), hash32(43));
    }
}
