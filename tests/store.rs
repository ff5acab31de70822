mod tests {
    use std::thread;

    use globe_composer::{DisplayState, ModeId, StateStore, ValidationError};

    #[test]
    fn test_color_round_trip() {
        let store = StateStore::default();
        for hex in ["000000", "ff00aa", "0a0b0c", "ffffffff", "00202000"] {
            store.set_color(hex).unwrap();
            assert_eq!(store.read().color.to_string(), hex);
        }
    }

    #[test]
    fn test_offsets_add_up() {
        let store = StateStore::default();
        store.adjust_offset(120);
        store.adjust_offset(-30);
        assert_eq!(store.read().offset, 90);
    }

    #[test]
    fn test_set_mode_validates() {
        let store = StateStore::default();
        for raw in 0..=3 {
            store.set_mode(raw).unwrap();
            assert_eq!(i64::from(store.read().mode.as_raw()), raw);
        }

        let before = store.read();
        for raw in [-1, 4, 256, i64::MAX] {
            assert!(matches!(
                store.set_mode(raw),
                Err(ValidationError::UnknownMode(_))
            ));
            assert_eq!(store.read(), before);
        }
    }

    #[test]
    fn test_invalid_color_leaves_state() {
        let store = StateStore::default();
        store.set_color("102030").unwrap();
        let before = store.read();
        assert!(store.set_color("not-a-color").is_err());
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_clones_share_one_record() {
        let store = StateStore::default();
        let other = store.clone();
        other.set_mode(1).unwrap();
        assert_eq!(store.read().mode, ModeId::Solid);
    }

    #[test]
    fn test_concurrent_reads_only_see_published_records() {
        const WRITERS: i64 = 4;
        const ROUNDS: i64 = 300;

        let initial = DisplayState::default();
        let store = StateStore::new(initial);

        let (published, observed) = thread::scope(|scope| {
            let writers: Vec<_> = (0..WRITERS)
                .map(|writer| {
                    let store = store.clone();
                    scope.spawn(move || {
                        let mut published = Vec::new();
                        for round in 0..ROUNDS {
                            published.push(store.adjust_offset(1));
                            published.push(store.set_mode((writer + round) % 4).unwrap());
                            let color = format!("{:02x}{:02x}00", writer, round % 256);
                            published.push(store.set_color(&color).unwrap());
                        }
                        published
                    })
                })
                .collect();
            let readers: Vec<_> = (0..2)
                .map(|_| {
                    let store = store.clone();
                    scope.spawn(move || {
                        (0..ROUNDS * 2).map(|_| store.read()).collect::<Vec<_>>()
                    })
                })
                .collect();

            let published: Vec<DisplayState> = writers
                .into_iter()
                .flat_map(|writer| writer.join().unwrap())
                .collect();
            let observed: Vec<DisplayState> = readers
                .into_iter()
                .flat_map(|reader| reader.join().unwrap())
                .collect();
            (published, observed)
        });

        for state in &observed {
            assert!(
                *state == initial || published.contains(state),
                "read a record no writer published: {state:?}"
            );
        }
        assert_eq!(store.read().offset, WRITERS * ROUNDS);
        assert!(published.contains(&store.read()));
    }
}
