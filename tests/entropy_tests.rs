use entro::{shannon_entropy, Base, Entropy, Error};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn test_entropy_empty() {
    assert!(matches!(shannon_entropy("", Base::BITS), Err(Error::EmptyBuffer)));
    let e = Entropy::new(Base::NATS);
    assert!(matches!(e.metric(), Err(Error::EmptyBuffer)));
}

#[test]
fn test_entropy_low_high() {
    let low = shannon_entropy("aaaaaaaaaaaa", Base::BITS).unwrap();
    let high = shannon_entropy("a4G$9kL2#xPq7Z!", Base::BITS).unwrap();
    assert!(low < high);
}

#[test]
fn single_symbol_is_zero() {
    assert_eq!(shannon_entropy("aaaa", Base::BITS).unwrap(), 0.0);
    assert_eq!(shannon_entropy([7u8; 1000], Base::NATS).unwrap(), 0.0);
    assert_eq!(shannon_entropy("z", Base::DIGITS).unwrap(), 0.0);
}

#[test]
fn two_symbols_one_bit() {
    assert_eq!(shannon_entropy("ab", Base::BITS).unwrap(), 1.0);
    assert_eq!(shannon_entropy("aabb", Base::BITS).unwrap(), 1.0);
    assert_eq!(shannon_entropy("abababab", Base::BITS).unwrap(), 1.0);
}

#[test]
fn uniform_reaches_log_k() {
    let all: Vec<u8> = (0..=255).collect();
    assert!(close(shannon_entropy(&all, Base::BITS).unwrap(), 8.0));
    let ten: Vec<u8> = (0..10).cycle().take(100).collect();
    assert!(close(shannon_entropy(&ten, Base::DIGITS).unwrap(), 1.0));
}

#[test]
fn bounded_by_log_distinct() {
    let samples: [&[u8]; 4] = [b"hello world", b"mississippi", b"\x00\x01\x01\x02\x02\x02", b"The quick brown fox"];
    for s in samples {
        let e = Entropy::with_bytes(s, Base::BITS);
        let h = e.shannon().unwrap();
        assert!(h >= 0.0);
        assert!(h <= (e.distinct() as f64).log2() + 1e-12, "{:?}: {}", s, h);
    }
}

#[test]
fn metric_is_shannon_over_len() {
    let e = Entropy::with_bytes("mississippi", Base::BITS);
    assert_eq!(e.metric().unwrap(), e.shannon().unwrap() / 11.0);
}

#[test]
fn nats_rescale_by_ln2() {
    let data = b"hello entropy world";
    let bits = shannon_entropy(data, Base::BITS).unwrap();
    let nats = shannon_entropy(data, Base::NATS).unwrap();
    assert!(close(nats, bits * std::f64::consts::LN_2));
}

#[test]
fn update_accumulates() {
    let mut e = Entropy::new(Base::BITS);
    e.update("aa");
    assert_eq!(e.shannon().unwrap(), 0.0);
    e.update("bb");
    assert_eq!(e.shannon().unwrap(), 1.0);
    assert_eq!(e.len(), 4);
}
