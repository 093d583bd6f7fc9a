use super::*;

fn frame(fill: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![fill; 8],
        premultiplied: false,
    }
}

#[test]
fn starts_empty() {
    let store = FrameStore::new();
    assert!(store.is_empty());
    assert_eq!(store.names().count(), 0);
    assert_eq!(store.fingerprint("x"), None);
}

#[test]
fn reusing_a_name_overwrites() {
    let mut store = FrameStore::new();
    assert!(store.insert("a", frame(1)).is_none());
    let old = store.insert("a", frame(2)).unwrap();
    assert_eq!(old.data[0], 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.bytes("a"), Some(&[2u8; 8][..]));
}

#[test]
fn iterates_in_name_order() {
    let mut store = FrameStore::new();
    store.insert("b", frame(1));
    store.insert("a", frame(2));
    assert_eq!(store.names().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn fingerprint_follows_content() {
    let mut store = FrameStore::new();
    store.insert("a", frame(1));
    store.insert("b", frame(1));
    store.insert("c", frame(3));
    assert_eq!(store.fingerprint("a"), store.fingerprint("b"));
    assert_ne!(store.fingerprint("a"), store.fingerprint("c"));
}
