use filefp::domain::error::FnvError;
use filefp::domain::length::LengthArg;
use filefp::engine::fnv::FingerprintHasher;

#[test]
fn open_until_closed_then_rejects_queries() {
    let mut hasher = FingerprintHasher::new("abc");
    assert!(hasher.is_open());
    assert_eq!(hasher.fingerprint64(LengthArg::Unspecified), Ok(0xe71fa2190541574b));

    hasher.close();
    assert!(hasher.is_closed());
    assert_eq!(
        hasher.fingerprint64(LengthArg::Unspecified),
        Err(FnvError::Closed)
    );
    assert_eq!(hasher.fingerprint32(2i64), Err(FnvError::Closed));
}

#[test]
fn double_close_is_silent() {
    let mut hasher = FingerprintHasher::new(b"abc".to_vec());
    hasher.close();
    hasher.close();
    assert!(hasher.is_closed());
    assert!(!hasher.is_open());
    assert_eq!(hasher.size_hint(), 3);
}

#[test]
fn closed_error_message_is_stable() {
    assert_eq!(FnvError::Closed.to_string(), "fingerprint hasher is closed");
}

#[test]
fn hasher_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let shared = Arc::new(Mutex::new(FingerprintHasher::new("hello")));
    let reader = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            shared
                .lock()
                .expect("lock")
                .fingerprint32(LengthArg::Unspecified)
        })
    };
    let first = reader.join().expect("join");
    assert_eq!(first, Ok(0x4f9f2cab));

    shared.lock().expect("lock").close();
    assert!(shared.lock().expect("lock").is_closed());
}
