use classrate::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_bcrypt_hash() {
    let hash = hash_password("secret").unwrap();
    assert_ne!(hash, "secret");
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_round_trip() {
    let hash = hash_password("secret").unwrap();
    assert!(verify_password("secret", &hash).unwrap());
    assert!(!verify_password("wrong", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    let first = hash_password("secret").unwrap();
    let second = hash_password("secret").unwrap();
    assert_ne!(first, second);
}
