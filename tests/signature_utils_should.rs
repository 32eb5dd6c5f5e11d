use feedhub_api::server::utils::signature_utils::SignatureUtil;

#[test]
fn test_signature_generation() {
    let util = SignatureUtil::new("test_secret".to_string());
    let sig1 = util.generate_signature("alice", 1234567890);
    let sig2 = util.generate_signature("alice", 1234567890);

    assert_eq!(sig1, sig2);
    // hex encoded sha256
    assert_eq!(sig1.len(), 64);
}

#[test]
fn test_signature_verification() {
    let util = SignatureUtil::new("test_secret".to_string());
    let future_expiry = SignatureUtil::generate_expiry(12);

    let signature = util.generate_signature("alice", future_expiry);

    // valid signature should verify
    assert!(util.verify_signature("alice", future_expiry, &signature));

    // invalid signature should fail
    assert!(!util.verify_signature("alice", future_expiry, "invalid"));

    // different user should fail
    assert!(!util.verify_signature("mallory", future_expiry, &signature));

    // moving the expiry invalidates it too
    assert!(!util.verify_signature("alice", future_expiry + 1, &signature));
}

#[test]
fn test_other_secret_rejected() {
    let util = SignatureUtil::new("test_secret".to_string());
    let other = SignatureUtil::new("other_secret".to_string());
    let expiry = SignatureUtil::generate_expiry(1);

    let signature = other.generate_signature("alice", expiry);

    assert!(!util.verify_signature("alice", expiry, &signature));
}

#[test]
fn test_expired_signature() {
    let util = SignatureUtil::new("test_secret".to_string());
    let past_expiry = 1234567890; // a while ago

    let signature = util.generate_signature("alice", past_expiry);

    // expired signature should fail even if signature is correct
    assert!(!util.verify_signature("alice", past_expiry, &signature));
}
