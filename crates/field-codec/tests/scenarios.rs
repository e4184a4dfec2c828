use base64::{engine::general_purpose::STANDARD, Engine as _};
use field_codec::{
    AeadService, AesGcmSiv, FieldCodec, FieldKind, FieldPlaintext, FieldSpec, FieldSpecs,
    ProfileError, ProfileKey,
};

fn key(fill: u8) -> ProfileKey {
    ProfileKey::from_slice(&[fill; 32]).unwrap()
}

#[test]
fn scenario_a_alice_smith_encodes_to_108() {
    let codec = FieldCodec::new();
    let key = key(1);
    let value = codec
        .encrypt_name("Alice", Some("Smith"), key.as_bytes(), &FieldSpec::name())
        .unwrap();

    // 11 packed bytes -> 53-byte bucket -> 81 sealed bytes -> 108 base64 chars.
    assert_eq!(value.ciphertext().len(), 81);
    assert_eq!(value.encoded().len(), 108);
    assert!(value.has_valid_encoded_length());

    // The padded plaintext really is the packed name followed by zeroes.
    let opened = AesGcmSiv.decrypt(value.ciphertext(), key.as_bytes()).unwrap();
    let mut expected = b"Alice\0Smith".to_vec();
    expected.resize(53, 0);
    assert_eq!(opened, expected);
}

#[test]
fn scenario_b_300_byte_name_is_oversize() {
    let codec = FieldCodec::new();
    let given = "a".repeat(150);
    let family = "b".repeat(149);
    let err = codec
        .encrypt_name(&given, Some(&family), key(1).as_bytes(), &FieldSpec::name())
        .unwrap_err();
    assert!(matches!(err, ProfileError::OversizeValue { len: 300, .. }));
}

#[test]
fn scenario_c_wrong_key_is_decryption_failure() {
    let codec = FieldCodec::new();
    let spec = FieldSpec::name();
    let value = codec
        .encrypt_name("Alice", Some("Smith"), key(1).as_bytes(), &spec)
        .unwrap();
    assert_eq!(
        codec.decrypt_name(value.ciphertext(), key(2).as_bytes(), &spec),
        Err(ProfileError::DecryptionFailure)
    );
}

#[test]
fn scenario_d_empty_first_segment_is_missing_given_name() {
    let codec = FieldCodec::new();
    let key = key(3);
    let sealed = AesGcmSiv.encrypt(&[0u8; 53], key.as_bytes()).unwrap();
    assert_eq!(
        codec.decrypt_name(&sealed, key.as_bytes(), &FieldSpec::name()),
        Err(ProfileError::MissingGivenName)
    );
}

#[test]
fn names_round_trip() {
    let codec = FieldCodec::new();
    let spec = FieldSpec::name();
    let key = key(4);
    let long_family = "y".repeat(200);
    let cases: [(&str, Option<&str>); 6] = [
        ("Alice", Some("Smith")),
        ("Bob", None),
        ("José", Some("Núñez")),
        ("李", Some("小龙")),
        ("🙂", Some("🙃")),
        ("x", Some(long_family.as_str())),
    ];
    for (given, family) in cases {
        let value = codec.encrypt_name(given, family, key.as_bytes(), &spec).unwrap();
        assert!(value.has_valid_encoded_length());
        let name = codec.decrypt_name(value.ciphertext(), key.as_bytes(), &spec).unwrap();
        assert_eq!(name.given_name(), given);
        assert_eq!(name.family_name(), family);
    }
}

#[test]
fn every_successful_encrypt_has_allowed_length() {
    let codec = FieldCodec::new();
    let specs = FieldSpecs::reference();
    let key = key(5);
    for kind in [FieldKind::Bio, FieldKind::BioEmoji] {
        let spec = specs.get(kind);
        for len in 0..=spec.max_byte_length() {
            let value = codec
                .encrypt_text(&"z".repeat(len), key.as_bytes(), spec)
                .unwrap();
            assert!(spec.allowed_lengths().contains(&value.encoded().len()));
        }
    }
    let name_spec = specs.get(FieldKind::Name);
    for len in 1..=name_spec.max_byte_length() {
        let value = codec
            .encrypt_name(&"n".repeat(len), None, key.as_bytes(), name_spec)
            .unwrap();
        assert!(name_spec.allowed_lengths().contains(&value.encoded().len()));
    }
}

#[test]
fn decrypting_twice_is_idempotent() {
    let codec = FieldCodec::new();
    let spec = FieldSpec::name();
    let key = key(6);
    let value = codec
        .encrypt_name("Grace", Some("Hopper"), key.as_bytes(), &spec)
        .unwrap();
    let first = codec.decrypt(value.ciphertext(), key.as_bytes(), &spec).unwrap();
    let second = codec.decrypt(value.ciphertext(), key.as_bytes(), &spec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn bio_round_trips_through_encoded_form() {
    let codec = FieldCodec::new();
    let spec = FieldSpec::bio();
    let key = key(7);
    let bio = "Compiler enthusiast. Tea > coffee.";
    let value = codec.encrypt_text(bio, key.as_bytes(), &spec).unwrap();
    assert_eq!(value.encoded().len(), 208);
    assert_eq!(STANDARD.decode(value.encoded()).unwrap(), value.ciphertext());
    assert_eq!(
        codec.decrypt_encoded(&value.encoded(), key.as_bytes(), &spec),
        Ok(FieldPlaintext::Text(bio.to_owned()))
    );
}

#[test]
fn malformed_key_is_encryption_failure() {
    let codec = FieldCodec::new();
    assert_eq!(
        codec.encrypt_text("🎉", &[0u8; 16], &FieldSpec::bio_emoji()),
        Err(ProfileError::EncryptionFailure)
    );
}

#[test]
fn codec_is_shareable_across_threads() {
    let codec = std::sync::Arc::new(FieldCodec::new());
    let spec = std::sync::Arc::new(FieldSpec::name());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let codec = codec.clone();
            let spec = spec.clone();
            std::thread::spawn(move || {
                let key = key(i);
                let given = format!("user{i}");
                let value = codec.encrypt_name(&given, None, key.as_bytes(), &spec).unwrap();
                let name = codec.decrypt_name(value.ciphertext(), key.as_bytes(), &spec).unwrap();
                assert_eq!(name.given_name(), given);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
