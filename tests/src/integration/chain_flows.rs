//! # Chain Flows
//!
//! Create a device, sign through the service, then check the history offline
//! with nothing but the public key.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use sc_01_device_store::KeyedStore;
    use sc_02_signature_chain::{
        compose_payload, parse_payload, seed_link, ChainError, DeviceState, ErrorKind,
        SignatureDeviceApi, SignedTransaction,
    };
    use shared_crypto::EccCurve;
    use shared_types::{decode_base64, encode_base64, SignatureAlgorithm};

    fn sign_all(service: &Service, id: &shared_types::DeviceId, data: &[&str]) -> Vec<SignedTransaction> {
        data.iter()
            .map(|item| service.sign_transaction(id, item).unwrap())
            .collect()
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_first_two_links_follow_payload_format() {
        let (_, service) = service();
        let id = service
            .create_device(SignatureAlgorithm::Ecc, Some("till".to_string()))
            .unwrap();

        let first = service.sign_transaction(&id, "hello").unwrap();
        assert_eq!(
            first.signed_data,
            format!("0_hello_{}", encode_base64(id.as_str()))
        );

        let second = service.sign_transaction(&id, "world").unwrap();
        assert_eq!(second.signed_data, format!("1_world_{}", first.signature));
    }

    #[test]
    fn test_history_replays_for_every_algorithm() {
        let (store, service) = service();

        for algorithm in algorithms() {
            let id = service.create_device(algorithm, None).unwrap();
            let records = sign_all(&service, &id, &["a", "b b", "c_c", "d"]);

            assert_eq!(replay(&store, &service, &id, &records), Ok(()));

            let device = store.get(id.as_str()).unwrap();
            assert_eq!(device.state(), DeviceState::Signed(4));
            assert_eq!(device.last_signature.as_deref(), Some(records[3].signature.as_str()));
        }
    }

    #[test]
    fn test_history_replays_on_every_curve() {
        for curve in [EccCurve::Secp256k1, EccCurve::P256, EccCurve::P384] {
            let (store, service) = build(&chain_config(curve));
            let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
            let records = sign_all(&service, &id, &["one", "two", "three"]);

            assert_eq!(replay(&store, &service, &id, &records), Ok(()), "{}", curve);
        }
    }

    #[test]
    fn test_published_public_key_verifies_each_record() {
        let (_, service) = service();
        let id = service.create_device(SignatureAlgorithm::Rsa, None).unwrap();
        let records = sign_all(&service, &id, &["x", "y"]);

        let key = service.device_public_key(&id).unwrap();
        assert_eq!(key.counter, 2);
        assert!(!decode_base64(&key.public_key).unwrap().is_empty());

        for record in &records {
            service
                .verify_signature(&id, &record.signed_data, &record.signature)
                .unwrap();
        }
    }

    #[test]
    fn test_data_with_underscores_parses_back() {
        let (_, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();

        let signed = service.sign_transaction(&id, "order_42_paid").unwrap();
        let link = parse_payload(&signed.signed_data).unwrap();

        assert_eq!(link.counter, 0);
        assert_eq!(link.data, "order_42_paid");
        assert_eq!(link.previous_link, seed_link(&id));
    }

    // =========================================================================
    // TAMPERING
    // =========================================================================

    #[test]
    fn test_edited_record_is_rejected() {
        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
        let mut records = sign_all(&service, &id, &["alpha", "beta", "gamma"]);

        records[1].signed_data = compose_payload(1, "BETA", &records[0].signature);

        assert_eq!(
            replay(&store, &service, &id, &records),
            Err(ChainError::InvalidSignature { index: 1 })
        );
        let err = service
            .verify_signature(&id, &records[1].signed_data, &records[1].signature)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
    }

    #[test]
    fn test_truncated_prefix_is_rejected() {
        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
        let records = sign_all(&service, &id, &["alpha", "beta", "gamma"]);

        let result = replay(&store, &service, &id, &records[1..]);
        assert_eq!(
            result,
            Err(ChainError::CounterMismatch {
                index: 0,
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_foreign_record_is_rejected() {
        let (store, service) = service();
        let ours = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
        let theirs = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();

        let mut records = sign_all(&service, &ours, &["alpha"]);
        records.extend(sign_all(&service, &theirs, &["beta"]));

        // Counter 0 again, and linked to the other device's id
        assert_eq!(
            replay(&store, &service, &ours, &records).unwrap_err().index(),
            Some(1)
        );

        let err = service
            .verify_signature(&ours, &records[1].signed_data, &records[1].signature)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
    }

    // =========================================================================
    // FAILURES LEAVE NO TRACE
    // =========================================================================

    #[test]
    fn test_rejected_sign_does_not_advance_chain() {
        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Rsa, None).unwrap();
        let first = service.sign_transaction(&id, "first").unwrap();

        let err = service.sign_transaction(&id, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let second = service.sign_transaction(&id, "second").unwrap();
        assert_eq!(second.signed_data, format!("1_second_{}", first.signature));
        assert_eq!(
            replay(&store, &service, &id, &[first, second]),
            Ok(())
        );
    }

    #[test]
    fn test_disabled_algorithm_cannot_create() {
        let config = chain_config(EccCurve::P256).with_algorithms(&[SignatureAlgorithm::Ecc]);
        let (store, service) = build(&config);

        let err = service.create_device(SignatureAlgorithm::Rsa, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
        assert!(store.is_empty());

        let err = service.create_device_named("DSA", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
    }

    #[test]
    fn test_unknown_device_is_not_found_everywhere() {
        let (_, service) = service();
        let id = shared_types::DeviceId::new("missing");

        let kinds = [
            service.sign_transaction(&id, "x").unwrap_err().kind(),
            service.get_device(&id).unwrap_err().kind(),
            service.device_public_key(&id).unwrap_err().kind(),
            service.verify_signature(&id, "p", "c2ln").unwrap_err().kind(),
        ];
        assert!(kinds.iter().all(|kind| *kind == ErrorKind::NotFound));
    }
}
