//! # Driver
//!
//! The line protocol over a fully wired service container.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::TEST_RSA_BITS;
    use sc_02_signature_chain::{verify_chain, SignedTransaction};
    use sc_runtime::{Dispatcher, Reply, ServiceConfig, ServiceContainer};
    use serde_json::Value;
    use shared_types::{decode_base64, DeviceId, SignatureAlgorithm};

    fn container() -> ServiceContainer {
        let config = ServiceConfig {
            rsa_key_bits: TEST_RSA_BITS,
            ..ServiceConfig::default()
        };
        ServiceContainer::new(config).unwrap()
    }

    fn send(dispatcher: &Dispatcher<'_>, line: &str) -> (Reply, Value) {
        let reply = dispatcher.handle_line(line).unwrap();
        let body = serde_json::from_str(&reply.body).unwrap();
        (reply, body)
    }

    #[test]
    fn test_session_signs_and_replays_chain() {
        let container = container();
        let dispatcher = Dispatcher::new(&*container.service);

        let (reply, body) = send(&dispatcher, "create RSA back office");
        assert!(reply.is_success());
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let mut records: Vec<SignedTransaction> = Vec::new();
        for data in ["first sale", "refund", "second sale"] {
            let (reply, body) = send(&dispatcher, &format!("sign {} {}", id, data));
            assert!(reply.is_success(), "{}", reply.body);
            records.push(serde_json::from_value(body["data"].clone()).unwrap());
        }

        let (_, body) = send(&dispatcher, &format!("pubkey {}", id));
        assert_eq!(body["data"]["counter"], 3);
        assert_eq!(body["data"]["algorithm"], "RSA");
        let public_key = decode_base64(body["data"]["public_key"].as_str().unwrap()).unwrap();

        let registry = container.service.registry();
        assert_eq!(
            verify_chain(
                &DeviceId::new(id.as_str()),
                SignatureAlgorithm::Rsa,
                &public_key,
                registry,
                &records,
            ),
            Ok(())
        );

        let (_, body) = send(&dispatcher, &format!("get {}", id));
        assert_eq!(body["data"]["label"], "back office");
    }

    #[test]
    fn test_verify_command_round_trip() {
        let container = container();
        let dispatcher = Dispatcher::new(&*container.service);

        let (_, body) = send(&dispatcher, "create ECC");
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let (_, body) = send(&dispatcher, &format!("sign {} coffee", id));
        let signature = body["data"]["signature"].as_str().unwrap().to_string();
        let signed_data = body["data"]["signed_data"].as_str().unwrap().to_string();

        let (reply, body) = send(
            &dispatcher,
            &format!("verify {} {} {}", id, signature, signed_data),
        );
        assert!(reply.is_success());
        assert_eq!(body["data"]["valid"], true);

        let forged = signed_data.replacen("coffee", "tea", 1);
        let (reply, body) = send(
            &dispatcher,
            &format!("verify {} {} {}", id, signature, forged),
        );
        assert_eq!(reply.status, 400);
        assert_eq!(body["status"], 400);
    }

    #[test]
    fn test_error_statuses() {
        let container = container();
        let dispatcher = Dispatcher::new(&*container.service);

        let (reply, body) = send(&dispatcher, "sign nope data");
        assert_eq!(reply.status, 404);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);

        let (reply, _) = send(&dispatcher, "create DSA");
        assert_eq!(reply.status, 400);

        let (reply, _) = send(&dispatcher, "teleport now");
        assert_eq!(reply.status, 400);

        assert!(dispatcher.handle_line("quit").is_none());
    }

    #[test]
    fn test_list_is_ordered_and_labels_default_empty() {
        let container = container();
        let dispatcher = Dispatcher::new(&*container.service);

        for line in ["create ECC", "create ECC kiosk", "create RSA"] {
            assert!(send(&dispatcher, line).0.is_success());
        }

        let (_, body) = send(&dispatcher, "list");
        let devices = body["data"].as_array().unwrap();
        assert_eq!(devices.len(), 3);

        let ids: Vec<&str> = devices.iter().map(|d| d["id"].as_str().unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        assert!(devices.iter().all(|d| d["label"].is_string()));
        assert!(devices.iter().any(|d| d["label"] == "kiosk"));
        assert!(devices.iter().any(|d| d["label"] == ""));
    }
}
