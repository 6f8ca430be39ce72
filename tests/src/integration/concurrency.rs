//! # Concurrency
//!
//! Signing under contention: requests for one device serialize into a single
//! gap-free chain, requests for different devices proceed independently.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use parking_lot::Mutex;
    use rand::Rng;
    use sc_01_device_store::{CancellationToken, KeyedStore};
    use sc_02_signature_chain::{parse_payload, ErrorKind, SignatureDeviceApi, SignedTransaction};
    use shared_types::{DeviceId, SignatureAlgorithm};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    /// Sort records into chain order by their embedded counter.
    fn in_chain_order(mut records: Vec<SignedTransaction>) -> Vec<SignedTransaction> {
        records.sort_by_key(|record| parse_payload(&record.signed_data).unwrap().counter);
        records
    }

    // =========================================================================
    // ONE DEVICE, MANY CALLERS
    // =========================================================================

    #[test]
    fn test_contended_device_produces_gap_free_chain() {
        const CALLERS: usize = 16;

        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
        let barrier = Arc::new(Barrier::new(CALLERS));

        let handles: Vec<_> = (0..CALLERS)
            .map(|n| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                let id = id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    service.sign_transaction(&id, &format!("caller-{}", n))
                })
            })
            .collect();

        let records: Vec<SignedTransaction> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        let records = in_chain_order(records);
        let counters: Vec<u64> = records
            .iter()
            .map(|record| parse_payload(&record.signed_data).unwrap().counter)
            .collect();
        assert_eq!(counters, (0..CALLERS as u64).collect::<Vec<_>>());

        let device = store.get(id.as_str()).unwrap();
        assert_eq!(device.counter, CALLERS as u64);
        assert_eq!(replay(&store, &service, &id, &records), Ok(()));
    }

    #[test]
    fn test_contended_rsa_device_with_jitter() {
        const CALLERS: usize = 6;

        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Rsa, None).unwrap();
        let collected = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..CALLERS)
            .map(|n| {
                let service = Arc::clone(&service);
                let collected = Arc::clone(&collected);
                let id = id.clone();
                thread::spawn(move || {
                    let pause = rand::thread_rng().gen_range(0..5);
                    thread::sleep(Duration::from_millis(pause));
                    let signed = service.sign_transaction(&id, &format!("tx {}", n)).unwrap();
                    collected.lock().push(signed);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = in_chain_order(std::mem::take(&mut *collected.lock()));
        assert_eq!(records.len(), CALLERS);
        assert_eq!(replay(&store, &service, &id, &records), Ok(()));
    }

    // =========================================================================
    // MANY DEVICES
    // =========================================================================

    #[test]
    fn test_devices_chain_independently() {
        const DEVICES: usize = 4;
        const SIGNS_PER_DEVICE: usize = 5;

        let (store, service) = service();
        let ids: Vec<DeviceId> = (0..DEVICES)
            .map(|_| service.create_device(SignatureAlgorithm::Ecc, None).unwrap())
            .collect();
        let barrier = Arc::new(Barrier::new(DEVICES * SIGNS_PER_DEVICE));

        let handles: Vec<_> = ids
            .iter()
            .flat_map(|id| (0..SIGNS_PER_DEVICE).map(move |n| (id.clone(), n)))
            .map(|(id, n)| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let signed = service.sign_transaction(&id, &format!("item-{}", n)).unwrap();
                    (id, signed)
                })
            })
            .collect();

        let mut per_device: Vec<(DeviceId, Vec<SignedTransaction>)> =
            ids.iter().map(|id| (id.clone(), Vec::new())).collect();
        for handle in handles {
            let (id, signed) = handle.join().unwrap();
            if let Some((_, records)) = per_device.iter_mut().find(|(owner, _)| *owner == id) {
                records.push(signed);
            }
        }

        for (id, records) in per_device {
            assert_eq!(records.len(), SIGNS_PER_DEVICE);
            let records = in_chain_order(records);
            assert_eq!(replay(&store, &service, &id, &records), Ok(()));
            assert_eq!(
                store.get(id.as_str()).unwrap().counter,
                SIGNS_PER_DEVICE as u64
            );
        }
    }

    #[test]
    fn test_concurrent_creation_lists_every_device() {
        const CREATORS: usize = 8;

        let (_, service) = service();
        let handles: Vec<_> = (0..CREATORS)
            .map(|n| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    service
                        .create_device(SignatureAlgorithm::Ecc, Some(format!("device {}", n)))
                        .unwrap()
                })
            })
            .collect();
        let mut created: Vec<DeviceId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        created.sort();

        let listed: Vec<DeviceId> = service
            .list_devices()
            .unwrap()
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        assert_eq!(listed, created);
    }

    // =========================================================================
    // LEASE WAITS
    // =========================================================================

    #[test]
    fn test_bounded_wait_times_out_without_signing() {
        let (store, service) = bounded_service(Duration::from_millis(30));
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();

        let lease = store.acquire(id.as_str()).unwrap();
        let blocked = {
            let service = Arc::clone(&service);
            let id = id.clone();
            thread::spawn(move || service.sign_transaction(&id, "late"))
        };
        let err = blocked.join().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LockTimeout);
        assert_eq!(store.get(id.as_str()).unwrap().counter, 0);

        drop(lease);
        let signed = service.sign_transaction(&id, "on time").unwrap();
        assert!(signed.signed_data.starts_with("0_on time_"));
    }

    #[test]
    fn test_cancelled_waiter_leaves_device_unchanged() {
        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();
        let token = CancellationToken::new();

        let lease = store.acquire(id.as_str()).unwrap();
        let waiter = {
            let service = Arc::clone(&service);
            let id = id.clone();
            let token = token.clone();
            thread::spawn(move || service.sign_transaction_with(&id, "never", &token))
        };

        thread::sleep(Duration::from_millis(20));
        token.cancel();
        let err = waiter.join().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);

        drop(lease);
        assert_eq!(store.get(id.as_str()).unwrap().counter, 0);
    }

    #[test]
    fn test_unbounded_waiter_signs_after_release() {
        let (store, service) = service();
        let id = service.create_device(SignatureAlgorithm::Ecc, None).unwrap();

        let lease = store.acquire(id.as_str()).unwrap();
        let waiter = {
            let service = Arc::clone(&service);
            let id = id.clone();
            thread::spawn(move || service.sign_transaction(&id, "patient"))
        };

        thread::sleep(Duration::from_millis(20));
        store.release(lease).unwrap();

        let signed = waiter.join().unwrap().unwrap();
        assert!(signed.signed_data.starts_with("0_patient_"));
        assert_eq!(store.get(id.as_str()).unwrap().counter, 1);
    }
}
