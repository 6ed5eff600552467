use std::sync::Arc;

use pos_trust::{CertificateStore, TrustError};
use tokio::sync::Barrier;

const CERT: &str = include_str!("fixtures/digital-certificate.txt");

#[tokio::test]
async fn test_missing_certificate_is_configuration_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = CertificateStore::new(dir.path().join("digital-certificate.txt"));

    let err = store.get_certificate().await.unwrap_err();
    assert!(matches!(err, TrustError::ConfigurationMissing(_)));
    assert!(!store.is_loaded());
}

#[tokio::test]
async fn test_certificate_is_cached_after_first_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digital-certificate.txt");
    std::fs::write(&path, CERT).unwrap();

    let store = CertificateStore::new(&path);
    let first = store.get_certificate().await.unwrap();
    assert_eq!(first.as_str(), CERT);

    // Later calls must not touch the disk
    std::fs::remove_file(&path).unwrap();
    let second = store.get_certificate().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(store.load_attempts(), 1);
}

#[tokio::test]
async fn test_certificate_placed_after_failed_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digital-certificate.txt");
    let store = CertificateStore::new(&path);

    assert!(store.get_certificate().await.is_err());

    std::fs::write(&path, CERT).unwrap();
    assert!(store.get_certificate().await.is_ok());
    assert_eq!(store.load_attempts(), 2);
}

#[tokio::test]
async fn test_invalid_certificate_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digital-certificate.txt");
    std::fs::write(&path, "hello").unwrap();

    let store = CertificateStore::new(&path);
    let err = store.get_certificate().await.unwrap_err();
    assert!(matches!(err, TrustError::InvalidCertificate(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digital-certificate.txt");
    std::fs::write(&path, CERT).unwrap();

    let store = Arc::new(CertificateStore::new(&path));
    let start = Arc::new(Barrier::new(16));
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let start = Arc::clone(&start);
            tokio::spawn(async move {
                start.wait().await;
                store.get_certificate().await
            })
        })
        .collect();

    for handle in handles {
        let cert = handle.await.unwrap().unwrap();
        assert_eq!(cert.as_str(), CERT);
    }
    assert!(store.is_loaded());
    assert_eq!(store.load_attempts(), 1);
}
