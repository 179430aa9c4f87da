use super::*;

fn params(identifier: &str) -> CreateLicenseParams {
    CreateLicenseParams {
        key: None,
        identifier: identifier.to_string(),
        license_type: LicenseType::Premium,
        valid_until: Utc::now() + Duration::days(7),
        request_limit: 50,
        max_ips: Some(2),
        hwid: vec!["HW-1".to_string()],
    }
}

/// Tests creating a new licence.
///
/// Verifies that the repository stores every supplied field and starts the licence
/// with no consumption recorded.
///
/// Expected: Ok with zeroed counter, empty IP list and version 0
#[tokio::test]
async fn creates_license_with_fresh_usage() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LicenseRepository::new(db);
    let license = repo.create("KEY-1".to_string(), params("acme")).await?;

    assert_eq!(license.key, "KEY-1");
    assert_eq!(license.identifier, "acme");
    assert_eq!(license.license_type, LicenseType::Premium);
    assert_eq!(license.request_limit, 50);
    assert_eq!(license.request_count, 0);
    assert!(license.ips.is_empty());
    assert_eq!(license.max_ips, Some(2));
    assert_eq!(license.hwid, vec!["HW-1".to_string()]);
    assert_eq!(license.version, 0);

    Ok(())
}

/// Tests that the same key may exist under different identifiers.
///
/// Expected: Ok for both inserts
#[tokio::test]
async fn allows_same_key_for_different_identifiers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LicenseRepository::new(db);
    let first = repo.create("SHARED".to_string(), params("acme")).await?;
    let second = repo.create("SHARED".to_string(), params("globex")).await?;

    assert_ne!(first.id, second.id);
    assert!(repo.exists("SHARED", "acme").await?);
    assert!(repo.exists("SHARED", "globex").await?);
    assert!(!repo.exists("SHARED", "initech").await?);

    Ok(())
}
