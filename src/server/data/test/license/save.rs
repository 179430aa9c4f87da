use super::*;

/// Tests saving a licence read at the current version.
///
/// Verifies that the mutable fields are written and the version is bumped.
///
/// Expected: Ok(Some) with version 1 and the new counter and IP list persisted
#[tokio::test]
async fn saves_current_version() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_license(db).await?;

    let repo = LicenseRepository::new(db);
    let mut license = License::from_entity(created);
    license.request_count = 3;
    license.ips.push("1.1.1.1".to_string());

    let saved = repo.save(license).await?.unwrap();
    assert_eq!(saved.version, 1);

    let stored = repo.find_by_id(saved.id).await?.unwrap();
    assert_eq!(stored.request_count, 3);
    assert_eq!(stored.ips, vec!["1.1.1.1".to_string()]);
    assert_eq!(stored.version, 1);

    Ok(())
}

/// Tests saving a licence whose stored version has moved on.
///
/// Simulates two writers reading the same state: the second save must be refused
/// and must not overwrite the first writer's changes.
///
/// Expected: Ok(None) for the stale save, stored record keeps the first write
#[tokio::test]
async fn refuses_stale_version() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_license(db).await?;
    let id = created.id;

    let repo = LicenseRepository::new(db);
    let mut first = License::from_entity(created.clone());
    let mut second = License::from_entity(created);

    first.request_count = 1;
    second.request_count = 1;
    second.ips.push("2.2.2.2".to_string());

    assert!(repo.save(first).await?.is_some());
    assert!(repo.save(second).await?.is_none());

    let stored = repo.find_by_id(id).await?.unwrap();
    assert_eq!(stored.request_count, 1);
    assert!(stored.ips.is_empty());
    assert_eq!(stored.version, 1);

    Ok(())
}
