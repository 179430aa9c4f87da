use super::*;

/// Tests consumption against the database repository.
///
/// Expected: Ok with the counter, IP list and version persisted in one write
#[tokio::test]
async fn consumes_against_database() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::license::LicenseFactory::new(db)
        .key("KEY")
        .identifier("acme")
        .max_ips(Some(1))
        .build()
        .await?;

    let guard = LicenseGuard::new(LicenseRepository::new(db), SystemClock);
    let snapshot = guard
        .validate_and_consume(&consume("KEY", "acme", "1.1.1.1"))
        .await?;

    assert_eq!(snapshot.request_count, 1);

    let stored = LicenseRepository::new(db)
        .find_by_key("KEY", "acme")
        .await?
        .unwrap();
    assert_eq!(stored.request_count, 1);
    assert_eq!(stored.ips, vec!["1.1.1.1".to_string()]);
    assert_eq!(stored.version, 1);

    Ok(())
}

/// Tests that a rejected call does not write to the database.
///
/// Expected: Err(Expired) and version still 0
#[tokio::test]
async fn rejected_call_leaves_record_untouched() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_expired_license(db).await?;

    let guard = LicenseGuard::new(LicenseRepository::new(db), SystemClock);
    let result = guard
        .validate_and_consume(&consume(&created.key, &created.identifier, "1.1.1.1"))
        .await;

    assert_eq!(license_err(result), LicenseError::Expired);

    let stored = LicenseRepository::new(db)
        .find_by_id(created.id)
        .await?
        .unwrap();
    assert_eq!(stored.version, 0);
    assert_eq!(stored.request_count, 0);
    assert!(stored.ips.is_empty());

    Ok(())
}

/// Tests two concurrent calls competing for a single remaining request.
///
/// Expected: exactly one call succeeds and the counter never passes the limit
#[tokio::test]
async fn concurrent_calls_spend_last_request_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::license::LicenseFactory::new(db)
        .key("KEY")
        .identifier("acme")
        .request_limit(1)
        .build()
        .await?;

    let guard = LicenseGuard::new(LicenseRepository::new(db), SystemClock);
    let first = consume("KEY", "acme", "1.1.1.1");
    let second = consume("KEY", "acme", "2.2.2.2");

    let (a, b) = tokio::join!(
        guard.validate_and_consume(&first),
        guard.validate_and_consume(&second)
    );

    let admitted = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(admitted, 1);

    let stored = LicenseRepository::new(db)
        .find_by_key("KEY", "acme")
        .await?
        .unwrap();
    assert_eq!(stored.request_count, 1);
    assert_eq!(stored.ips.len(), 1);

    Ok(())
}
