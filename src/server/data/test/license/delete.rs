use super::*;

/// Tests deleting an existing licence.
///
/// Expected: Ok(true) and the licence can no longer be found
#[tokio::test]
async fn deletes_existing_license() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_license(db).await?;

    let repo = LicenseRepository::new(db);

    assert!(repo.delete(created.id).await?);
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

/// Tests deleting a licence that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_license() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LicenseRepository::new(db);

    assert!(!repo.delete(42).await?);

    Ok(())
}
