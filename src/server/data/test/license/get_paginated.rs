use super::*;

/// Tests paginating over all licences.
///
/// Expected: Ok with page sizes bounded by per_page and the full total
#[tokio::test]
async fn paginates_licenses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_license(db).await?;
    }

    let repo = LicenseRepository::new(db);
    let (first_page, total) = repo.get_paginated(0, 2, None).await?;
    let (last_page, _) = repo.get_paginated(2, 2, None).await?;

    assert_eq!(total, 5);
    assert_eq!(first_page.len(), 2);
    assert_eq!(last_page.len(), 1);

    Ok(())
}

/// Tests filtering the listing by identifier.
///
/// Expected: Ok with only licences of the requested identifier
#[tokio::test]
async fn filters_by_identifier() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::license::LicenseFactory::new(db)
        .identifier("acme")
        .build()
        .await?;
    factory::license::LicenseFactory::new(db)
        .identifier("acme")
        .build()
        .await?;
    factory::license::LicenseFactory::new(db)
        .identifier("globex")
        .build()
        .await?;

    let repo = LicenseRepository::new(db);
    let (licenses, total) = repo.get_paginated(0, 10, Some("acme")).await?;

    assert_eq!(total, 2);
    assert!(licenses.iter().all(|l| l.identifier == "acme"));

    Ok(())
}
