use super::*;

fn create_params(key: Option<&str>, identifier: &str) -> CreateLicenseParams {
    CreateLicenseParams {
        key: key.map(str::to_string),
        identifier: identifier.to_string(),
        license_type: LicenseType::Basic,
        valid_until: Utc::now() + Duration::days(30),
        request_limit: 10,
        max_ips: None,
        hwid: Vec::new(),
    }
}

fn update_params(reset_usage: bool) -> UpdateLicenseParams {
    UpdateLicenseParams {
        license_type: LicenseType::Enterprise,
        valid_until: Utc::now() + Duration::days(365),
        request_limit: 1000,
        max_ips: Some(10),
        hwid: vec!["HW-2".to_string()],
        reset_usage,
    }
}

/// Tests creating a licence without a key.
///
/// Expected: Ok with a generated 32 character alphanumeric key
#[tokio::test]
async fn create_generates_missing_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let license = LicenseService::new(db)
        .create(create_params(None, "acme"))
        .await?;

    assert_eq!(license.key.len(), 32);
    assert!(license.key.chars().all(|c| c.is_ascii_alphanumeric()));

    Ok(())
}

/// Tests creating a duplicate `(key, identifier)` pair.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn create_rejects_duplicate_pair() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = LicenseService::new(db);
    service.create(create_params(Some("KEY"), "acme")).await?;

    let result = service.create(create_params(Some("KEY"), "acme")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests fetching a licence that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn get_reports_missing_license() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = LicenseService::new(db).get(7).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests pagination metadata of the licence listing.
///
/// Expected: Ok with total 3, two pages of two, and page size clamped to at least one
#[tokio::test]
async fn get_all_computes_page_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_license(db).await?;
    }

    let service = LicenseService::new(db);
    let page = service
        .get_all(GetLicensesParam {
            page: 0,
            per_page: 2,
            identifier: None,
        })
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.licenses.len(), 2);

    let clamped = service
        .get_all(GetLicensesParam {
            page: 0,
            per_page: 0,
            identifier: None,
        })
        .await?;
    assert_eq!(clamped.per_page, 1);
    assert_eq!(clamped.total_pages, 3);

    Ok(())
}

/// Tests updating a licence while keeping its usage.
///
/// Expected: Ok with new limits applied and counter and IPs preserved
#[tokio::test]
async fn update_keeps_usage_by_default() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::license::LicenseFactory::new(db)
        .request_count(4)
        .ips(["1.1.1.1"])
        .build()
        .await?;

    let updated = LicenseService::new(db)
        .update(created.id, update_params(false))
        .await?;

    assert_eq!(updated.license_type, LicenseType::Enterprise);
    assert_eq!(updated.request_limit, 1000);
    assert_eq!(updated.max_ips, Some(10));
    assert_eq!(updated.hwid, vec!["HW-2".to_string()]);
    assert_eq!(updated.request_count, 4);
    assert_eq!(updated.ips, vec!["1.1.1.1".to_string()]);
    assert_eq!(updated.version, 1);

    Ok(())
}

/// Tests updating a licence with a usage reset.
///
/// Expected: Ok with request_count 0 and no recorded IPs
#[tokio::test]
async fn update_resets_usage_when_requested() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::license::LicenseFactory::new(db)
        .request_count(4)
        .ips(["1.1.1.1", "2.2.2.2"])
        .build()
        .await?;

    let service = LicenseService::new(db);
    service.update(created.id, update_params(true)).await?;

    let stored = service.get(created.id).await?;
    assert_eq!(stored.request_count, 0);
    assert!(stored.ips.is_empty());

    Ok(())
}

/// Tests deleting a licence twice.
///
/// Expected: Ok for the first delete, Err(AppError::NotFound) for the second
#[tokio::test]
async fn delete_reports_missing_license() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_license(db).await?;
    let service = LicenseService::new(db);

    service.delete(created.id).await?;
    let result = service.delete(created.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests paging far beyond the addressable offset.
///
/// Expected: Err(AppError::ValidationErr) instead of an overflowing offset
#[tokio::test]
async fn get_all_rejects_unaddressable_page() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = LicenseService::new(db)
        .get_all(GetLicensesParam {
            page: u64::MAX,
            per_page: 10,
            identifier: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::ValidationErr(ValidationError::TooLarge { field: "page", .. }))
    ));

    Ok(())
}

/// Tests that oversized page sizes are clamped.
///
/// Expected: Ok with per_page equal to MAX_PER_PAGE
#[tokio::test]
async fn get_all_clamps_page_size() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_license(db).await?;

    let page = LicenseService::new(db)
        .get_all(GetLicensesParam {
            page: 0,
            per_page: u64::MAX,
            identifier: None,
        })
        .await?;

    assert_eq!(page.per_page, MAX_PER_PAGE);
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);

    Ok(())
}

/// Tests lowering the IP capacity below the recorded IPs while keeping usage.
///
/// Expected: Err(AppError::Conflict) and the stored licence unchanged
#[tokio::test]
async fn update_rejects_capacity_below_recorded_ips() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::license::LicenseFactory::new(db)
        .request_count(3)
        .ips(["1.1.1.1", "2.2.2.2", "3.3.3.3"])
        .build()
        .await?;

    let service = LicenseService::new(db);
    let params = UpdateLicenseParams {
        max_ips: Some(1),
        ..update_params(false)
    };
    let result = service.update(created.id, params).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = service.get(created.id).await?;
    assert_eq!(stored.ips.len(), 3);
    assert_eq!(stored.max_ips, None);
    assert_eq!(stored.version, 0);

    Ok(())
}

/// Tests lowering the IP capacity together with a usage reset.
///
/// Expected: Ok with the new capacity and no recorded IPs
#[tokio::test]
async fn update_allows_lower_capacity_with_reset() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::license::LicenseFactory::new(db)
        .ips(["1.1.1.1", "2.2.2.2", "3.3.3.3"])
        .build()
        .await?;

    let params = UpdateLicenseParams {
        max_ips: Some(1),
        ..update_params(true)
    };
    let updated = LicenseService::new(db).update(created.id, params).await?;

    assert_eq!(updated.max_ips, Some(1));
    assert!(updated.ips.is_empty());

    Ok(())
}

/// Tests clearing the stored capacity when more IPs are recorded than the default.
///
/// Expected: Err(AppError::Conflict), the default of five cannot hold six IPs
#[tokio::test]
async fn update_rejects_default_capacity_below_recorded_ips() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_license_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::license::LicenseFactory::new(db)
        .max_ips(Some(6))
        .ips(["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4", "5.5.5.5", "6.6.6.6"])
        .build()
        .await?;

    let params = UpdateLicenseParams {
        max_ips: None,
        ..update_params(false)
    };
    let result = LicenseService::new(db).update(created.id, params).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
