use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use entity::license::LicenseType;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    clock::{FixedClock, SystemClock},
    data::license::LicenseRepository,
    error::{license::LicenseError, validation::ValidationError, AppError},
    model::license::{
        ConsumeLicenseParams, CreateLicenseParams, GetLicensesParam, License, UpdateLicenseParams,
    },
    service::license::{
        guard::{LicenseGuard, MAX_CONSUME_ATTEMPTS},
        store::LicenseStore,
        LicenseService, MAX_PER_PAGE,
    },
};

mod guard_db;
mod service;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn license(key: &str, identifier: &str) -> License {
    License {
        id: 1,
        key: key.to_string(),
        identifier: identifier.to_string(),
        license_type: LicenseType::Basic,
        valid_until: now() + Duration::days(1),
        request_limit: 10,
        request_count: 0,
        ips: Vec::new(),
        max_ips: None,
        hwid: Vec::new(),
        version: 0,
        created_at: now(),
        updated_at: now(),
    }
}

fn consume(key: &str, identifier: &str, ip: &str) -> ConsumeLicenseParams {
    ConsumeLicenseParams::new(key, identifier, ip).unwrap()
}

fn license_err(result: Result<impl std::fmt::Debug, AppError>) -> LicenseError {
    match result {
        Err(AppError::LicenseErr(err)) => err,
        other => panic!("expected licence error, got {:?}", other),
    }
}

/// In-memory store with the same compare-and-swap contract as the database repository.
#[derive(Clone, Default)]
struct MemoryStore {
    licenses: Arc<Mutex<Vec<License>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    fn with(license: License) -> Self {
        let store = Self::default();
        store.licenses.lock().unwrap().push(license);
        store
    }

    fn get(&self, key: &str, identifier: &str) -> Option<License> {
        self.licenses
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.key == key && l.identifier == identifier)
            .cloned()
    }

    /// Number of successful writes.
    fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Applies `f` to the stored record and bumps its version, as another writer would.
    fn interfere(&self, id: i32, f: impl FnOnce(&mut License)) {
        let mut licenses = self.licenses.lock().unwrap();
        if let Some(stored) = licenses.iter_mut().find(|l| l.id == id) {
            f(stored);
            stored.version += 1;
        }
    }
}

#[async_trait]
impl LicenseStore for MemoryStore {
    async fn find(&self, key: &str, identifier: &str) -> Result<Option<License>, DbErr> {
        Ok(self.get(key, identifier))
    }

    async fn save(&self, license: License) -> Result<Option<License>, DbErr> {
        let mut licenses = self.licenses.lock().unwrap();
        let Some(stored) = licenses.iter_mut().find(|l| l.id == license.id) else {
            return Ok(None);
        };
        if stored.version != license.version {
            return Ok(None);
        }

        let saved = License {
            version: license.version + 1,
            ..license
        };
        *stored = saved.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(Some(saved))
    }
}

/// Store where another writer commits right before each of the first `races` saves.
#[derive(Clone)]
struct RacingStore {
    inner: MemoryStore,
    races: Arc<AtomicUsize>,
    save_attempts: Arc<AtomicUsize>,
    /// Change made by the competing writer.
    competitor: fn(&mut License),
}

impl RacingStore {
    fn new(inner: MemoryStore, races: usize, competitor: fn(&mut License)) -> Self {
        Self {
            inner,
            races: Arc::new(AtomicUsize::new(races)),
            save_attempts: Arc::new(AtomicUsize::new(0)),
            competitor,
        }
    }

    fn save_attempts(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LicenseStore for RacingStore {
    async fn find(&self, key: &str, identifier: &str) -> Result<Option<License>, DbErr> {
        self.inner.find(key, identifier).await
    }

    async fn save(&self, license: License) -> Result<Option<License>, DbErr> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);

        let raced = self
            .races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if raced {
            self.inner.interfere(license.id, self.competitor);
        }

        self.inner.save(license).await
    }
}
