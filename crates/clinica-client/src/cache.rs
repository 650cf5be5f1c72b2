//! Paged patient cache backing infinite-scroll list screens.

use std::sync::{Arc, Mutex};

use clinica_core::{ClinicService, Database, PagedResult, Patient, PatientFilter};

use crate::error::{ClientError, ClientResult};
use crate::request::RequestState;

/// Pages loaded so far plus the tracked fetch request.
#[derive(Debug, Default)]
struct PagerState {
    pages: Vec<Vec<Patient>>,
    total: u64,
    has_more: bool,
    request: RequestState<u32>,
}

/// Incremental loader for the patient list.
///
/// Pages are fetched in ascending id order and cached in memory. A single
/// in-flight request is tracked; while it runs, further loads are rejected
/// so pages can never interleave or duplicate.
pub struct PatientPager {
    db: Arc<Mutex<Database>>,
    filter: PatientFilter,
    page_size: u32,
    state: Mutex<PagerState>,
}

impl PatientPager {
    pub fn new(db: Arc<Mutex<Database>>, filter: PatientFilter, page_size: u32) -> Self {
        Self {
            db,
            filter,
            page_size: page_size.max(1),
            state: Mutex::new(PagerState::default()),
        }
    }

    /// Drop the cache and reload page one.
    ///
    /// Fails with [`ClientError::RequestInFlight`] while another fetch is
    /// running. On a fetch failure the previous cache is kept.
    pub fn refresh(&self) -> ClientResult<()> {
        {
            let mut state = self.state.lock()?;
            if state.request.is_loading() {
                return Err(ClientError::RequestInFlight);
            }
            state.request.begin();
        }

        match self.fetch(1) {
            Ok(page) => {
                let mut state = self.state.lock()?;
                state.total = page.total;
                state.has_more = page.has_more();
                state.pages = vec![page.items];
                state.request.settle_ok(1);
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock()?;
                state.request.settle_err(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch the next page and append it to the cache.
    ///
    /// Returns `Ok(false)` without fetching when a load is already running
    /// or when every page has been loaded, so list views can call this on
    /// every end-reached event without spawning duplicate requests.
    pub fn load_next(&self) -> ClientResult<bool> {
        let next_page = {
            let mut state = self.state.lock()?;
            if state.request.is_loading() {
                return Ok(false);
            }
            if !state.pages.is_empty() && !state.has_more {
                return Ok(false);
            }
            state.request.begin();
            (state.pages.len() + 1) as u32
        };

        match self.fetch(next_page) {
            Ok(page) => {
                let mut state = self.state.lock()?;
                state.total = page.total;
                state.has_more = page.has_more();
                state.pages.push(page.items);
                state.request.settle_ok(next_page);
                tracing::debug!(page = next_page, total = state.total, "patient page loaded");
                Ok(true)
            }
            Err(err) => {
                let mut state = self.state.lock()?;
                state.request.settle_err(err.to_string());
                Err(err)
            }
        }
    }

    /// All cached patients, in load order.
    pub fn items(&self) -> ClientResult<Vec<Patient>> {
        let state = self.state.lock()?;
        Ok(state.pages.iter().flatten().cloned().collect())
    }

    /// Total row count matching the filter, as of the last fetch.
    pub fn total(&self) -> ClientResult<u64> {
        Ok(self.state.lock()?.total)
    }

    pub fn has_more(&self) -> ClientResult<bool> {
        Ok(self.state.lock()?.has_more)
    }

    pub fn is_loading(&self) -> ClientResult<bool> {
        Ok(self.state.lock()?.request.is_loading())
    }

    /// Message from the most recent failed fetch, if the pager is in a
    /// failed state.
    pub fn last_error(&self) -> ClientResult<Option<String>> {
        Ok(self.state.lock()?.request.error().map(String::from))
    }

    fn fetch(&self, page: u32) -> ClientResult<PagedResult<Patient>> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        service
            .list_patients(page, self.page_size, &self.filter)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinica_core::NewPatient;

    fn seeded_db(count: usize) -> Arc<Mutex<Database>> {
        let db = Database::open_in_memory().unwrap();
        let service = ClinicService::new(&db);
        for i in 0..count {
            service
                .create_patient(&NewPatient::new(
                    format!("Paciente{i:02}"),
                    "Prueba".into(),
                    "1990-01-01".into(),
                ))
                .unwrap();
        }
        Arc::new(Mutex::new(db))
    }

    #[test]
    fn test_load_next_walks_all_pages() {
        let pager = PatientPager::new(seeded_db(7), PatientFilter::default(), 3);

        assert!(pager.load_next().unwrap());
        assert_eq!(pager.items().unwrap().len(), 3);
        assert!(pager.has_more().unwrap());

        assert!(pager.load_next().unwrap());
        assert!(pager.load_next().unwrap());
        assert_eq!(pager.items().unwrap().len(), 7);
        assert_eq!(pager.total().unwrap(), 7);
        assert!(!pager.has_more().unwrap());

        // Exhausted: further calls are silent no-ops.
        assert!(!pager.load_next().unwrap());
        assert_eq!(pager.items().unwrap().len(), 7);
    }

    #[test]
    fn test_pages_keep_ascending_id_order() {
        let pager = PatientPager::new(seeded_db(5), PatientFilter::default(), 2);
        while pager.load_next().unwrap() {}

        let ids: Vec<i64> = pager.items().unwrap().iter().map(|p| p.id_paciente).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_refresh_replaces_cache() {
        let db = seeded_db(4);
        let pager = PatientPager::new(Arc::clone(&db), PatientFilter::default(), 2);
        while pager.load_next().unwrap() {}
        assert_eq!(pager.items().unwrap().len(), 4);

        {
            let conn = db.lock().unwrap();
            ClinicService::new(&conn)
                .create_patient(&NewPatient::new(
                    "Nueva".into(),
                    "Alta".into(),
                    "2000-05-05".into(),
                ))
                .unwrap();
        }

        pager.refresh().unwrap();
        assert_eq!(pager.items().unwrap().len(), 2);
        assert_eq!(pager.total().unwrap(), 5);
        assert!(pager.has_more().unwrap());
    }

    #[test]
    fn test_refresh_on_empty_table() {
        let pager = PatientPager::new(seeded_db(0), PatientFilter::default(), 10);
        pager.refresh().unwrap();

        assert!(pager.items().unwrap().is_empty());
        assert!(!pager.has_more().unwrap());
        assert!(!pager.load_next().unwrap());
    }

    #[test]
    fn test_filter_is_applied() {
        let db = seeded_db(3);
        {
            let conn = db.lock().unwrap();
            let service = ClinicService::new(&conn);
            let mut payload = NewPatient::new("Tipada".into(), "Sangre".into(), "1985-03-03".into());
            payload.tipo_sangre = Some("O+".into());
            service.create_patient(&payload).unwrap();
        }

        let pager = PatientPager::new(db, PatientFilter::blood_type("O+"), 10);
        pager.refresh().unwrap();

        let items = pager.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].nombre, "Tipada");
    }

    #[test]
    fn test_failed_fetch_keeps_cache_and_reports_error() {
        let db = seeded_db(3);
        let pager = PatientPager::new(Arc::clone(&db), PatientFilter::default(), 2);
        assert!(pager.load_next().unwrap());

        // Poison the database mutex so the next fetch fails.
        let poisoner = Arc::clone(&db);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err = pager.load_next().unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert_eq!(pager.items().unwrap().len(), 2);
        assert!(pager.last_error().unwrap().is_some());
        assert!(!pager.is_loading().unwrap());
    }
}
