//! Dashboard controller: the Data Loader and the three Submitters.
//!
//! [`Dashboard`] couples a [`Backend`] with a [`StateStore`]. It is the only
//! code that touches the network, and it only changes state through the
//! transitions of [`DashboardState`].
//!
//! ```text
//! mount ──▶ load() ──▶ list_master ┐
//!                      list_info   ├─▶ finish_load (all or nothing)
//!                      list_offers ┘
//!
//! submit_*() ──▶ begin_submit_* ──▶ create_* ──▶ finish_submit ──▶ load() on success
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};

use crate::forms::{InfoField, MasterField, OfferField};
use crate::services::Backend;
use crate::state::{DashboardState, LoadOutcome, Snapshot};
use crate::types::{ApiResult, FormError, Tab};

/// Where a dashboard's state lives.
///
/// Both methods return `None` once the owner is gone (a disposed signal);
/// late results are then dropped.
pub trait StateStore<I> {
    fn read<R>(&self, f: impl FnOnce(&DashboardState<I>) -> R) -> Option<R>;

    fn write<R>(&self, f: impl FnOnce(&mut DashboardState<I>) -> R) -> Option<R>;
}

impl<I> StateStore<I> for Rc<RefCell<DashboardState<I>>> {
    fn read<R>(&self, f: impl FnOnce(&DashboardState<I>) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut DashboardState<I>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<I: 'static> StateStore<I> for RwSignal<DashboardState<I>> {
    fn read<R>(&self, f: impl FnOnce(&DashboardState<I>) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut DashboardState<I>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record created, form reset, collections reloaded.
    Created,
    /// Backend refused or was unreachable; form kept.
    Failed,
    /// Required fields missing; nothing was sent.
    Rejected(Vec<&'static str>),
    /// The dashboard was torn down mid-flight.
    Detached,
}

/// One dashboard instance: a backend and the state it feeds.
pub struct Dashboard<B, S> {
    backend: Rc<B>,
    store: S,
}

impl<B, S: Clone> Clone for Dashboard<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            store: self.store.clone(),
        }
    }
}

impl<B, S> Dashboard<B, S>
where
    B: Backend,
    S: StateStore<B::Image>,
{
    pub fn new(backend: B, store: S) -> Self {
        Self { backend: Rc::new(backend), store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -------------------------------------------------------------------------
    // Data Loader
    // -------------------------------------------------------------------------

    /// Refresh all three collections.
    ///
    /// A newer `load` supersedes this one: its result is then dropped.
    pub async fn load(&self) -> LoadOutcome {
        let Some(ticket) = self.store.write(DashboardState::begin_load) else {
            return LoadOutcome::Detached;
        };

        let result = self.fetch_snapshot().await;
        if let Err(e) = &result {
            log::error!("Failed to fetch data: {}", e);
        }

        let counts = result
            .as_ref()
            .map(|s| (s.master.len(), s.info.len(), s.offers.len()))
            .ok();

        let outcome = self
            .store
            .write(|state| state.finish_load(ticket, result))
            .unwrap_or(LoadOutcome::Detached);

        match (outcome, counts) {
            (LoadOutcome::Loaded, Some((master, info, offers))) => {
                log::info!("Loaded {} master items, {} info records, {} offers", master, info, offers);
            }
            (LoadOutcome::Superseded, _) => log::debug!("Dropped superseded load result"),
            (LoadOutcome::Detached, _) => log::debug!("Dashboard gone, load result ignored"),
            _ => {}
        }

        outcome
    }

    async fn fetch_snapshot(&self) -> ApiResult<Snapshot> {
        let (master, info, offers) = futures::join!(
            self.backend.list_master(),
            self.backend.list_info(),
            self.backend.list_offers(),
        );

        Ok(Snapshot { master: master?, info: info?, offers: offers? })
    }

    // -------------------------------------------------------------------------
    // Submitters
    // -------------------------------------------------------------------------

    /// Create a liquor master item from the master form (multipart).
    pub async fn submit_master(&self) -> SubmitOutcome {
        let upload = match self.store.write(DashboardState::begin_submit_master) {
            None => return SubmitOutcome::Detached,
            Some(Err(e)) => return rejected(Tab::Master, e),
            Some(Ok(upload)) => upload,
        };

        let result = self.backend.create_master(&upload).await;
        self.finish_submit(Tab::Master, result).await
    }

    /// Create a liquor info record from the info form (JSON).
    pub async fn submit_info(&self) -> SubmitOutcome {
        let form = match self.store.write(DashboardState::begin_submit_info) {
            None => return SubmitOutcome::Detached,
            Some(Err(e)) => return rejected(Tab::Info, e),
            Some(Ok(form)) => form,
        };

        let result = self.backend.create_info(&form).await;
        self.finish_submit(Tab::Info, result).await
    }

    /// Create an offer from the offers form (JSON).
    pub async fn submit_offer(&self) -> SubmitOutcome {
        let form = match self.store.write(DashboardState::begin_submit_offer) {
            None => return SubmitOutcome::Detached,
            Some(Err(e)) => return rejected(Tab::Offers, e),
            Some(Ok(form)) => form,
        };

        let result = self.backend.create_offer(&form).await;
        self.finish_submit(Tab::Offers, result).await
    }

    /// Submit the form of the active tab.
    pub async fn submit_active(&self) -> SubmitOutcome {
        match self.store.read(|state| state.tab) {
            None => SubmitOutcome::Detached,
            Some(Tab::Master) => self.submit_master().await,
            Some(Tab::Info) => self.submit_info().await,
            Some(Tab::Offers) => self.submit_offer().await,
        }
    }

    async fn finish_submit(&self, tab: Tab, result: ApiResult<()>) -> SubmitOutcome {
        let created = match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error adding {}: {}", tab.record_noun(), e);
                false
            }
        };

        if self.store.write(|state| state.finish_submit(tab, created)).is_none() {
            return SubmitOutcome::Detached;
        }

        if !created {
            return SubmitOutcome::Failed;
        }

        self.load().await;
        SubmitOutcome::Created
    }

    // -------------------------------------------------------------------------
    // Tab selector and form input
    // -------------------------------------------------------------------------

    pub fn select_tab(&self, tab: Tab) {
        self.store.write(|state| state.select_tab(tab));
    }

    pub fn set_master_field(&self, field: MasterField, value: String) {
        self.store.write(|state| state.set_master_field(field, value));
    }

    pub fn set_master_image(&self, image: Option<B::Image>) {
        self.store.write(|state| state.set_master_image(image));
    }

    pub fn set_info_field(&self, field: InfoField, value: String) {
        self.store.write(|state| state.set_info_field(field, value));
    }

    pub fn set_offer_field(&self, field: OfferField, value: String) {
        self.store.write(|state| state.set_offer_field(field, value));
    }
}

fn rejected(tab: Tab, err: FormError) -> SubmitOutcome {
    log::warn!("{} form not submitted: {}", tab.label(), err);
    let FormError::MissingFields(fields) = err;
    SubmitOutcome::Rejected(fields)
}
