//! Dashboard state and its transitions.
//!
//! [`DashboardState`] is the single owner of everything the dashboard shows:
//! the three loaded collections, the three create forms, the active tab, the
//! banner message and the loading flag. Transitions are plain synchronous
//! methods; the async side lives in [`crate::controller`].

use crate::forms::{
    require_complete, InfoField, InfoForm, MasterField, MasterForm, MasterUpload, OfferField,
    OfferForm, TextForm,
};
use crate::types::{ApiError, FormError, InfoRecord, MasterItem, Message, OfferRecord, Tab};

/// Banner text when a load cycle fails.
pub const LOAD_FAILED_TEXT: &str = "Failed to load data.";

/// The three collections as returned by one successful load cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub master: Vec<MasterItem>,
    pub info: Vec<InfoRecord>,
    pub offers: Vec<OfferRecord>,
}

/// Generation of a load cycle. Only the newest ticket may apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What became of a finished load cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// All three collections replaced.
    Loaded,
    /// A request failed; collections untouched, error shown.
    Failed,
    /// A newer cycle started meanwhile; result dropped.
    Superseded,
    /// The dashboard was torn down before the result arrived.
    Detached,
}

/// Per-dashboard state. `I` is the image file type of the master form.
#[derive(Clone, Debug)]
pub struct DashboardState<I> {
    pub tab: Tab,
    pub master: Vec<MasterItem>,
    pub info: Vec<InfoRecord>,
    pub offers: Vec<OfferRecord>,
    pub loading: bool,
    pub message: Option<Message>,
    pub master_form: MasterForm<I>,
    pub info_form: InfoForm,
    pub offer_form: OfferForm,
    generation: u64,
}

impl<I> Default for DashboardState<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> DashboardState<I> {
    /// Fresh state for a dashboard about to run its initial load.
    pub fn new() -> Self {
        Self {
            tab: Tab::default(),
            master: Vec::new(),
            info: Vec::new(),
            offers: Vec::new(),
            loading: true,
            message: None,
            master_form: MasterForm::default(),
            info_form: InfoForm::default(),
            offer_form: OfferForm::default(),
            generation: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Loader
    // -------------------------------------------------------------------------

    /// Start a load cycle, superseding any cycle still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply the result of a load cycle, all or nothing.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Snapshot, ApiError>) -> LoadOutcome {
        if ticket.0 != self.generation {
            return LoadOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.master = snapshot.master;
                self.info = snapshot.info;
                self.offers = snapshot.offers;
                LoadOutcome::Loaded
            }
            Err(_) => {
                self.message = Some(Message::error(LOAD_FAILED_TEXT));
                LoadOutcome::Failed
            }
        }
    }

    // -------------------------------------------------------------------------
    // Submitters
    // -------------------------------------------------------------------------

    pub fn begin_submit_info(&mut self) -> Result<InfoForm, FormError> {
        let form = require_complete(&self.info_form)?;
        self.message = None;
        Ok(form)
    }

    pub fn begin_submit_offer(&mut self) -> Result<OfferForm, FormError> {
        let form = require_complete(&self.offer_form)?;
        self.message = None;
        Ok(form)
    }

    /// Record the end of a create attempt for `tab`'s collection.
    ///
    /// On success the form is reset; on failure it is kept for a retry.
    pub fn finish_submit(&mut self, tab: Tab, created: bool) {
        if created {
            match tab {
                Tab::Master => self.master_form = MasterForm::default(),
                Tab::Info => self.info_form = InfoForm::default(),
                Tab::Offers => self.offer_form = OfferForm::default(),
            }
            self.message = Some(Message::success(tab.created_text()));
        } else {
            self.message = Some(Message::error(tab.failed_text()));
        }
    }

    // -------------------------------------------------------------------------
    // Tab selector and form input
    // -------------------------------------------------------------------------

    /// Switch tabs. Clears the banner, keeps every form and collection.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.message = None;
    }

    pub fn set_master_field(&mut self, field: MasterField, value: String) {
        self.master_form.set(field, value);
    }

    pub fn set_master_image(&mut self, image: Option<I>) {
        self.master_form.image = image;
    }

    pub fn set_info_field(&mut self, field: InfoField, value: String) {
        self.info_form.set(field, value);
    }

    pub fn set_offer_field(&mut self, field: OfferField, value: String) {
        self.offer_form.set(field, value);
    }
}

impl<I: Clone> DashboardState<I> {
    pub fn begin_submit_master(&mut self) -> Result<MasterUpload<I>, FormError> {
        let upload = self.master_form.upload()?;
        self.message = None;
        Ok(upload)
    }
}
