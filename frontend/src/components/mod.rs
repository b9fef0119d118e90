//! UI Components for the kiosk dashboard.
//!
//! # Page
//! - [`DashboardPage`] - owns the dashboard state and controller
//!
//! # Feature Components
//! - [`TabNav`] - switches between the three collections
//! - [`MessageBanner`] - success / error banner
//! - [`MasterFormView`] - multipart create form with image preview
//! - [`InfoFormView`], [`OfferFormView`] - JSON create forms
//! - [`DataTable`] - read-only table of the active collection

use leptos::RwSignal;
use web_sys::File;

use crate::controller::Dashboard;
use crate::services::HttpBackend;
use crate::state::DashboardState;

mod dashboard;
mod data_table;
mod form_fields;
mod master_form;
mod message;
mod record_forms;
mod tab_nav;

pub use dashboard::*;
pub use data_table::*;
pub use master_form::*;
pub use message::*;
pub use record_forms::*;
pub use tab_nav::*;

/// The browser dashboard: HTTP backend, state in a reactive signal.
pub type WebDashboard = Dashboard<HttpBackend, RwSignal<DashboardState<File>>>;
