//! Kiosk Admin - Frontend Rust/Leptos Application
//!
//! A WebAssembly dashboard for managing the three collections of the kiosk
//! catalogue backend: liquor master items, liquor info records and offers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  DashboardPage (owns RwSignal<DashboardState>)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TabNav          Liquor Master | Liquor Info | Offers        │
//! │  MessageBanner   last success / error                        │
//! │  ContentCard                                                 │
//! │  ├── active create form (Master | Info | Offer)             │
//! │  └── DataTable of the active collection                     │
//! └─────────────────────────────────────────────────────────────┘
//!            │ events                     ▲ state
//!            ▼                            │
//!   Dashboard controller ──── Backend (gloo-net HTTP)
//! ```
//!
//! # Modules
//!
//! - [`types`] - Records, tabs, messages, errors
//! - [`forms`] - Create-form state and validation
//! - [`state`] - Dashboard state and its transitions
//! - [`controller`] - Data Loader and Submitters
//! - [`view`] - Pure display models (tables, headings)
//! - [`components`] - Leptos UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod forms;
pub mod state;
pub mod controller;
pub mod view;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Records
    InfoRecord, MasterItem, OfferRecord, RecordId,
    // UI
    Message, MessageKind, Tab,
    // Errors
    ApiError, ApiResult, FormError,
};

// State and controller
pub use controller::{Dashboard, StateStore, SubmitOutcome};
pub use state::{DashboardState, LoadOutcome, Snapshot};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Root
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}
