//! Application configuration.
//!
//! Compile-time configuration for the kiosk dashboard. The backend origin
//! is fixed at build time; there is no runtime configuration surface.

/// Backend API base URL.
///
/// The kiosk catalogue backend serving the list and create routes.
pub const API_BASE_URL: &str = "https://kioskagain.onrender.com";

/// Application name, used for the document title.
pub const APP_NAME: &str = "Kiosk Admin";

/// `accept` filter for the master item image picker.
pub const IMAGE_ACCEPT: &str = "image/*";

/// Placeholder shown instead of the forms and tables while a load is running.
pub const LOADING_TEXT: &str = "Loading data...";
