//! Backdrop: background and splash image resolution with durable selections.
//!
//! A color or theme name resolves to a non-empty list of image candidates:
//! one live image search, then deterministic placeholder generation when the
//! search yields nothing. Picks are persisted so the next launch can rebuild
//! the display.
//!
//! # Quick start
//!
//! ```no_run
//! use backdrop::config::load_config;
//! use backdrop::service::BackdropService;
//! use backdrop::store::PersistenceStore;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let service = BackdropService::from_config(&config, PersistenceStore::in_memory());
//! let selection = service.browse_color("синий", Some(5)).await.unwrap();
//! service.apply_candidate(&selection.candidates[0], &selection.name);
//! println!("{:?}", service.startup_display());
//! # }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod resolve;
pub mod service;
pub mod store;
#[cfg(test)]
pub mod testsupport;
pub mod textutil;
