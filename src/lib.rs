//! user-card - a self-loading user card element
//!
//! The card looks up a user by its `user-id` attribute, renders the record
//! into an encapsulated shadow root, and announces `user-loaded`,
//! `error-occurred` and `card-click` events to its host.
//!
//! - `card`: the element (state, lifecycle, renderer, events)
//! - `api`: the lookup API seam and its reqwest implementation
//! - `config`: layered TOML/env configuration
//! - `logging`: tracing setup and the in-memory log buffer
//! - `tui`: an interactive terminal host for the card

pub mod api;
pub mod card;
pub mod config;
pub mod logging;
pub mod tui;
