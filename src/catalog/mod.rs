//! # Catalog Integration Module
//!
//! This module provides the HTTP interface to the remote music catalog and
//! to the personal cloud library hosted on the same service. It is the only
//! layer of songferry that talks to the network, handling endpoint
//! resolution, credential headers, response decoding and degradation on
//! failure.
//!
//! ## Overview
//!
//! The catalog module implements a small SDK-like surface over the handful
//! of endpoints the delivery pipeline needs. It abstracts away URL
//! construction, cookie-based credentials and the service's JSON envelope
//! quirks, providing a clean Rust interface for the management and delivery
//! layers.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Delivery)
//!          ↓
//! Catalog Integration Layer
//!     ├── Search (keyword search)
//!     ├── Song Operations (detail, wiki, playback URL)
//!     ├── Credential Status (login probe / quality gate)
//!     ├── Cloud Library (list, upload, match)
//!     └── Fallback Resolver (public, unauthenticated)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Catalog HTTP API
//! ```
//!
//! ## Core Modules
//!
//! - [`search`] - keyword search returning display-ready track lists
//! - [`song`] - batch song detail, wiki metadata labels, playback URL
//!   resolution at a requested quality tier
//! - [`status`] - credential liveness probe; decides whether direct
//!   high-fidelity resolution is permitted
//! - [`cloud`] - personal library pagination, multipart upload and the
//!   upload-to-catalog match call
//! - [`fallback`] - public unauthenticated URL resolver used when direct
//!   resolution is denied or unavailable
//!
//! ## Endpoint Resolution
//!
//! Every request resolves its base URL through the region selector
//! ([`crate::management::RegionManager`]): an operator-configured URL
//! override wins, otherwise the persisted overseas/domestic flag picks one
//! of the two known deployments.
//!
//! ## Error Handling Philosophy
//!
//! The read operations (search, detail, wiki) are best-effort: transport
//! errors, unexpected payloads and non-success envelopes degrade to empty
//! results with a logged warning, and the caller that detects "no candidates
//! at all" owns the user-visible failure message. Write operations (upload,
//! match) surface errors to their caller, which decides whether they are
//! retryable.
//!
//! Credential problems are never errors here: an invalid or expired cookie
//! makes the status probe return `false`, which silently downgrades the
//! delivery to the fallback resolver.
//!
//! ## Credentials
//!
//! Two independent cookie credentials exist: a playback-scoped one used for
//! direct URL resolution of catalog tracks, and a library-scoped one used
//! for every personal cloud operation and for library-origin tracks. Probe
//! results are deliberately not cached; every quality decision re-probes so
//! that a revoked account degrades immediately instead of after a stale TTL.

pub mod cloud;
pub mod fallback;
pub mod search;
pub mod song;
pub mod status;
