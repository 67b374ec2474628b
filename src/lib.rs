// Library surface for the heleus binary.
//
// - `api`: HTTP client for the Perseus server and its request/response models.
// - `config`: persisted host/port configuration under ~/.heleus.
// - `transfer`: progress bar construction for uploads, downloads and extraction.
// - `util`: bundle extraction helpers.
pub mod api;
pub mod config;
pub mod transfer;
pub mod util;
