pub mod client;
pub mod models;

#[cfg(test)]
mod client_test;
