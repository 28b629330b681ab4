//! End-to-end tests driving the full router with in-memory stores.

mod auth_test;
mod category_test;
mod helpers;
mod product_test;
