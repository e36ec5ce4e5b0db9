//! Integration tests against an in-process fake backend

mod api_tests;
mod fake_backend;
