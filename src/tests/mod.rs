//! End-to-end tests that drive the controller the way the embedding page
//! would: messages in, backend calls and shell requests out, with time
//! supplied explicitly.

mod support;

mod persistence_tests;
