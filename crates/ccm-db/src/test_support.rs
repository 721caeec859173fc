//! Shared test utilities for ccm-db unit tests.
