//! Conformance tests for the MLS crypto core, tracked separately from the
//! per-module unit tests. Each test file sweeps behavior that must hold
//! across implementations: the ciphersuite matrix, wire-format
//! canonicalization, and the JSON vector schema.
