//! Pipeline tests that run the full report flow against canned upstream data.
