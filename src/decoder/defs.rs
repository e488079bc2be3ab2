//! Constants and definitions for the solution-file decoder.

/// Separates the fixed fields of a node line from its child moves
pub(crate) const CHILD_SEPARATOR: u8 = b':';

/// Board dimensionalities a header may declare
pub(crate) const SUPPORTED_DIMENSIONS: [usize; 2] = [2, 3];

/// Description of the accepted field counts, used when no schema is known yet
pub(crate) const ANY_SCHEMA_FIELDS: &str = "3 or 7";

// Field positions in a basic-schema node line
pub(crate) const BASIC_RESULT_FIELD: usize = 0;
pub(crate) const BASIC_COUNT_FIELD: usize = 1;
pub(crate) const BASIC_SIZE_FIELD: usize = 2;

// Field positions in an extended-schema node line
pub(crate) const EXTENDED_RESULT_FIELD: usize = 0;
pub(crate) const EXTENDED_FINAL_FIELD: usize = 1;
pub(crate) const EXTENDED_PROOF_FIELD: usize = 2;
pub(crate) const EXTENDED_DISPROOF_FIELD: usize = 3;
pub(crate) const EXTENDED_COUNT_FIELD: usize = 4;
pub(crate) const EXTENDED_SIZE_FIELD: usize = 5;
pub(crate) const EXTENDED_REASON_FIELD: usize = 6;

/// Upper bound for pre-allocating a child list from its declared size
pub(crate) const CHILD_CAPACITY_LIMIT: usize = 1024;
