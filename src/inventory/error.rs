use thiserror::Error;

/// Errors that can occur during slot operations
///
/// Capacity limits and resource-kind mismatches are never errors; they show
/// up as remainders, empty extractions or clamped sizes instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The slot does not support this operation (e.g. overwriting a read-only view)
    #[error("unsupported slot operation: {operation}")]
    UnsupportedOperation {
        operation: &'static str,
    },
}
