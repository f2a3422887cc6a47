use thiserror::Error;

use crate::domain::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no breed record with id {0} in the current session")]
    UnknownRecord(RecordId),
}
