use crate::{Error, ErrorKind, InternalError, InternalErrorKind};

impl From<ckb_occupied_capacity::Error> for InternalError {
    fn from(error: ckb_occupied_capacity::Error) -> Self {
        InternalErrorKind::CapacityOverflow.because(error)
    }
}

impl From<ckb_occupied_capacity::Error> for Error {
    fn from(error: ckb_occupied_capacity::Error) -> Self {
        match error {
            ckb_occupied_capacity::Error::Overflow => {
                Into::<InternalError>::into(error).into()
            }
            ckb_occupied_capacity::Error::InvalidDecimal(_) => ErrorKind::Malformed.because(error),
        }
    }
}
