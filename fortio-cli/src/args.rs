use std::fmt::{self, Display, Formatter};
use std::io;

use fortio::FortioError;

#[derive(Debug)]
pub enum OpError {
    Io(io::Error),
    Fortio(FortioError),
}

impl Display for OpError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Io(err) => write![f, "{}", err],
            Self::Fortio(err) => write![f, "{}", err],
        }
    }
}

impl From<io::Error> for OpError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FortioError> for OpError {
    fn from(err: FortioError) -> Self {
        Self::Fortio(err)
    }
}
