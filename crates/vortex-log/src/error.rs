use vortex_mem::VecError;

#[derive(Debug)]
pub enum LogError {
    VecError(VecError),
    IoError(std::io::Error),
    NotInitialized,
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::VecError(_) => write!(f, "container error"),
            Self::IoError(_) => write!(f, "IO error"),
            Self::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::VecError(err) => Some(err),
            Self::IoError(err) => Some(err),
            Self::NotInitialized => None,
        }
    }
}

impl From<VecError> for LogError {

    fn from(value: VecError) -> Self {
        Self::VecError(value)
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
