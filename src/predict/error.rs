use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE for {name}: {message}")]
    InvalidTle { name: String, message: String },
    #[error("Model initialisation failed for NORAD {norad_id}: {message}")]
    ModelInit { norad_id: u64, message: String },
    #[error("Epoch MJD {0} is outside the representable range")]
    EpochRange(f64),
    #[error("Propagation error: {0}")]
    Propagation(String),
}
