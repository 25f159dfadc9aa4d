use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum QueueError {
    #[error("index out of range: position {index} is outside a queue of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum SerializerError {
    #[error("InvalidValueType couldn't processed specified type.")]
    InvalidValueType,
}

#[derive(Error, Debug, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    IndexOutOfRange(#[from] QueueError),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("malformed command: {0}")]
    Parse(String),
    #[error("couldn't encode reply: {0}")]
    Encode(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("InvalidConfig couldn't read configuration: {0}")]
    Invalid(String),
    #[error("InvalidLogLevel '{0}' is not a tracing level")]
    InvalidLogLevel(String),
}
