use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::SerializerError;

pub fn encode<T: Serialize>(input: &T) -> Result<Vec<u8>, SerializerError> {
    bincode::serialize(input).map_err(|_| SerializerError::InvalidValueType)
}

pub fn decode<T: DeserializeOwned>(encoded: &[u8]) -> Result<T, SerializerError> {
    bincode::deserialize::<T>(encoded).map_err(|_| SerializerError::InvalidValueType)
}
