use ring::rand::SecureRandom;
use thiserror::Error;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of identifiers handed out by the mock backend
pub(crate) const MOCK_ID_LEN: usize = 9;

/// Random lowercase base-36 string drawn from the system RNG.
pub(crate) fn gen_random_base36(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(bytes
        .iter()
        .map(|b| BASE36_ALPHABET[(*b as usize) % BASE36_ALPHABET.len()] as char)
        .collect())
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}
