use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KdfError {
    #[error("invalid output length for HKDF expand")]
    InvalidLength,
}

/// HKDF-SHA256 expansion of the given input key material.
pub fn derive_secrets(
    input_key_material: &[u8],
    salt: Option<&[u8]>,
    info: &[u8],
    output_length: usize,
) -> Result<Vec<u8>, KdfError> {
    let hk = Hkdf::<Sha256>::new(salt, input_key_material);
    let mut okm = vec![0u8; output_length];
    hk.expand(info, &mut okm).map_err(|_| KdfError::InvalidLength)?;
    Ok(okm)
}
