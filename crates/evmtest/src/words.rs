//! Fixed-width 32-byte hex word encoding.
//!
//! A word is a `0x`-prefixed, exactly-64-character hex string: the packed
//! big-endian form contract ABIs use for every scalar slot. Encoding is
//! idempotent — feeding a well-formed word back in returns it unchanged.

use primitive_types::U256;

use crate::HarnessError;

/// Hex characters in one 32-byte word body
pub const WORD_HEX_LEN: usize = 64;

/// Conversion of a scalar into an unpadded hex body (no `0x` prefix).
///
/// Implemented for unsigned integers, [`U256`], and strings. A string
/// starting with `0x` is taken as a hex body, a decimal string is parsed
/// as a [`U256`], and any other string is encoded as its UTF-8 bytes.
pub trait IntoWordBody {
    /// The unpadded hex body of this value
    fn into_word_body(self) -> Result<String, HarnessError>;
}

macro_rules! impl_into_word_body_uint {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoWordBody for $t {
                fn into_word_body(self) -> Result<String, HarnessError> {
                    Ok(format!("{:x}", self))
                }
            }
        )*
    };
}

impl_into_word_body_uint!(u8, u16, u32, u64, u128, usize);

impl IntoWordBody for U256 {
    fn into_word_body(self) -> Result<String, HarnessError> {
        Ok(format!("{:x}", self))
    }
}

impl IntoWordBody for &str {
    fn into_word_body(self) -> Result<String, HarnessError> {
        if let Some(body) = self.strip_prefix("0x") {
            if body.chars().all(|c| c.is_ascii_hexdigit()) {
                Ok(body.to_string())
            } else {
                Err(HarnessError::InvalidHex(self.to_string()))
            }
        } else if !self.is_empty() && self.chars().all(|c| c.is_ascii_digit()) {
            let value = U256::from_dec_str(self)
                .map_err(|e| HarnessError::InvalidWord(e.to_string()))?;
            value.into_word_body()
        } else {
            Ok(hex::encode(self.as_bytes()))
        }
    }
}

impl IntoWordBody for String {
    fn into_word_body(self) -> Result<String, HarnessError> {
        self.as_str().into_word_body()
    }
}

impl IntoWordBody for &String {
    fn into_word_body(self) -> Result<String, HarnessError> {
        self.as_str().into_word_body()
    }
}

/// Encode a scalar as a canonical 32-byte word.
///
/// The hex body is left-padded with zeros to 64 characters and prefixed
/// with `0x`. A body already longer than 64 characters is a caller error;
/// truncation is never attempted.
pub fn to_fixed_word<T: IntoWordBody>(value: T) -> Result<String, HarnessError> {
    Ok(format!("0x{}", fixed_body(value)?))
}

/// Encode a sequence of scalars as one packed `0x`-prefixed byte string,
/// each element padded to a full word, in order
pub fn concat_fixed_words<I, T>(values: I) -> Result<String, HarnessError>
where
    I: IntoIterator<Item = T>,
    T: IntoWordBody,
{
    let mut packed = String::from("0x");
    for value in values {
        packed.push_str(&fixed_body(value)?);
    }
    Ok(packed)
}

fn fixed_body<T: IntoWordBody>(value: T) -> Result<String, HarnessError> {
    let body = value.into_word_body()?;
    if body.len() > WORD_HEX_LEN {
        return Err(HarnessError::WordOverflow { len: body.len() });
    }
    Ok(format!("{:0>64}", body))
}
