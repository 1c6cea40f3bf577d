pub mod codec;

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use num_bigint::BigInt;

/// One half of a key pair: an exponent and the shared modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub exponent: BigInt,
    pub modulus: BigInt,
}

#[derive(Debug)]
pub struct KeySet {
    pub public: Key,
    pub private: Key,
}

pub enum KeyError {
    Malformed(String),
}

impl KeyError {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::Malformed(reason) => write!(f, "malformed key: {}", reason),
        }
    }
}

impl Display for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display(f)
    }
}

impl Debug for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display(f)
    }
}

impl Error for KeyError {}
