use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Logarithm base that sets the entropy unit (2 = bits, e = nats, 10 = digits).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Base(f64);

impl Base {
    pub const BITS: Base = Base(2.0);
    pub const NATS: Base = Base(std::f64::consts::E);
    pub const DIGITS: Base = Base(10.0);

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 || value == 1.0 {
            return Err(Error::InvalidBase(value));
        }
        Ok(Base(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// log_base(x). Bases 2 and 10 go through the dedicated std functions
    /// so that exact powers give exact results.
    pub fn log(self, x: f64) -> f64 {
        if self.0 == 2.0 {
            x.log2()
        } else if self.0 == 10.0 {
            x.log10()
        } else {
            x.ln() / self.0.ln()
        }
    }
}

impl Default for Base {
    fn default() -> Self {
        Base::BITS
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Base {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bits" => Ok(Base::BITS),
            "e" | "nats" => Ok(Base::NATS),
            "digits" | "dits" => Ok(Base::DIGITS),
            other => {
                let v: f64 = other.parse().map_err(|_| Error::InvalidBaseText(s.to_string()))?;
                Base::new(v)
            }
        }
    }
}

/// Append-only byte buffer with Shannon entropy over its current contents.
#[derive(Debug, Clone, Default)]
pub struct Entropy {
    buffer: Vec<u8>,
    base: Base,
}

impl Entropy {
    pub fn new(base: Base) -> Self {
        Entropy { buffer: Vec::new(), base }
    }

    pub fn with_bytes(data: impl AsRef<[u8]>, base: Base) -> Self {
        Entropy { buffer: data.as_ref().to_vec(), base }
    }

    /// Append `data` to the buffer.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        self.buffer.extend_from_slice(data.as_ref());
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Occurrence count of every byte value, in one pass.
    pub fn histogram(&self) -> [u64; 256] {
        let mut freq = [0u64; 256];
        for &b in &self.buffer {
            freq[b as usize] += 1;
        }
        freq
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.histogram().iter().filter(|&&c| c > 0).count()
    }

    /// H = -sum p(v) * log_base(p(v)) over the distinct byte values v.
    pub fn shannon(&self) -> Result<f64> {
        if self.buffer.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        let len = self.buffer.len() as f64;
        let mut ent = 0f64;
        for &count in self.histogram().iter().filter(|&&c| c > 0) {
            let p = (count as f64) / len;
            ent -= p * self.base.log(p);
        }
        Ok(ent)
    }

    /// Shannon entropy divided by the buffer length.
    pub fn metric(&self) -> Result<f64> {
        let h = self.shannon()?;
        Ok(h / self.buffer.len() as f64)
    }

    /// Upper bound for `shannon()`: log_base(distinct byte values).
    pub fn max_entropy(&self) -> Result<f64> {
        match self.distinct() {
            0 => Err(Error::EmptyBuffer),
            k => Ok(self.base.log(k as f64)),
        }
    }
}

/// Shannon entropy of `bytes` without keeping an accumulator around.
pub fn shannon_entropy(bytes: impl AsRef<[u8]>, base: Base) -> Result<f64> {
    Entropy::with_bytes(bytes, base).shannon()
}
