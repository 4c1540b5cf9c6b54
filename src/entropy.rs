//! Sources of random bytes, and drawing uniformly distributed integers from them.
//!
//! An entropy source is anything implementing [`std::io::Read`]. The default is the operating
//! system's cryptographically secure RNG ([`OsEntropy`]).

use std::io::{self, Read};

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;

/// The default source of entropy: the operating system's CSPRNG.
pub type OsEntropy = RngSource<OsRng>;

/// Adapts a `rand` RNG into a byte source.
///
/// Reads always fill the whole buffer. A failure of the RNG is reported as an I/O error, rather
/// than the panic `RngCore::fill_bytes` would give.
#[derive(Clone, Debug, Default)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> Read for RngSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0
            .try_fill_bytes(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        Ok(buf.len())
    }
}

/// Counts the bytes read through it from an underlying source.
///
/// The bytes themselves are passed along untouched, and every read is forwarded exactly once.
#[derive(Debug)]
pub struct EntropyCounter<R> {
    count: usize,
    inner: R,
}

impl<R: Read> EntropyCounter<R> {
    pub fn new(inner: R) -> EntropyCounter<R> {
        EntropyCounter { count: 0, inner }
    }

    /// The number of bytes read so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for EntropyCounter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n;
        Ok(n)
    }
}

/// Draw an integer uniformly distributed over `[0, max)` from `source`.
///
/// Candidates are built from just enough bytes to cover `max - 1`, with the excess high bits of
/// the leading byte masked off; a candidate that is `>= max` is thrown away and drawn again. This
/// keeps the result free of the bias a modulo reduction would introduce.
///
/// No bytes are read if `max` is 1.
pub fn random_below<R: Read + ?Sized>(source: &mut R, max: &BigUint) -> io::Result<BigUint> {
    if max.bits() == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "the upper bound of a random draw must be non-zero",
        ));
    }
    let bits = (max - 1u32).bits();
    if bits == 0 {
        return Ok(BigUint::default());
    }

    let byte_len = usize::try_from((bits + 7) / 8)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "random draw is too large"))?;
    let top_bits = match bits % 8 {
        0 => 8,
        b => b,
    };
    let mask = (0xffu16 >> (8 - top_bits)) as u8;

    let mut buf = vec![0u8; byte_len];
    loop {
        source.read_exact(&mut buf)?;
        buf[0] &= mask;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < max {
            return Ok(candidate);
        }
        tracing::trace!(bytes = byte_len, "rejected out-of-range candidate; drawing again");
    }
}
