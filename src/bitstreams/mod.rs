use tracing::debug;

use crate::{error::{Error, Result}, huffman::{Code, CodeTable}};

/// Width of the pad-count field that opens every packed stream.
pub const PAD_FIELD_BITS: usize = 8;

/// Number of zero bits needed to byte-align `bits` bits.
#[inline(always)]
pub fn pad_count(bits: u64) -> u8 {
    ((8 - bits % 8) % 8) as u8
}

pub struct BinaryWriter {
    pub os: Box<[u8]>,
}

/// MSB-first bit writer. The last byte is zero-padded by [`build`](Self::build).
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    pub current: u8,
    pub free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    pub fn build(mut self) -> BinaryWriter {
        if self.free < 8 {
            self.write(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice()
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self { os: Vec::with_capacity(bytes), ..Self::default() }
    }

    #[inline(always)]
    pub fn write(&mut self, b: u8) {
        self.os.push(b);
    }

    /// Writes the low `len` bits of `b` into the current byte; `len <= free`.
    #[inline(always)]
    pub fn write_in_current(&mut self, b: u64, len: usize) -> usize {
        debug_assert!(len <= self.free);
        self.free -= len;
        self.current |= ((b & ((1 << len) - 1)) << self.free) as u8;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len;
        len
    }

    /// Writes the low `len` bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: usize) -> usize {
        assert!(len <= 64, "Cannot write {} bits from a u64", len);

        let mut left = len;
        while left > 0 {
            let chunk = left.min(self.free);
            left -= chunk;
            self.write_in_current(x >> left, chunk);
        }

        len
    }

    pub fn push_code(&mut self, code: &Code) -> usize {
        let len = code.len();
        if len > 64 {
            self.push_bits((code.bits() >> 64) as u64, len - 64);
            self.push_bits(code.bits() as u64, 64);
        } else {
            self.push_bits(code.bits() as u64, len);
        }
        len
    }
}

/// MSB-first bit reader over a byte slice.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    pub read_bits: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(input_stream: &'a [u8]) -> Self {
        BinaryReader {
            is: input_stream,
            read_bits: 0,
        }
    }

    pub fn total_bits(&self) -> usize {
        self.is.len() * 8
    }

    pub fn remaining_bits(&self) -> usize {
        self.total_bits() - self.read_bits
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.is.get(self.read_bits >> 3)?;
        let bit = (byte >> (7 - (self.read_bits & 7))) & 1 == 1;
        self.read_bits += 1;
        Some(bit)
    }

    /// Reads `len <= 64` bits as an integer, or `None` if fewer remain.
    #[inline(always)]
    pub fn read_int(&mut self, len: usize) -> Option<u64> {
        assert!(len <= 64);

        if len > self.remaining_bits() {
            return None;
        }

        let mut x = 0u64;
        for _ in 0..len {
            x = (x << 1) | self.read_bit()? as u64;
        }
        Some(x)
    }
}

/// Replaces each byte of `data` with its code and packs the result as
/// `[pad count] ++ codes ++ zero padding`.
///
/// Every byte of `data` must have a code in `table`, which holds when the
/// table was built from `data` itself.
pub fn pack(data: &[u8], table: &CodeTable, encoded_bits: u64) -> Result<Box<[u8]>> {
    let pad = pad_count(encoded_bits);
    let mut writer = BinaryWriterBuilder::with_capacity(1 + (encoded_bits as usize + 7) / 8);

    writer.push_bits(pad as u64, PAD_FIELD_BITS);

    for &byte in data {
        let code = table.code(byte).ok_or(Error::MissingCode { symbol: byte })?;
        writer.push_code(code);
    }

    debug_assert_eq!(writer.written_bits as u64, encoded_bits + PAD_FIELD_BITS as u64);
    debug!("packed {} bits with {} padding bits", encoded_bits, pad);

    Ok(writer.build().os)
}

/// Reverses [`pack`]: reads the pad count, drops the padding, then matches
/// the remaining bits against `table` one code at a time.
pub fn unpack(payload: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(payload);

    let pad = reader
        .read_int(PAD_FIELD_BITS)
        .ok_or(Error::InvalidPadding { pad: 0, available: 0 })? as usize;
    let available = reader.remaining_bits();

    if pad > 7 || pad >= available {
        return Err(Error::InvalidPadding { pad, available });
    }

    let data_bits = available - pad;
    debug!("unpacking {} bits ({} padding bits)", data_bits, pad);

    let mut output = Vec::new();
    let mut current = Code::new();

    for _ in 0..data_bits {
        let bit = reader.read_bit().ok_or(Error::InvalidPadding { pad, available })?;
        current = current.with_bit(bit);

        if let Some(symbol) = table.symbol(&current) {
            output.push(symbol);
            current = Code::new();
        } else if current.len() >= table.max_len() {
            return Err(Error::UnknownCode { pending_bits: current.len() });
        }
    }

    if !current.is_empty() {
        return Err(Error::UnknownCode { pending_bits: current.len() });
    }

    Ok(output)
}
