use std::{fs, io::Write, path::Path};

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    bitstreams::{pack, pad_count, unpack, PAD_FIELD_BITS},
    error::{Error, Result},
    huffman::{build_tree, CodeTable, FrequencyTable},
    utils::timer::Timer,
};

/// Size of the big-endian header length prefix.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Everything the decoder needs to rebuild the code table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHeader {
    /// `(symbol, count)` pairs in strictly ascending symbol order.
    pub frequencies: Vec<(u8, u64)>,
    /// Meaningful payload bits, padding excluded.
    pub encoded_bits: u64,
}

/// Summary of a container, as printed by `inspect_huff` and `--report`.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStats {
    pub original_size: u64,
    pub compressed_size: u64,
    pub header_size: u64,
    pub symbols: usize,
    pub encoded_bits: u64,
    pub padding_bits: u8,
    pub max_code_len: usize,
}

fn header_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_big_endian()
        .reject_trailing_bytes()
}

impl ContainerHeader {
    pub fn new(freqs: &FrequencyTable, encoded_bits: u64) -> Self {
        Self { frequencies: freqs.iter().collect(), encoded_bits }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        header_options().serialize(self).map_err(Error::HeaderEncoding)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        header_options()
            .deserialize(bytes)
            .map_err(|e| Error::corrupt_header(format!("unparsable header: {e}")))
    }

    /// Checks the structural rules and returns the frequency table.
    pub fn frequency_table(&self) -> Result<FrequencyTable> {
        if self.frequencies.is_empty() {
            return Err(Error::corrupt_header("empty frequency table"));
        }

        let mut freqs = FrequencyTable::new();
        let mut previous: Option<u8> = None;

        for &(symbol, count) in self.frequencies.iter() {
            if previous.is_some_and(|p| p >= symbol) {
                return Err(Error::corrupt_header(format!(
                    "symbol {symbol} is out of order or repeated"
                )));
            }
            if count == 0 {
                return Err(Error::corrupt_header(format!("symbol {symbol} has a zero count")));
            }
            freqs.insert(symbol, count);
            previous = Some(symbol);
        }

        if freqs.total().is_none() {
            return Err(Error::corrupt_header("total count overflows"));
        }

        Ok(freqs)
    }
}

/// Splits a non-empty container into its header and payload.
fn split_container(data: &[u8]) -> Result<(ContainerHeader, &[u8])> {
    if data.len() < LENGTH_PREFIX_BYTES {
        return Err(Error::corrupt_header(format!(
            "{} bytes is shorter than the {LENGTH_PREFIX_BYTES}-byte length prefix",
            data.len()
        )));
    }

    let (prefix, rest) = data.split_at(LENGTH_PREFIX_BYTES);
    let mut length_bytes = [0u8; LENGTH_PREFIX_BYTES];
    length_bytes.copy_from_slice(prefix);
    let header_len = u32::from_be_bytes(length_bytes) as usize;

    if rest.len() < header_len {
        return Err(Error::corrupt_header(format!(
            "header needs {header_len} bytes but only {} follow",
            rest.len()
        )));
    }

    let (header_bytes, payload) = rest.split_at(header_len);
    Ok((ContainerHeader::from_bytes(header_bytes)?, payload))
}

/// `Σ freq[s] * len(code[s])` for a table about to be written.
pub fn checked_encoded_bits(table: &CodeTable, freqs: &FrequencyTable) -> Result<u64> {
    table
        .encoded_bits(freqs)
        .ok_or_else(|| Error::InputTooLarge("encoded bit length overflows a u64".to_string()))
}

/// Compresses `data` into a self-describing container. Empty input gives
/// empty output.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let freqs = FrequencyTable::from_bytes(data);
    let table = CodeTable::from_tree(build_tree(&freqs).as_ref());
    let encoded_bits = checked_encoded_bits(&table, &freqs)?;

    debug!("{} distinct symbols, longest code {} bits", table.len(), table.max_len());

    let payload = pack(data, &table, encoded_bits)?;
    let header = ContainerHeader::new(&freqs, encoded_bits).to_bytes()?;
    let header_len = u32::try_from(header.len()).map_err(|_| {
        Error::InputTooLarge(format!("{}-byte header exceeds a u32 length", header.len()))
    })?;

    let mut out = Vec::with_capacity(LENGTH_PREFIX_BYTES + header.len() + payload.len());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&header);
    out.extend_from_slice(&payload);

    Ok(out)
}

/// Reverses [`compress_bytes`], validating the header against the payload.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let (header, payload) = split_container(data)?;
    let freqs = header.frequency_table()?;
    let table = CodeTable::from_tree(build_tree(&freqs).as_ref());

    let expected_bits = table
        .encoded_bits(&freqs)
        .ok_or_else(|| Error::corrupt_header("encoded bit length overflows"))?;
    if expected_bits != header.encoded_bits {
        return Err(Error::corrupt_header(format!(
            "header records {} encoded bits but its frequencies imply {expected_bits}",
            header.encoded_bits
        )));
    }

    let pad = pad_count(header.encoded_bits);
    match payload.first() {
        Some(&stored) if stored == pad => {}
        Some(&stored) => {
            return Err(Error::InvalidPadding {
                pad: stored as usize,
                available: (payload.len() - 1) * 8,
            })
        }
        None => return Err(Error::InvalidPadding { pad: 0, available: 0 }),
    }

    let payload_bits = (payload.len() as u64 * 8).saturating_sub(PAD_FIELD_BITS as u64);
    let framed_bits = header.encoded_bits.saturating_add(pad as u64);
    if payload_bits != framed_bits {
        return Err(Error::corrupt_header(format!(
            "payload carries {payload_bits} bits but the header expects {framed_bits}"
        )));
    }

    let output = unpack(payload, &table)?;

    // `total` is checked by `frequency_table`
    let expected_len = freqs.total().unwrap_or_default();
    if output.len() as u64 != expected_len {
        return Err(Error::LengthMismatch { expected: expected_len, actual: output.len() as u64 });
    }

    Ok(output)
}

/// Describes a container without decoding its payload.
pub fn inspect(data: &[u8]) -> Result<ContainerStats> {
    if data.is_empty() {
        return Ok(ContainerStats::default());
    }

    let (header, payload) = split_container(data)?;
    let freqs = header.frequency_table()?;
    let table = CodeTable::from_tree(build_tree(&freqs).as_ref());

    Ok(ContainerStats {
        original_size: freqs.total().unwrap_or_default(),
        compressed_size: data.len() as u64,
        header_size: (data.len() - LENGTH_PREFIX_BYTES - payload.len()) as u64,
        symbols: freqs.len(),
        encoded_bits: header.encoded_bits,
        padding_bits: pad_count(header.encoded_bits),
        max_code_len: table.max_len(),
    })
}

/// Writes `bytes` to a temporary file next to `path` and renames it into
/// place, so a failed run never leaves a partial output behind.
///
/// A new file gets the usual `0o666` mode less the umask. An existing file
/// keeps its mode.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    Ok(())
}

/// Compresses the file at `path_in` into `path_out`.
pub fn compress(path_in: &Path, path_out: &Path) -> Result<ContainerStats> {
    compress_with(path_in, path_out, false)
}

/// Like [`compress`], optionally decoding the result in memory and comparing
/// it with the input before anything is written.
pub fn compress_with(path_in: &Path, path_out: &Path, verify: bool) -> Result<ContainerStats> {
    let timer = Timer::new();

    let data = fs::read(path_in)?;
    let compressed = compress_bytes(&data)?;

    if verify && decompress_bytes(&compressed)? != data {
        return Err(Error::VerificationFailed);
    }

    write_atomically(path_out, &compressed)?;

    let elapsed = timer.stop();
    info!(
        "compressed {} ({} bytes) into {} ({} bytes) in {:?}",
        path_in.display(),
        data.len(),
        path_out.display(),
        compressed.len(),
        elapsed
    );

    inspect(&compressed)
}

/// Decompresses the container at `path_in` into `path_out`, returning the
/// number of bytes written.
pub fn decompress(path_in: &Path, path_out: &Path) -> Result<u64> {
    let timer = Timer::new();

    let data = fs::read(path_in)?;
    let decompressed = decompress_bytes(&data)?;

    write_atomically(path_out, &decompressed)?;

    let elapsed = timer.stop();
    info!(
        "decompressed {} ({} bytes) into {} ({} bytes) in {:?}",
        path_in.display(),
        data.len(),
        path_out.display(),
        decompressed.len(),
        elapsed
    );

    Ok(decompressed.len() as u64)
}
