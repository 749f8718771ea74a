use crate::core::error::{CellioError, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Buffer size wrapped around compressed streams.
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// File name suffixes that select a compression codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionSuffixes {
    pub gzip: String,
    pub lz4: String,
}

impl Default for CompressionSuffixes {
    fn default() -> Self {
        CompressionSuffixes {
            gzip: ".gz".to_string(),
            lz4: ".lz4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionKind {
    Plain,
    Gzip,
    Lz4,
}

impl CompressionKind {
    /// Pick a codec from the file name suffix.
    pub fn detect<P: AsRef<Path>>(path: P, suffixes: &CompressionSuffixes) -> CompressionKind {
        let name = path.as_ref().to_string_lossy();
        if !suffixes.gzip.is_empty() && name.ends_with(suffixes.gzip.as_str()) {
            CompressionKind::Gzip
        } else if !suffixes.lz4.is_empty() && name.ends_with(suffixes.lz4.as_str()) {
            CompressionKind::Lz4
        } else {
            CompressionKind::Plain
        }
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| CellioError::filesystem("open", path, e))
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| CellioError::filesystem("create", path, e))
}

/// Open a file for reading, transparently decompressing gzip or LZ4 frames.
pub fn open_maybe_compressed<P: AsRef<Path>>(
    path: P,
    suffixes: &CompressionSuffixes,
) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = open_file(path)?;
    let kind = CompressionKind::detect(path, suffixes);
    debug!("Opening {} as {:?}", path.display(), kind);
    let reader: Box<dyn BufRead> = match kind {
        CompressionKind::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )),
        CompressionKind::Lz4 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            FrameDecoder::new(file),
        )),
        CompressionKind::Plain => Box::new(BufReader::new(file)),
    };
    Ok(reader)
}

/// Writer returned by [`create_maybe_compressed`].
///
/// Call [`MaybeCompressedWriter::finish`] once done; dropping a compressed
/// writer without it can leave a truncated stream.
pub enum MaybeCompressedWriter {
    Plain(BufWriter<File>),
    Gzip(BufWriter<GzEncoder<File>>),
    Lz4(BufWriter<FrameEncoder<File>>),
}

impl MaybeCompressedWriter {
    /// Flush buffered data and write the codec trailer.
    pub fn finish(self) -> Result<()> {
        match self {
            MaybeCompressedWriter::Plain(mut w) => w.flush()?,
            MaybeCompressedWriter::Gzip(w) => {
                let encoder = w.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?.sync_all()?;
            }
            MaybeCompressedWriter::Lz4(w) => {
                let encoder = w.into_inner().map_err(|e| e.into_error())?;
                let file = encoder
                    .finish()
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                file.sync_all()?;
            }
        }
        Ok(())
    }
}

impl Write for MaybeCompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            MaybeCompressedWriter::Plain(w) => w.write(buf),
            MaybeCompressedWriter::Gzip(w) => w.write(buf),
            MaybeCompressedWriter::Lz4(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            MaybeCompressedWriter::Plain(w) => w.flush(),
            MaybeCompressedWriter::Gzip(w) => w.flush(),
            MaybeCompressedWriter::Lz4(w) => w.flush(),
        }
    }
}

/// Create a file for writing, compressing by suffix.
pub fn create_maybe_compressed<P: AsRef<Path>>(
    path: P,
    suffixes: &CompressionSuffixes,
) -> Result<MaybeCompressedWriter> {
    let path = path.as_ref();
    let file = create_file(path)?;
    let kind = CompressionKind::detect(path, suffixes);
    debug!("Creating {} as {:?}", path.display(), kind);
    Ok(match kind {
        CompressionKind::Gzip => MaybeCompressedWriter::Gzip(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            GzEncoder::new(file, Compression::default()),
        )),
        CompressionKind::Lz4 => MaybeCompressedWriter::Lz4(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            FrameEncoder::new(file),
        )),
        CompressionKind::Plain => MaybeCompressedWriter::Plain(BufWriter::new(file)),
    })
}

/// Concatenate `in_paths` byte-for-byte into `out_path`.
pub fn concatenate_files<P, Q>(out_path: P, in_paths: &[Q]) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let out_path = out_path.as_ref();
    let mut out = BufWriter::new(create_file(out_path)?);
    for in_path in in_paths {
        let mut input = open_file(in_path.as_ref())?;
        io::copy(&mut input, &mut out)?;
    }
    out.flush()?;
    info!(
        "Concatenated {} files into {}",
        in_paths.len(),
        out_path.display()
    );
    Ok(())
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    Ok(header)
}

/// Concatenate files that each start with the same header line.
///
/// The header of the first input is written once; every later input must carry
/// an identical first line, which is skipped.
pub fn concatenate_headered_files<P, Q>(out_path: P, in_paths: &[Q]) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let out_path = out_path.as_ref();
    let mut out = BufWriter::new(create_file(out_path)?);

    if let Some((first, rest)) = in_paths.split_first() {
        let mut reader = BufReader::new(open_file(first.as_ref())?);
        let header = read_header(&mut reader)?;
        out.write_all(&header)?;
        io::copy(&mut reader, &mut out)?;

        for in_path in rest {
            let in_path = in_path.as_ref();
            let mut reader = BufReader::new(open_file(in_path)?);
            let this_header = read_header(&mut reader)?;
            if this_header != header {
                return Err(CellioError::HeaderMismatch {
                    path: in_path.to_path_buf(),
                    expected: String::from_utf8_lossy(&header).trim_end().to_string(),
                    found: String::from_utf8_lossy(&this_header).trim_end().to_string(),
                });
            }
            io::copy(&mut reader, &mut out)?;
        }
    }

    out.flush()?;
    info!(
        "Concatenated {} headered files into {}",
        in_paths.len(),
        out_path.display()
    );
    Ok(())
}

/// Read the first column of a comma-separated file with a header row.
pub fn load_csv_rownames<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(open_file(path)?);

    let mut rownames = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(0) {
            rownames.push(name.to_string());
        }
    }
    Ok(rownames)
}

/// Write an empty JSON object.
pub fn write_empty_json<P: AsRef<Path>>(path: P) -> Result<()> {
    let mut file = create_file(path.as_ref())?;
    file.write_all(b"{}")?;
    Ok(())
}

/// Read a whole (possibly compressed) file into memory.
pub fn read_to_end_maybe_compressed<P: AsRef<Path>>(
    path: P,
    suffixes: &CompressionSuffixes,
) -> Result<Vec<u8>> {
    let mut reader = open_maybe_compressed(path, suffixes)?;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}
