//! FASTA file reading and writing.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use noodles::bgzf;
use noodles::fasta;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::num::NonZero;
use std::path::{Path, PathBuf};

/// Default number of sequence symbols per output line.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Streaming reader for FASTA files
pub struct FastaReader {
    reader: fasta::io::Reader<Box<dyn BufRead>>,
    path: PathBuf,
}

impl FastaReader {
    /// Open a FASTA file and return a streaming iterator over records
    ///
    /// Gzip and BGZF inputs are detected from their magic bytes and decompressed on the fly.
    ///
    /// # Example
    /// ```no_run
    /// use fasta_extract::io::FastaReader;
    /// use std::path::Path;
    ///
    /// let reader = FastaReader::from_path(Path::new("transcripts.fa.gz"))?;
    /// for record in reader {
    ///     let record = record?;
    ///     println!("{}: {} bp", String::from_utf8_lossy(record.name()), record.sequence().len());
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open FASTA file: {}", path.display()))?;

        let mut buffered = BufReader::new(file);
        let is_compressed = is_gzip_compressed(&mut buffered)
            .with_context(|| format!("Failed to read FASTA file: {}", path.display()))?;

        let reader: Box<dyn BufRead> = if is_compressed {
            Box::new(BufReader::new(MultiGzDecoder::new(buffered)))
        } else {
            Box::new(buffered)
        };

        Ok(Self {
            reader: fasta::io::Reader::new(reader),
            path: path.to_path_buf(),
        })
    }

    /// Reads the next record, or `None` at end of input.
    ///
    /// Whitespace inside sequence lines is dropped so that the sequence length
    /// counts symbols only.
    fn read_record(&mut self) -> std::io::Result<Option<fasta::Record>> {
        let mut line = String::new();
        if self.reader.read_definition(&mut line)? == 0 {
            return Ok(None);
        }
        let definition = parse_definition(&line)?;

        let mut sequence = Vec::new();
        self.reader.read_sequence(&mut sequence)?;
        sequence.retain(|b| !b.is_ascii_whitespace());

        Ok(Some(fasta::Record::new(
            definition,
            fasta::record::Sequence::from(sequence),
        )))
    }
}

impl Iterator for FastaReader {
    type Item = Result<fasta::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.read_record();
        let path = &self.path;
        result
            .with_context(|| format!("Failed to parse FASTA record in {}", path.display()))
            .transpose()
    }
}

/// Parses a `>` header line.
///
/// A header with nothing after `>` yields a record with an empty name, and
/// whitespace right after `>` is skipped before the name.
fn parse_definition(line: &str) -> std::io::Result<fasta::record::Definition> {
    let Some(body) = line.strip_prefix('>') else {
        return line.parse::<fasta::record::Definition>().map_err(invalid_data);
    };

    let body = body.trim_start();
    if body.trim_end().is_empty() {
        return Ok(fasta::record::Definition::new("", None));
    }

    format!(">{}", body)
        .parse::<fasta::record::Definition>()
        .map_err(invalid_data)
}

fn invalid_data<E>(e: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}

enum FastaWriterInner {
    Uncompressed(fasta::io::Writer<BufWriter<File>>),
    Compressed(fasta::io::Writer<bgzf::io::MultithreadedWriter<File>>),
}

impl FastaWriterInner {
    fn write_record(&mut self, record: &fasta::Record) -> std::io::Result<()> {
        match self {
            FastaWriterInner::Uncompressed(w) => w.write_record(record),
            FastaWriterInner::Compressed(w) => w.write_record(record),
        }
    }

    fn finish(self) -> Result<()> {
        match self {
            FastaWriterInner::Uncompressed(w) => w
                .into_inner()
                .flush()
                .context("Failed to flush uncompressed writer"),
            FastaWriterInner::Compressed(w) => {
                // Shuts the worker pool down and writes the BGZF EOF block
                w.into_inner()
                    .finish()
                    .map(|_| ())
                    .map_err(|e| anyhow::anyhow!("Failed to finish BGZF writer: {}", e))
            }
        }
    }
}

/// Writer for FASTA files supporting both uncompressed and BGZF-compressed output.
///
/// Compression is chosen from the file extension (`.gz`, `.bgz` or `.bgzf`).
/// Sequences are wrapped at `line_width` symbols per line.
///
/// Dropping the writer without calling [`FastaWriter::finish`] may lose buffered
/// data and, for compressed output, leaves the file without its EOF block.
///
/// # Example
/// ```no_run
/// use fasta_extract::io::FastaWriter;
/// use noodles::fasta;
/// use std::path::Path;
///
/// let mut writer = FastaWriter::new(Path::new("selected.fa"), 60, 0)?;
/// let record = fasta::Record::new(
///     fasta::record::Definition::new("G1.2", None),
///     fasta::record::Sequence::from(b"ACGTAC".to_vec()),
/// );
/// writer.write_record(&record)?;
/// writer.finish()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct FastaWriter {
    writer: FastaWriterInner,
}

impl FastaWriter {
    /// Creates (or truncates) the output file at `path`.
    ///
    /// # Arguments
    /// * `path` - Path to the output FASTA file
    /// * `line_width` - Sequence symbols per line
    /// * `compression_threads` - Number of BGZF compression threads (0 = auto-detect)
    pub fn new(path: &Path, line_width: usize, compression_threads: usize) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create FASTA file: {}", path.display()))?;

        let builder = fasta::io::writer::Builder::default().set_line_base_count(line_width);

        let writer = if should_compress(path) {
            let worker_count = if compression_threads == 0 {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            } else {
                compression_threads
            };
            let worker_count = NonZero::new(worker_count).unwrap_or(NonZero::<usize>::MIN);

            let bgzf_writer = bgzf::io::MultithreadedWriter::with_worker_count(worker_count, file);

            FastaWriterInner::Compressed(builder.build_from_writer(bgzf_writer))
        } else {
            FastaWriterInner::Uncompressed(builder.build_from_writer(BufWriter::new(file)))
        };

        Ok(Self { writer })
    }

    /// Writes a single FASTA record.
    pub fn write_record(&mut self, record: &fasta::Record) -> Result<()> {
        self.writer
            .write_record(record)
            .context("Failed to write FASTA record")
    }

    /// Writes records in the order given, returning how many were written.
    pub fn write_records<'a, I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a fasta::Record>,
    {
        let mut written = 0;
        for record in records {
            self.write_record(record)?;
            written += 1;
        }
        Ok(written)
    }

    /// Flushes buffered output and, for compressed files, writes the final BGZF EOF block.
    pub fn finish(self) -> Result<()> {
        self.writer.finish()
    }
}

fn is_gzip_compressed<R: std::io::Read>(reader: &mut BufReader<R>) -> std::io::Result<bool> {
    let buffer = reader.fill_buf()?;

    // gzip magic bytes
    Ok(buffer.len() >= 2 && buffer[0] == 0x1f && buffer[1] == 0x8b)
}

fn should_compress(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["gz", "bgz", "bgzf"]
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}
