//! huffzip CLI
//!
//! ```bash
//! # writes notes_encoded.huf
//! huffzip compress notes.txt
//!
//! # writes notes_decoded.txt
//! huffzip decompress notes_encoded.huf
//!
//! # print frequency and encoding tables while compressing
//! huffzip --log-level debug compress notes.txt -o notes.huf --report
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tempfile::NamedTempFile;
use tracing::info;
use tracing_subscriber::EnvFilter;

use huffzip::{HuffmanCodec, NoReport, Reporter, TextReport};

const ENCODED_SUFFIX: &str = "_encoded.huf";
const DECODED_SUFFIX: &str = "_decoded.txt";

#[derive(Parser, Debug)]
#[command(name = "huffzip")]
#[command(version)]
#[command(about = "Huffman file compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        input: PathBuf,

        /// Output path [default: <input without extension>_encoded.huf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the frequency table, code table and tree
        #[arg(long)]
        report: bool,
    },
    /// Decompress a file written by `compress`
    Decompress {
        input: PathBuf,

        /// Output path [default: <input before _encoded.huf>_decoded.txt]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn encoded_path(input: &Path) -> PathBuf {
    let stem = input.with_extension("");
    let mut name = stem.into_os_string();
    name.push(ENCODED_SUFFIX);
    PathBuf::from(name)
}

fn decoded_path(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default();
    let decoded = match name.to_str() {
        Some(name) => {
            let base = match name.find(ENCODED_SUFFIX) {
                Some(idx) => &name[..idx],
                None => name,
            };
            OsString::from(format!("{}{}", base, DECODED_SUFFIX))
        }
        // non-UTF-8 names keep every byte; the suffix is appended
        None => {
            let mut name = name.to_os_string();
            name.push(DECODED_SUFFIX);
            name
        }
    };
    input.with_file_name(decoded)
}

fn ensure_distinct(input: &Path, output: &Path) -> anyhow::Result<()> {
    if let (Ok(a), Ok(b)) = (input.canonicalize(), output.canonicalize()) {
        if a == b {
            bail!("refusing to overwrite input {} with its own output", input.display());
        }
    }
    Ok(())
}

/// Runs `fill` against a temporary file next to `output` and moves it into
/// place only on success. An existing `output` survives any failure.
fn write_atomically<T>(
    output: &Path,
    fill: impl FnOnce(&mut File) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    let value = fill(tmp.as_file_mut())?;
    tmp.persist(output)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(value)
}

fn compress(input: &Path, output: Option<PathBuf>, report: bool) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| encoded_path(input));
    ensure_distinct(input, &output)?;
    let source = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;

    let mut text_report;
    let mut silent = NoReport;
    let reporter: &mut dyn Reporter = if report {
        text_report = TextReport::new(io::stdout().lock());
        &mut text_report
    } else {
        &mut silent
    };

    let stats = write_atomically(&output, |sink| {
        HuffmanCodec::encode_from_file_with_report(
            BufReader::new(source),
            BufWriter::new(sink),
            reporter,
        )
        .with_context(|| format!("failed to compress {}", input.display()))
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        header_bits = stats.header_bits,
        payload_bits = stats.payload_bits,
        "compressed"
    );
    println!("Size of the original file is {} bytes", stats.original_length);
    println!("Size of the encoded file is {} bytes", stats.compressed_length());
    println!("Compression ratio is {:.3}:1", stats.ratio());
    println!("Compression percentage is {:.2}%", stats.savings_percent());
    Ok(())
}

fn decompress(input: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| decoded_path(input));
    ensure_distinct(input, &output)?;
    let compressed =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    // decode fully in memory before touching the output
    let decoded = HuffmanCodec::decompress(&compressed)
        .with_context(|| format!("failed to decompress {}", input.display()))?;

    write_atomically(&output, |sink| {
        sink.write_all(&decoded)?;
        sink.flush()?;
        Ok(())
    })?;

    info!(input = %input.display(), output = %output.display(), written = decoded.len(), "decompressed");
    println!("Wrote {} bytes to {}", decoded.len(), output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    match args.command {
        Command::Compress {
            input,
            output,
            report,
        } => compress(&input, output, report),
        Command::Decompress { input, output } => decompress(&input, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn encoded_path_replaces_extension() {
        assert_eq!(
            encoded_path(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes_encoded.huf")
        );
        assert_eq!(encoded_path(Path::new("notes")), PathBuf::from("notes_encoded.huf"));
    }

    #[test]
    fn decoded_path_strips_suffix() {
        assert_eq!(
            decoded_path(Path::new("dir/notes_encoded.huf")),
            PathBuf::from("dir/notes_decoded.txt")
        );
        assert_eq!(
            decoded_path(Path::new("archive.bin")),
            PathBuf::from("archive.bin_decoded.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn decoded_path_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new("dir").join(OsStr::from_bytes(b"n\xffx_encoded.huf"));
        let decoded = decoded_path(&input);
        assert_eq!(
            decoded.file_name().unwrap().as_bytes(),
            b"n\xffx_encoded.huf_decoded.txt"
        );
        assert_eq!(decoded.parent(), Some(Path::new("dir")));
    }

    #[test]
    fn failed_decompress_keeps_existing_output() {
        let dir = tempdir().expect("tempdir err");
        let input = dir.path().join("notes_encoded.huf");
        let output = dir.path().join("notes_decoded.txt");
        fs::write(&input, [0u8, 0u8]).expect("write err");
        fs::write(&output, "precious existing content").expect("write err");

        assert!(decompress(&input, None).is_err());
        assert_eq!(
            fs::read_to_string(&output).expect("read err"),
            "precious existing content"
        );
        assert_eq!(fs::read_dir(dir.path()).expect("read_dir err").count(), 2);
    }

    #[test]
    fn compress_refuses_to_overwrite_its_input() {
        let dir = tempdir().expect("tempdir err");
        let input = dir.path().join("notes.txt");
        fs::write(&input, "hello hello").expect("write err");

        assert!(compress(&input, Some(input.clone()), false).is_err());
        assert_eq!(fs::read_to_string(&input).expect("read err"), "hello hello");
    }

    #[test]
    fn compress_of_missing_input_writes_nothing() {
        let dir = tempdir().expect("tempdir err");
        let input = dir.path().join("missing.txt");

        assert!(compress(&input, None, false).is_err());
        assert!(!encoded_path(&input).exists());
        assert_eq!(fs::read_dir(dir.path()).expect("read_dir err").count(), 0);
    }

    #[test]
    fn commands_roundtrip_through_files() {
        let dir = tempdir().expect("tempdir err");
        let input = dir.path().join("notes.txt");
        fs::write(&input, "a man, a plan, a canal: panama").expect("write err");

        compress(&input, None, false).expect("compress err");
        let encoded = dir.path().join("notes_encoded.huf");
        decompress(&encoded, None).expect("decompress err");
        assert_eq!(
            fs::read_to_string(dir.path().join("notes_decoded.txt")).expect("read err"),
            "a man, a plan, a canal: panama"
        );
    }

    #[test]
    fn cli_parses_subcommands() {
        let args = Args::parse_from(["huffzip", "compress", "a.txt", "--report"]);
        match args.command {
            Command::Compress { input, output, report } => {
                assert_eq!(input, PathBuf::from("a.txt"));
                assert!(output.is_none());
                assert!(report);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.log_level, "warn");
    }
}
