//! Stream transform engine: the chunked read/transform/write pipeline.
//!
//! # One call, one file
//! [`transform`] performs a whole-file transform. The input is opened and
//! sized first, and an empty input is rejected before the output file ever
//! exists; the data then streams through a single reusable [`CHUNK_SIZE`]
//! buffer into the newly created output. Memory use is bounded by that one
//! buffer regardless of file size.
//!
//! # Outcome contract
//! Every failure is detected where it happens and aborts the call with one
//! terminal [`TransformError`]; nothing is retried or resumed. Releasing
//! the input handle is best-effort (it closes on drop), but a failure to
//! flush the output durably after a clean copy is still a failure, since
//! the written bytes may not have reached the disk.
//!
//! # Key phase
//! The combine step runs per chunk with a chunk-local index, so the key
//! phase restarts at every [`CHUNK_SIZE`] boundary (see [`crate::cipher`]).
//! Encrypt and decrypt share the phase, which keeps round-trips exact and
//! output compatible with existing files.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::cipher::xor_in_place;
use crate::key::Key;
use crate::progress::ProgressFn;

/// Fixed streaming buffer capacity in bytes.
///
/// Not tunable: the key phase resets at chunk boundaries, so the chunk
/// size is part of the output format and must match between the pass that
/// wrote a file and the pass that reads it back.
pub const CHUNK_SIZE: usize = 4096;

// ── Requests and errors ──────────────────────────────────────────────────────

/// One transform invocation: where to read, where to write, which key.
///
/// The engine borrows all three for the duration of the call. Callers are
/// expected to have decided the paths are distinct files; the engine does
/// not second-guess them.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    pub input:  &'a Path,
    pub output: &'a Path,
    pub key:    &'a Key,
}

/// Terminal outcome of a failed [`transform`] call.
///
/// Each variant names the stage that failed and carries the path it
/// failed on plus the underlying I/O error where one exists.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot open input file {}: {}", .path.display(), .source)]
    CannotOpenInput { path: PathBuf, source: io::Error },

    #[error("cannot determine size of {}: {}", .path.display(), .source)]
    CannotDetermineSize { path: PathBuf, source: io::Error },

    #[error("input file {} is empty", .path.display())]
    EmptyInput { path: PathBuf },

    #[error("cannot create output file {}: {}", .path.display(), .source)]
    CannotOpenOutput { path: PathBuf, source: io::Error },

    #[error("read from {} failed: {}", .path.display(), .source)]
    ReadFailed { path: PathBuf, source: io::Error },

    #[error("write to {} failed: {}", .path.display(), .source)]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("closing output file {} failed: {}", .path.display(), .source)]
    OutputCloseFailed { path: PathBuf, source: io::Error },
}

/// Failure inside the generic chunk loop, before path context is attached.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(io::Error),
    #[error("write failed: {0}")]
    Write(io::Error),
}

// ── Sizing ───────────────────────────────────────────────────────────────────

/// Total stream length via seek-to-end, then rewind to the start.
///
/// The length comes from the stream itself rather than filesystem
/// metadata, so the engine sizes exactly what it is about to read.
fn stream_len<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(len)
}

// ── Streaming core ───────────────────────────────────────────────────────────

/// The chunk loop shared by [`transform`], generic over any byte source
/// and sink.
///
/// Fills one reusable [`CHUNK_SIZE`] buffer per iteration, reading again
/// after a short read so that only the stream's final chunk can be short,
/// and XORs each chunk in place with the key phase restarting per chunk.
/// Every chunk is written out in full, followed by a `(processed, total)`
/// report. Returns the number of bytes processed. Errors are reported,
/// never retried.
pub fn transform_stream<R: Read, W: Write>(
    reader:       &mut R,
    writer:       &mut W,
    key:          &Key,
    total:        u64,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> Result<u64, StreamError> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut processed = 0u64;

    loop {
        // Fill the chunk completely before combining; the key phase must
        // stay on the CHUNK_SIZE grid even when the source returns short
        // reads. Only the stream's final chunk may be short.
        let mut filled = 0;
        while filled < CHUNK_SIZE {
            match reader.read(&mut buf[filled..]) {
                Ok(0)  => break,
                Ok(n)  => filled += n,
                Err(e) => return Err(StreamError::Read(e)),
            }
        }
        if filled == 0 {
            break;
        }

        let chunk = &mut buf[..filled];
        xor_in_place(chunk, key.as_bytes());
        writer.write_all(chunk).map_err(StreamError::Write)?;

        processed += filled as u64;
        if let Some(cb) = progress.as_mut() {
            cb(processed, total);
        }
    }

    Ok(processed)
}

// ── Path-based engine ────────────────────────────────────────────────────────

/// Transform `request.input` into `request.output` in one call.
///
/// Encrypt and decrypt are the same operation: the XOR combine is
/// self-inverse, so both directions run this identical function. Returns
/// the number of bytes processed on success.
///
/// The output file is created only after the input has been opened and
/// sized, and an empty input is rejected before that point, so a failing
/// call never leaves a zero-byte output behind. A partially written
/// output from a mid-stream failure is left in place for the caller to
/// inspect or remove.
pub fn transform(
    request:  TransformRequest<'_>,
    progress: Option<&mut ProgressFn<'_>>,
) -> Result<u64, TransformError> {
    let mut input = File::open(request.input).map_err(|source| TransformError::CannotOpenInput {
        path: request.input.to_owned(),
        source,
    })?;

    let total = stream_len(&mut input).map_err(|source| TransformError::CannotDetermineSize {
        path: request.input.to_owned(),
        source,
    })?;

    if total == 0 {
        return Err(TransformError::EmptyInput { path: request.input.to_owned() });
    }

    debug!(
        "transforming {} ({} bytes) -> {} with a {}-byte key",
        request.input.display(),
        total,
        request.output.display(),
        request.key.len()
    );

    let mut output = File::create(request.output).map_err(|source| {
        TransformError::CannotOpenOutput { path: request.output.to_owned(), source }
    })?;

    let processed = transform_stream(&mut input, &mut output, request.key, total, progress)
        .map_err(|e| match e {
            StreamError::Read(source) => TransformError::ReadFailed {
                path: request.input.to_owned(),
                source,
            },
            StreamError::Write(source) => TransformError::WriteFailed {
                path: request.output.to_owned(),
                source,
            },
        })?;

    if processed != total {
        warn!(
            "{} changed length mid-transform: sized {} bytes, processed {}",
            request.input.display(),
            total,
            processed
        );
    }

    // The input handle closes on drop; nothing depends on it anymore.
    // The output is different: its bytes must reach the disk, and a
    // failure here overrides the otherwise clean run.
    output.sync_all().map_err(|source| TransformError::OutputCloseFailed {
        path: request.output.to_owned(),
        source,
    })?;

    debug!("transform complete: {} bytes", processed);
    Ok(processed)
}
