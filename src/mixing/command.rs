//! External command output as a supplementary seed source.
//!
//! Mixing raw command output into the pool directly would be slow and
//! would discourage feeding it lots of data, so the output is streamed
//! through a cryptographic hash and only the fixed-size digest is
//! mixed. The contribution is deliberately uncounted: command output is
//! of unknown quality and earns no estimator credit.

use crate::pool::RandomPool;
use blake3::Hasher as Blake3Hasher;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::process::{ChildStdout, Command, Stdio};
use thiserror::Error;

/// Digest used to condense command output before mixing.
#[derive(Debug, Clone, Copy, Default)]
pub enum DigestAlgorithm {
    /// BLAKE3 - fast, secure, recommended default.
    #[default]
    Blake3,
    /// SHA-256 - widely deployed, conservative choice.
    Sha256,
}

/// Errors from command-sourced mixing.
#[derive(Debug, Error)]
pub enum MixError {
    /// The command could not be launched at all.
    #[error("failed to launch seed command: {0}")]
    Launch(#[source] std::io::Error),
}

/// Runs `command` under `/bin/sh -c`, hashes its standard output and
/// mixes the 32-byte digest into the pool.
///
/// Launch failure is the only error, and it leaves the pool untouched.
/// Read failures and a nonzero exit status are not errors: whatever
/// output was seen is still hashed and mixed, since partial output is
/// still worth having.
pub fn mix_from_command<P: RandomPool>(
    pool: &mut P,
    command: &str,
    algorithm: DigestAlgorithm,
) -> Result<(), MixError> {
    let mut child = Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(MixError::Launch)?;

    let stdout = child.stdout.take();
    let (digest, bytes_hashed): ([u8; 32], usize) = match algorithm {
        DigestAlgorithm::Blake3 => {
            let mut hasher = Blake3Hasher::new();
            let n = hash_stream(stdout, |chunk| {
                hasher.update(chunk);
            });
            (*hasher.finalize().as_bytes(), n)
        }
        DigestAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            let n = hash_stream(stdout, |chunk| {
                hasher.update(chunk);
            });
            let mut digest = [0u8; 32];
            digest.copy_from_slice(&hasher.finalize());
            (digest, n)
        }
    };
    let _ = child.wait();

    pool.add_bytes(&digest);
    tracing::info!(bytes_hashed, "seed command output mixed into pool (uncounted)");
    Ok(())
}

/// Feeds the stream to `update` in small chunks, stopping quietly on
/// read errors. Returns the number of bytes hashed.
fn hash_stream(stdout: Option<ChildStdout>, mut update: impl FnMut(&[u8])) -> usize {
    let Some(mut stdout) = stdout else { return 0 };

    let mut buf = [0u8; 256];
    let mut total = 0;
    loop {
        match stdout.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                update(&buf[..n]);
                total += n;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            // Partial output is still mixed.
            Err(_) => break,
        }
    }
    total
}
