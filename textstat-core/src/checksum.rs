//! Content checksums used as cache keys

use crate::strategy::read_block;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BLOCK_SIZE: usize = 64 * 1024;

/// Lower-case hex SHA-256 digest of everything `reader` yields
pub fn reader_checksum(reader: &mut dyn Read) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BLOCK_SIZE];
    loop {
        let n = read_block(reader, &mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checksum of a file's full byte content
pub fn file_checksum(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    reader_checksum(&mut file)
}
