use std::io;
use std::io::{Cursor, Read, Write};
use std::thread;
use crossbeam_channel::bounded;
use indicatif::{ProgressBar, ProgressStyle};
use num::Integer;
use num_bigint::{BigInt, RandBigInt, Sign, ToBigInt};
use num_traits::One;

pub mod keys;
pub mod math;

use keys::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

/// Derives a key set from two factors treated as primes (not validated).
///
/// The public exponent is rejection-sampled from a CSPRNG, one byte
/// shorter than the totient, until it is coprime to it. The factors must
/// be large enough that the totient spans at least two bytes; below that
/// the sampling loop cannot terminate.
pub fn generate_key(p: &BigInt, q: &BigInt) -> KeySet {
    let n = p * q;
    let f = math::euler(p, q);
    let bits = 8 * (math::byte_length(&f) as u64 - 1);
    let one = BigInt::one();
    let mut rng = rand::thread_rng();
    let e = loop {
        let e = rng.gen_biguint(bits).to_bigint().unwrap();
        if e > one && e < f && f.gcd(&e).is_one() {
            break e;
        }
    };
    let d = math::mod_inverse(&e, &f);
    KeySet {
        public: Key { exponent: e, modulus: n.clone() },
        private: Key { exponent: d, modulus: n },
    }
}

fn read_block(reader: &mut dyn Read, limit: usize) -> io::Result<Vec<u8>> {
    let mut byte = [0u8; 1];
    let mut block = Vec::with_capacity(limit);
    while block.len() < limit {
        match reader.read(&mut byte)? {
            0 => break,
            _ => block.push(byte[0]),
        }
    }
    Ok(block)
}

/// Runs the block loop: read, modular-exponentiate, write, in input order.
///
/// Encrypting reads blocks one byte narrower than the modulus and pads
/// every output block to the full modulus width; decrypting reads
/// full-width blocks and writes minimal encodings. Because the decrypted
/// encoding is minimal, any plaintext block whose most significant
/// (last, little-endian) byte is zero comes back shorter than it went
/// in. A short final read is processed as a complete block. So only
/// inputs that are a whole number of blocks, each with a non-zero top
/// byte, are guaranteed to round-trip.
pub fn process(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    mode: CipherMode,
    key: Key,
    threads: usize,
    silent: bool,
) -> io::Result<()> {
    // bounded(0) is a rendezvous channel; with no workers the first
    // send would block forever
    let threads = threads.max(1);
    let width = math::byte_length(&key.modulus);
    let (source_len, padded_len) = match mode {
        CipherMode::Encrypt => (width - 1, Some(width)),
        CipherMode::Decrypt => (width, None),
    };
    let mut source_data: Vec<Vec<u8>> = Vec::new();
    loop {
        let block = read_block(reader, source_len)?;
        if block.is_empty() {
            break;
        }
        source_data.push(block);
    }
    if !silent {
        println!("block size {} => {}, {} blocks", source_len, width, source_data.len());
    }
    let (map_tx, map_rx) = bounded::<(usize, Vec<u8>)>(threads);
    let (reduce_tx, reduce_rx) = bounded::<(usize, Vec<u8>)>(threads);
    let handles = (0..threads)
        .map(|_| {
            let r = map_rx.clone();
            let s = reduce_tx.clone();
            let key = key.clone();
            thread::spawn(move || {
                while let Ok((index, block)) = r.recv() {
                    let value = BigInt::from_bytes_le(Sign::Plus, &block);
                    let result = math::mod_pow(&value, &key.exponent, &key.modulus);
                    let mut out = result.to_bytes_le().1;
                    if let Some(len) = padded_len {
                        out.resize(len, 0);
                    }
                    s.send((index, out)).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();
    let pb = match silent {
        true => None,
        false => Some(ProgressBar::new(source_data.len() as u64)),
    };
    if let Some(pb) = &pb {
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})").unwrap()
            .progress_chars("#>-"));
    }
    let mut res_collect = Vec::new();
    for (i, block) in source_data.iter().enumerate() {
        if let Ok(r) = reduce_rx.try_recv() {
            res_collect.push(r);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        map_tx.send((i, block.clone())).unwrap();
    }
    drop(map_tx);
    while res_collect.len() < source_data.len() {
        res_collect.push(reduce_rx.recv().unwrap());
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    for handle in handles {
        handle.join().unwrap();
    }
    if let Some(pb) = &pb {
        pb.finish_with_message("Done");
    }
    res_collect.sort_by_key(|r| r.0);
    for (i, (index, block)) in res_collect.iter().enumerate() {
        debug_assert_eq!(i, *index);
        writer.write_all(block)?;
    }
    writer.flush()
}

/// Derives a key pair and returns `(public, private)` in transport form.
pub fn keygen(p: &BigInt, q: &BigInt) -> (Vec<u8>, Vec<u8>) {
    let keys = generate_key(p, q);
    (codec::encode(&keys.public), codec::encode(&keys.private))
}

pub fn encrypt(exponent: &BigInt, modulus: &BigInt, input: &[u8]) -> io::Result<Vec<u8>> {
    run_blocks(CipherMode::Encrypt, exponent, modulus, input)
}

pub fn decrypt(exponent: &BigInt, modulus: &BigInt, input: &[u8]) -> io::Result<Vec<u8>> {
    run_blocks(CipherMode::Decrypt, exponent, modulus, input)
}

fn run_blocks(
    mode: CipherMode,
    exponent: &BigInt,
    modulus: &BigInt,
    input: &[u8],
) -> io::Result<Vec<u8>> {
    let key = Key {
        exponent: exponent.clone(),
        modulus: modulus.clone(),
    };
    let mut reader = Cursor::new(input);
    let mut output = Vec::new();
    process(&mut reader, &mut output, mode, key, 1, true)?;
    Ok(output)
}
