mod rsa;

pub use crate::rsa::*;

use std::error::Error;
use std::fs;
use std::fs::File;
use std::io;
use std::io::{Read, Write};
use std::str::FromStr;
use clap::{Parser, Subcommand};
use num_bigint::BigInt;

#[derive(Debug, Parser)]
#[command(about = "Textbook RSA keygen / encrypt / decrypt over fixed-size blocks (unpadded, insecure by design)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long, global = true, help = "Disable log output")]
    pub silent: bool,
    #[arg(short, long, global = true, default_value_t = num_cpus::get(), help = "Process blocks in <THREADS> threads")]
    pub threads: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Derive a key pair from two prime factors")]
    Keygen {
        #[arg(value_parser = parse_bigint, help = "First prime factor, decimal")]
        p: BigInt,
        #[arg(value_parser = parse_bigint, help = "Second prime factor, decimal")]
        q: BigInt,
        #[arg(short, long, default_value = "key", help = "Key path, writes `path' and `path.pub'")]
        key: String,
    },
    #[command(about = "Encrypt a file with an exponent/modulus key file")]
    Encrypt {
        #[arg(short, long, help = "Key file path")]
        key: String,
        #[arg(short, long, default_value = "stdin", help = "Input filename")]
        input: String,
        #[arg(short, long, default_value = "stdout", help = "Output filename")]
        output: String,
    },
    #[command(about = "Decrypt a file with an exponent/modulus key file")]
    Decrypt {
        #[arg(short, long, help = "Key file path")]
        key: String,
        #[arg(short, long, default_value = "stdin", help = "Input filename")]
        input: String,
        #[arg(short, long, default_value = "stdout", help = "Output filename")]
        output: String,
    },
}

fn parse_bigint(value: &str) -> Result<BigInt, String> {
    BigInt::from_str(value).map_err(|e| format!("{}: {:?}", e, value))
}

fn reader(path: &str) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        "stdin" => Box::new(io::stdin()),
        f => Box::new(File::open(f)?),
    })
}

fn writer(path: &str) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        "stdout" => Box::new(io::stdout()),
        f => Box::new(File::create(f)?),
    })
}

impl Cli {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let (mode, key_path, input, output) = match &self.command {
            Command::Keygen { p, q, key } => {
                let (public, private) = rsa::keygen(p, q);
                fs::write(format!("{}.pub", key), public)?;
                fs::write(key, private)?;
                if !self.silent {
                    println!("Generated key files: {}, {}.pub", key, key);
                    println!("done");
                }
                return Ok(());
            }
            Command::Encrypt { key, input, output } => (CipherMode::Encrypt, key, input, output),
            Command::Decrypt { key, input, output } => (CipherMode::Decrypt, key, input, output),
        };
        // Writing blocks to stdout would interleave with log lines.
        let silent = self.silent || output == "stdout";
        let key = keys::codec::decode(&fs::read(key_path)?)?;
        let mut reader = reader(input)?;
        let mut writer = writer(output)?;
        rsa::process(&mut reader, &mut writer, mode, key, self.threads, silent)?;
        if !silent {
            println!("done");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    cli.run()
}
