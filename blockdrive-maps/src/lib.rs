#![allow(clippy::too_many_lines, reason = "we have enormous struct literals")]

use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;
use std::{fmt, fs, io};

use anyhow::{Context, Result};

pub mod common_types;

pub mod city;


pub fn builtins()
-> impl Iterator<Item = (impl AsRef<str> + Into<String> + fmt::Display, store::File)> {
    [("city", city::file())].into_iter()
}

pub fn build_assets(maps_dir: &Path) -> Result<()> {
    if let Err(err) = fs::create_dir_all(maps_dir)
        && err.kind() != io::ErrorKind::AlreadyExists
    {
        return Err(err).context("mkdir maps");
    }

    for (name, data) in builtins() {
        let file = fs::File::create(maps_dir.join(format!("{name}.bdmap")))
            .with_context(|| format!("create {name}.bdmap"))?;
        store::encode(&data, BufWriter::new(file))
            .with_context(|| format!("write {name}.bdmap"))?;
    }

    Ok(())
}

pub fn json_schema(output: &Path, gzip: bool) -> Result<()> {
    let schema = schemars::schema_for!(store::File);
    let mut file = BufWriter::new(fs::File::create(output).context("create output")?);
    if gzip {
        let mut encoder = flate2::write::GzEncoder::new(&mut file, flate2::Compression::best());
        serde_json::to_writer(&mut encoder, &schema).context("write schema")?;
        encoder.finish().context("finish gzip stream")?;
    } else {
        serde_json::to_writer(&mut file, &schema).context("write schema")?;
    }
    file.flush().context("flush output")?;
    Ok(())
}

pub fn from_json(input: &Path, output: &Path) -> Result<()> {
    let file: store::File =
        serde_json::from_reader(BufReader::new(fs::File::open(input).context("open input")?))
            .context("parse json")?;
    store::encode(&file, BufWriter::new(fs::File::create(output).context("create output")?))
        .context("write bdmap")?;
    Ok(())
}

pub fn to_json(input: &Path, output: &Path) -> Result<()> {
    let file = store::decode(BufReader::new(fs::File::open(input).context("open input")?))
        .context("parse bdmap")?;
    serde_json::to_writer_pretty(
        BufWriter::new(fs::File::create(output).context("create output")?),
        &file,
    )
    .context("write json")?;
    Ok(())
}
