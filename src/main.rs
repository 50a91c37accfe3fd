use clap::Parser;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use khmer_rs::dictionary::Dictionary;
use khmer_rs::segmenter::KhmerSegmenter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to dictionary file
    #[arg(long, default_value = "../data/khmer_dictionary_words.txt")]
    dict: String,

    /// Path to frequency file
    #[arg(long, default_value = "../data/khmer_word_frequencies.json")]
    freq: String,

    /// Input text file
    #[arg(short, long)]
    input: String,

    /// Output file (JSONL) - optional, skip to benchmark only
    #[arg(short, long)]
    output: Option<String>,

    /// Limit number of lines to process
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of worker threads for the batch pass (defaults to rayon's
    /// global pool size)
    #[arg(short, long)]
    threads: Option<usize>,
}

// 1BRC-style fast JSON builder with thread-local buffers: avoids
// serde_json's per-record allocation on the output hot path. Input parsing
// still goes through serde_json (frequency file), which is not hot.

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

thread_local! {
    static JSON_BUFFER: RefCell<String> = RefCell::new(String::with_capacity(1024));
}

#[inline]
fn escape_json_to(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let code = c as u8;
                out.push_str("\\u00");
                out.push(HEX_DIGITS[(code >> 4) as usize] as char);
                out.push(HEX_DIGITS[(code & 0xF) as usize] as char);
            }
            c => out.push(c),
        }
    }
}

#[inline]
fn append_int(out: &mut String, val: usize) {
    if val == 0 {
        out.push('0');
        return;
    }
    let mut buf = [0u8; 20];
    let mut i = 20;
    let mut v = val;
    while v > 0 {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
    }
    for j in i..20 {
        out.push(buf[j] as char);
    }
}

#[inline]
fn build_json_record(id: usize, input: &str, segments: &[String]) -> String {
    JSON_BUFFER.with(|buf| {
        let mut buffer = buf.borrow_mut();
        buffer.clear();

        buffer.push_str("{\"id\":");
        append_int(&mut buffer, id);
        buffer.push_str(",\"input\":\"");
        escape_json_to(&mut buffer, input);
        buffer.push_str("\",\"segments\":[");

        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                buffer.push(',');
            }
            buffer.push('"');
            escape_json_to(&mut buffer, seg);
            buffer.push('"');
        }

        buffer.push_str("]}");
        buffer.clone()
    })
}

fn run(args: &Args) -> anyhow::Result<()> {
    tracing::info!(dict = %args.dict, freq = %args.freq, "initializing segmenter");

    let start_load = Instant::now();
    let dictionary = Dictionary::new(Path::new(&args.dict), Path::new(&args.freq))?;
    let segmenter = KhmerSegmenter::new(dictionary);
    tracing::info!(elapsed_s = start_load.elapsed().as_secs_f32(), "model loaded");

    tracing::info!(path = %args.input, "reading source");
    let file = File::open(&args.input)?;
    let reader = BufReader::new(file);
    let mut lines: Vec<String> = reader
        .lines()
        .collect::<Result<Vec<String>, _>>()?
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(limit) = args.limit {
        if limit < lines.len() {
            lines.truncate(limit);
        }
    }

    tracing::info!(lines = lines.len(), "processing");
    let start_process = Instant::now();

    let process = || -> Vec<String> {
        lines
            .par_iter()
            .enumerate()
            .map(|(i, line)| {
                let segments = segmenter.segment(line);
                build_json_record(i, line, &segments)
            })
            .collect()
    };

    let results: Vec<String> = if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(process)
    } else {
        process()
    };

    if let Some(ref output_path) = args.output {
        let output_file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(262144, output_file);
        for result in &results {
            writeln!(writer, "{}", result)?;
        }
        writer.flush()?;
        tracing::info!(path = %output_path, "wrote output");
    }

    let duration = start_process.elapsed();
    tracing::info!(
        elapsed_s = duration.as_secs_f32(),
        lines_per_sec = lines.len() as f32 / duration.as_secs_f32(),
        "done"
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(&args)
}
