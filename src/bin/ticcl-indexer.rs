extern crate clap;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::exit;
use std::time::SystemTime;

use clap::{App, Arg};

use ticcl_anahash::*;

fn resolve_threads(value: &str) -> usize {
    if value == "max" {
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(2).max(1))
            .unwrap_or(1)
    } else {
        value.parse().unwrap_or_else(|_| {
            eprintln!("ERROR: --threads should be an integer or 'max', got '{}'", value);
            exit(1);
        })
    }
}

/// Derives the default index output path: the hash file's name with its
/// last extension stripped, plus `.indexNT`.
fn derive_index_output(hash_file: &str) -> String {
    let stem = match hash_file.rfind('.') {
        Some(pos) => &hash_file[..pos],
        None => hash_file,
    };
    format!("{}.indexNT", stem)
}

fn main() {
    let args = App::new("TICCL-indexerNT")
        .version("0.1")
        .about("Builds a confusion-difference index from anagram hashes")
        .arg(
            Arg::with_name("hash")
                .long("hash")
                .help("Anahash file covering the full vocabulary")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("foci")
                .long("foci")
                .help("Foci file naming the low-frequency hashes to index from")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("charconf")
                .long("charconf")
                .help("Character-confusion file naming the allowed hash differences")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("low")
                .long("low")
                .help("Minimum word length to keep in the hash set")
                .takes_value(true)
                .default_value("5"),
        )
        .arg(
            Arg::with_name("high")
                .long("high")
                .help("Maximum word length to keep in the hash set")
                .takes_value(true)
                .default_value("35"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("t")
                .help("Number of threads to use, or 'max' for all available minus two")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .help("Output file; default BASENAME.indexNT")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("confstats")
                .long("confstats")
                .help("Output file for per-difference bucket-size statistics")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("follow")
                .long("follow")
                .help("Trace a specific hash value as it is visited, may be given multiple times")
                .takes_value(true)
                .number_of_values(1)
                .multiple(true),
        )
        .get_matches();

    let low: usize = args.value_of("low").unwrap().parse().unwrap_or_else(|_| {
        eprintln!("ERROR: --low should be a non-negative integer");
        exit(1);
    });
    let high: usize = args.value_of("high").unwrap().parse().unwrap_or_else(|_| {
        eprintln!("ERROR: --high should be a non-negative integer");
        exit(1);
    });
    let threads = resolve_threads(args.value_of("threads").unwrap());

    eprintln!("Reading hash set...");
    let hash_file = args.value_of("hash").unwrap();
    let f = File::open(hash_file).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to open {}: {}", hash_file, e);
        exit(1);
    });
    let (hash_set, skipped) = read_anahash_set(BufReader::new(f), low, high).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        exit(1);
    });
    eprintln!("{} hashes kept, {} skipped outside [{}, {}]", hash_set.len(), skipped, low, high);

    eprintln!("Reading foci set...");
    let foci_file = args.value_of("foci").unwrap();
    let f = File::open(foci_file).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to open {}: {}", foci_file, e);
        exit(1);
    });
    let (foci, _) = read_anahash_set(BufReader::new(f), 0, usize::MAX).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        exit(1);
    });
    eprintln!("{} foci", foci.len());

    eprintln!("Reading character confusion set...");
    let conf_file = args.value_of("charconf").unwrap();
    let f = File::open(conf_file).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to open {}: {}", conf_file, e);
        exit(1);
    });
    let conf_set = read_confusion_set(BufReader::new(f)).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        exit(1);
    });
    eprintln!("{} confusion differences", conf_set.len());

    let follow: Vec<AnaValue> = args
        .values_of("follow")
        .map(|values| {
            values
                .map(|v| {
                    v.parse().unwrap_or_else(|_| {
                        eprintln!("ERROR: --follow value '{}' should be an integer", v);
                        exit(1);
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    eprintln!("Indexing with {} thread(s)...", threads);
    let started = SystemTime::now();
    let config = IndexerConfig { threads, follow };
    let result = build_index(&hash_set, &foci, &conf_set, &config);
    let elapsed = SystemTime::now().duration_since(started).unwrap_or_default();
    eprintln!("Indexing done in {:.2}s, {} difference buckets", elapsed.as_secs_f64(), result.len());

    let out_path = args
        .value_of("output")
        .map(str::to_string)
        .unwrap_or_else(|| derive_index_output(hash_file));
    let mut out: Box<dyn io::Write> = Box::new(BufWriter::new(File::create(&out_path).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to create {}: {}", out_path, e);
        exit(1);
    })));
    ticcl_anahash::io::write_index(&mut out, &result).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to write {}: {}", out_path, e);
        exit(1);
    });

    if let Some(path) = args.value_of("confstats") {
        let mut stats_out = File::create(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to create {}: {}", path, e);
            exit(1);
        });
        ticcl_anahash::io::write_confusion_stats(&mut stats_out, &result).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to write {}: {}", path, e);
            exit(1);
        });
    }
}
