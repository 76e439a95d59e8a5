extern crate clap;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::exit;

use clap::{App, Arg};

use ticcl_anahash::*;

fn open_output(path: &str) -> io::Result<Box<dyn io::Write>> {
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

/// Parses a required numeric CLI argument, following the configuration-
/// error path (message to stderr, nonzero exit) rather than panicking.
fn parse_numeric<T: std::str::FromStr>(args: &clap::ArgMatches, name: &str) -> T {
    let value = args.value_of(name).unwrap();
    value.parse().unwrap_or_else(|_| {
        eprintln!("ERROR: --{} should be a non-negative integer, got '{}'", name, value);
        exit(1);
    })
}

fn main() {
    let args = App::new("TICCL-anahash")
        .version("0.1")
        .about("Builds anagram hashes from a frequency list")
        .arg(
            Arg::with_name("alph")
                .long("alph")
                .help("Alphabet file (char, frequency, weight columns)")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("clip")
                .long("clip")
                .help("Drop alphabet entries with frequency below this value (0 disables clipping)")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("corpus")
                .help("Primary frequency list")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("background")
                .long("background")
                .help("Background frequency list to merge in, may be given multiple times; produces INPUT.merged")
                .takes_value(true)
                .number_of_values(1)
                .multiple(true),
        )
        .arg(
            Arg::with_name("separator")
                .long("separator")
                .help("N-gram part separator character")
                .takes_value(true)
                .default_value("_"),
        )
        .arg(
            Arg::with_name("artifrq")
                .long("artifrq")
                .help("Generate INPUT.corpusfoci of words with freq below N; 0 disables foci extraction")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("ngrams")
                .long("ngrams")
                .help("Treat entries as n-grams when deciding foci eligibility")
                .required(false),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .short("l")
                .help("List mode (word\\thash); disables --artifrq and --background")
                .required(false),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .help("Output file; default INPUT.anahash or INPUT.list")
                .takes_value(true),
        )
        .get_matches();

    let clip: u64 = parse_numeric(&args, "clip");

    eprintln!("Reading alphabet...");
    let alphabet = read_alphabet(args.value_of("alph").unwrap(), clip).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to read alphabet: {}", e);
        exit(1);
    });

    let separator_arg = args.value_of("separator").unwrap();
    let separator = separator_arg.chars().next().unwrap_or_else(|| {
        eprintln!("ERROR: --separator should not be empty");
        exit(1);
    });
    let artifreq: u64 = parse_numeric(&args, "artifrq");

    let list_mode = args.is_present("list");
    let background_configured = args.is_present("background");

    // Conflicting-flags check (§6/§7): --list disables --artifrq/--background.
    if list_mode && artifreq > 0 {
        eprintln!("ERROR: option --artifrq not supported with --list");
        exit(1);
    }
    if list_mode && background_configured {
        eprintln!("ERROR: option --background not supported with --list");
        exit(1);
    }

    let config = BuilderConfig {
        artifreq,
        separator,
        ngrams: args.is_present("ngrams"),
        list_mode,
    };

    let corpus_path = args.value_of("corpus").unwrap();

    if config.list_mode {
        eprintln!("Reading corpus in list mode...");
        let f = File::open(corpus_path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to open corpus {}: {}", corpus_path, e);
            exit(1);
        });
        let entries = read_as_list(&alphabet, BufReader::new(f)).unwrap_or_else(|e| {
            eprintln!("ERROR: {}", e);
            exit(1);
        });
        let out_path = args
            .value_of("output")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.list", corpus_path));
        let mut out = open_output(&out_path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to open output {}: {}", out_path, e);
            exit(1);
        });
        ticcl_anahash::io::write_list(&mut out, &entries).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to write {}: {}", out_path, e);
            exit(1);
        });
        return;
    }

    let mut builder = AnahashBuilder::new(alphabet, config, background_configured);

    eprintln!("Reading corpus...");
    let f = File::open(corpus_path).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to open corpus {}: {}", corpus_path, e);
        exit(1);
    });
    builder.ingest(BufReader::new(f)).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        exit(1);
    });

    if let Some(background_files) = args.values_of("background") {
        for path in background_files {
            eprintln!("Merging background corpus {}...", path);
            let f = File::open(path).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to open background corpus {}: {}", path, e);
                exit(1);
            });
            builder.merge_background(BufReader::new(f)).unwrap_or_else(|e| {
                eprintln!("ERROR: {}", e);
                exit(1);
            });
        }
    }

    eprintln!("Writing anagram table...");
    let out_path = args
        .value_of("output")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.anahash", corpus_path));
    let mut out = open_output(&out_path).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to open output {}: {}", out_path, e);
        exit(1);
    });
    ticcl_anahash::io::write_anagram_table(&mut out, &builder.anagrams).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to write {}: {}", out_path, e);
        exit(1);
    });

    if artifreq > 0 {
        let foci_path = format!("{}.corpusfoci", corpus_path);
        eprintln!("Extracting foci to {}...", foci_path);
        let foci = builder.extract_foci();
        let mut out = open_output(&foci_path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to open {}: {}", foci_path, e);
            exit(1);
        });
        ticcl_anahash::io::write_anagram_table(&mut out, &foci).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to write {}: {}", foci_path, e);
            exit(1);
        });
    }

    if background_configured {
        let merged_path = format!("{}.merged", corpus_path);
        eprintln!("Writing merged frequency table to {}...", merged_path);
        let mut out = open_output(&merged_path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to open {}: {}", merged_path, e);
            exit(1);
        });
        ticcl_anahash::io::write_merged_table(&mut out, &builder.merged).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to write {}: {}", merged_path, e);
            exit(1);
        });
    }
}
