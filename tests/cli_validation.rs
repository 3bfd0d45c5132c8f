//! Command-line behaviour of the mrdedup binary.
//!
//! Tests cover:
//! 1. Exit status on unsorted, empty and missing input
//! 2. Statistics and histogram files
//! 3. Gzip input and output
//! 4. stdin input and seed reproducibility

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to write a file into the test directory.
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to run mrdedup and return its output.
fn run_mrdedup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mrdedup"))
        .args(args)
        .output()
        .expect("Failed to run mrdedup")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Test fixtures
// =============================================================================

/// Two duplicate groups and one singleton.
fn sorted_reads() -> &'static str {
    "chr1\t100\t106\ta1\t0\t+\tTCGATT\n\
     chr1\t100\t106\ta2\t0\t+\tTTGATT\n\
     chr1\t100\t106\ta3\t0\t+\tTCGATT\n\
     chr1\t150\t156\tb1\t0\t-\tAACGTT\n\
     chr2\t10\t16\tc1\t0\t+\tCGCGCG\n\
     chr2\t10\t16\tc2\t0\t+\tCGCGCG\n"
}

fn unsorted_reads() -> &'static str {
    "chr2\t10\t16\tc1\t0\t+\tCGCGCG\n\
     chr1\t100\t106\ta1\t0\t+\tTCGATT\n"
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_unsorted_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.mr", unsorted_reads());

    let output = run_mrdedup(&[p(&input)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not properly sorted"));
}

#[test]
fn test_disable_flag_accepts_unsorted_input() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.mr", unsorted_reads());

    let output = run_mrdedup(&["-D", p(&input)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), unsorted_reads());
}

#[test]
fn test_empty_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "empty.mr", "");
    let stats = dir.path().join("stats.txt");

    let output = run_mrdedup(&["-S", p(&stats), p(&input)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("empty.mr"));
    assert!(!stats.exists());
}

#[test]
fn test_empty_input_leaves_existing_output_untouched() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "empty.mr", "\n\n");
    let out = write_file(&dir, "out.mr", "previous results\n");

    let output = run_mrdedup(&["-o", p(&out), p(&input)]);
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("Error: "));
    assert_eq!(fs::read_to_string(&out).unwrap(), "previous results\n");

    let fresh = dir.path().join("fresh.mr");
    let output = run_mrdedup(&["-o", p(&fresh), p(&input)]);
    assert!(!output.status.success());
    assert!(!fresh.exists());
}

#[test]
fn test_mixed_lengths_rejected_in_sequence_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "in.mr",
        "chr1\t100\t110\tr1\t0\t+\tACGT\n\
         chr1\t100\t110\tr2\t0\t+\tACG\n",
    );

    let output = run_mrdedup(&["--seq", p(&input)]);
    assert!(!output.status.success());
    let message = stderr(&output);
    assert!(message.starts_with("Error: "));
    assert!(message.contains("different lengths"));

    // Position-only mode never compares sequences
    let output = run_mrdedup(&[p(&input)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn test_missing_input_exits_nonzero() {
    let output = run_mrdedup(&["/nonexistent/input.mr"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("/nonexistent/input.mr"));
}

#[test]
fn test_input_required() {
    let output = run_mrdedup(&[]);
    assert!(!output.status.success());
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_stats_and_histogram_files() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.mr", sorted_reads());
    let out = dir.path().join("out.mr");
    let stats = dir.path().join("stats.txt");
    let hist = dir.path().join("hist.txt");

    let output = run_mrdedup(&[
        "-o",
        p(&out),
        "-S",
        p(&stats),
        "--hist",
        p(&hist),
        p(&input),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 3);
    assert_eq!(
        fs::read_to_string(&stats).unwrap(),
        "total_reads: 6\n\
         total_bases: 36\n\
         unique_reads: 3\n\
         unique_read_bases: 18\n\
         non_duplicate_fraction: 0.166667\n\
         duplicate_reads: 2\n\
         reads_removed: 3\n\
         duplication_rate: 2.5\n"
    );
    assert_eq!(fs::read_to_string(&hist).unwrap(), "1\t1\n2\t1\n3\t1\n");
}

#[test]
fn test_sequence_mode_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.mr", sorted_reads());
    let stats = dir.path().join("stats.txt");
    let hist = dir.path().join("hist.txt");

    let output = run_mrdedup(&["--seq", "-S", p(&stats), "--hist", p(&hist), p(&input)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // a2 differs from a1/a3 at the CpG, so four reads survive
    let kept = String::from_utf8_lossy(&output.stdout).to_string();
    assert_eq!(kept.lines().count(), 4);
    assert!(kept.contains("\ta2\t"));

    let stats_text = fs::read_to_string(&stats).unwrap();
    assert!(stats_text.contains("unique_reads: 4\n"));
    assert!(stats_text.contains("duplicate_reads: 2\n"));
    assert_eq!(fs::read_to_string(&hist).unwrap(), "1\t2\n2\t2\n");
}

#[test]
fn test_all_cytosines_flag() {
    let dir = TempDir::new().unwrap();
    // Reads differ only at a cytosine outside CpG context
    let content = "chr1\t1\t6\ta\t0\t+\tCTCGA\n\
                   chr1\t1\t6\tb\t0\t+\tTTCGA\n";
    let input = write_file(&dir, "in.mr", content);

    let cpg = run_mrdedup(&["--seq", p(&input)]);
    assert!(cpg.status.success(), "stderr: {}", stderr(&cpg));
    assert_eq!(String::from_utf8_lossy(&cpg.stdout).lines().count(), 1);

    for flag in ["-A", "--all-cytosines"] {
        let all_c = run_mrdedup(&["--seq", flag, p(&input)]);
        assert!(all_c.status.success(), "stderr: {}", stderr(&all_c));
        assert_eq!(String::from_utf8_lossy(&all_c.stdout), content);
    }
}

// =============================================================================
// Compression and stdin
// =============================================================================

#[test]
fn test_gzip_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.mr.gz");
    {
        let mut enc = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::default());
        enc.write_all(sorted_reads().as_bytes()).unwrap();
        enc.finish().unwrap();
    }
    let out = dir.path().join("out.mr.gz");

    let output = run_mrdedup(&["-o", p(&out), p(&input)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let mut text = String::new();
    GzDecoder::new(fs::File::open(&out).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("\tb1\t"));
}

#[test]
fn test_stdin_matches_file_input() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.mr", sorted_reads());
    let from_file = run_mrdedup(&["--seed", "11", p(&input)]);

    let mut child = Command::new(env!("CARGO_BIN_EXE_mrdedup"))
        .args(["--stdin", "--seed", "11"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run mrdedup");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(sorted_reads().as_bytes())
        .unwrap();
    let from_stdin = child.wait_with_output().unwrap();

    assert!(from_stdin.status.success(), "stderr: {}", stderr(&from_stdin));
    assert_eq!(from_file.stdout, from_stdin.stdout);
}

#[test]
fn test_same_seed_byte_identical_outputs() {
    let dir = TempDir::new().unwrap();
    let mut content = String::new();
    for i in 0..40 {
        for d in 0..(i % 5 + 1) {
            content.push_str(&format!(
                "chr1\t{}\t{}\tr{}_{}\t0\t+\tTCGACGTT\n",
                i * 10,
                i * 10 + 8,
                i,
                d
            ));
        }
    }
    let input = write_file(&dir, "in.mr", &content);

    let run_once = |tag: &str| {
        let out = dir.path().join(format!("out_{}.mr", tag));
        let stats = dir.path().join(format!("stats_{}.txt", tag));
        let hist = dir.path().join(format!("hist_{}.txt", tag));
        let output = run_mrdedup(&[
            "--seed",
            "12345",
            "-o",
            p(&out),
            "-S",
            p(&stats),
            "--hist",
            p(&hist),
            p(&input),
        ]);
        assert!(output.status.success());
        (
            fs::read(&out).unwrap(),
            fs::read(&stats).unwrap(),
            fs::read(&hist).unwrap(),
        )
    };

    assert_eq!(run_once("a"), run_once("b"));
}
