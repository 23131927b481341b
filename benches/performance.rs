use pure_format::{
    buffer::TextBuffer,
    catalog::CommandCatalog,
    host::Position,
    palette::{Palette, PaletteKey, PaletteSettings, TriggerScanner, filter},
    render,
    terminal_host::TerminalHost,
};
use std::time::{Duration, Instant};

/// Performance benchmark suite for the format palette
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Trigger scanning on short and very long lines
/// - Catalog filtering
/// - A full keystroke: edit, rescan, filter, popup rebuild
/// - Buffer rendering with the trigger highlight
const SMALL_DOC_LINES: usize = 10;
const MEDIUM_DOC_LINES: usize = 100;
const LARGE_DOC_LINES: usize = 1000;
const HUGE_DOC_LINES: usize = 10000;

const ITERATIONS: usize = 100;

const SAMPLE_WORDS: [&str; 16] = [
    "Lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "/bold",
    "consectetur",
    "adipiscing",
    "$x$",
    "elit",
    "sed",
    "do",
    "/alpha",
    "eiusmod",
    "tempor",
    "incididunt",
];

/// A line of `words` words, with a trigger every few words
fn create_line(words: usize) -> String {
    (0..words)
        .map(|i| SAMPLE_WORDS[i % SAMPLE_WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn create_test_buffer(lines: usize, words_per_line: usize) -> TextBuffer {
    let text = (0..lines)
        .map(|_| create_line(words_per_line))
        .collect::<Vec<_>>()
        .join("\n");
    TextBuffer::from_text(&text)
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);
        println!(
            "Ops/sec:        {:.2}",
            1_000_000.0 / self.avg_duration.as_micros().max(1) as f64
        );

        if self.avg_duration.as_millis() > 100 {
            println!("\n⚠️  WARNING: Average duration > 100ms (user-perceptible lag)");
        } else if self.avg_duration.as_millis() > 16 {
            println!("\n⚠️  WARNING: Average duration > 16ms (may drop frames)");
        }
    }
}

fn benchmark<F>(name: &str, iterations: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    let mut durations = Vec::with_capacity(iterations);

    // Warmup
    for _ in 0..10 {
        f();
    }

    for _ in 0..iterations {
        let start = Instant::now();
        f();
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations as u32;
    let min_duration = *durations.iter().min().unwrap();
    let max_duration = *durations.iter().max().unwrap();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

#[test]
fn bench_trigger_scanning() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              TRIGGER SCANNING BENCHMARKS                       ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let scanner = TriggerScanner::new('/', Some('$'));
    for words in [10, 100, 1000, 10000] {
        let line = create_line(words);
        let length = line.chars().count();
        let result = benchmark(&format!("scan - {words} words"), ITERATIONS, || {
            // Cursor at the end forces every occurrence to be checked.
            let _ = scanner.scan(0, &line, length);
        });
        result.print();
    }
}

#[test]
fn bench_filtering() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              CATALOG FILTER BENCHMARKS                         ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let catalog = CommandCatalog::builtin();
    for fragment in ["", "a", "al", "alpha", "Omega", "zzz"] {
        let result = benchmark(&format!("filter - {fragment:?}"), ITERATIONS * 10, || {
            let _ = filter(fragment, &catalog);
        });
        result.print();
    }
}

#[test]
fn bench_keystroke_cycle() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              FULL KEYSTROKE BENCHMARKS                         ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!("\nThis simulates the cost of typing a trigger fragment:");
    println!("  1. Insert character into buffer");
    println!("  2. Rescan the cursor line");
    println!("  3. Filter and rebuild the popup");

    let doc_sizes = [
        ("Small (10 lines)", SMALL_DOC_LINES),
        ("Medium (100 lines)", MEDIUM_DOC_LINES),
        ("Large (1000 lines)", LARGE_DOC_LINES),
        ("Huge (10000 lines)", HUGE_DOC_LINES),
    ];

    for (name, size) in doc_sizes {
        let iterations = if name.contains("Huge") { 10 } else { ITERATIONS };
        let buffer = create_test_buffer(size, 20);
        let last = Position::new(size - 1, buffer.line_len(size - 1));

        let result = benchmark(&format!("Keystroke cycle - {name}"), iterations, || {
            let mut host = TerminalHost::new(buffer.clone());
            host.buffer_mut().set_cursor(last);
            let mut palette = Palette::new(PaletteSettings::default(), CommandCatalog::builtin());
            for ch in " /gam".chars() {
                host.buffer_mut().insert_char(ch);
                palette.after_key(&mut host, PaletteKey::Other);
            }
            assert!(palette.is_open());
        });
        result.print();

        let per_key = result.avg_duration / 5;
        println!("\nPer-keystroke cost: {:?}", per_key);
        if per_key.as_millis() > 16 {
            println!("⚠️  CRITICAL: Typing will feel laggy (>16ms per keystroke)");
        }
    }
}

#[test]
fn bench_rendering_with_highlight() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              RENDERING BENCHMARKS                              ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    for (name, size) in [
        ("Medium (100 lines)", MEDIUM_DOC_LINES),
        ("Large (1000 lines)", LARGE_DOC_LINES),
    ] {
        let buffer = create_test_buffer(size, 40);
        let highlight = render::Highlight {
            line: size / 2,
            start: 35,
            end: 40,
            style: Default::default(),
        };
        for width in [40, 80, 200] {
            let result = benchmark(
                &format!("render_buffer - {name}, width={width}"),
                ITERATIONS,
                || {
                    let _ = render::render_buffer(&buffer, width, Some(highlight));
                },
            );
            result.print();
        }
    }
}
