use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use walkdir::WalkDir;

mod utils;
use utils::*;

use qrgrid::{builder::Grid, detect, Color, Version};

const SCALES: [u32; 5] = [1, 2, 3, 5, 8];
const QUIET_ZONES: [u32; 3] = [0, 2, 4];

fn main() {
    println!("Running qrgrid detection benchmark");
    println!("==================================\n");

    let total_start = Instant::now();

    println!("Synthetic symbols...");
    println!("--------------------");
    benchmark_synthetic();

    println!("\nDataset (benches/dataset)...");
    println!("----------------------------");
    benchmark_dataset(Path::new("benches/dataset"));

    println!("\nTotal time elapsed: {:?}", total_start.elapsed());
}

// Synthetic
//------------------------------------------------------------------------------

fn symbol(ver: Version) -> Grid {
    let mut grid = Grid::new(ver);
    grid.draw_all_function_patterns();
    grid.fill_data(|r, c| Color::from((r * c) % 2 + (r * c) % 3 == 0));
    grid
}

fn benchmark_synthetic() {
    let cases: Vec<(Version, u32, u32)> = Version::all()
        .flat_map(|v| {
            SCALES.iter().flat_map(move |&s| QUIET_ZONES.iter().map(move |&q| (v, s, q)))
        })
        .collect();

    let results = Arc::new(Mutex::new(HashMap::<String, HashMap<String, f64>>::new()));

    cases.par_iter().for_each(|&(ver, scale, qz)| {
        let grid = symbol(ver);
        let img = grid.to_image(scale, qz * scale);

        let start = Instant::now();
        let est = detect(&img);
        let time = start.elapsed().as_micros() as f64;

        let exp = (grid.width(), qz * scale);
        let pass = matches!(est, Ok(e) if (e.module_count, e.quiet_zone) == exp);
        if !pass {
            let case = format!("version {ver}, scale {scale}, quiet zone {qz}");
            println!("\x1b[1;31m[FAIL]\x1b[0m {case}: {est:?}");
        }

        let mut results = results.lock().unwrap();
        let row = results.entry(format!("scale {scale}")).or_default();
        *row.entry("cases".to_string()).or_default() += 1.0;
        *row.entry("passed".to_string()).or_default() += pass as u8 as f64;
        *row.entry("time (us)".to_string()).or_default() += time;
    });

    let mut results = Arc::try_unwrap(results).unwrap().into_inner().unwrap();
    for row in results.values_mut() {
        let cases = row["cases"];
        let passed = row["passed"];
        row.insert("accuracy".to_string(), passed / cases);
        row.entry("time (us)".to_string()).and_modify(|t| *t /= cases);
    }

    let rows: Vec<String> = SCALES.iter().map(|s| format!("scale {s}")).collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    print_table(&results, &rows, &["", "cases", "passed", "accuracy", "time (us)"]);
}

// Dataset
//------------------------------------------------------------------------------

// Expected result next to each image: "<module count> <quiet zone px>"
fn parse_expected(path: &Path) -> Option<(usize, u32)> {
    let content = std::fs::read_to_string(path).ok()?;
    let mut nums = content.split_whitespace();
    Some((nums.next()?.parse().ok()?, nums.next()?.parse().ok()?))
}

fn benchmark_dataset(dataset_dir: &Path) {
    if !dataset_dir.exists() {
        println!("No dataset found, skipping");
        return;
    }

    let image_paths: Vec<_> = WalkDir::new(dataset_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(is_image_file)
        .map(|e| e.path().to_path_buf())
        .collect();

    let passed = Arc::new(Mutex::new(0usize));
    let runtimes = Arc::new(Mutex::new(Vec::<u128>::new()));

    image_paths.par_iter().for_each(|img_path| {
        let path_str = img_path.to_string_lossy();
        let Some(exp) = parse_expected(&img_path.with_extension("txt")) else {
            println!("\x1b[1;33m[SKIP]\x1b[0m {path_str}: no expected result");
            return;
        };
        let Ok(img) = image::open(img_path) else {
            println!("\x1b[1;33m[SKIP]\x1b[0m {path_str}: unreadable image");
            return;
        };

        let start = Instant::now();
        let est = detect(&img);
        runtimes.lock().unwrap().push(start.elapsed().as_millis());

        match est {
            Ok(e) if (e.module_count, e.quiet_zone) == exp => {
                *passed.lock().unwrap() += 1;
                println!("\x1b[1;32m[PASS]\x1b[0m {path_str}");
            }
            res => println!("\x1b[1;31m[FAIL]\x1b[0m {path_str}: {res:?}, expected {exp:?}"),
        }
    });

    let passed = *passed.lock().unwrap();
    let runtimes = runtimes.lock().unwrap();
    let avg = runtimes.iter().sum::<u128>() as f64 / runtimes.len().max(1) as f64;
    println!("Passed {passed}/{} images, average {avg:.2}ms", runtimes.len());
}
