//! Normalization and suggestion performance benchmarks.
//!
//! Measures per-value normalization and quality checks, and whole-file
//! suggestion generation across file sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fio_curate::curation::MemoryRepository;
use fio_curate::input::CsvSource;
use fio_curate::suggestion::{GenerationRequest, Selection, SuggestionGenerator};
use fio_curate::{detect_flags, detect_warnings, normalize};
use std::io::Write;
use tempfile::NamedTempFile;

/// Sample values as found in real exports.
const NAME_SAMPLES: &[&str] = &[
    "Иванов Иван Иванович",
    "  ПЕТРОВА   мария  ",
    "Сидоров-Петров Олег",
    "«Козлова» Анна",
    "Смирнов\u{200B}Алексей",
    "Кузнецова (Иванова) Елена",
    "Г еоргиевна",
    "Ivanov Ivan",
    "Орлов2 Дмитрий",
    "Лебедева Ольга Сергеевна",
    "Попов—Орлов Павел",
    "Новикова,Татьяна",
    "Морозов И.И.",
    "Волкова Ирина Петровна Юрьевна",
    "Я",
];

const SURNAMES: &[&str] = &["Иванов", "Петрова", "Сидоров", "Козлова", "Смирнов"];
const GIVEN: &[&str] = &["Ваня", "Маша", "Иван", "Саша", "Елена", "Дима"];

/// Generate a single-column FIO file.
fn generate_people(rows: usize) -> String {
    let mut data = String::from("ФИО\n");
    for row in 0..rows {
        data.push_str(&format!(
            "{} {} Петрович\n",
            SURNAMES[row % SURNAMES.len()],
            GIVEN[row % GIVEN.len()]
        ));
    }
    data
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Benchmark single-value normalization.
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("single", |b| {
        b.iter(|| black_box(normalize("  ПЕТРОВА   мария  ")))
    });

    group.bench_function("batch_15", |b| {
        b.iter(|| {
            for sample in NAME_SAMPLES {
                black_box(normalize(*sample));
            }
        })
    });

    group.finish();
}

/// Benchmark warning and flag detection.
fn bench_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("quality");

    group.bench_function("warnings_batch_15", |b| {
        b.iter(|| {
            for sample in NAME_SAMPLES {
                black_box(detect_warnings(*sample));
            }
        })
    });

    group.bench_function("flags_batch_15", |b| {
        b.iter(|| {
            for sample in NAME_SAMPLES {
                black_box(detect_flags(*sample));
            }
        })
    });

    group.finish();
}

/// Benchmark normalization with varying input lengths.
fn bench_input_length_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_length_scaling");

    for words in [1, 5, 25, 100].iter() {
        let input = vec!["иВАНОВ"; *words].join("  ");
        group.bench_with_input(BenchmarkId::new("normalize", words), &input, |b, input| {
            b.iter(|| black_box(normalize(input.as_str())))
        });
    }

    group.finish();
}

/// Benchmark suggestion generation over files of various sizes.
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let dictionary = write_temp(
        "canonical,variant,enabled,note,source\n\
         Иван,Ваня,1,,bench\n\
         Мария,Маша,1,,bench\n\
         Александр,Саша,1,,bench\n\
         Дмитрий,Дима,1,,bench\n",
    );
    let generator = SuggestionGenerator::new(dictionary.path());

    for rows in [100, 1_000, 10_000].iter() {
        let people = write_temp(&generate_people(*rows));
        let request = GenerationRequest::new(CsvSource::new(people.path()), Selection::single("ФИО"));

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("single_mode", rows), &request, |b, request| {
            b.iter(|| {
                let mut repo = MemoryRepository::new();
                black_box(generator.generate(request, &mut repo).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_quality,
    bench_input_length_scaling,
    bench_generation,
);
criterion_main!(benches);
