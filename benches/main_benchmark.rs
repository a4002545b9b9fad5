use criterion::{Criterion, criterion_group, criterion_main};
use gaia::build::{command, needs_rebuild, synthesize};
use gaia::config::BuildConfig;
use std::hint::black_box;

const MOCK_CONFIG: &str = r#"
compiler = "clang++"
output_name = "bench_app"
output_directory = "build"
input_directory = "src"
files = ["main.cpp", "utils.cpp", "net.cpp", "io.cpp"]
flags = ["-Wall", "-Wextra", "-O2", "-std=c++20"]
commands = ["echo done"]
"#;

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_gaia_toml", |b| {
        b.iter(|| {
            let _: BuildConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_synthesize(c: &mut Criterion) {
    let config: BuildConfig = toml::from_str(MOCK_CONFIG).unwrap();
    c.bench_function("synthesize_command", |b| {
        b.iter(|| synthesize(black_box(&config), black_box("clang++")).unwrap())
    });
}

fn bench_normalize_dir(c: &mut Criterion) {
    c.bench_function("normalize_dir", |b| {
        b.iter(|| command::normalize_dir(black_box("some/nested/output")))
    });
}

fn bench_needs_rebuild(c: &mut Criterion) {
    // Setup a temp project for probing
    let temp_dir = std::env::temp_dir().join("gaia_bench_stale");
    let src = temp_dir.join("src");
    let build = temp_dir.join("build");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir_all(&build).unwrap();

    let mut config = BuildConfig::new();
    config
        .set_input_directory(src.to_string_lossy())
        .set_output_directory(build.to_string_lossy())
        .set_output_name("app");
    for i in 0..32 {
        let name = format!("file{}.cpp", i);
        std::fs::write(src.join(&name), "int x;").unwrap();
        config.add_file(name);
    }
    std::fs::write(build.join("app"), "bin").unwrap();

    c.bench_function("needs_rebuild_32_inputs", |b| {
        b.iter(|| needs_rebuild(black_box(&config)).unwrap())
    });

    std::fs::remove_dir_all(&temp_dir).ok();
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_synthesize,
    bench_normalize_dir,
    bench_needs_rebuild
);
criterion_main!(benches);
