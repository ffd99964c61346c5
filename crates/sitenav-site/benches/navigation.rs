//! Benchmarks for locale and sidebar resolution.

use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sitenav_site::{Config, Site};

/// Build a declaration with `locales` locales, each with `roots` sidebar
/// roots of `pages` pages.
fn create_config(locales: usize, roots: usize, pages: usize) -> String {
    let mut toml = String::from("[locales.\"/\"]\nlang = \"en-US\"\n");
    for l in 0..locales {
        writeln!(toml, "[locales.\"/l{l}/\"]\nlang = \"x-{l}\"").unwrap();
    }
    for l in 0..locales {
        writeln!(toml, "[themeConfig.locales.\"/l{l}/\".sidebar]").unwrap();
        for r in 0..roots {
            let items: Vec<String> = (0..pages).map(|p| format!("\"page-{p}\"")).collect();
            writeln!(toml, "\"/l{l}/section-{r}/\" = [{}]", items.join(", ")).unwrap();
        }
    }
    toml
}

fn build_site(locales: usize, roots: usize, pages: usize) -> Site {
    Site::new(Config::from_toml_str(&create_config(locales, roots, pages)).unwrap())
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_locale");

    for locales in [2, 10, 50] {
        let site = build_site(locales, 1, 1);
        let path = format!("/l{}/section-0/page-0", locales - 1);

        group.bench_with_input(BenchmarkId::from_parameter(locales), &path, |b, path| {
            b.iter(|| site.resolve(path));
        });
    }

    group.finish();
}

fn bench_sidebar(c: &mut Criterion) {
    let site = build_site(2, 20, 50);

    let mut group = c.benchmark_group("sidebar_lookup");

    group.bench_function("sidebar_hit", |b| {
        b.iter(|| site.sidebar("/l1/section-19/page-49"));
    });

    group.bench_function("sidebar_miss", |b| {
        b.iter(|| site.sidebar("/l1/unknown/page"));
    });

    group.bench_function("neighbors", |b| {
        b.iter(|| site.content().neighbors("l1", "/l1/section-10/page-25"));
    });

    group.finish();
}

fn bench_page_context(c: &mut Criterion) {
    let site = build_site(5, 10, 20);

    c.bench_function("page_context", |b| {
        b.iter(|| site.page("/l3/section-5/page-10"));
    });
}

criterion_group!(benches, bench_resolve, bench_sidebar, bench_page_context);
criterion_main!(benches);
