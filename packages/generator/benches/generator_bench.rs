use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stylesmith_generator::{generate, ClassDefinition, ClassRegistry, InterpreterRegistry};
use stylesmith_parser::KnownProperties;

fn build_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    for i in 0..50 {
        registry.insert(
            format!("token_{}", i),
            ClassDefinition::declaration(format!("padding: {}px;", i)),
        );
    }
    for i in 0..20 {
        registry.insert(
            format!("composite_{}", i),
            ClassDefinition::composes_and_declaration(
                [format!("token_{}", i), format!("token_{}", i + 1)],
                "display: flex;",
            ),
        );
    }
    registry.insert(
        "panel",
        ClassDefinition::ruleset(".panel { padding: 1rem; }\n.panel > .title, .panel:hover .title { color: red; }"),
    );
    registry
}

fn generate_mixed_batch(c: &mut Criterion) {
    let registry = build_registry();
    let interpreters = InterpreterRegistry::new();
    let known = KnownProperties::bundled();

    let mut names: Vec<String> = (0..20).map(|i| format!("composite_{}", i)).collect();
    names.extend((0..20).map(|i| format!("hover:token_{}", i)));
    names.extend(["md:dark:hover:panel", "focus:panel"].map(String::from));
    names.extend((0..20).map(|i| format!("md:margin:{}px", i)));

    c.bench_function("generate_mixed_batch", |b| {
        b.iter(|| generate(black_box(&names), &registry, &interpreters, &known))
    });
}

fn generate_literals_only(c: &mut Criterion) {
    let registry = ClassRegistry::new();
    let interpreters = InterpreterRegistry::new();
    let known = KnownProperties::bundled();
    let names = [
        "display:flex",
        "md:grid-template-columns:repeat(2,~minmax(0,~1fr))",
        "dark:hover:background:var(--surface)",
        "before:content:''",
        "nth-child(2n+1):opacity:50%",
    ];

    c.bench_function("generate_literals_only", |b| {
        b.iter(|| generate(black_box(names), &registry, &interpreters, &known))
    });
}

criterion_group!(benches, generate_mixed_batch, generate_literals_only);
criterion_main!(benches);
