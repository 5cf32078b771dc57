//! Packaging and cleanup scenarios

mod support;

use std::collections::BTreeMap;

use ktbuild::{CompileSettings, PathLayout};
use support::{Event, Fixture, hours_ago};

fn manifest() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Main-Class".to_string(), "greeter.MainKt".to_string()),
        ("Implementation-Title".to_string(), "greeter".to_string()),
    ])
}

#[test]
fn test_manifest_is_applied_to_every_jar() {
    let fixture = Fixture::new();
    let settings = CompileSettings {
        jar_manifest_entries: manifest(),
        artifact_version: Some("1.2.0".into()),
        ..Fixture::settings()
    };
    let orchestrator = fixture.orchestrator(settings);

    let jars = orchestrator.jar().unwrap();

    let jar_dir = fixture.project.join("build/lib");
    assert_eq!(
        jars,
        vec![
            jar_dir.join("greeter-1.2.0.jar"),
            jar_dir.join("greeter-1.2.0-sources.jar"),
            jar_dir.join("greeter-1.2.0-tests.jar"),
            jar_dir.join("greeter-1.2.0-test-sources.jar"),
        ]
    );
    assert!(jar_dir.is_dir());

    let events = fixture.recorder.events();
    assert_eq!(events.len(), 4);
    for event in events {
        let Event::WriteJar { manifest: entries, .. } = &event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(entries, &manifest());
    }
}

#[test]
fn test_jar_inputs_per_archive() {
    let fixture = Fixture::new();
    let settings = CompileSettings {
        artifact_name: Some("hello".into()),
        ..Fixture::settings()
    };
    let orchestrator = fixture.orchestrator(settings);
    orchestrator.jar().unwrap();

    let project = &fixture.project;
    let inputs: Vec<Vec<std::path::PathBuf>> = fixture
        .recorder
        .events()
        .into_iter()
        .map(|event| match event {
            Event::WriteJar { dirs, .. } => dirs,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();

    assert_eq!(
        inputs,
        vec![
            vec![project.join("build/classes/main")],
            vec![
                project.join("src/main/kotlin"),
                project.join("src/main/resources"),
                project.join("src/main/java"),
            ],
            vec![project.join("build/classes/test")],
            vec![
                project.join("src/test/kotlin"),
                project.join("src/test/resources"),
                project.join("src/test/java"),
            ],
        ]
    );
}

#[test]
fn test_jar_fails_fast_on_missing_toolchain() {
    let fixture = Fixture::new();
    let settings = CompileSettings {
        language_version: None,
        ..Fixture::settings()
    };
    let orchestrator = fixture.orchestrator(settings);

    let err = orchestrator.jar().unwrap_err();

    assert!(err.is_config_error());
    assert!(fixture.recorder.events().is_empty());
    assert!(!fixture.project.join("build/lib").exists());
}

#[test]
fn test_clean_is_idempotent() {
    let fixture = Fixture::new();
    fixture.write_at("src/main/kotlin/Main.kt", "fun main() {}", hours_ago(1));
    let orchestrator = fixture.orchestrator(Fixture::settings());
    orchestrator.compile_main().unwrap();
    assert!(fixture.project.join("build/classes/main").is_dir());

    orchestrator.clean().unwrap();
    assert!(!fixture.project.join("build").exists());
    assert!(fixture.project.join("src/main/kotlin/Main.kt").exists());

    orchestrator.clean().unwrap();
}

#[test]
fn test_clean_then_compile_rebuilds_everything() {
    let fixture = Fixture::new();
    fixture.write_at("src/main/kotlin/A.kt", "class A", hours_ago(2));
    fixture.write_at("src/main/kotlin/B.kt", "class B", hours_ago(2));
    fixture.write_at("build/classes/main/A.class", "", hours_ago(1));
    fixture.write_at("build/classes/main/B.class", "", hours_ago(1));

    let orchestrator = fixture.orchestrator(Fixture::settings());
    assert!(orchestrator.compile_main().unwrap().is_skipped());

    orchestrator.clean().unwrap();
    let outcome = orchestrator.compile_main().unwrap();

    assert_eq!(
        outcome,
        ktbuild::CompileOutcome::Compiled {
            sources: 2,
            interop_sources: 0
        }
    );
}

#[test]
fn test_custom_build_dir() {
    let fixture = Fixture::new();
    fixture.write_at("out/classes/main/Stale.class", "", hours_ago(1));

    let orchestrator = ktbuild::CompilationOrchestrator::builder(&fixture.project)
        .with_layout(PathLayout::with_build_dir("out"))
        .with_settings(Fixture::settings())
        .with_dependency_resolver(support::FakeResolver(Default::default()))
        .with_resource_copier(support::FakeCopier(fixture.recorder.clone()))
        .with_jar_packager(support::FakePackager(fixture.recorder.clone()))
        .with_compiler_registry(ktbuild::services::MemoryVersionRegistry::new(
            ktbuild::toolchain::RegistryKind::Compiler,
            fixture.registry_path(),
        ))
        .with_runtime_registry(ktbuild::services::MemoryVersionRegistry::new(
            ktbuild::toolchain::RegistryKind::Runtime,
            fixture.registry_path(),
        ))
        .build()
        .unwrap();

    orchestrator.clean().unwrap();

    assert!(!fixture.project.join("out").exists());
}
