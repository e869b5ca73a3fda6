use std::fs;
use std::path::{Path, PathBuf};

use artifact_builds::app::build_use_case::BuildUseCase;
use artifact_builds::config::{ColumnLayout, SourceCategory};
use artifact_builds::infra::{FileOutputAdapter, JsonFileSource};
use artifact_builds::pipeline::{Pipeline, PipelineSettings};
use artifact_builds::types::CategoryTable;
use serde_json::Value;

const TEMPLATE: &str = "<html><script>const DATA = ARTIFACT_DATA_PLACEHOLDER;</script></html>";

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/batch_response.json")
}

fn categories() -> Vec<SourceCategory> {
    vec![
        SourceCategory { label: "PYRO".to_string(), range: "Pyro !A1:J".to_string() },
        SourceCategory { label: "ANEMO".to_string(), range: "Anemo !A1:J".to_string() },
    ]
}

fn build_into(dir: &Path, categories: Vec<SourceCategory>) -> anyhow::Result<()> {
    BuildUseCase::new(
        Box::new(JsonFileSource::new(fixture())),
        Box::new(FileOutputAdapter::new(dir)),
        Pipeline::new(PipelineSettings::default()),
        "test-sheet",
        categories,
    )
    .with_template(Some(TEMPLATE.to_string()))
    .run()
    .map(|_| ())
}

fn fact_lines(dir: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(dir.join("output.csv"))
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| line.split('|').map(str::to_string).collect())
        .collect()
}

#[test]
fn test_build_writes_all_outputs_with_expected_counts() {
    let dir = tempfile::tempdir().unwrap();
    build_into(dir.path(), categories()).unwrap();

    for name in ["output.csv", "artifact_data.json", "artifact_evaluator.html", "summary.txt"] {
        assert!(dir.path().join(name).exists(), "{} missing", name);
    }

    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    for line in [
        "Rows fetched from API:          18",
        "Rows after header trim:         8",
        "Rows filtered (keywords):       3",
        "Rows after keyword filter:      5",
        "Rows missing data:              1",
        "Rows with meaningful data:      4",
        "Artifact lines without rank:    0",
        "Main stat lines without slot:   0",
        "Substat lines without rank:     0",
        "Skipped (main=substat):         9",
        "Final output rows:              45",
    ] {
        assert!(summary.contains(line), "summary lacks {:?}", line);
    }

    let facts = fact_lines(dir.path());
    assert_eq!(facts.len(), 45);
}

#[test]
fn test_facts_hold_invariants() {
    let dir = tempfile::tempdir().unwrap();
    build_into(dir.path(), categories()).unwrap();

    for fact in fact_lines(dir.path()) {
        assert_eq!(fact.len(), 9);
        // main stat never equals substat
        assert_ne!(fact[6], fact[7]);
        assert!(fact[4].parse::<u32>().unwrap() >= 1);
        assert!(fact[8].parse::<u32>().unwrap() >= 1);
        assert!(fact[2] == "True" || fact[2] == "False");
        assert!(!fact[0].is_empty());
    }

    let characters: Vec<String> = fact_lines(dir.path()).into_iter().map(|f| f[0].clone()).collect();
    assert!(characters.contains(&"PYRO TRAVELER".to_string()));
    assert!(characters.contains(&"ANEMO TRAVELER".to_string()));
    assert!(!characters.contains(&"Bennett".to_string()));
}

#[test]
fn test_index_bundle_views() {
    let dir = tempfile::tempdir().unwrap();
    build_into(dir.path(), categories()).unwrap();

    let bundle: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("artifact_data.json")).unwrap()).unwrap();

    let sets: Vec<&str> = bundle["meta"]["sets"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    let mut sorted = sets.clone();
    sorted.sort();
    assert_eq!(sets, sorted);
    assert!(sets.contains(&"Tenacity of the Millelith"));
    assert!(sets.contains(&"Viridescent Venerer"));

    let noblesse = &bundle["byArtifact"]["Noblesse Oblige|Sands|ATK%"]["characters"];
    assert_eq!(noblesse[0]["character"], "PYRO TRAVELER");
    assert_eq!(noblesse[0]["setRank"], 1);
    assert_eq!(noblesse[0]["preferred"], false);
    assert_eq!(noblesse[1]["character"], "Amber");
    assert_eq!(noblesse[1]["setRank"], 2);
    assert_eq!(noblesse[1]["preferred"], true);

    let fixed = &bundle["bySet"]["Noblesse Oblige"]["fixedSlots"];
    assert_eq!(fixed["slot"], "Flower/Feather");
    assert_eq!(fixed["mainStatLabel"], "Fixed Main Stats (HP / ATK)");

    // Best set rank per character across every set offering Sands/ATK%
    let by_main = &bundle["byMainStat"]["Sands|ATK%"]["characters"];
    let amber = by_main
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["character"] == "Amber")
        .unwrap();
    assert_eq!(amber["setRank"], 1);

    let page = fs::read_to_string(dir.path().join("artifact_evaluator.html")).unwrap();
    let json = fs::read_to_string(dir.path().join("artifact_data.json")).unwrap();
    assert!(page.contains(&json));
    assert!(!page.contains("ARTIFACT_DATA_PLACEHOLDER"));
}

#[test]
fn test_rebuild_is_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    build_into(first.path(), categories()).unwrap();
    build_into(second.path(), categories()).unwrap();

    for name in ["output.csv", "artifact_data.json", "artifact_evaluator.html", "summary.txt"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{} differs between runs",
            name
        );
    }
}

#[test]
fn test_malformed_source_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");
    let mut too_many = categories();
    too_many.push(SourceCategory { label: "GEO".to_string(), range: "Geo !A1:J".to_string() });

    let err = build_into(&out, too_many).unwrap_err();
    assert!(format!("{:#}", err).contains("expected 3 value ranges, got 2"));
    assert!(!out.exists());
}

#[test]
fn test_preferred_role_scenario() {
    let cells = |values: &[&str]| values.iter().map(|v| Some(v.to_string())).collect::<Vec<_>>();
    let table = CategoryTable {
        category: "PYRO".to_string(),
        rows: vec![
            cells(&["Amber"]),
            cells(&["", "Traveler", "DPS ✩", "1. 20% HP set", "Flower - HP%", "1. Crit DMG"]),
        ],
    };
    let settings = PipelineSettings {
        header_rows: 0,
        placeholder: "TRAVELER".to_string(),
        columns: ColumnLayout { name: 0, role: 2, artifact_sets: 3, main_stats: 4, substats: 5 },
    };

    let output = Pipeline::new(settings).run(&[table]);
    let sets: Vec<&str> = output.facts.iter().map(|f| f.artifact_set.as_str()).collect();
    assert_eq!(sets, vec!["20% HP set", "Tenacity of the Millelith", "Vourukasha's Glow"]);
    for fact in &output.facts {
        assert_eq!(fact.character, "Amber");
        assert!(fact.preferred);
        assert_eq!(fact.role, "DPS");
        assert_eq!((fact.artifact_set_rank, fact.substat_rank), (1, 1));
        assert_eq!((fact.artifact_slot.as_str(), fact.main_stat.as_str()), ("Flower", "HP%"));
        assert_eq!(fact.substat, "Crit DMG");
    }
    assert_eq!(output.counts.rows_missing_data, 1);
}
