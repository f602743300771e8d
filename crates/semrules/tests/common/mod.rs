#![allow(dead_code)]

use semrules_lib::{Condition, RankedRule, Rule};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small tagged English vector space. `dog` has a noun and a verb sense.
pub const ANIMAL_VECTORS: &[(&str, [f32; 4])] = &[
    ("cat_NOUN", [0.9, 0.4, 0.1, 0.0]),
    ("dog_NOUN", [0.8, 0.5, 0.2, 0.0]),
    ("dog_VERB", [0.0, 0.1, 0.0, 0.9]),
    ("car_NOUN", [0.1, 0.0, 0.9, 0.3]),
    ("shelter_NOUN", [0.5, 0.8, 0.1, 0.1]),
    ("hair_NOUN", [0.7, 0.6, 0.0, 0.1]),
    ("milk_NOUN", [0.6, 0.3, 0.3, 0.2]),
    ("legs_NOUN", [0.6, 0.5, 0.1, 0.3]),
    ("type_NOUN", [0.2, 0.2, 0.2, 0.2]),
];

pub fn word2vec_binary(entries: &[(&str, [f32; 4])]) -> Vec<u8> {
    let mut bytes = format!("{} 4\n", entries.len()).into_bytes();
    for (word, vector) in entries {
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(b' ');
        for v in vector {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.push(b'\n');
    }
    bytes
}

pub fn word2vec_text(entries: &[(&str, [f32; 4])]) -> String {
    let mut text = format!("{} 4\n", entries.len());
    for (word, vector) in entries {
        let values: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
        text.push_str(&format!("{} {}\n", word, values.join(" ")));
    }
    text
}

/// Temporary `embeddings/` and `rules/` directories laid out like a real install.
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("embeddings")).unwrap();
        fs::create_dir_all(temp_dir.path().join("rules")).unwrap();
        Self { temp_dir }
    }

    pub fn embeddings_dir(&self) -> PathBuf {
        self.temp_dir.path().join("embeddings")
    }

    pub fn rules_dir(&self) -> PathBuf {
        self.temp_dir.path().join("rules")
    }

    pub fn write_binary_model(&self, lang: &str, entries: &[(&str, [f32; 4])]) -> PathBuf {
        self.write_model(lang, "model.bin", &word2vec_binary(entries))
    }

    pub fn write_text_model(&self, lang: &str, entries: &[(&str, [f32; 4])]) -> PathBuf {
        self.write_model(lang, "model.txt", word2vec_text(entries).as_bytes())
    }

    fn write_model(&self, lang: &str, file: &str, bytes: &[u8]) -> PathBuf {
        let dir = self.embeddings_dir().join(lang);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, bytes).unwrap();
        path
    }

    pub fn write_export(&self, name: &str, content: &str) -> PathBuf {
        write_file(&self.rules_dir(), &format!("{}.json", name), content)
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Zoo-style export. `wings` is not in [`ANIMAL_VECTORS`].
pub const ZOO_EXPORT: &str = r#"{
    "dataset": "zoo",
    "header": ["hair", "milk", "legs", "wings", "type"],
    "accuracy": 0.9333,
    "rules": [
        {"antecedent": [{"attribute": "hair", "value": "ANO"}, {"attribute": "milk", "value": "ANO"}],
         "consequent": {"attribute": "type", "value": "savec"},
         "confidence": 0.95, "support": 0.40},
        {"antecedent": [{"attribute": "hair", "value": "ANO"}, {"attribute": "legs", "value": "4"}],
         "consequent": {"attribute": "type", "value": "savec"},
         "confidence": 0.90, "support": 0.30},
        {"antecedent": [{"attribute": "milk", "value": "NE"}, {"attribute": "wings", "value": "ANO"}],
         "consequent": {"attribute": "type", "value": "pták"},
         "confidence": 0.99, "support": 0.20},
        {"antecedent": [{"attribute": "legs", "value": "0"}],
         "consequent": {"attribute": "type", "value": "Ryba"},
         "confidence": 0.60, "support": 0.10},
        {"antecedent": [{"attribute": "hair", "value": "NE"}, {"attribute": "milk", "value": "NE"}, {"attribute": "legs", "value": "6"}],
         "consequent": {"attribute": "type", "value": "hmyz"},
         "confidence": 0.80, "support": 0.05}
    ]
}"#;

pub fn ranked_rule(attributes: &[(&str, &str)], consequent: (&str, &str), confidence: f64, support: f64, coherence: Option<f64>) -> RankedRule {
    RankedRule {
        rule: Rule {
            antecedent: attributes.iter().map(|(a, v)| Condition::new(a, v)).collect(),
            consequent: Condition::new(consequent.0, consequent.1),
            confidence,
            support,
        },
        coherence,
        failure: None,
    }
}
