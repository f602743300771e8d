mod common;

use common::{TestEnv, ANIMAL_VECTORS};
use proptest::prelude::*;
use semrules_lib::{
    CoherenceContext, Config, ConfigOverrides, EmbeddingFormat, EmbeddingModel, Language,
    SemrulesError, WordVectors,
};

fn animal_model() -> EmbeddingModel {
    EmbeddingModel::from_entries(4, ANIMAL_VECTORS.iter().map(|(w, v)| (*w, v.to_vec()))).unwrap()
}

#[test]
fn test_binary_and_text_models_agree() {
    let env = TestEnv::new();
    let bin = env.write_binary_model("en", ANIMAL_VECTORS);
    let txt = env.write_text_model("en", ANIMAL_VECTORS);

    let from_bin = EmbeddingModel::load(&bin, EmbeddingFormat::Binary).unwrap();
    let from_txt = EmbeddingModel::load(&txt, EmbeddingFormat::Text).unwrap();

    assert_eq!(from_bin.len(), ANIMAL_VECTORS.len());
    assert_eq!(from_txt.len(), ANIMAL_VECTORS.len());
    let a = from_bin.similarity("cat_NOUN", "car_NOUN").unwrap();
    let b = from_txt.similarity("cat_NOUN", "car_NOUN").unwrap();
    assert!((a - b).abs() < 1e-6);
}

#[test]
fn test_model_load_through_config() {
    let env = TestEnv::new();
    env.write_binary_model("en", ANIMAL_VECTORS);

    let config = Config::new(ConfigOverrides {
        config_path: Some(env.temp_dir.path().join("none.toml")),
        ..Default::default()
    });
    assert!(config.is_err(), "an explicit config path must exist");

    let config = Config::new(ConfigOverrides {
        embeddings_dir: Some(env.embeddings_dir()),
        rules_dir: Some(env.rules_dir()),
        language: Some(Language::En),
        ..Default::default()
    })
    .unwrap();
    let model = EmbeddingModel::load(config.model_path(), config.embedding_format).unwrap();
    assert!(model.contains("shelter_NOUN"));
}

#[test]
fn test_missing_model_is_load_error() {
    let env = TestEnv::new();
    let result = EmbeddingModel::load_for_language(&env.embeddings_dir(), Language::Cz, EmbeddingFormat::Binary);
    assert!(matches!(result, Err(SemrulesError::ModelLoad { .. })));
}

#[test]
fn test_corrupt_model_is_load_error() {
    let env = TestEnv::new();
    let path = env.write_binary_model("en", ANIMAL_VECTORS);
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let result = EmbeddingModel::load(&path, EmbeddingFormat::Binary);
    assert!(matches!(result, Err(SemrulesError::ModelLoad { .. })));
}

#[test]
fn test_reference_header_properties() {
    let model = animal_model();
    let mut ctx = CoherenceContext::new(&model, Language::En);
    ctx.precompute(&["cat", "dog", "car"]).unwrap();

    let c1 = ctx.rule_coherence(&["cat", "dog"]).unwrap();
    let c2 = ctx.rule_coherence(&["cat", "dog", "car"]).unwrap();
    let c3 = ctx.rule_coherence(&["cat"]).unwrap();
    let c4 = ctx.rule_coherence(&["cat shelter"]).unwrap();

    assert!(c1 > c2);
    assert_eq!(c3, 1.0);
    assert!(c4 < 1.0);

    // poodle was never precomputed
    assert!(matches!(
        ctx.rule_coherence(&["cat", "poodle"]),
        Err(SemrulesError::CacheMiss { .. })
    ));
}

#[test]
fn test_nonsense_token_is_vocabulary_error() {
    let model = animal_model();
    let mut ctx = CoherenceContext::new(&model, Language::En);
    ctx.precompute(&["cat", "blorptastic"]).unwrap();

    match ctx.rule_coherence(&["blorptastic", "cat"]) {
        Err(SemrulesError::Vocabulary { word }) => assert_eq!(word, "blorptastic"),
        other => panic!("expected vocabulary error, got {:?}", other),
    }
}

#[test]
fn test_untagged_language_uses_bare_words() {
    let model = EmbeddingModel::from_entries(
        2,
        vec![
            ("kočka", vec![1.0, 0.1]),
            ("pes", vec![0.9, 0.3]),
            ("lopata", vec![0.0, 1.0]),
        ],
    )
    .unwrap();
    let mut ctx = CoherenceContext::new(&model, Language::Cz);
    ctx.precompute(&["kočka", "pes", "lopata"]).unwrap();

    let c1 = ctx.rule_coherence(&["kočka", "pes"]).unwrap();
    let c2 = ctx.rule_coherence(&["kočka", "pes", "lopata"]).unwrap();
    assert!(c1 > c2);

    // tagged markers are not probed for an untagged language
    let tagged = EmbeddingModel::from_entries(2, vec![("pes_NOUN", vec![1.0, 0.0])]).unwrap();
    let ctx = CoherenceContext::new(&tagged, Language::Cz);
    assert!(ctx.resolver().variants("pes").is_empty());
}

const WORDS: &[&str] = &["cat", "dog", "car", "shelter", "hair", "milk", "legs"];

proptest! {
    #[test]
    fn prop_similarity_is_symmetric(
        a in prop::collection::vec(-1.0f32..1.0, 7),
        b in prop::collection::vec(-1.0f32..1.0, 7),
    ) {
        let model = EmbeddingModel::from_entries(7, vec![("a", a), ("b", b)]).unwrap();
        let ab = model.similarity("a", "b").unwrap();
        let ba = model.similarity("b", "a").unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn prop_cache_lookup_ignores_order(
        header in prop::sample::subsequence(WORDS.to_vec(), 2..=WORDS.len()).prop_shuffle()
    ) {
        let model = animal_model();
        let mut ctx = CoherenceContext::new(&model, Language::En);
        ctx.precompute(&header).unwrap();

        for i in 0..header.len() {
            for j in (i + 1)..header.len() {
                let (a, b) = (header[i], header[j]);
                prop_assert_eq!(ctx.cache().get(a, b), ctx.cache().get(b, a));
                let forward = ctx.rule_coherence(&[a, b]).unwrap();
                let backward = ctx.rule_coherence(&[b, a]).unwrap();
                prop_assert_eq!(forward, backward);
                prop_assert!((-1.0..=1.0).contains(&forward));
            }
        }
    }
}
