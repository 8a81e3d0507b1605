use std::path::PathBuf;

use flow_scenes::{
    config::SceneConfig,
    corpus::{self, COPIES_PER_MATCH, CorpusSource},
    data_structures::{material::Material, scene_graph::Scene},
    resources::primitives,
};

use crate::common::test_utils::{assert_close, seeded_rng};

mod common;

const TEXT: &str = "The cupboard. The Hat and the broom.";
const TERMS: [&str; 3] = ["cupboard", "hat", "broom"];

#[test]
fn tokens_are_lowercased_without_periods() {
    let tokens = corpus::tokenize(&corpus::normalize(TEXT));
    assert_eq!(tokens, vec!["the", "cupboard", "the", "hat", "and", "the", "broom"]);
}

#[test]
fn apostrophes_stay_inside_words() {
    let tokens = corpus::tokenize(&corpus::normalize("Harry's wand -- wasn't there!"));
    assert_eq!(tokens, vec!["harry's", "wand", "wasn't", "there", ""]);
}

#[test]
fn separators_at_the_edges_leave_empty_tokens() {
    let tokens = corpus::tokenize(&corpus::normalize("\nThe cupboard.\n"));
    assert_eq!(tokens, vec!["", "the", "cupboard", ""]);
    assert_eq!(corpus::occurrences(&tokens, "cupboard"), vec![2]);
    assert!(corpus::occurrences(&tokens, "").is_empty());

    assert_eq!(corpus::tokenize(""), vec![""]);
    assert_eq!(corpus::tokenize("--"), vec!["", ""]);
}

#[test]
fn edge_tokens_shift_placement_heights() {
    let mut scene = Scene::new(&SceneConfig::default());
    let geometry = scene.add_geometry(primitives::cuboid(0.5, 0.5, 0.5));
    let material = scene.add_material(Material::normal());

    // "", "the", "cupboard", "": the match is token 2 of 4
    let spawned = corpus::populate(
        &mut scene,
        "\nThe cupboard.\n",
        &["cupboard"],
        geometry,
        &[material],
        &mut seeded_rng(),
    );
    assert_eq!(spawned.len(), COPIES_PER_MATCH);
    for s in &spawned {
        assert_close(scene.object(s.object).unwrap().position.y, (100.0 / 4.0) * 2.0 * 0.2 - 10.0);
    }
}

#[test]
fn only_ascii_letters_are_word_characters() {
    let tokens = corpus::tokenize(&corpus::normalize("Caf\u{e9} na\u{ef}ve"));
    assert_eq!(tokens, vec!["caf", "na", "ve"]);
    assert!(corpus::occurrences(&tokens, "caf\u{e9}").is_empty());
}

#[test]
fn tokenizing_twice_changes_nothing() {
    let once = corpus::tokenize(&corpus::normalize(TEXT));
    let twice = corpus::tokenize(&corpus::normalize(&once.join(" ")));
    assert_eq!(once, twice);
}

#[test]
fn occurrences_match_whole_tokens_case_insensitively() {
    let tokens = corpus::tokenize(&corpus::normalize(TEXT));
    assert_eq!(corpus::occurrences(&tokens, "The"), vec![0, 2, 5]);
    assert_eq!(corpus::occurrences(&tokens, "cup"), Vec::<usize>::new());
    assert!(corpus::occurrences(&tokens, "   ").is_empty());
}

#[test]
fn placement_spreads_indices_over_twenty_units() {
    assert_close(corpus::placement(0, 7), 0.0);
    assert_close(corpus::placement(1, 7), 100.0 / 7.0 * 0.2);
    assert_close(corpus::placement(99, 100), 19.8);
    assert_close(corpus::placement(3, 0), 0.0);
}

#[test]
fn every_occurrence_spawns_five_objects() {
    let mut scene = Scene::new(&SceneConfig::default());
    let geometry = scene.add_geometry(primitives::cuboid(0.5, 0.5, 0.5));
    let materials: Vec<_> = (0..3)
        .map(|_| scene.add_material(Material::normal()))
        .collect();

    let spawned = corpus::populate(&mut scene, TEXT, &TERMS, geometry, &materials, &mut seeded_rng());

    assert_eq!(spawned.len(), 3 * COPIES_PER_MATCH);
    assert_eq!(scene.object_count(), 15);
    for term in 0..3 {
        let of_term: Vec<_> = spawned.iter().filter(|s| s.term == term).collect();
        assert_eq!(of_term.len(), COPIES_PER_MATCH);
        for s in of_term {
            let object = scene.object(s.object).unwrap();
            assert_eq!(object.material, materials[term]);
            assert_eq!(object.geometry, geometry);
        }
    }

    let cupboard = spawned.iter().find(|s| s.term == 0).unwrap();
    let y = scene.object(cupboard.object).unwrap().position.y;
    assert_close(y, (100.0 / 7.0) * 1.0 * 0.2 - 10.0);
}

#[test]
fn placements_stay_inside_the_spawn_box() {
    let text = "hat ".repeat(50);
    let tokens = corpus::tokenize(&corpus::normalize(&text));
    let placements = corpus::plan(&tokens, &["hat"], &mut seeded_rng());
    assert_eq!(placements.len(), 50 * COPIES_PER_MATCH);
    for p in &placements {
        assert!((-5.0..5.0).contains(&p.position.x));
        assert!((-5.0..5.0).contains(&p.position.z));
        assert!((-10.0..10.0).contains(&p.position.y));
        assert!((0.0..=std::f32::consts::TAU).contains(&p.rotation.x));
        assert!((0.0..1.0).contains(&p.phase));
    }
}

#[test]
fn same_seed_gives_the_same_placements() {
    let tokens = corpus::tokenize(&corpus::normalize(TEXT));
    let first = corpus::plan(&tokens, &TERMS, &mut seeded_rng());
    let second = corpus::plan(&tokens, &TERMS, &mut seeded_rng());
    assert_eq!(first, second);
}

#[test]
fn terms_that_never_occur_spawn_nothing() {
    let mut scene = Scene::new(&SceneConfig::default());
    let geometry = scene.add_geometry(primitives::cuboid(0.5, 0.5, 0.5));
    let material = scene.add_material(Material::normal());

    let spawned = corpus::populate(
        &mut scene,
        "nothing to see here",
        &["broom"],
        geometry,
        &[material],
        &mut seeded_rng(),
    );
    assert!(spawned.is_empty());
    assert_eq!(scene.object_count(), 0);

    let spawned = corpus::populate(&mut scene, "", &["broom"], geometry, &[material], &mut seeded_rng());
    assert!(spawned.is_empty());
}

#[test]
fn a_single_occurrence_at_the_start_sits_at_the_bottom() {
    let mut scene = Scene::new(&SceneConfig::default());
    let geometry = scene.add_geometry(primitives::cuboid(0.5, 0.5, 0.5));
    let material = scene.add_material(Material::normal());

    let spawned = corpus::populate(&mut scene, "Broom.", &["broom"], geometry, &[material], &mut seeded_rng());
    assert_eq!(spawned.len(), COPIES_PER_MATCH);
    for s in &spawned {
        assert_close(scene.object(s.object).unwrap().position.y, -10.0);
    }
}

#[test]
fn sources_are_urls_or_paths() {
    assert_eq!(
        CorpusSource::parse("https://example.com/book.txt"),
        CorpusSource::Url("https://example.com/book.txt".to_string())
    );
    assert_eq!(
        CorpusSource::parse("assets/sample_corpus.txt"),
        CorpusSource::File(PathBuf::from("assets/sample_corpus.txt"))
    );
    assert!(matches!(CorpusSource::default(), CorpusSource::Url(_)));
}

#[tokio::test]
async fn loads_a_corpus_from_disk() {
    let path = common::test_utils::write_corpus("load", TEXT);
    let text = corpus::load(&CorpusSource::File(path)).await.unwrap();
    assert_eq!(text, TEXT);

    let missing = CorpusSource::File(PathBuf::from("/definitely/not/here.txt"));
    assert!(corpus::load(&missing).await.is_err());
}
