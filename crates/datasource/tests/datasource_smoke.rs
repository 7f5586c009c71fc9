use skillrec_datasource::{open_profiles, DatasourceError, PeopleFileDatasource, ProfileFormat};
use skillrec_intelligence::{Datasource, RecommenderConfig, SkillRecommender};
use skillrec_test_utils::TestFixture;

#[test]
fn people_export_feeds_recommender() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .write_people(&[
            (775, Some(&["Project Management.", "Scrum"])),
            (12, Some(&["Scrum"])),
            (40, None),
        ])
        .unwrap();

    let source = PeopleFileDatasource::open(&path).unwrap();
    assert_eq!(source.len(), 3);
    assert_eq!(
        source.user_info(775).and_then(|r| r.role),
        Some("Consultant".to_string())
    );
    assert!(source.user_info(1).is_none());

    let profiles = source.skills_by_user().unwrap();
    assert_eq!(profiles[&40], None);

    let engine = SkillRecommender::new(source, RecommenderConfig::default()).unwrap();
    let rec = engine.recommend(12, 1, 1).unwrap();
    assert_eq!(rec.recommendation_list, vec!["Project Management"]);
    assert_eq!(rec.most_similar_to, vec!["Scrum"]);
}

#[test]
fn people_export_is_reread_on_fetch() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.write_people(&[(1, Some(&["Rust"]))]).unwrap();
    let source = PeopleFileDatasource::open(&path).unwrap();

    fixture
        .write_people(&[(1, Some(&["Rust"])), (2, Some(&["Go"]))])
        .unwrap();
    assert_eq!(source.skills_by_user().unwrap().len(), 2);
    assert!(source.user_info(2).is_some());
}

#[test]
fn auto_format_detection() {
    let fixture = TestFixture::new().unwrap();
    let people = fixture.write_people(&[(1, Some(&["Rust"]))]).unwrap();
    let map = fixture
        .write_skill_map(&[(1, Some(&["Rust"])), (2, None)])
        .unwrap();

    let from_people = open_profiles(&people, ProfileFormat::Auto).unwrap();
    assert_eq!(from_people.skills_by_user().unwrap().len(), 1);

    let from_map = open_profiles(&map, ProfileFormat::Auto).unwrap();
    let profiles = from_map.skills_by_user().unwrap();
    assert_eq!(profiles[&1], Some(vec!["Rust".to_string()]));
    assert_eq!(profiles[&2], None);
}

#[test]
fn missing_file_is_io_error() {
    let fixture = TestFixture::new().unwrap();
    let missing = fixture.home_path().join("nope.json");
    let err = open_profiles(&missing, ProfileFormat::People).err().unwrap();
    assert!(matches!(err, DatasourceError::Io { .. }));
}

#[test]
fn wrong_explicit_format_fails() {
    let fixture = TestFixture::new().unwrap();
    let people = fixture.write_people(&[(1, Some(&["Rust"]))]).unwrap();
    let err = open_profiles(&people, ProfileFormat::Map).err().unwrap();
    assert!(matches!(err, DatasourceError::SkillMap { .. }));
}
